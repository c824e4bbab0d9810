//! Statement traversal

use typedjs_ast::{Block, ForInit, LoopHead, Stmt};

use crate::checker::Checker;
use crate::stack::ensure_sufficient_stack;

impl Checker<'_> {
    pub(crate) fn check_stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| self.check_stmt_inner(stmt))
    }

    fn check_stmt_inner(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) | Stmt::Throw(expr) => self.check_expr(expr),
            Stmt::Decl(decl) => self.check_decl(&decl.value),
            Stmt::Block(block) => self.check_block(block),
            Stmt::Return(argument) => {
                if let Some(argument) = argument {
                    self.check_expr(argument);
                }
            }
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.check_expr(test);
                self.check_stmt(&consequent.value);
                if let Some(alternate) = alternate {
                    self.check_stmt(&alternate.value);
                }
            }
            Stmt::Loop(lp) => {
                match &lp.head {
                    LoopHead::For { init, test, update } => {
                        match init {
                            Some(ForInit::Bindings(list)) => self.check_bindings(list),
                            Some(ForInit::Expr(expr)) => self.check_expr(expr),
                            None => {}
                        }
                        for expr in test.iter().chain(update) {
                            self.check_expr(expr);
                        }
                    }
                    // loop variables take their values from `right`, never from an initializer
                    LoopHead::ForIn { right, .. } | LoopHead::ForOf { right, .. } => self.check_expr(right),
                    LoopHead::While(test) | LoopHead::DoWhile(test) => self.check_expr(test),
                }
                self.check_stmt(&lp.body.value);
            }
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                self.check_expr(discriminant);
                for case in cases {
                    if let Some(test) = &case.test {
                        self.check_expr(test);
                    }
                    for stmt in &case.body {
                        self.check_stmt(&stmt.value);
                    }
                }
            }
            Stmt::Try(try_stmt) => {
                self.check_block(&try_stmt.block.value);
                if let Some(handler) = &try_stmt.handler {
                    self.check_block(&handler.body.value);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.check_block(&finalizer.value);
                }
            }
            Stmt::Labeled { body, .. } => self.check_stmt(&body.value),
            Stmt::Jump { .. } | Stmt::Debugger | Stmt::Empty => {}
        }
    }

    pub(crate) fn check_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(&stmt.value);
        }
    }
}
