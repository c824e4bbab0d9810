//! Expression traversal, reaching function and class bodies nested in values

use typedjs_ast::{ArrowBody, Expr, Node, ObjectProperty};

use crate::checker::Checker;
use crate::stack::ensure_sufficient_stack;

impl Checker<'_> {
    pub(crate) fn check_expr(&mut self, expr: &Node<Expr>) {
        ensure_sufficient_stack(|| self.check_expr_inner(expr))
    }

    fn check_expr_inner(&mut self, expr: &Node<Expr>) {
        match &expr.value {
            Expr::Literal(_) | Expr::Ident(_) | Expr::This | Expr::Super => {}
            Expr::Template { exprs, .. } | Expr::Sequence(exprs) => {
                for expr in exprs {
                    self.check_expr(expr);
                }
            }
            Expr::Array(elements) => {
                for element in elements.iter().flatten() {
                    self.check_expr(element);
                }
            }
            Expr::Object(props) => {
                for prop in props {
                    match &prop.value {
                        ObjectProperty::Property { value, .. } | ObjectProperty::Spread(value) => {
                            self.check_expr(value)
                        }
                        ObjectProperty::Method { function, .. } => self.check_function(function),
                    }
                }
            }
            Expr::Function(function) => self.check_function(function),
            Expr::Arrow(arrow) => {
                self.check_params(&arrow.params);
                match &arrow.body {
                    ArrowBody::Expr(expr) => self.check_expr(expr),
                    ArrowBody::Block(block) => self.check_block(&block.value),
                }
            }
            Expr::Class(class) => self.check_class(class),
            Expr::Unary { expr, .. }
            | Expr::Update { expr, .. }
            | Expr::As { expr, .. }
            | Expr::Await(expr)
            | Expr::Spread(expr)
            | Expr::Paren(expr) => self.check_expr(expr),
            Expr::Binary { left, right, .. } => {
                self.check_expr(left);
                self.check_expr(right);
            }
            Expr::Assignment { target, value, .. } => {
                self.check_expr(target);
                self.check_expr(value);
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.check_expr(test);
                self.check_expr(consequent);
                self.check_expr(alternate);
            }
            Expr::Member { object, .. } => self.check_expr(object),
            Expr::Index { object, index, .. } => {
                self.check_expr(object);
                self.check_expr(index);
            }
            Expr::Call { callee, args, .. } | Expr::New { callee, args } => {
                self.check_expr(callee);
                for arg in args {
                    self.check_expr(arg);
                }
            }
            Expr::Yield { argument, .. } => {
                if let Some(argument) = argument {
                    self.check_expr(argument);
                }
            }
        }
    }
}
