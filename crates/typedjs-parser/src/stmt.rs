//! Statement parsing

use super::*;

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node<Stmt>> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Node<Stmt>> {
        let start = self.current_token().span;

        let stmt = match self.current_token().kind {
            _ if self.is_declaration_start() => Stmt::Decl(self.parse_declaration()?),
            TokenKind::LBrace => Stmt::Block(self.parse_block()?.value),
            TokenKind::If => self.parse_if()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::While => {
                self.advance();
                let test = self.parse_paren_condition()?;
                let body = self.parse_statement()?;
                Stmt::Loop(Box::new(Loop {
                    head: LoopHead::While(test),
                    body,
                }))
            }
            TokenKind::Do => {
                self.advance();
                let body = self.parse_statement()?;
                self.consume(TokenKind::While)?;
                let test = self.parse_paren_condition()?;
                self.consume_semicolon();
                Stmt::Loop(Box::new(Loop {
                    head: LoopHead::DoWhile(test),
                    body,
                }))
            }
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::Try => self.parse_try()?,
            TokenKind::Return => {
                self.advance();
                let argument = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_sequence_expression()?)
                };
                self.consume_semicolon();
                Stmt::Return(argument)
            }
            TokenKind::Throw => {
                self.advance();
                let argument = self.parse_sequence_expression()?;
                self.consume_semicolon();
                Stmt::Throw(argument)
            }
            TokenKind::Break => self.parse_jump(JumpKind::Break)?,
            TokenKind::Continue => self.parse_jump(JumpKind::Continue)?,
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon();
                Stmt::Debugger
            }
            TokenKind::Semicolon => {
                self.advance();
                Stmt::Empty
            }
            TokenKind::Identifier if self.peek_kind(1) == Some(TokenKind::Colon) => {
                let label = self.parse_identifier()?;
                self.advance();
                let body = Box::new(self.parse_statement()?);
                Stmt::Labeled { label, body }
            }
            _ => {
                let expr = self.parse_sequence_expression()?;
                self.consume_semicolon();
                Stmt::Expr(expr)
            }
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(stmt, span))
    }

    /// Whether the upcoming tokens begin a declaration: bindings, functions,
    /// classes, interfaces, type aliases or enums
    pub(crate) fn is_declaration_start(&self) -> bool {
        let next = self.peek_kind(1);
        match self.current_token().kind {
            TokenKind::Function
            | TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Enum
            | TokenKind::Const
            | TokenKind::Let
            | TokenKind::Var => true,
            TokenKind::Identifier => match self.current_token().value.as_str() {
                "type" => next == Some(TokenKind::Identifier),
                "async" => next == Some(TokenKind::Function),
                "abstract" => next == Some(TokenKind::Class),
                "declare" => matches!(
                    next,
                    Some(
                        TokenKind::Function
                            | TokenKind::Class
                            | TokenKind::Interface
                            | TokenKind::Enum
                            | TokenKind::Const
                            | TokenKind::Let
                            | TokenKind::Var
                            | TokenKind::Identifier
                    )
                ),
                _ => false,
            },
            _ => false,
        }
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Node<Block>> {
        let start = self.current_token().span;
        self.consume(TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_statement()?);
        }

        self.consume(TokenKind::RBrace)?;
        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(Block { stmts }, span))
    }

    fn at_statement_end(&self) -> bool {
        self.is_at_end() || self.check(&TokenKind::Semicolon) || self.check(&TokenKind::RBrace)
    }

    /// `( expr )` around an `if`, `while` or `switch` condition
    fn parse_paren_condition(&mut self) -> ParseResult<Node<Expr>> {
        self.consume(TokenKind::LParen)?;
        let test = self.parse_sequence_expression()?;
        self.consume(TokenKind::RParen)?;
        Ok(test)
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::If)?;
        let test = self.parse_paren_condition()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::For)?;
        let is_await = self.eat(TokenKind::Await);
        self.consume(TokenKind::LParen)?;

        let head = match self.speculate(|p| p.parse_for_each_head(is_await)) {
            Some(head) => head,
            None => self.parse_for_head()?,
        };

        self.consume(TokenKind::RParen)?;
        let body = self.parse_statement()?;
        Ok(Stmt::Loop(Box::new(Loop { head, body })))
    }

    /// `left in right` / `left of right`; `None` for a three-part head
    fn parse_for_each_head(&mut self, is_await: bool) -> ParseResult<Option<LoopHead>> {
        let left = if matches!(
            self.current_token().kind,
            TokenKind::Const | TokenKind::Let | TokenKind::Var
        ) {
            ForTarget::Bindings(self.parse_binding_list()?)
        } else {
            ForTarget::Pattern(self.parse_binding_target()?)
        };

        if self.eat(TokenKind::In) {
            let right = self.parse_sequence_expression()?;
            Ok(Some(LoopHead::ForIn { left, right }))
        } else if self.eat_contextual("of") {
            let right = self.parse_expression()?;
            Ok(Some(LoopHead::ForOf {
                left,
                right,
                is_await,
            }))
        } else {
            Ok(None)
        }
    }

    fn parse_for_head(&mut self) -> ParseResult<LoopHead> {
        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if matches!(
            self.current_token().kind,
            TokenKind::Const | TokenKind::Let | TokenKind::Var
        ) {
            Some(ForInit::Bindings(self.parse_binding_list()?))
        } else {
            Some(ForInit::Expr(self.parse_sequence_expression()?))
        };
        self.consume(TokenKind::Semicolon)?;

        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_sequence_expression()?)
        };
        self.consume(TokenKind::Semicolon)?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_sequence_expression()?)
        };

        Ok(LoopHead::For { init, test, update })
    }

    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::Switch)?;
        let discriminant = self.parse_paren_condition()?;
        self.consume(TokenKind::LBrace)?;

        let mut cases = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let test = if self.eat(TokenKind::Case) {
                Some(self.parse_sequence_expression()?)
            } else if self.eat(TokenKind::Default) {
                None
            } else {
                return Err(self.error("Expected case or default in switch statement".to_string()));
            };
            self.consume(TokenKind::Colon)?;

            let mut body = Vec::new();
            while !matches!(
                self.current_token().kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                body.push(self.parse_statement()?);
            }

            cases.push(SwitchCase { test, body });
        }

        self.consume(TokenKind::RBrace)?;
        Ok(Stmt::Switch {
            discriminant,
            cases,
        })
    }

    fn parse_jump(&mut self, kind: JumpKind) -> ParseResult<Stmt> {
        self.advance();
        let label = if self.check(&TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume_semicolon();
        Ok(Stmt::Jump { kind, label })
    }

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.eat(TokenKind::Catch) {
            let (param, annotation) = if self.eat(TokenKind::LParen) {
                let param = self.parse_binding_target()?;
                let annotation = self.parse_annotation()?;
                self.consume(TokenKind::RParen)?;
                (Some(param), annotation)
            } else {
                (None, None)
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                annotation,
                body,
            })
        } else {
            None
        };

        let finalizer = if self.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error("Try statement must have catch or finally clause".to_string()));
        }

        Ok(Stmt::Try(Box::new(TryStmt {
            block,
            handler,
            finalizer,
        })))
    }
}
