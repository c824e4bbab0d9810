//! Expression parsing

use super::*;

impl Parser {
    /// Assignment-level expression (no comma operator)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node<Expr>> {
        self.parse_expression_with_precedence(bp::NONE)
    }

    /// Comma-separated expression list, used where JavaScript allows a sequence
    pub(crate) fn parse_sequence_expression(&mut self) -> ParseResult<Node<Expr>> {
        let first = self.parse_expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let start = first.span;
        let mut exprs = vec![first];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(Expr::Sequence(exprs), span))
    }

    pub(crate) fn parse_expression_with_precedence(&mut self, min_power: u8) -> ParseResult<Node<Expr>> {
        self.nested(|parser| parser.parse_expression_inner(min_power))
    }

    fn parse_expression_inner(&mut self, min_power: u8) -> ParseResult<Node<Expr>> {
        let mut left = self.parse_prefix_expression()?;

        loop {
            let power = self.infix_binding_power();
            if power == bp::NONE || power < min_power {
                break;
            }

            left = self.parse_infix_expression(left)?;
        }

        Ok(left)
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Node<Expr>> {
        let start = self.current_token().span;

        let unary_op = match self.current_token().kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::TypeOf),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };

        let expr = if let Some(op) = unary_op {
            self.advance();
            let expr = Box::new(self.parse_expression_with_precedence(bp::UNARY)?);
            Expr::Unary { op, expr }
        } else {
            match self.current_token().kind {
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.advance().kind == TokenKind::PlusPlus {
                        UpdateOp::Increment
                    } else {
                        UpdateOp::Decrement
                    };
                    let expr = Box::new(self.parse_expression_with_precedence(bp::UNARY)?);
                    Expr::Update {
                        op,
                        prefix: true,
                        expr,
                    }
                }
                TokenKind::Await => {
                    self.advance();
                    let expr = Box::new(self.parse_expression_with_precedence(bp::UNARY)?);
                    Expr::Await(expr)
                }
                TokenKind::Yield => {
                    self.advance();
                    let delegate = self.eat(TokenKind::Star);
                    // Check if there's an argument (not followed by a closing token)
                    let argument = if !matches!(
                        self.current_token().kind,
                        TokenKind::Semicolon
                            | TokenKind::RBrace
                            | TokenKind::RBracket
                            | TokenKind::RParen
                            | TokenKind::Comma
                            | TokenKind::Colon
                    ) && !self.is_at_end()
                    {
                        Some(Box::new(self.parse_expression_with_precedence(bp::ASSIGN)?))
                    } else {
                        None
                    };
                    Expr::Yield { argument, delegate }
                }
                TokenKind::DotDotDot => {
                    self.advance();
                    let expr = Box::new(self.parse_expression_with_precedence(bp::ASSIGN)?);
                    Expr::Spread(expr)
                }
                _ => return self.parse_primary_expression(),
            }
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(expr, span))
    }

    fn parse_infix_expression(&mut self, left: Node<Expr>) -> ParseResult<Node<Expr>> {
        let start = left.span;
        let kind = self.current_token().kind;

        if let Some(op) = assignment_operator(kind) {
            self.advance();
            let value = Box::new(self.parse_expression_with_precedence(bp::ASSIGN)?);
            let span = start.merge(&value.span);
            let expr = Expr::Assignment {
                target: Box::new(left),
                op,
                value,
            };
            return Ok(Node::new(expr, span));
        }

        if let Some((op, power)) = binary_operator(kind) {
            self.advance();
            // `**` groups to the right
            let min = if op == BinaryOp::Pow { power } else { power + 1 };
            let right = Box::new(self.parse_expression_with_precedence(min)?);
            let span = start.merge(&right.span);
            let expr = Expr::Binary {
                left: Box::new(left),
                op,
                right,
            };
            return Ok(Node::new(expr, span));
        }

        let expr = match kind {
            // test ? consequent : alternate
            TokenKind::Question => {
                self.advance();
                let consequent = Box::new(self.parse_expression()?);
                self.consume(TokenKind::Colon)?;
                let alternate = Box::new(self.parse_expression_with_precedence(bp::CONDITIONAL)?);
                Expr::Conditional {
                    test: Box::new(left),
                    consequent,
                    alternate,
                }
            }

            // Member access
            TokenKind::Dot => {
                self.advance();
                let property = self.parse_identifier_name()?;
                Expr::Member {
                    object: Box::new(left),
                    property,
                    optional: false,
                }
            }

            // Optional chaining
            TokenKind::QuestionDot => {
                self.advance();
                // ?.( for optional call
                if self.check(&TokenKind::LParen) {
                    let args = self.parse_call_arguments()?;
                    Expr::Call {
                        callee: Box::new(left),
                        args,
                        optional: true,
                    }
                }
                // ?.[ for optional index
                else if self.eat(TokenKind::LBracket) {
                    let index = Box::new(self.parse_sequence_expression()?);
                    self.consume(TokenKind::RBracket)?;
                    Expr::Index {
                        object: Box::new(left),
                        index,
                        optional: true,
                    }
                }
                // ?.property for optional member
                else {
                    let property = self.parse_identifier_name()?;
                    Expr::Member {
                        object: Box::new(left),
                        property,
                        optional: true,
                    }
                }
            }

            // Index access
            TokenKind::LBracket => {
                self.advance();
                let index = Box::new(self.parse_sequence_expression()?);
                self.consume(TokenKind::RBracket)?;
                Expr::Index {
                    object: Box::new(left),
                    index,
                    optional: false,
                }
            }

            // Function call
            TokenKind::LParen => {
                let args = self.parse_call_arguments()?;
                Expr::Call {
                    callee: Box::new(left),
                    args,
                    optional: false,
                }
            }

            // Tagged template: the template is passed as the only argument
            TokenKind::TemplateLiteral => {
                let template_start = self.current_token().span;
                let template = self.parse_template()?;
                let template_span = template_start.merge(&self.previous_token().span);
                Expr::Call {
                    callee: Box::new(left),
                    args: vec![Node::new(template, template_span)],
                    optional: false,
                }
            }

            // `as T`, `as const`, `satisfies T`
            TokenKind::Identifier if self.check_contextual("as") || self.check_contextual("satisfies") => {
                self.advance();
                let ty = if self.check(&TokenKind::Const) {
                    let span = self.advance().span;
                    let name = Node::new(Ident::new("const"), span);
                    Node::new(Type::Reference { name, args: Vec::new() }, span)
                } else {
                    self.parse_type()?
                };
                Expr::As {
                    expr: Box::new(left),
                    ty: Box::new(ty),
                }
            }

            // Postfix operators
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if self.advance().kind == TokenKind::PlusPlus {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                Expr::Update {
                    op,
                    prefix: false,
                    expr: Box::new(left),
                }
            }

            _ => return Ok(left),
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(expr, span))
    }

    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Node<Expr>> {
        let start = self.current_token().span;

        let expr = match self.current_token().kind {
            // Literals
            TokenKind::NumberLiteral => {
                let value = self.advance().value.clone();
                Expr::Literal(Literal::Number(number_value(&value)))
            }
            TokenKind::BigIntLiteral => {
                let value = self.advance().value.clone();
                Expr::Literal(Literal::BigInt(bigint_digits(&value)))
            }
            TokenKind::StringLiteral => {
                let value = self.advance().value.clone();
                Expr::Literal(Literal::String(value))
            }
            TokenKind::RegexLiteral => {
                let value = self.advance().value.clone();
                let close = value.rfind('/').unwrap_or(value.len());
                Expr::Literal(Literal::RegExp {
                    pattern: value.get(1..close).unwrap_or_default().to_string(),
                    flags: value.get(close + 1..).unwrap_or_default().to_string(),
                })
            }
            TokenKind::True => {
                self.advance();
                Expr::Literal(Literal::Boolean(true))
            }
            TokenKind::False => {
                self.advance();
                Expr::Literal(Literal::Boolean(false))
            }
            TokenKind::Null => {
                self.advance();
                Expr::Literal(Literal::Null)
            }
            TokenKind::Undefined => {
                self.advance();
                Expr::Literal(Literal::Undefined)
            }

            // Template literal
            TokenKind::TemplateLiteral => self.parse_template()?,

            // async function / async arrow
            TokenKind::Identifier if self.check_contextual("async") => {
                if let Some(expr) = self.parse_async_expression(start)? {
                    return Ok(expr);
                }
                let name = self.advance().value.clone();
                Expr::Ident(Ident::new(name))
            }

            // Single parameter arrow: x => x * 2
            TokenKind::Identifier if self.peek_kind(1) == Some(TokenKind::FatArrow) => {
                let param = self.parse_single_arrow_param()?;
                return self.parse_arrow_body(start, vec![param], None, false);
            }

            // Identifiers
            TokenKind::Identifier => {
                let name = self.advance().value.clone();
                Expr::Ident(Ident::new(name))
            }

            TokenKind::This => {
                self.advance();
                Expr::This
            }

            TokenKind::Super => {
                self.advance();
                Expr::Super
            }

            // import("module") and import.meta
            TokenKind::Import => {
                self.advance();
                Expr::Ident(Ident::new("import"))
            }

            // Array literal
            TokenKind::LBracket => {
                self.advance();
                let mut elements = Vec::new();

                while !self.check(&TokenKind::RBracket) && !self.is_at_end() {
                    if self.eat(TokenKind::Comma) {
                        elements.push(None);
                    } else {
                        elements.push(Some(self.parse_expression()?));
                        if !self.check(&TokenKind::RBracket) {
                            self.consume(TokenKind::Comma)?;
                        }
                    }
                }

                self.consume(TokenKind::RBracket)?;
                Expr::Array(elements)
            }

            // Object literal
            TokenKind::LBrace => {
                self.advance();
                let mut properties = Vec::new();

                while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                    properties.push(self.parse_object_member()?);

                    if !self.check(&TokenKind::RBrace) {
                        self.consume(TokenKind::Comma)?;
                    }
                }

                self.consume(TokenKind::RBrace)?;
                Expr::Object(properties)
            }

            // Parenthesized expression or arrow function
            TokenKind::LParen => {
                return self.parse_paren_or_arrow(start, false);
            }

            // Generic arrow function: <T>(value: T) => value
            TokenKind::Lt => {
                let arrow = self.speculate(|p| {
                    p.parse_type_parameters()?;
                    if !p.check(&TokenKind::LParen) {
                        return Ok(None);
                    }
                    let expr = p.parse_paren_or_arrow(start, false)?;
                    Ok(matches!(expr.value, Expr::Arrow(_)).then_some(expr))
                });
                return arrow.ok_or_else(|| self.error("Unexpected token in expression: Lt".to_string()));
            }

            // Function expression
            TokenKind::Function => Expr::Function(Box::new(self.parse_function(false)?)),

            // Class expression
            TokenKind::Class => Expr::Class(Box::new(self.parse_class(false)?)),

            // New expression
            TokenKind::New => {
                self.advance();
                let callee = Box::new(self.parse_new_callee()?);

                // new Map<string, number>()
                if self.check(&TokenKind::Lt) {
                    self.speculate(|p| p.parse_type_arguments().map(Some));
                }

                let args = if self.check(&TokenKind::LParen) {
                    self.parse_call_arguments()?
                } else {
                    Vec::new()
                };

                Expr::New { callee, args }
            }

            _ => {
                return Err(self.error(format!(
                    "Unexpected token in expression: {:?}",
                    self.current_token().kind
                )))
            }
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(expr, span))
    }

    fn parse_object_member(&mut self) -> ParseResult<Node<ObjectProperty>> {
        let start = self.current_token().span;

        if self.eat(TokenKind::DotDotDot) {
            let expr = self.parse_expression()?;
            let span = start.merge(&expr.span);
            return Ok(Node::new(ObjectProperty::Spread(expr), span));
        }

        let (kind, is_async, is_generator) = self.parse_method_prefix();
        let key = self.parse_property_name()?;

        let is_method = kind != MethodKind::Method
            || is_async
            || is_generator
            || self.check(&TokenKind::LParen)
            || self.check(&TokenKind::Lt);

        let property = if is_method {
            let function = self.parse_callable(None, is_async, is_generator)?;
            ObjectProperty::Method { key, kind, function }
        } else if self.eat(TokenKind::Colon) {
            let value = self.parse_expression()?;
            ObjectProperty::Property {
                key,
                value,
                shorthand: false,
            }
        } else if let PropertyName::Ident(ident) = &key {
            let value = Node::new(Expr::Ident(ident.value.clone()), ident.span);
            ObjectProperty::Property {
                key,
                value,
                shorthand: true,
            }
        } else {
            return Err(self.error("Invalid property shorthand".to_string()));
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(property, span))
    }

    fn parse_new_callee(&mut self) -> ParseResult<Node<Expr>> {
        let start = self.current_token().span;
        let mut callee = self.parse_primary_expression()?;

        loop {
            let expr = if self.eat(TokenKind::Dot) {
                let property = self.parse_identifier_name()?;
                Expr::Member {
                    object: Box::new(callee),
                    property,
                    optional: false,
                }
            } else if self.eat(TokenKind::LBracket) {
                let index = Box::new(self.parse_sequence_expression()?);
                self.consume(TokenKind::RBracket)?;
                Expr::Index {
                    object: Box::new(callee),
                    index,
                    optional: false,
                }
            } else {
                break;
            };
            callee = Node::new(expr, start.merge(&self.previous_token().span));
        }

        Ok(callee)
    }

    /// Splits a template token into cooked quasis and parses each `${}` substitution.
    fn parse_template(&mut self) -> ParseResult<Expr> {
        let token = self.consume(TokenKind::TemplateLiteral)?.clone();
        let raw = token.value.as_str();
        // body starts after the opening backtick
        let base = token.span.start + 1;
        let bytes = raw.as_bytes();

        let mut quasis = Vec::new();
        let mut exprs = Vec::new();
        let mut chunk_start = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'\\' => pos += 2,
                b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                    quasis.push(unescape(&raw[chunk_start..pos]));
                    let expr_start = pos + 2;
                    let (expr, end) = parse_substitution(&raw[expr_start..], base + expr_start)?;
                    exprs.push(expr);
                    pos = end - base;
                    chunk_start = pos;
                }
                _ => pos += 1,
            }
        }
        quasis.push(unescape(raw.get(chunk_start..).unwrap_or_default()));

        Ok(Expr::Template { quasis, exprs })
    }

    /// `async function`, `async x =>` and `async (...) =>`; `None` when
    /// `async` is just an identifier.
    fn parse_async_expression(&mut self, start: Span) -> ParseResult<Option<Node<Expr>>> {
        match self.peek_kind(1) {
            Some(TokenKind::Function) => {
                let function = self.parse_function(false)?;
                let span = start.merge(&self.previous_token().span);
                Ok(Some(Node::new(Expr::Function(Box::new(function)), span)))
            }
            Some(TokenKind::Identifier) if self.peek_kind(2) == Some(TokenKind::FatArrow) => {
                self.advance();
                let param = self.parse_single_arrow_param()?;
                self.parse_arrow_body(start, vec![param], None, true).map(Some)
            }
            Some(TokenKind::LParen) => {
                let checkpoint = self.current;
                self.advance();
                match self.speculate(|p| p.parse_arrow_head()) {
                    Some((params, return_type)) => {
                        self.parse_arrow_body(start, params, return_type, true).map(Some)
                    }
                    None => {
                        // async(...) is a call of a function named async
                        self.current = checkpoint;
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    fn parse_paren_or_arrow(&mut self, start: Span, is_async: bool) -> ParseResult<Node<Expr>> {
        if let Some((params, return_type)) = self.speculate(|p| p.parse_arrow_head()) {
            return self.parse_arrow_body(start, params, return_type, is_async);
        }

        self.consume(TokenKind::LParen)?;
        let expr = self.parse_sequence_expression()?;
        self.consume(TokenKind::RParen)?;

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(Expr::Paren(Box::new(expr)), span))
    }

    /// `(params): ReturnType` followed by `=>`
    fn parse_arrow_head(&mut self) -> ParseResult<Option<(Vec<Param>, Option<Node<Type>>)>> {
        self.consume(TokenKind::LParen)?;
        let params = self.parse_function_params()?;
        self.consume(TokenKind::RParen)?;
        let return_type = self.parse_annotation()?;

        Ok(self.check(&TokenKind::FatArrow).then_some((params, return_type)))
    }

    fn parse_single_arrow_param(&mut self) -> ParseResult<Param> {
        let name = self.parse_identifier()?;
        Ok(Param {
            target: Node::new(Pattern::Ident(name.value), name.span),
            annotation: None,
            default: None,
            optional: false,
            is_rest: false,
        })
    }

    fn parse_arrow_body(
        &mut self,
        start: Span,
        params: Vec<Param>,
        return_type: Option<Node<Type>>,
        is_async: bool,
    ) -> ParseResult<Node<Expr>> {
        self.consume(TokenKind::FatArrow)?;

        let body = if self.check(&TokenKind::LBrace) {
            ArrowBody::Block(self.parse_block()?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_expression()?))
        };

        let arrow = Arrow {
            params,
            return_type,
            body,
            is_async,
        };
        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(Expr::Arrow(Box::new(arrow)), span))
    }
}

/// Parses the expression of a `${` substitution whose source starts at
/// document offset `offset`; returns it with the offset just past its `}`.
fn parse_substitution(source: &str, offset: usize) -> ParseResult<(Node<Expr>, usize)> {
    let tokens = Lexer::with_offset(source, offset).tokenize();
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_sequence_expression()?;
    let close = parser.consume(TokenKind::RBrace)?.span;
    Ok((expr, close.end))
}
