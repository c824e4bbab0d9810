//! Helper methods and utilities

use super::*;

impl Parser {
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Node<Ident>> {
        let token = self.consume(TokenKind::Identifier)?;
        Ok(Node::new(Ident::new(token.value.clone()), token.span))
    }

    /// Identifier in a position where reserved words are allowed too
    /// (`obj.default`, `{ new: 1 }`, `import { default as x }`)
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Node<Ident>> {
        let kind = self.current_token().kind;
        if kind == TokenKind::Identifier || kind.is_keyword() {
            let token = self.advance();
            Ok(Node::new(Ident::new(token.value.clone()), token.span))
        } else {
            Err(self.error(format!("Expected identifier, found {:?}", kind)))
        }
    }

    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropertyName> {
        match self.current_token().kind {
            TokenKind::StringLiteral => {
                let value = self.advance().value.clone();
                Ok(PropertyName::String(value))
            }
            TokenKind::NumberLiteral => {
                let value = self.advance().value.clone();
                Ok(PropertyName::Number(number_value(&value)))
            }
            TokenKind::BigIntLiteral => {
                let value = self.advance().value.clone();
                Ok(PropertyName::String(bigint_digits(&value)))
            }
            TokenKind::LBracket => {
                self.advance();
                let expr = Box::new(self.parse_expression()?);
                self.consume(TokenKind::RBracket)?;
                Ok(PropertyName::Computed(expr))
            }
            _ => {
                let ident = self
                    .parse_identifier_name()
                    .map_err(|_| self.error("Expected property name".to_string()))?;
                Ok(PropertyName::Ident(ident))
            }
        }
    }

    /// Whether the token at `offset` can begin a property name
    pub(crate) fn is_property_name_start(&self, offset: usize) -> bool {
        matches!(
            self.peek_kind(offset),
            Some(kind) if kind == TokenKind::Identifier
                || kind.is_keyword()
                || matches!(
                    kind,
                    TokenKind::StringLiteral
                        | TokenKind::NumberLiteral
                        | TokenKind::BigIntLiteral
                        | TokenKind::LBracket
                )
        )
    }

    pub(crate) fn parse_function_params(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();

        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            params.push(self.parse_function_param()?);
            if !self.check(&TokenKind::RParen) {
                self.consume(TokenKind::Comma)?;
            }
        }

        Ok(params)
    }

    pub(crate) fn parse_function_param(&mut self) -> ParseResult<Param> {
        // parameter properties: `private readonly name: string`
        while matches!(
            self.current_token().kind,
            TokenKind::Public | TokenKind::Private | TokenKind::Protected
        ) || (self.check_contextual("readonly") && self.is_property_name_start(1))
        {
            self.advance();
        }

        let is_rest = self.eat(TokenKind::DotDotDot);
        let target = self.parse_binding_target()?;
        let optional = self.eat(TokenKind::Question);
        let annotation = self.parse_annotation()?;
        let default = if self.eat(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Param {
            target,
            annotation,
            default,
            optional,
            is_rest,
        })
    }

    /// `: Type` after a binding, parameter, field or parameter list
    pub(crate) fn parse_annotation(&mut self) -> ParseResult<Option<Node<Type>>> {
        if self.eat(TokenKind::Colon) {
            self.parse_type().map(Some)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn parse_call_arguments(&mut self) -> ParseResult<Vec<Node<Expr>>> {
        self.consume(TokenKind::LParen)?;
        let mut args = Vec::new();

        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            args.push(self.parse_expression()?);
            if !self.check(&TokenKind::RParen) {
                self.consume(TokenKind::Comma)?;
            }
        }

        self.consume(TokenKind::RParen)?;
        Ok(args)
    }

    /// `let`/`const`/`var` followed by its declarators, without the
    /// terminating semicolon (for-loop heads share this)
    pub(crate) fn parse_binding_list(&mut self) -> ParseResult<BindingList> {
        let kind = match self.current_token().kind {
            TokenKind::Let => BindingKind::Let,
            TokenKind::Const => BindingKind::Const,
            TokenKind::Var => BindingKind::Var,
            kind => return Err(self.error(format!("Expected let, const or var, found {:?}", kind))),
        };
        self.advance();

        let mut bindings = Vec::new();
        loop {
            let target = self.parse_binding_target()?;
            // definite assignment: `let x!: number;`
            self.eat(TokenKind::Bang);
            let annotation = self.parse_annotation()?;
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            bindings.push(Binding {
                target,
                annotation,
                init,
            });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(BindingList { kind, bindings })
    }

    // =========================================================================
    // Operator Precedence
    // =========================================================================

    /// Binding power of the current token as an infix or postfix operator
    pub(crate) fn infix_binding_power(&self) -> u8 {
        let kind = self.current_token().kind;
        if assignment_operator(kind).is_some() {
            return bp::ASSIGN;
        }
        if let Some((_, power)) = binary_operator(kind) {
            return power;
        }

        match kind {
            TokenKind::Question => bp::CONDITIONAL,
            TokenKind::Identifier if self.check_contextual("as") || self.check_contextual("satisfies") => {
                bp::RELATIONAL
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => bp::POSTFIX,
            TokenKind::Dot
            | TokenKind::QuestionDot
            | TokenKind::LBracket
            | TokenKind::LParen
            | TokenKind::TemplateLiteral => bp::CALL,
            _ => bp::NONE,
        }
    }

    // =========================================================================
    // Utility Methods (Token Manipulation)
    // =========================================================================

    pub(crate) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous_token(&self) -> &Token {
        &self.tokens[(self.current.saturating_sub(1)).min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous_token()
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.current_token().kind == kind
    }

    /// Current token is the identifier `word` (contextual keywords)
    pub(crate) fn check_contextual(&self, word: &str) -> bool {
        self.check(&TokenKind::Identifier) && self.current_token().value == word
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.current + offset).map(|token| token.kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.current_token().kind == TokenKind::Eof
    }

    /// Advances past `kind` if it is next
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_contextual(&mut self, word: &str) -> bool {
        if self.check_contextual(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> ParseResult<&Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {:?}, found {:?}", kind, self.current_token().kind)))
        }
    }

    pub(crate) fn consume_contextual(&mut self, word: &str) -> ParseResult<()> {
        if self.eat_contextual(word) {
            Ok(())
        } else {
            Err(self.error(format!("Expected '{}', found {:?}", word, self.current_token().kind)))
        }
    }

    pub(crate) fn consume_semicolon(&mut self) {
        self.eat(TokenKind::Semicolon);
    }

    /// Closes a type argument list, splitting `>>`, `>>>` and `>=` style tokens
    /// so that `Map<string, Array<number>>` closes both lists.
    pub(crate) fn consume_type_close(&mut self) -> ParseResult<()> {
        let token = self.current_token().clone();
        let rest = match token.kind {
            TokenKind::Gt => return self.consume(TokenKind::Gt).map(|_| ()),
            TokenKind::GtGt => TokenKind::Gt,
            TokenKind::GtGtGt => TokenKind::GtGt,
            TokenKind::GtEq => TokenKind::Eq,
            TokenKind::GtGtEq => TokenKind::GtEq,
            _ => {
                return Err(self.error(format!("Expected Gt, found {:?}", token.kind)));
            }
        };

        let split = token.span.start + 1;
        self.tokens[self.current] = Token {
            kind: TokenKind::Gt,
            span: Span::new(token.span.start, split),
            value: ">".to_string(),
        };
        self.tokens.insert(
            self.current + 1,
            Token {
                kind: rest,
                span: Span::new(split, token.span.end),
                value: token.value[1..].to_string(),
            },
        );
        self.advance();
        Ok(())
    }

    /// Runs `attempt` and rewinds to the current token when it fails or
    /// declines with `Ok(None)`.
    pub(crate) fn speculate<T>(
        &mut self,
        attempt: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
    ) -> Option<T> {
        let checkpoint = self.current;
        match attempt(self) {
            Ok(Some(value)) => Some(value),
            _ => {
                self.current = checkpoint;
                None
            }
        }
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            span: self.current_token().span,
        }
    }

    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous_token().kind == TokenKind::Semicolon {
                return;
            }

            match self.current_token().kind {
                TokenKind::Class
                | TokenKind::Function
                | TokenKind::Interface
                | TokenKind::Enum
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::Export => return,
                _ => {}
            }

            self.advance();
        }
    }
}

/// Numeric value of a number token, including `0x`/`0o`/`0b` forms
pub(crate) fn number_value(text: &str) -> f64 {
    match radix_of(text) {
        Some(radix) => text[2..]
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64),
        None => text.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Decimal digits of a bigint token
pub(crate) fn bigint_digits(text: &str) -> String {
    match radix_of(text) {
        Some(radix) => u128::from_str_radix(&text[2..], radix)
            .map(|value| value.to_string())
            .unwrap_or_else(|_| text.to_string()),
        None => text.to_string(),
    }
}

fn radix_of(text: &str) -> Option<u32> {
    match text.get(..2) {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    }
}
