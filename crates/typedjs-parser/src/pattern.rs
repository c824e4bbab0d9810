//! Destructuring patterns

use super::*;

impl Parser {
    /// Identifier, array or object pattern
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<Node<Pattern>> {
        self.nested(Self::parse_binding_target_inner)
    }

    fn parse_binding_target_inner(&mut self) -> ParseResult<Node<Pattern>> {
        let start = self.current_token().span;

        let pattern = match self.current_token().kind {
            TokenKind::LBracket => self.parse_array_pattern()?,
            TokenKind::LBrace => self.parse_object_pattern()?,
            TokenKind::Identifier => Pattern::Ident(self.parse_identifier()?.value),
            // `this` parameter: function f(this: Window)
            TokenKind::This => {
                self.advance();
                Pattern::Ident(Ident::new("this"))
            }
            kind => return Err(self.error(format!("Expected pattern, found {:?}", kind))),
        };

        Ok(Node::new(pattern, start.merge(&self.previous_token().span)))
    }

    /// Nested target, optionally followed by `= default`
    fn parse_element_pattern(&mut self) -> ParseResult<Node<Pattern>> {
        let target = self.parse_binding_target()?;
        self.parse_pattern_default(target)
    }

    fn parse_pattern_default(&mut self, target: Node<Pattern>) -> ParseResult<Node<Pattern>> {
        if !self.eat(TokenKind::Eq) {
            return Ok(target);
        }

        let value = self.parse_expression()?;
        let span = target.span.merge(&value.span);
        Ok(Node::new(
            Pattern::Default {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_array_pattern(&mut self) -> ParseResult<Pattern> {
        self.consume(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RBracket) && !self.is_at_end() {
            if self.eat(TokenKind::DotDotDot) {
                rest = Some(Box::new(self.parse_binding_target()?));
                break;
            }
            if self.eat(TokenKind::Comma) {
                elements.push(None);
                continue;
            }

            elements.push(Some(self.parse_element_pattern()?));
            if !self.check(&TokenKind::RBracket) {
                self.consume(TokenKind::Comma)?;
            }
        }

        self.consume(TokenKind::RBracket)?;
        Ok(Pattern::Array { elements, rest })
    }

    fn parse_object_pattern(&mut self) -> ParseResult<Pattern> {
        self.consume(TokenKind::LBrace)?;
        let mut properties = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.eat(TokenKind::DotDotDot) {
                rest = Some(Box::new(self.parse_binding_target()?));
                break;
            }

            let key = self.parse_property_name()?;
            let shorthand = !self.eat(TokenKind::Colon);

            let value = if !shorthand {
                self.parse_element_pattern()?
            } else if let PropertyName::Ident(ident) = &key {
                // `{ name }` or `{ name = "default" }`
                let target = Node::new(Pattern::Ident(ident.value.clone()), ident.span);
                self.parse_pattern_default(target)?
            } else {
                return Err(self.error("Invalid object pattern shorthand".to_string()));
            };

            properties.push(PatternProperty {
                key,
                value,
                shorthand,
            });

            if !self.check(&TokenKind::RBrace) {
                self.consume(TokenKind::Comma)?;
            }
        }

        self.consume(TokenKind::RBrace)?;
        Ok(Pattern::Object { properties, rest })
    }
}
