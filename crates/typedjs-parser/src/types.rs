//! Type annotation parsing

use super::*;

impl Parser {
    pub(crate) fn parse_type(&mut self) -> ParseResult<Node<Type>> {
        self.parse_union_type()
    }

    pub(crate) fn parse_union_type(&mut self) -> ParseResult<Node<Type>> {
        let start = self.current_token().span;
        // leading `|` of a multi-line union
        self.eat(TokenKind::Pipe);
        let mut types = vec![self.parse_intersection_type()?];

        while self.eat(TokenKind::Pipe) {
            types.push(self.parse_intersection_type()?);
        }

        Ok(self.collapse(types, start, Type::Union))
    }

    pub(crate) fn parse_intersection_type(&mut self) -> ParseResult<Node<Type>> {
        let start = self.current_token().span;
        self.eat(TokenKind::Amp);
        let mut types = vec![self.parse_primary_type()?];

        while self.eat(TokenKind::Amp) {
            types.push(self.parse_primary_type()?);
        }

        Ok(self.collapse(types, start, Type::Intersection))
    }

    fn collapse(
        &self,
        mut types: Vec<Node<Type>>,
        start: Span,
        combine: fn(Vec<Node<Type>>) -> Type,
    ) -> Node<Type> {
        if types.len() == 1 {
            if let Some(only) = types.pop() {
                return only;
            }
        }
        let span = start.merge(&self.previous_token().span);
        Node::new(combine(types), span)
    }

    pub(crate) fn parse_primary_type(&mut self) -> ParseResult<Node<Type>> {
        self.nested(Self::parse_primary_type_inner)
    }

    fn parse_primary_type_inner(&mut self) -> ParseResult<Node<Type>> {
        let start = self.current_token().span;

        // `readonly string[]` reads the same as `string[]` here
        if self.check_contextual("readonly")
            && !matches!(self.peek_kind(1), Some(TokenKind::Pipe | TokenKind::Amp | TokenKind::Comma))
        {
            self.advance();
        }

        let mut ty = self.parse_base_type()?;

        // Array suffix and indexed access types
        while self.check(&TokenKind::LBracket) {
            if self.peek_kind(1) == Some(TokenKind::RBracket) {
                // Array type: T[]
                self.advance();
                self.advance();
                let span = start.merge(&self.previous_token().span);
                ty = Node::new(Type::Array(Box::new(ty)), span);
            } else {
                // Indexed access type: T[K]
                self.advance();
                let index = Box::new(self.parse_type()?);
                self.consume(TokenKind::RBracket)?;
                let span = start.merge(&self.previous_token().span);
                ty = Node::new(
                    Type::Indexed {
                        object: Box::new(ty),
                        index,
                    },
                    span,
                );
            }
        }

        Ok(ty)
    }

    pub(crate) fn parse_base_type(&mut self) -> ParseResult<Node<Type>> {
        let start = self.current_token().span;

        let ty = match self.current_token().kind {
            // keyof type: keyof T
            TokenKind::Identifier if self.check_contextual("keyof") => {
                self.advance();
                Type::KeyOf(Box::new(self.parse_primary_type()?))
            }

            // Primitive keywords and type references
            TokenKind::Identifier => {
                let primitive = PrimitiveType::from_keyword(&self.current_token().value)
                    .filter(|_| self.peek_kind(1) != Some(TokenKind::Dot));

                if let Some(prim) = primitive {
                    self.advance();
                    Type::Primitive(prim)
                } else {
                    let name = self.parse_qualified_name()?;
                    let args = self.parse_type_arguments()?;
                    Type::Reference { name, args }
                }
            }

            // Keyword types that the lexer tokenizes as keywords, not identifiers
            TokenKind::Void => {
                self.advance();
                Type::Primitive(PrimitiveType::Void)
            }
            TokenKind::Null => {
                self.advance();
                Type::Primitive(PrimitiveType::Null)
            }
            TokenKind::Undefined => {
                self.advance();
                Type::Primitive(PrimitiveType::Undefined)
            }
            TokenKind::This => {
                let token = self.advance();
                Type::Reference {
                    name: Node::new(Ident::new("this"), token.span),
                    args: Vec::new(),
                }
            }

            // Function type or parenthesized type
            TokenKind::LParen => {
                if let Some(function) = self.speculate(|p| p.parse_function_type().map(Some)) {
                    Type::Function(function)
                } else {
                    self.advance();
                    let inner = Box::new(self.parse_type()?);
                    self.consume(TokenKind::RParen)?;
                    Type::Paren(inner)
                }
            }

            // Generic function type: <T>(value: T) => T
            TokenKind::Lt => {
                self.parse_type_parameters()?;
                Type::Function(self.parse_function_type()?)
            }

            // Constructor type: new (...) => T
            TokenKind::New => {
                self.advance();
                self.parse_type_parameters()?;
                Type::Function(self.parse_function_type()?)
            }

            // Object type
            TokenKind::LBrace => {
                self.advance();
                let body = self.parse_object_type_body()?;
                self.consume(TokenKind::RBrace)?;
                Type::Object(body)
            }

            // Tuple type
            TokenKind::LBracket => {
                self.advance();
                let mut types = Vec::new();

                while !self.check(&TokenKind::RBracket) && !self.is_at_end() {
                    types.push(self.parse_tuple_element()?);
                    if !self.check(&TokenKind::RBracket) {
                        self.consume(TokenKind::Comma)?;
                    }
                }

                self.consume(TokenKind::RBracket)?;
                Type::Tuple(types)
            }

            // Literal types
            TokenKind::StringLiteral => {
                let value = self.advance().value.clone();
                Type::Literal(LiteralType::String(value))
            }
            TokenKind::TemplateLiteral if !self.current_token().value.contains("${") => {
                let value = unescape(&self.advance().value);
                Type::Literal(LiteralType::String(value))
            }
            TokenKind::NumberLiteral => {
                let value = self.advance().value.clone();
                Type::Literal(LiteralType::Number(number_value(&value)))
            }
            TokenKind::BigIntLiteral => {
                let value = self.advance().value.clone();
                Type::Literal(LiteralType::BigInt(bigint_digits(&value)))
            }
            // Negative numeric literal types: -1, -10n
            TokenKind::Minus => {
                self.advance();
                match self.current_token().kind {
                    TokenKind::NumberLiteral => {
                        let value = self.advance().value.clone();
                        Type::Literal(LiteralType::Number(-number_value(&value)))
                    }
                    TokenKind::BigIntLiteral => {
                        let value = self.advance().value.clone();
                        Type::Literal(LiteralType::BigInt(format!("-{}", bigint_digits(&value))))
                    }
                    kind => {
                        return Err(self.error(format!("Expected numeric literal type, found {:?}", kind)));
                    }
                }
            }
            TokenKind::True => {
                self.advance();
                Type::Literal(LiteralType::Boolean(true))
            }
            TokenKind::False => {
                self.advance();
                Type::Literal(LiteralType::Boolean(false))
            }

            // typeof in type position: typeof someVar
            TokenKind::Typeof => {
                self.advance();
                Type::Query(self.parse_qualified_name()?)
            }

            _ => {
                return Err(self.error(format!(
                    "Expected type, found {:?}",
                    self.current_token().kind
                )))
            }
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(ty, span))
    }

    /// Dotted type name such as `Express.Request`, kept as one identifier
    fn parse_qualified_name(&mut self) -> ParseResult<Node<Ident>> {
        let first = self.parse_identifier()?;
        let mut name = first.value.name;
        let mut span = first.span;

        while self.check(&TokenKind::Dot) {
            self.advance();
            let part = self.parse_identifier_name()?;
            name.push('.');
            name.push_str(&part.value.name);
            span = span.merge(&part.span);
        }

        Ok(Node::new(Ident::new(name), span))
    }

    /// Tuple member: `T`, `T?`, `...T[]` or a labelled `name: T`
    fn parse_tuple_element(&mut self) -> ParseResult<Node<Type>> {
        self.eat(TokenKind::DotDotDot);

        let labelled = self.check(&TokenKind::Identifier)
            && matches!(self.peek_kind(1), Some(TokenKind::Colon))
            || (self.check(&TokenKind::Identifier)
                && self.peek_kind(1) == Some(TokenKind::Question)
                && self.peek_kind(2) == Some(TokenKind::Colon));
        if labelled {
            self.advance();
            self.eat(TokenKind::Question);
            self.consume(TokenKind::Colon)?;
        }

        let ty = self.parse_type()?;
        self.eat(TokenKind::Question);
        Ok(ty)
    }

    /// `(params) => Return`, starting at the opening parenthesis
    fn parse_function_type(&mut self) -> ParseResult<FunctionType> {
        self.consume(TokenKind::LParen)?;
        let params = self.parse_function_type_params()?;
        self.consume(TokenKind::RParen)?;
        self.consume(TokenKind::FatArrow)?;
        let return_type = Box::new(self.parse_type()?);

        Ok(FunctionType {
            params,
            return_type,
        })
    }

    /// Members of an interface body or object type, up to the closing brace
    pub(crate) fn parse_object_type_body(&mut self) -> ParseResult<ObjectType> {
        let mut body = ObjectType::default();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if let Some(member) = self.parse_type_member()? {
                body.members.push(member);
            }
            if !self.eat(TokenKind::Semicolon) {
                self.eat(TokenKind::Comma);
            }
        }

        Ok(body)
    }

    /// One member; call and construct signatures are skipped and yield `None`
    fn parse_type_member(&mut self) -> ParseResult<Option<TypeMember>> {
        let construct = self.check(&TokenKind::New)
            && matches!(self.peek_kind(1), Some(TokenKind::LParen | TokenKind::Lt));
        if construct {
            self.advance();
        }
        if construct || self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
            self.parse_signature_tail()?;
            return Ok(None);
        }

        let readonly = self.check_contextual("readonly") && self.is_property_name_start(1);
        if readonly {
            self.advance();
        }

        if self.is_index_signature_start() {
            let (param, key, value) = self.parse_index_signature()?;
            return Ok(Some(TypeMember::Index { param, key, value }));
        }

        let key = self.parse_property_name()?;
        let optional = self.eat(TokenKind::Question);

        if !self.check(&TokenKind::LParen) && !self.check(&TokenKind::Lt) {
            self.consume(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            return Ok(Some(TypeMember::Property {
                key,
                ty,
                optional,
                readonly,
            }));
        }

        self.parse_type_parameters()?;
        self.consume(TokenKind::LParen)?;
        let params = self.parse_function_type_params()?;
        self.consume(TokenKind::RParen)?;
        let return_type = self.parse_annotation()?;

        Ok(Some(TypeMember::Method {
            key,
            params,
            return_type,
            optional,
        }))
    }

    pub(crate) fn is_index_signature_start(&self) -> bool {
        self.check(&TokenKind::LBracket)
            && self.peek_kind(1) == Some(TokenKind::Identifier)
            && self.peek_kind(2) == Some(TokenKind::Colon)
    }

    /// `[param: K]: V`
    pub(crate) fn parse_index_signature(&mut self) -> ParseResult<(Node<Ident>, Node<Type>, Node<Type>)> {
        self.consume(TokenKind::LBracket)?;
        let param = self.parse_identifier()?;
        self.consume(TokenKind::Colon)?;
        let key = self.parse_type()?;
        self.consume(TokenKind::RBracket)?;
        self.consume(TokenKind::Colon)?;
        let value = self.parse_type()?;
        Ok((param, key, value))
    }

    fn parse_signature_tail(&mut self) -> ParseResult<()> {
        self.parse_type_parameters()?;
        self.consume(TokenKind::LParen)?;
        self.parse_function_type_params()?;
        self.consume(TokenKind::RParen)?;
        self.parse_annotation()?;
        Ok(())
    }

    pub(crate) fn parse_function_type_params(&mut self) -> ParseResult<Vec<FunctionTypeParam>> {
        let mut params = Vec::new();

        while !self.check(&TokenKind::RParen) && !self.is_at_end() {
            let is_rest = self.eat(TokenKind::DotDotDot);

            let named = (self.check(&TokenKind::Identifier) || self.check(&TokenKind::This))
                && matches!(self.peek_kind(1), Some(TokenKind::Colon | TokenKind::Question));
            let (name, optional) = if named {
                let token = self.advance();
                let name = Node::new(Ident::new(token.value.clone()), token.span);
                let optional = self.eat(TokenKind::Question);
                self.consume(TokenKind::Colon)?;
                (Some(name), optional)
            } else if self.check(&TokenKind::LBrace) || self.check(&TokenKind::LBracket) {
                // destructured parameter: ({ a, b }: Props) => void
                self.parse_binding_target()?;
                let optional = self.eat(TokenKind::Question);
                self.consume(TokenKind::Colon)?;
                (None, optional)
            } else {
                (None, false)
            };

            let ty = self.parse_type()?;

            params.push(FunctionTypeParam {
                name,
                ty,
                optional,
                is_rest,
            });

            if !self.check(&TokenKind::RParen) {
                self.consume(TokenKind::Comma)?;
            }
        }

        Ok(params)
    }

    /// `<T, U extends X = Y>`; only the names are kept
    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<Vec<Node<Ident>>> {
        if !self.eat(TokenKind::Lt) {
            return Ok(Vec::new());
        }

        let mut params = Vec::new();

        while !self.check(&TokenKind::Gt) && !self.is_at_end() {
            // variance and const modifiers: <in out T>, <const T>
            while (self.check(&TokenKind::In) || self.check(&TokenKind::Const) || self.check_contextual("out"))
                && self.peek_kind(1) == Some(TokenKind::Identifier)
            {
                self.advance();
            }

            params.push(self.parse_identifier()?);

            if self.eat(TokenKind::Extends) {
                self.parse_type()?;
            }
            if self.eat(TokenKind::Eq) {
                self.parse_type()?;
            }

            if !self.check(&TokenKind::Gt) {
                self.consume(TokenKind::Comma)?;
            }
        }

        self.consume_type_close()?;
        Ok(params)
    }

    /// `<A, B>` after a type name; empty when there is no argument list
    pub(crate) fn parse_type_arguments(&mut self) -> ParseResult<Vec<Node<Type>>> {
        let mut args = Vec::new();
        if !self.eat(TokenKind::Lt) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_type()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.consume_type_close()?;
        Ok(args)
    }
}
