//! Declaration parsing

use super::*;

impl Parser {
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Node<Decl>> {
        let start = self.current_token().span;

        // Ambient `declare` adds nothing the checker needs
        if self.check_contextual("declare") && self.peek_kind(1) != Some(TokenKind::Eq) {
            self.advance();
        }

        let decl = match self.current_token().kind {
            TokenKind::Const | TokenKind::Let | TokenKind::Var
                if self.peek_kind(1) != Some(TokenKind::Enum) =>
            {
                let bindings = self.parse_binding_list()?;
                self.consume_semicolon();
                Decl::Bindings(bindings)
            }
            TokenKind::Function => Decl::Function(self.parse_function(true)?),
            TokenKind::Class => Decl::Class(self.parse_class(true)?),
            TokenKind::Interface => Decl::Interface(self.parse_interface()?),
            TokenKind::Enum | TokenKind::Const => Decl::Enum(self.parse_enum()?),
            TokenKind::Identifier if self.check_contextual("async") => Decl::Function(self.parse_function(true)?),
            TokenKind::Identifier if self.check_contextual("abstract") => Decl::Class(self.parse_class(true)?),
            TokenKind::Identifier if self.check_contextual("type") => Decl::TypeAlias(self.parse_type_alias()?),
            kind => return Err(self.error(format!("Expected declaration, found {:?}", kind))),
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(decl, span))
    }

    /// `async? function* name(params): R { body }`. Expressions may omit the
    /// name; declarations without a body are overloads or ambient.
    pub(crate) fn parse_function(&mut self, require_name: bool) -> ParseResult<Function> {
        let is_async = self.eat_contextual("async");
        self.consume(TokenKind::Function)?;
        let is_generator = self.eat(TokenKind::Star);

        let name = if require_name || self.check(&TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        self.parse_callable(name, is_async, is_generator)
    }

    /// Type parameters, parameter list, return annotation and optional body
    /// of a function or method, starting after its name
    pub(crate) fn parse_callable(
        &mut self,
        name: Option<Node<Ident>>,
        is_async: bool,
        is_generator: bool,
    ) -> ParseResult<Function> {
        self.parse_type_parameters()?;
        self.consume(TokenKind::LParen)?;
        let params = self.parse_function_params()?;
        self.consume(TokenKind::RParen)?;
        let return_type = self.parse_annotation()?;

        let body = if self.check(&TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume_semicolon();
            None
        };

        Ok(Function {
            name,
            params,
            return_type,
            body,
            is_async,
            is_generator,
        })
    }

    /// Class declaration or expression; only declarations require a name
    pub(crate) fn parse_class(&mut self, require_name: bool) -> ParseResult<Class> {
        let is_abstract = self.eat_contextual("abstract");
        self.consume(TokenKind::Class)?;

        let name = if require_name || self.check(&TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.parse_type_parameters()?;

        let heritage = if self.eat(TokenKind::Extends) {
            let base = self.parse_expression_with_precedence(bp::CALL)?;
            // `extends Base<T>`
            if self.check(&TokenKind::Lt) {
                self.parse_type_arguments()?;
            }
            Some(base)
        } else {
            None
        };

        let implements = if self.eat(TokenKind::Implements) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        self.consume(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if let Some(member) = self.parse_class_member()? {
                members.push(member);
            }
        }
        self.consume(TokenKind::RBrace)?;

        Ok(Class {
            name,
            heritage,
            implements,
            members,
            is_abstract,
        })
    }

    /// Comma-separated types after `extends` or `implements`
    fn parse_type_list(&mut self) -> ParseResult<Vec<Node<Type>>> {
        let mut types = vec![self.parse_type()?];
        while self.eat(TokenKind::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// One class member; index signatures are skipped and yield `None`
    pub(crate) fn parse_class_member(&mut self) -> ParseResult<Option<ClassMember>> {
        if self.check(&TokenKind::Static) && self.peek_kind(1) == Some(TokenKind::LBrace) {
            self.advance();
            return Ok(Some(ClassMember::StaticBlock(self.parse_block()?)));
        }

        let modifiers = self.parse_modifiers();

        if self.check_contextual("constructor") && self.peek_kind(1) == Some(TokenKind::LParen) {
            self.advance();
            let function = self.parse_callable(None, false, false)?;
            return Ok(Some(ClassMember::Constructor {
                params: function.params,
                body: function.body,
            }));
        }

        if self.is_index_signature_start() {
            self.parse_index_signature()?;
            self.consume_semicolon();
            return Ok(None);
        }

        let (kind, is_async, is_generator) = self.parse_method_prefix();
        let key = self.parse_property_name()?;
        let optional = self.eat(TokenKind::Question);
        // definite assignment: `name!: string`
        self.eat(TokenKind::Bang);

        let is_method = kind != MethodKind::Method
            || is_async
            || is_generator
            || self.check(&TokenKind::LParen)
            || self.check(&TokenKind::Lt);
        if is_method {
            let function = self.parse_callable(None, is_async, is_generator)?;
            return Ok(Some(ClassMember::Method {
                key,
                kind,
                function,
                modifiers,
            }));
        }

        let annotation = self.parse_annotation()?;
        let init = if self.eat(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume_semicolon();

        Ok(Some(ClassMember::Field {
            key,
            annotation,
            init,
            modifiers,
            optional,
        }))
    }

    /// Leading modifier keywords. A modifier word that is not followed by a
    /// member name (`static(): void`, `readonly = 1`) is the name itself.
    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();

        while self.is_property_name_start(1) || self.peek_kind(1) == Some(TokenKind::Star) {
            match self.current_token().kind {
                TokenKind::Public => modifiers.visibility = Visibility::Public,
                TokenKind::Protected => modifiers.visibility = Visibility::Protected,
                TokenKind::Private => modifiers.visibility = Visibility::Private,
                TokenKind::Static => modifiers.is_static = true,
                TokenKind::Identifier => match self.current_token().value.as_str() {
                    "readonly" => modifiers.is_readonly = true,
                    "abstract" | "override" | "declare" | "accessor" => {}
                    _ => break,
                },
                _ => break,
            }
            self.advance();
        }

        modifiers
    }

    /// `get`/`set`, `async` and `*` in front of a method name. `get` with no
    /// name after it is a method called `get`.
    pub(crate) fn parse_method_prefix(&mut self) -> (MethodKind, bool, bool) {
        let mut kind = MethodKind::Method;
        if self.is_property_name_start(1) {
            if self.eat_contextual("get") {
                kind = MethodKind::Getter;
            } else if self.eat_contextual("set") {
                kind = MethodKind::Setter;
            }
        }

        let is_async = kind == MethodKind::Method
            && self.check_contextual("async")
            && (self.is_property_name_start(1) || self.peek_kind(1) == Some(TokenKind::Star));
        if is_async {
            self.advance();
        }
        let is_generator = self.eat(TokenKind::Star);

        (kind, is_async, is_generator)
    }

    fn parse_interface(&mut self) -> ParseResult<InterfaceDecl> {
        self.consume(TokenKind::Interface)?;
        let name = self.parse_identifier()?;
        let type_params = self.parse_type_parameters()?;
        let parents = if self.eat(TokenKind::Extends) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        self.consume(TokenKind::LBrace)?;
        let body = self.parse_object_type_body()?;
        self.consume(TokenKind::RBrace)?;

        Ok(InterfaceDecl {
            name,
            type_params,
            parents,
            body,
        })
    }

    fn parse_type_alias(&mut self) -> ParseResult<TypeAliasDecl> {
        self.consume_contextual("type")?;
        let name = self.parse_identifier()?;
        let type_params = self.parse_type_parameters()?;
        self.consume(TokenKind::Eq)?;
        let ty = self.parse_type()?;
        self.consume_semicolon();

        Ok(TypeAliasDecl {
            name,
            type_params,
            ty,
        })
    }

    fn parse_enum(&mut self) -> ParseResult<EnumDecl> {
        let is_const = self.eat(TokenKind::Const);
        self.consume(TokenKind::Enum)?;
        let name = self.parse_identifier()?;
        self.consume(TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            // quoted member: enum E { "a-b" = 1 }
            let member = if self.check(&TokenKind::StringLiteral) {
                let token = self.advance();
                Node::new(Ident::new(token.value.clone()), token.span)
            } else {
                self.parse_identifier_name()?
            };
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            members.push(EnumMember { name: member, init });

            if !self.check(&TokenKind::RBrace) {
                self.consume(TokenKind::Comma)?;
            }
        }
        self.consume(TokenKind::RBrace)?;

        Ok(EnumDecl {
            name,
            members,
            is_const,
        })
    }
}
