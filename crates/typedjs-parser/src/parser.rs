//! Core Parser struct and main parsing methods

use super::*;

/// Deepest nesting of statements, expressions, types and patterns a
/// document may use
pub const MAX_NESTING_DEPTH: usize = 500;

/// Recursive descent parser for TypedJS
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from a token stream
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
                value: String::new(),
            });
        }
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Runs `parse` one nesting level deeper, growing the stack when it runs low
    pub(crate) fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "Nesting exceeds {} levels",
                MAX_NESTING_DEPTH
            )));
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| parse(self));
        self.depth -= 1;
        result
    }

    /// Parses a complete program
    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let start_span = self.current_token().span;
        let mut items = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            match self.parse_module_item() {
                Ok(item) => items.push(item),
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                }
            }
        }

        if errors.is_empty() {
            let end_span = items.last().map_or(start_span, |item: &Node<ModuleItem>| item.span);
            Ok(Program {
                items,
                span: start_span.merge(&end_span),
            })
        } else {
            Err(errors)
        }
    }

    /// Parses a single expression followed by end of input
    pub fn parse_standalone_expression(&mut self) -> ParseResult<Node<Expr>> {
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            return Err(self.error(format!(
                "Unexpected token after expression: {:?}",
                self.current_token().kind
            )));
        }
        Ok(expr)
    }

    // =========================================================================
    // Module Items
    // =========================================================================

    pub(crate) fn parse_module_item(&mut self) -> ParseResult<Node<ModuleItem>> {
        let start = self.current_token().span;

        let item = match self.current_token().kind {
            // `import(...)` and `import.meta` are expressions
            TokenKind::Import
                if !matches!(self.peek_kind(1), Some(TokenKind::LParen | TokenKind::Dot)) =>
            {
                ModuleItem::Import(self.parse_import()?)
            }
            TokenKind::Export => ModuleItem::Export(self.parse_export()?),
            _ => ModuleItem::Stmt(self.parse_statement()?),
        };

        let span = start.merge(&self.previous_token().span);
        Ok(Node::new(item, span))
    }

    // =========================================================================
    // Import/Export
    // =========================================================================

    pub(crate) fn parse_import(&mut self) -> ParseResult<Import> {
        self.consume(TokenKind::Import)?;

        // import type { A } from "module" / import type A from "module"
        let type_only = self.check_contextual("type")
            && (self.peek_kind(1) == Some(TokenKind::LBrace)
                || self.peek_kind(1) == Some(TokenKind::Star)
                || (self.peek_kind(1) == Some(TokenKind::Identifier)
                    && self.tokens.get(self.current + 1).map_or(false, |t| t.value != "from")));
        if type_only {
            self.advance();
        }

        let mut specifiers = Vec::new();

        // import "module"
        if self.check(&TokenKind::StringLiteral) {
            let source = self.advance().value.clone();
            self.consume_semicolon();
            return Ok(Import {
                specifiers,
                source,
                type_only,
            });
        }

        // import defaultName from "module"
        if self.check(&TokenKind::Identifier) {
            let name = self.parse_identifier()?;
            specifiers.push(ImportSpecifier::Default(name));

            if !self.eat(TokenKind::Comma) {
                return self.finish_import(specifiers, type_only);
            }
        }

        // import * as name from "module"
        if self.eat(TokenKind::Star) {
            self.consume_contextual("as")?;
            let name = self.parse_identifier()?;
            specifiers.push(ImportSpecifier::Namespace(name));
        }
        // import { a, b as c } from "module"
        else if self.eat(TokenKind::LBrace) {
            while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                // inline `type` modifier: import { type A }
                if self.check_contextual("type")
                    && matches!(self.peek_kind(1), Some(kind) if kind == TokenKind::Identifier || kind.is_keyword())
                {
                    self.advance();
                }

                let imported = self.parse_identifier_name()?;
                let local = if self.eat_contextual("as") {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };

                specifiers.push(ImportSpecifier::Named { imported, local });

                if !self.check(&TokenKind::RBrace) {
                    self.consume(TokenKind::Comma)?;
                }
            }

            self.consume(TokenKind::RBrace)?;
        }

        self.finish_import(specifiers, type_only)
    }

    fn finish_import(
        &mut self,
        specifiers: Vec<ImportSpecifier>,
        type_only: bool,
    ) -> ParseResult<Import> {
        self.consume_contextual("from")?;
        let source = self.consume(TokenKind::StringLiteral)?.value.clone();
        self.consume_semicolon();

        Ok(Import {
            specifiers,
            source,
            type_only,
        })
    }

    pub(crate) fn parse_export(&mut self) -> ParseResult<Export> {
        self.consume(TokenKind::Export)?;

        // export type { A } is an ordinary named export for our purposes
        if self.check_contextual("type") && self.peek_kind(1) == Some(TokenKind::LBrace) {
            self.advance();
        }

        // export default
        if self.eat(TokenKind::Default) {
            return self.parse_export_default();
        }

        // export * from "module" / export * as ns from "module"
        if self.eat(TokenKind::Star) {
            let alias = if self.eat_contextual("as") {
                Some(self.parse_identifier_name()?)
            } else {
                None
            };

            self.consume_contextual("from")?;
            let source = self.consume(TokenKind::StringLiteral)?.value.clone();
            self.consume_semicolon();

            return Ok(Export::Reexport { source, alias });
        }

        // export { ... }
        if self.eat(TokenKind::LBrace) {
            let mut names = Vec::new();

            while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                let local = self.parse_identifier_name()?;
                let alias = if self.eat_contextual("as") {
                    Some(self.parse_identifier_name()?)
                } else {
                    None
                };

                names.push(ExportName { local, alias });

                if !self.check(&TokenKind::RBrace) {
                    self.consume(TokenKind::Comma)?;
                }
            }

            self.consume(TokenKind::RBrace)?;

            let source = if self.eat_contextual("from") {
                Some(self.consume(TokenKind::StringLiteral)?.value.clone())
            } else {
                None
            };

            self.consume_semicolon();

            return Ok(Export::Names { names, source });
        }

        let decl = self.parse_declaration()?;
        Ok(Export::Decl {
            decl: Box::new(decl),
            is_default: false,
        })
    }

    fn parse_export_default(&mut self) -> ParseResult<Export> {
        // Named function/class declarations and interfaces are declarations,
        // anonymous ones are expressions.
        let named_decl = match self.current_token().kind {
            TokenKind::Function => {
                let offset = if self.peek_kind(1) == Some(TokenKind::Star) { 2 } else { 1 };
                self.peek_kind(offset) == Some(TokenKind::Identifier)
            }
            TokenKind::Class => self.peek_kind(1) == Some(TokenKind::Identifier),
            TokenKind::Interface => true,
            TokenKind::Enum => true,
            TokenKind::Identifier => {
                (self.check_contextual("async")
                    && self.peek_kind(1) == Some(TokenKind::Function)
                    && self.peek_kind(2) == Some(TokenKind::Identifier))
                    || (self.check_contextual("abstract") && self.peek_kind(1) == Some(TokenKind::Class))
            }
            _ => false,
        };

        if named_decl {
            let decl = self.parse_declaration()?;
            return Ok(Export::Decl {
                decl: Box::new(decl),
                is_default: true,
            });
        }

        let expr = self.parse_expression()?;
        self.consume_semicolon();
        Ok(Export::Expr(expr))
    }
}
