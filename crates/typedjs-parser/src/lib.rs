//! # TypedJS Parser
//!
//! Recursive descent parser for TypedJS source: JavaScript with optional type
//! annotations, interfaces, type aliases and enums.
//! Uses Pratt parsing for expressions with proper operator precedence.

use typedjs_ast::*;
use typedjs_lexer::{unescape, Lexer, Token, TokenKind};

use helpers::{bigint_digits, number_value};
use operators::{assignment_operator, binary_operator, bp};
use stack::ensure_sufficient_stack;

// Module declarations
mod error;
mod parser;
mod expr;
mod stmt;
mod types;
mod decl;
mod pattern;
mod operators;
mod helpers;
mod stack;

// Re-export public types
pub use error::{ParseError, ParseResult};
pub use parser::{Parser, MAX_NESTING_DEPTH};

/// Lexes and parses one document.
///
/// Lexical errors are reported before any syntax error, since the parser
/// would otherwise trip over the `Error` tokens they leave behind.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let tokens = Lexer::new(source).tokenize();

    let lex_errors: Vec<ParseError> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Error)
        .map(|token| ParseError::new(token.value.clone(), token.span))
        .collect();
    if !lex_errors.is_empty() {
        return Err(lex_errors);
    }

    Parser::new(tokens).parse_program()
}
