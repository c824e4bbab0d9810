//! # TypedJS Checker
//!
//! Structural validation of annotated bindings in TypedJS documents.
//! Every variable declarator with both a type annotation and an initializer
//! is checked against its declared type; interfaces, aliases and enums are
//! registered as the walk reaches them, so forward references stay opaque.
//!
//! The pass never fails: unsupported annotations degrade to `unknown`,
//! values it cannot classify are handled per [`ValuePolicy`], and a document
//! that does not parse yields a single [`DiagnosticKind::ParseFailure`].

mod types;
mod translate;
mod registry;
mod classify;
mod diagnostic;
mod matcher;
mod checker;
mod decl_checker;
mod stmt_checker;
mod expr_checker;
mod stack;

// Re-export public API
pub use types::{IndexSignature, LiteralValue, ObjectShape, PrimitiveKind, TypeExpr};
pub use translate::{shape_from_members, translate, translate_type};
pub use registry::{
    EnumValue, EnumValues, RegistryEntry, ResolvedType, TypeRegistry, MAX_RESOLUTION_HOPS,
};
pub use classify::{classify, literal_value, Classification, ValueTag};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use matcher::{Matcher, ValuePolicy};
pub use checker::{CheckOptions, Checker};

use typedjs_ast::{LineIndex, Program};

// =============================================================================
// Public API
// =============================================================================

/// Validates an already parsed program
#[tracing::instrument(level = "debug", skip_all, fields(items = program.items.len()))]
pub fn check_program(program: &Program, index: &LineIndex<'_>, options: &CheckOptions) -> Vec<Diagnostic> {
    let diagnostics = Checker::new(index, *options).check_program(program);
    tracing::debug!(count = diagnostics.len(), "validation finished");
    diagnostics
}

/// Parses and validates one document. A document that fails to parse is not
/// checked; the first parse error is reported at line 1, column 1.
pub fn check_source(source: &str, options: &CheckOptions) -> Vec<Diagnostic> {
    let index = LineIndex::new(source);

    match typedjs_parser::parse(source) {
        Ok(program) => check_program(&program, &index, options),
        Err(errors) => {
            let message = errors
                .first()
                .map(|error| error.message.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::debug!(errors = errors.len(), "document failed to parse");
            vec![Diagnostic::parse_failure(message).locate(&index)]
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
