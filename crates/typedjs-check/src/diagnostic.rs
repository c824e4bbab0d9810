//! Diagnostic records

use std::fmt;

use typedjs_ast::{LineIndex, Position, SourceRange, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    TypeMismatch,
    MissingProperty,
    ExtraProperty,
    InvalidLiteral,
    InvalidEnum,
    InvalidUnion,
    InvalidTuple,
    /// The document could not be parsed; the checker did not run
    ParseFailure,
}

impl DiagnosticKind {
    pub fn message_id(&self) -> &'static str {
        match self {
            DiagnosticKind::TypeMismatch => "typeMismatch",
            DiagnosticKind::MissingProperty => "missingProperty",
            DiagnosticKind::ExtraProperty => "extraProperty",
            DiagnosticKind::InvalidLiteral => "invalidLiteral",
            DiagnosticKind::InvalidEnum => "invalidEnum",
            DiagnosticKind::InvalidUnion => "invalidUnion",
            DiagnosticKind::InvalidTuple => "invalidTuple",
            DiagnosticKind::ParseFailure => "parseFailure",
        }
    }

    /// Message with `{name}` placeholders filled from the diagnostic data
    pub fn template(&self) -> &'static str {
        match self {
            DiagnosticKind::TypeMismatch => "Type mismatch: Expected '{expected}' but got '{actual}'",
            DiagnosticKind::MissingProperty => "Property '{propName}' is missing in '{interfaceName}'",
            DiagnosticKind::ExtraProperty => "Unexpected property '{propName}' in '{interfaceName}'",
            DiagnosticKind::InvalidLiteral => "Expected literal value {expected}, got {actual}",
            DiagnosticKind::InvalidEnum => "Value {actual} is not valid for enum {enumName}",
            DiagnosticKind::InvalidUnion => "Value does not match any type in union: {expected}",
            DiagnosticKind::InvalidTuple => "Tuple has incorrect length or types",
            DiagnosticKind::ParseFailure => "Parsing error: {message}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Placeholder values the message was rendered from
    pub data: Vec<(String, String)>,
    pub span: Span,
    pub range: SourceRange,
    pub severity: Severity,
}

impl Diagnostic {
    /// Renders the kind's template; the range stays at the document start
    /// until [`Diagnostic::locate`] is called
    pub fn new(kind: DiagnosticKind, span: Span, data: Vec<(String, String)>) -> Self {
        let message = render(kind.template(), &data);
        Self {
            kind,
            message,
            data,
            span,
            range: SourceRange {
                start: Position::START,
                end: Position::START,
            },
            severity: Severity::Error,
        }
    }

    pub fn type_mismatch(span: Span, expected: impl ToString, actual: impl ToString) -> Self {
        Self::new(
            DiagnosticKind::TypeMismatch,
            span,
            vec![pair("expected", expected), pair("actual", actual)],
        )
    }

    pub fn missing_property(span: Span, prop: &str, interface: &str) -> Self {
        Self::new(
            DiagnosticKind::MissingProperty,
            span,
            vec![pair("propName", prop), pair("interfaceName", interface)],
        )
    }

    pub fn extra_property(span: Span, prop: &str, interface: &str) -> Self {
        Self::new(
            DiagnosticKind::ExtraProperty,
            span,
            vec![pair("propName", prop), pair("interfaceName", interface)],
        )
    }

    pub fn invalid_literal(span: Span, expected: impl ToString, actual: impl ToString) -> Self {
        Self::new(
            DiagnosticKind::InvalidLiteral,
            span,
            vec![pair("expected", expected), pair("actual", actual)],
        )
    }

    pub fn invalid_enum(span: Span, actual: impl ToString, enum_name: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidEnum,
            span,
            vec![pair("actual", actual), pair("enumName", enum_name)],
        )
    }

    pub fn invalid_union(span: Span, expected: impl ToString) -> Self {
        Self::new(DiagnosticKind::InvalidUnion, span, vec![pair("expected", expected)])
    }

    pub fn invalid_tuple(span: Span, expected_len: usize, actual_len: usize) -> Self {
        Self::new(
            DiagnosticKind::InvalidTuple,
            span,
            vec![pair("expected", expected_len), pair("actual", actual_len)],
        )
    }

    /// Stand-in for a whole document that failed to parse, at line 1, column 1
    pub fn parse_failure(message: impl ToString) -> Self {
        Self::new(
            DiagnosticKind::ParseFailure,
            Span::new(0, 0),
            vec![pair("message", message)],
        )
    }

    /// Fills in the line/column range of the span
    pub fn locate(mut self, index: &LineIndex<'_>) -> Self {
        self.range = index.range(self.span);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn message_id(&self) -> &'static str {
        self.kind.message_id()
    }

    /// Value of one placeholder
    pub fn datum(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.range.start.line, self.range.start.column, self.severity, self.message
        )
    }
}

fn pair(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

/// Single left-to-right pass, so substituted text is never rescanned
fn render(template: &str, data: &[(String, String)]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            message.push_str(&rest[open..]);
            return message;
        };

        let key = &after[..close];
        match data.iter().find(|(name, _)| name == key) {
            Some((_, value)) => message.push_str(value),
            None => message.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    message.push_str(rest);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_type_mismatch() {
        let diag = Diagnostic::type_mismatch(Span::new(0, 3), "string", "number");
        assert_eq!(diag.message, "Type mismatch: Expected 'string' but got 'number'");
        assert_eq!(diag.message_id(), "typeMismatch");
        assert_eq!(diag.datum("expected"), Some("string"));
        assert_eq!(diag.severity, Severity::Error);
    }

    #[test]
    fn test_render_shape_messages() {
        let missing = Diagnostic::missing_property(Span::new(0, 1), "age", "User");
        assert_eq!(missing.message, "Property 'age' is missing in 'User'");

        let extra = Diagnostic::extra_property(Span::new(0, 1), "extra", "User");
        assert_eq!(extra.message, "Unexpected property 'extra' in 'User'");
    }

    #[test]
    fn test_render_value_messages() {
        let literal = Diagnostic::invalid_literal(Span::new(0, 1), "\"a\"", "\"b\"");
        assert_eq!(literal.message, "Expected literal value \"a\", got \"b\"");

        let enum_diag = Diagnostic::invalid_enum(Span::new(0, 1), 7, "Color");
        assert_eq!(enum_diag.message, "Value 7 is not valid for enum Color");

        let union = Diagnostic::invalid_union(Span::new(0, 1), "string | number");
        assert_eq!(union.message, "Value does not match any type in union: string | number");

        let tuple = Diagnostic::invalid_tuple(Span::new(0, 1), 2, 3);
        assert_eq!(tuple.message, "Tuple has incorrect length or types");
        assert_eq!(tuple.datum("actual"), Some("3"));
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let diag = Diagnostic::type_mismatch(Span::new(0, 1), "{actual}", "number");
        assert_eq!(diag.message, "Type mismatch: Expected '{actual}' but got 'number'");
    }

    #[test]
    fn test_parse_failure_sits_at_document_start() {
        let diag = Diagnostic::parse_failure("Expected RBrace, found Eof");
        assert_eq!(diag.message, "Parsing error: Expected RBrace, found Eof");
        assert_eq!(diag.range.start, Position::START);
        assert_eq!(diag.message_id(), "parseFailure");
    }

    #[test]
    fn test_locate_and_display() {
        let source = "let a = 1;\nlet b: string = 2;";
        let index = LineIndex::new(source);
        let start = source.find('2').unwrap();

        let diag = Diagnostic::type_mismatch(Span::new(start, start + 1), "string", "number")
            .locate(&index)
            .with_severity(Severity::Warning);

        assert_eq!(diag.range.start, Position { line: 2, column: 17 });
        assert_eq!(
            diag.to_string(),
            "2:17: warning: Type mismatch: Expected 'string' but got 'number'"
        );
    }
}
