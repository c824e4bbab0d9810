//! Runtime type of value expressions

use std::fmt;

use typedjs_ast::{Expr, Literal, Node, UnaryOp};

use crate::types::{LiteralValue, PrimitiveKind};

/// Runtime type tag of a statically known value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    String,
    Number,
    Boolean,
    Bigint,
    Null,
    Undefined,
    Object,
    Array,
}

impl ValueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTag::String => "string",
            ValueTag::Number => "number",
            ValueTag::Boolean => "boolean",
            ValueTag::Bigint => "bigint",
            ValueTag::Null => "null",
            ValueTag::Undefined => "undefined",
            ValueTag::Object => "object",
            ValueTag::Array => "array",
        }
    }

    /// Whether a value with this tag satisfies the primitive type
    pub fn satisfies(&self, prim: PrimitiveKind) -> bool {
        matches!(
            (self, prim),
            (ValueTag::String, PrimitiveKind::String)
                | (ValueTag::Number, PrimitiveKind::Number)
                | (ValueTag::Boolean, PrimitiveKind::Boolean)
                | (ValueTag::Bigint, PrimitiveKind::Bigint)
                | (ValueTag::Null, PrimitiveKind::Null)
                | (ValueTag::Undefined, PrimitiveKind::Undefined)
                | (ValueTag::Object, PrimitiveKind::Object)
        )
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of classifying a value expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Known(ValueTag),
    /// A valid expression whose type is not determined statically
    /// (calls, identifiers, member access, ...)
    Unsupported,
    /// Not a value at all, e.g. a bare spread element
    Error,
}

impl Classification {
    /// Tag used in diagnostic text
    pub fn tag_name(&self) -> &'static str {
        match self {
            Classification::Known(tag) => tag.as_str(),
            Classification::Unsupported | Classification::Error => "unknown",
        }
    }
}

pub fn classify(value: &Node<Expr>) -> Classification {
    let tag = match &strip_parens(value).value {
        Expr::Literal(lit) => match lit {
            Literal::Number(_) => ValueTag::Number,
            Literal::BigInt(_) => ValueTag::Bigint,
            Literal::String(_) => ValueTag::String,
            Literal::Boolean(_) => ValueTag::Boolean,
            Literal::Null => ValueTag::Null,
            Literal::Undefined => ValueTag::Undefined,
            Literal::RegExp { .. } => ValueTag::Object,
        },
        Expr::Template { .. } => ValueTag::String,
        Expr::Unary {
            op: UnaryOp::Minus,
            expr,
        } => match &strip_parens(expr).value {
            Expr::Literal(Literal::Number(_)) => ValueTag::Number,
            Expr::Literal(Literal::BigInt(_)) => ValueTag::Bigint,
            _ => return Classification::Unsupported,
        },
        Expr::Object(_) => ValueTag::Object,
        Expr::Array(_) => ValueTag::Array,
        Expr::Spread(_) => return Classification::Error,
        _ => return Classification::Unsupported,
    };
    Classification::Known(tag)
}

/// Exact literal value of an expression: literals, negated numeric
/// literals and templates without substitutions
pub fn literal_value(value: &Node<Expr>) -> Option<LiteralValue> {
    match &strip_parens(value).value {
        Expr::Literal(Literal::String(s)) => Some(LiteralValue::String(s.clone())),
        Expr::Literal(Literal::Number(n)) => Some(LiteralValue::Number(*n)),
        Expr::Literal(Literal::Boolean(b)) => Some(LiteralValue::Boolean(*b)),
        Expr::Literal(Literal::BigInt(digits)) => Some(LiteralValue::BigInt(digits.clone())),
        Expr::Template { quasis, exprs } if exprs.is_empty() => {
            Some(LiteralValue::String(quasis.concat()))
        }
        Expr::Unary {
            op: UnaryOp::Minus,
            expr,
        } => match &strip_parens(expr).value {
            Expr::Literal(Literal::Number(n)) => Some(LiteralValue::Number(-n)),
            Expr::Literal(Literal::BigInt(digits)) => {
                Some(LiteralValue::BigInt(format!("-{}", digits)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Innermost expression under any parentheses
pub fn strip_parens(mut value: &Node<Expr>) -> &Node<Expr> {
    while let Expr::Paren(inner) = &value.value {
        value = inner;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> Node<Expr> {
        let tokens = typedjs_lexer::Lexer::new(source).tokenize();
        typedjs_parser::Parser::new(tokens)
            .parse_standalone_expression()
            .unwrap()
    }

    fn tag(source: &str) -> Classification {
        classify(&expr(source))
    }

    #[test]
    fn test_literals() {
        assert_eq!(tag("'hi'"), Classification::Known(ValueTag::String));
        assert_eq!(tag("42"), Classification::Known(ValueTag::Number));
        assert_eq!(tag("true"), Classification::Known(ValueTag::Boolean));
        assert_eq!(tag("10n"), Classification::Known(ValueTag::Bigint));
        assert_eq!(tag("null"), Classification::Known(ValueTag::Null));
        assert_eq!(tag("undefined"), Classification::Known(ValueTag::Undefined));
        assert_eq!(tag("`a${b}`"), Classification::Known(ValueTag::String));
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(tag("-1"), Classification::Known(ValueTag::Number));
        assert_eq!(tag("-(5)"), Classification::Known(ValueTag::Number));
        assert_eq!(tag("-5n"), Classification::Known(ValueTag::Bigint));
        assert_eq!(tag("-x"), Classification::Unsupported);
    }

    #[test]
    fn test_constructions() {
        assert_eq!(tag("{ a: 1 }"), Classification::Known(ValueTag::Object));
        assert_eq!(tag("[1, 2]"), Classification::Known(ValueTag::Array));
        assert_eq!(tag("(([]))"), Classification::Known(ValueTag::Array));
    }

    #[test]
    fn test_everything_else_is_unsupported() {
        assert_eq!(tag("foo()"), Classification::Unsupported);
        assert_eq!(tag("user.name"), Classification::Unsupported);
        assert_eq!(tag("a + b"), Classification::Unsupported);
        assert_eq!(tag("new Map()"), Classification::Unsupported);
        assert_eq!(tag("x"), Classification::Unsupported);
        assert_eq!(Classification::Unsupported.tag_name(), "unknown");
    }

    #[test]
    fn test_spread_is_an_error() {
        let spread = Node::new(
            Expr::Spread(Box::new(expr("items"))),
            typedjs_ast::Span::new(0, 8),
        );
        assert_eq!(classify(&spread), Classification::Error);
    }

    #[test]
    fn test_literal_values() {
        assert_eq!(literal_value(&expr("'a'")), Some(LiteralValue::String("a".into())));
        assert_eq!(literal_value(&expr("-2.5")), Some(LiteralValue::Number(-2.5)));
        assert_eq!(literal_value(&expr("-3n")), Some(LiteralValue::BigInt("-3".into())));
        assert_eq!(literal_value(&expr("`plain`")), Some(LiteralValue::String("plain".into())));
        assert_eq!(literal_value(&expr("`x${y}`")), None);
        assert_eq!(literal_value(&expr("null")), None);
        assert_eq!(literal_value(&expr("(false)")), Some(LiteralValue::Boolean(false)));
    }

    #[test]
    fn test_primitive_satisfaction() {
        assert!(ValueTag::String.satisfies(PrimitiveKind::String));
        assert!(!ValueTag::Array.satisfies(PrimitiveKind::Object));
        assert!(!ValueTag::Undefined.satisfies(PrimitiveKind::Void));
    }
}
