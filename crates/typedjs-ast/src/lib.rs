//! # TypedJS AST
//!
//! Syntax tree for TypedJS documents: JavaScript with optional type
//! annotations, interfaces, type aliases and enums. Every node carries the
//! byte span it was parsed from; [`LineIndex`] turns spans into line and
//! column positions.

use std::fmt;

pub mod decl;
pub mod expr;
pub mod module;
pub mod source;
pub mod stmt;
pub mod types;

pub use decl::*;
pub use expr::*;
pub use module::*;
pub use source::{LineIndex, Position, SourceRange};
pub use stmt::*;
pub use types::*;

/// Half-open byte range `start..end` into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A syntax value paired with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Node<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { span, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: usize, end: usize) -> Span {
        Span::new(start, end)
    }

    fn ident(name: &str) -> Node<Ident> {
        Node::new(Ident::new(name), Span::default())
    }

    #[test]
    fn test_span_merge() {
        let a = at(4, 9);
        let b = at(12, 20);
        assert_eq!(a.merge(&b), at(4, 20));
        assert_eq!(b.merge(&a), at(4, 20));
        assert_eq!(a.len(), 5);
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_primitive_keywords() {
        assert_eq!(PrimitiveType::from_keyword("symbol"), Some(PrimitiveType::Symbol));
        assert_eq!(PrimitiveType::from_keyword("object"), Some(PrimitiveType::Object));
        assert_eq!(PrimitiveType::from_keyword("User"), None);
        assert_eq!(PrimitiveType::Bigint.to_string(), "bigint");
        assert_eq!(PrimitiveType::Unknown.keyword(), "unknown");
    }

    #[test]
    fn test_binary_op_symbol() {
        assert_eq!(BinaryOp::Add.symbol(), "+");
        assert_eq!(BinaryOp::StrictEq.symbol(), "===");
        assert_eq!(BinaryOp::NullishCoalesce.symbol(), "??");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_property_name_text() {
        assert_eq!(PropertyName::Ident(ident("name")).text().as_deref(), Some("name"));
        assert_eq!(PropertyName::String("first-name".into()).text().as_deref(), Some("first-name"));
        assert_eq!(PropertyName::Number(1.0).text().as_deref(), Some("1"));
        assert_eq!(PropertyName::Number(1.5).text().as_deref(), Some("1.5"));

        let computed = PropertyName::Computed(Box::new(Node::new(Expr::Ident(Ident::new("key")), at(1, 4))));
        assert_eq!(computed.text(), None);
    }

    #[test]
    fn test_binding_name() {
        let named = Binding {
            target: Node::new(Pattern::Ident(Ident::new("user")), at(4, 8)),
            annotation: None,
            init: Some(Node::new(Expr::Literal(Literal::Null), at(11, 15))),
        };
        assert_eq!(named.name(), Some("user"));

        let defaulted = Pattern::Default {
            target: Box::new(Node::new(Pattern::Ident(Ident::new("limit")), at(0, 5))),
            value: Box::new(Node::new(Expr::Literal(Literal::Number(10.0)), at(8, 10))),
        };
        assert_eq!(defaulted.name(), Some("limit"));

        let destructured = Binding {
            target: Node::new(Pattern::Object { properties: vec![], rest: None }, at(4, 6)),
            ..named
        };
        assert_eq!(destructured.name(), None);
        assert_eq!(BindingKind::Const.to_string(), "const");
    }

    #[test]
    fn test_module_item_decl() {
        let decl = Node::new(
            Decl::Enum(EnumDecl {
                name: ident("Color"),
                members: vec![EnumMember { name: ident("Red"), init: None }],
                is_const: false,
            }),
            at(0, 20),
        );

        let local = ModuleItem::Stmt(Node::new(Stmt::Decl(decl.clone()), at(0, 20)));
        let exported = ModuleItem::Export(Export::Decl {
            decl: Box::new(decl.clone()),
            is_default: false,
        });
        let expr = ModuleItem::Stmt(Node::new(Stmt::Empty, at(0, 1)));

        assert_eq!(local.decl(), Some(&decl));
        assert_eq!(exported.decl(), Some(&decl));
        assert_eq!(expr.decl(), None);
    }
}
