//! Internal type-expression model

use std::fmt;
use typedjs_ast::{format_number, PrimitiveType};

/// A declared type, independent of the annotation syntax it came from
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Keyword types
    Primitive(PrimitiveKind),

    /// Exact literal value: "active", 42, true, 10n
    Literal(LiteralValue),

    /// Any-of
    Union(Vec<TypeExpr>),

    /// All-of
    Intersection(Vec<TypeExpr>),

    /// T[] and Array<T>
    ArrayOf(Box<TypeExpr>),

    /// Positional, fixed length
    Tuple(Vec<TypeExpr>),

    MapOf(Box<TypeExpr>, Box<TypeExpr>),

    SetOf(Box<TypeExpr>),

    RecordOf(Box<TypeExpr>, Box<TypeExpr>),

    ObjectShape(ObjectShape),

    /// Optional property type; only ever appears inside a shape
    Optional(Box<TypeExpr>),

    /// Name resolved through the registry at the point of use
    NamedReference(String),
}

impl TypeExpr {
    pub const ANY: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Any);
    pub const UNKNOWN: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Unknown);

    /// `any` and `unknown` accept every value
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            TypeExpr::Primitive(PrimitiveKind::Any | PrimitiveKind::Unknown)
        )
    }

    /// Inner type of an `Optional`, the type itself otherwise
    pub fn unwrap_optional(&self) -> &TypeExpr {
        match self {
            TypeExpr::Optional(inner) => inner,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Bigint,
    Symbol,
    Void,
    Never,
    Any,
    Unknown,
    Object,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Bigint => "bigint",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Never => "never",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Object => "object",
        }
    }
}

impl From<PrimitiveType> for PrimitiveKind {
    fn from(prim: PrimitiveType) -> Self {
        match prim {
            PrimitiveType::String => PrimitiveKind::String,
            PrimitiveType::Number => PrimitiveKind::Number,
            PrimitiveType::Boolean => PrimitiveKind::Boolean,
            PrimitiveType::Null => PrimitiveKind::Null,
            PrimitiveType::Undefined => PrimitiveKind::Undefined,
            PrimitiveType::Bigint => PrimitiveKind::Bigint,
            PrimitiveType::Symbol => PrimitiveKind::Symbol,
            PrimitiveType::Void => PrimitiveKind::Void,
            PrimitiveType::Never => PrimitiveKind::Never,
            PrimitiveType::Any => PrimitiveKind::Any,
            PrimitiveType::Unknown => PrimitiveKind::Unknown,
            PrimitiveType::Object => PrimitiveKind::Object,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Decimal digits, sign included
    BigInt(String),
}

/// Object type: ordered properties plus an optional index signature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    pub properties: Vec<(String, TypeExpr)>,
    pub index_signature: Option<IndexSignature>,
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&TypeExpr> {
        self.properties
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, ty)| ty)
    }

    /// Adds a property; a repeated name replaces the earlier type in place
    pub fn insert(&mut self, name: impl Into<String>, ty: TypeExpr) {
        let name = name.into();
        match self.properties.iter_mut().find(|(prop, _)| *prop == name) {
            Some(slot) => slot.1 = ty,
            None => self.properties.push((name, ty)),
        }
    }

    /// Copies every property and the index signature of `other` into this
    /// shape, overriding what is already there
    pub fn extend_from(&mut self, other: &ObjectShape) {
        for (name, ty) in &other.properties {
            self.insert(name.clone(), ty.clone());
        }
        if other.index_signature.is_some() {
            self.index_signature = other.index_signature.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key_type: Box<TypeExpr>,
    pub value_type: Box<TypeExpr>,
}

// Display implementations

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write_quoted(f, s),
            LiteralValue::Number(n) => write!(f, "{}", format_number(*n)),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::BigInt(digits) => write!(f, "{}n", digits),
        }
    }
}

/// Double-quoted string with JSON escapes
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[TypeExpr], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(prim) => write!(f, "{}", prim),
            TypeExpr::Literal(lit) => write!(f, "{}", lit),
            TypeExpr::Union(types) => write_joined(f, types, " | "),
            TypeExpr::Intersection(types) => write_joined(f, types, " & "),
            TypeExpr::ArrayOf(elem) => write!(f, "Array<{}>", elem),
            TypeExpr::Tuple(elems) => {
                write!(f, "[")?;
                write_joined(f, elems, ", ")?;
                write!(f, "]")
            }
            TypeExpr::MapOf(key, value) => write!(f, "Map<{}, {}>", key, value),
            TypeExpr::SetOf(elem) => write!(f, "Set<{}>", elem),
            TypeExpr::RecordOf(key, value) => write!(f, "Record<{}, {}>", key, value),
            TypeExpr::ObjectShape(shape) => write!(f, "{}", shape),
            TypeExpr::Optional(inner) => write!(f, "{}?", inner),
            TypeExpr::NamedReference(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for ObjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() && self.index_signature.is_none() {
            return write!(f, "{{}}");
        }

        write!(f, "{{ ")?;
        let mut first = true;
        for (name, ty) in &self.properties {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match ty {
                TypeExpr::Optional(inner) => write!(f, "{}?: {}", name, inner)?,
                ty => write!(f, "{}: {}", name, ty)?,
            }
        }
        if let Some(index) = &self.index_signature {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "[key: {}]: {}", index.key_type, index.value_type)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeExpr {
        TypeExpr::Primitive(PrimitiveKind::String)
    }

    fn number() -> TypeExpr {
        TypeExpr::Primitive(PrimitiveKind::Number)
    }

    #[test]
    fn test_display_literals() {
        assert_eq!(LiteralValue::String("active".into()).to_string(), "\"active\"");
        assert_eq!(LiteralValue::String("say \"hi\"".into()).to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(LiteralValue::Number(42.0).to_string(), "42");
        assert_eq!(LiteralValue::Number(-1.5).to_string(), "-1.5");
        assert_eq!(LiteralValue::BigInt("10".into()).to_string(), "10n");
    }

    #[test]
    fn test_display_composites() {
        let status = TypeExpr::Union(vec![
            TypeExpr::Literal(LiteralValue::String("active".into())),
            TypeExpr::Literal(LiteralValue::String("inactive".into())),
        ]);
        assert_eq!(status.to_string(), "\"active\" | \"inactive\"");

        let pair = TypeExpr::Tuple(vec![number(), string()]);
        assert_eq!(pair.to_string(), "[number, string]");

        let map = TypeExpr::MapOf(Box::new(string()), Box::new(TypeExpr::ArrayOf(Box::new(number()))));
        assert_eq!(map.to_string(), "Map<string, Array<number>>");

        let both = TypeExpr::Intersection(vec![
            TypeExpr::NamedReference("A".into()),
            TypeExpr::NamedReference("B".into()),
        ]);
        assert_eq!(both.to_string(), "A & B");
    }

    #[test]
    fn test_display_shape() {
        let mut shape = ObjectShape::new();
        shape.insert("name", string());
        shape.insert("age", TypeExpr::Optional(Box::new(number())));
        assert_eq!(shape.to_string(), "{ name: string, age?: number }");
        assert_eq!(ObjectShape::new().to_string(), "{}");

        shape.index_signature = Some(IndexSignature {
            key_type: Box::new(string()),
            value_type: Box::new(TypeExpr::UNKNOWN),
        });
        assert_eq!(shape.to_string(), "{ name: string, age?: number, [key: string]: unknown }");
    }

    #[test]
    fn test_shape_insert_replaces_in_place() {
        let mut shape = ObjectShape::new();
        shape.insert("a", string());
        shape.insert("b", string());
        shape.insert("a", number());

        assert_eq!(shape.properties.len(), 2);
        assert_eq!(shape.properties[0], ("a".to_string(), number()));
    }

    #[test]
    fn test_extend_from_overrides() {
        let mut base = ObjectShape::new();
        base.insert("id", number());
        base.insert("name", string());

        let mut derived = ObjectShape::new();
        derived.extend_from(&base);
        derived.insert("id", string());

        assert_eq!(derived.property("id"), Some(&string()));
        assert_eq!(derived.property("name"), Some(&string()));
        assert_eq!(derived.property("missing"), None);
    }

    #[test]
    fn test_top_types() {
        assert!(TypeExpr::ANY.is_top());
        assert!(TypeExpr::UNKNOWN.is_top());
        assert!(!string().is_top());
        assert_eq!(TypeExpr::Optional(Box::new(string())).unwrap_optional(), &string());
    }
}
