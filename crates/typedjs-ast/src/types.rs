//! Type annotation syntax

use super::*;
use std::fmt;

/// A type as written after `:` or on the right of `type X =`
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `string`, `number`, `any`, `object`, ...
    Primitive(PrimitiveType),

    /// `"active"`, `42`, `-1`, `true`, `10n`
    Literal(LiteralType),

    /// `T[]`
    Array(Box<Node<Type>>),

    /// `[A, B]`; optional, rest and labelled members lose their marker
    Tuple(Vec<Node<Type>>),

    Union(Vec<Node<Type>>),

    Intersection(Vec<Node<Type>>),

    /// Named type with its arguments: `User`, `Map<string, number>`.
    /// Qualified names keep their dots: `Express.Request`.
    Reference {
        name: Node<Ident>,
        args: Vec<Node<Type>>,
    },

    /// Inline object type
    Object(ObjectType),

    Paren(Box<Node<Type>>),

    /// `(a: number) => string`, also constructor types
    Function(FunctionType),

    /// `typeof value`
    Query(Node<Ident>),

    /// `keyof T`
    KeyOf(Box<Node<Type>>),

    /// `T["name"]`
    Indexed {
        object: Box<Node<Type>>,
        index: Box<Node<Type>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    Bigint,
    Symbol,
    Object,
    Null,
    Undefined,
    Void,
    Never,
    Any,
    Unknown,
}

impl PrimitiveType {
    const KEYWORDS: [(&'static str, PrimitiveType); 12] = [
        ("string", PrimitiveType::String),
        ("number", PrimitiveType::Number),
        ("boolean", PrimitiveType::Boolean),
        ("bigint", PrimitiveType::Bigint),
        ("symbol", PrimitiveType::Symbol),
        ("object", PrimitiveType::Object),
        ("null", PrimitiveType::Null),
        ("undefined", PrimitiveType::Undefined),
        ("void", PrimitiveType::Void),
        ("never", PrimitiveType::Never),
        ("any", PrimitiveType::Any),
        ("unknown", PrimitiveType::Unknown),
    ];

    /// The primitive spelled `word`, if any
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, prim)| *prim)
    }

    pub fn keyword(&self) -> &'static str {
        Self::KEYWORDS
            .iter()
            .find(|(_, prim)| prim == self)
            .map_or("unknown", |(keyword, _)| keyword)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Decimal digits, with a leading `-` for negative literals
    BigInt(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<FunctionTypeParam>,
    pub return_type: Box<Node<Type>>,
}

/// Parameter of a function type; destructured parameters have no name
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeParam {
    pub name: Option<Node<Ident>>,
    pub ty: Node<Type>,
    pub optional: bool,
    pub is_rest: bool,
}

/// Body of an interface or an inline object type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    pub members: Vec<TypeMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
    /// `readonly key?: T`
    Property {
        key: PropertyName,
        ty: Node<Type>,
        optional: bool,
        readonly: bool,
    },

    /// `key?(params): R`
    Method {
        key: PropertyName,
        params: Vec<FunctionTypeParam>,
        return_type: Option<Node<Type>>,
        optional: bool,
    },

    /// `[param: K]: V`
    Index {
        param: Node<Ident>,
        key: Node<Type>,
        value: Node<Type>,
    },
}
