//! Declarations: functions, classes, type-level declarations and bindings

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `let`, `const` or `var`
    Bindings(BindingList),

    Function(Function),

    Class(Class),

    Interface(InterfaceDecl),

    TypeAlias(TypeAliasDecl),

    Enum(EnumDecl),
}

/// Function declarations, function expressions and methods share this shape.
/// Declarations always carry a name; overloads and ambient functions have
/// no body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Node<Ident>>,
    pub params: Vec<Param>,
    pub return_type: Option<Node<Type>>,
    pub body: Option<Node<Block>>,
    pub is_async: bool,
    pub is_generator: bool,
}

/// `...target?: T = default`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub target: Node<Pattern>,
    pub annotation: Option<Node<Type>>,
    pub default: Option<Node<Expr>>,
    pub optional: bool,
    pub is_rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<Node<Ident>>,
    /// Expression after `extends`
    pub heritage: Option<Node<Expr>>,
    pub implements: Vec<Node<Type>>,
    pub members: Vec<ClassMember>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Constructor {
        params: Vec<Param>,
        body: Option<Node<Block>>,
    },

    Method {
        key: PropertyName,
        kind: MethodKind,
        function: Function,
        modifiers: Modifiers,
    },

    /// `count?: number = 0;`
    Field {
        key: PropertyName,
        annotation: Option<Node<Type>>,
        init: Option<Node<Expr>>,
        modifiers: Modifiers,
        optional: bool,
    },

    /// `static { ... }`
    StaticBlock(Node<Block>),
}

/// Modifier keywords in front of a class member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: Node<Ident>,
    pub type_params: Vec<Node<Ident>>,
    /// Parent types after `extends`, in source order
    pub parents: Vec<Node<Type>>,
    pub body: ObjectType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: Node<Ident>,
    pub type_params: Vec<Node<Ident>>,
    pub ty: Node<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Node<Ident>,
    pub members: Vec<EnumMember>,
    pub is_const: bool,
}

/// Enum member; quoted member names are stored unquoted
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: Node<Ident>,
    pub init: Option<Node<Expr>>,
}
