//! Expressions

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),

    /// `` `a${b}c` ``: cooked text chunks around the substitutions,
    /// always one more chunk than substitutions
    Template {
        quasis: Vec<String>,
        exprs: Vec<Node<Expr>>,
    },

    Ident(Ident),

    This,

    Super,

    /// Array literal; elisions are `None`
    Array(Vec<Option<Node<Expr>>>),

    Object(Vec<Node<ObjectProperty>>),

    Function(Box<Function>),

    Arrow(Box<Arrow>),

    Class(Box<Class>),

    Unary {
        op: UnaryOp,
        expr: Box<Node<Expr>>,
    },

    /// `++x`, `x--`
    Update {
        op: UpdateOp,
        prefix: bool,
        expr: Box<Node<Expr>>,
    },

    Binary {
        left: Box<Node<Expr>>,
        op: BinaryOp,
        right: Box<Node<Expr>>,
    },

    Assignment {
        target: Box<Node<Expr>>,
        op: AssignmentOp,
        value: Box<Node<Expr>>,
    },

    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Node<Expr>>,
        consequent: Box<Node<Expr>>,
        alternate: Box<Node<Expr>>,
    },

    /// `a.b`, `a?.b`
    Member {
        object: Box<Node<Expr>>,
        property: Node<Ident>,
        optional: bool,
    },

    /// `a[b]`, `a?.[b]`
    Index {
        object: Box<Node<Expr>>,
        index: Box<Node<Expr>>,
        optional: bool,
    },

    Call {
        callee: Box<Node<Expr>>,
        args: Vec<Node<Expr>>,
        optional: bool,
    },

    New {
        callee: Box<Node<Expr>>,
        args: Vec<Node<Expr>>,
    },

    /// `value as T`, also `value satisfies T` and `value as const`
    As {
        expr: Box<Node<Expr>>,
        ty: Box<Node<Type>>,
    },

    Await(Box<Node<Expr>>),

    /// `yield`, `yield value`, `yield* inner`
    Yield {
        argument: Option<Box<Node<Expr>>>,
        delegate: bool,
    },

    /// `...value` inside array literals and argument lists
    Spread(Box<Node<Expr>>),

    Sequence(Vec<Node<Expr>>),

    Paren(Box<Node<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    /// Decimal digits without the `n` suffix
    BigInt(String),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    RegExp { pattern: String, flags: String },
}

/// Arrow function
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub params: Vec<Param>,
    pub return_type: Option<Node<Type>>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Node<Expr>>),
    Block(Node<Block>),
}

/// Member of an object literal
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    /// `key: value`, or the shorthand `key`
    Property {
        key: PropertyName,
        value: Node<Expr>,
        shorthand: bool,
    },

    /// `key() {}`, `get key() {}`, `async *key() {}`
    Method {
        key: PropertyName,
        kind: MethodKind,
        function: Function,
    },

    Spread(Node<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// Key of an object literal member, class member or type member
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyName {
    Ident(Node<Ident>),
    String(String),
    Number(f64),
    Computed(Box<Node<Expr>>),
}

impl PropertyName {
    /// The key as a string; computed keys have no static text
    pub fn text(&self) -> Option<String> {
        match self {
            PropertyName::Ident(ident) => Some(ident.value.name.clone()),
            PropertyName::String(s) => Some(s.clone()),
            PropertyName::Number(n) => Some(format_number(*n)),
            PropertyName::Computed(_) => None,
        }
    }
}

/// Renders a number the way JavaScript's `String(n)` does for integers,
/// `NaN` and the infinities
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    NullishCoalesce,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    In,
    InstanceOf,
}

impl BinaryOp {
    /// Source spelling
    pub fn symbol(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Eq => "==",
            NotEq => "!=",
            StrictEq => "===",
            StrictNotEq => "!==",
            Lt => "<",
            LtEq => "<=",
            Gt => ">",
            GtEq => ">=",
            And => "&&",
            Or => "||",
            NullishCoalesce => "??",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            LeftShift => "<<",
            RightShift => ">>",
            UnsignedRightShift => ">>>",
            In => "in",
            InstanceOf => "instanceof",
        }
    }
}

/// `=` and the compound assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOp {
    Assign,
    Compound(BinaryOp),
    /// `&&=`, `||=`, `??=`
    Logical(BinaryOp),
}
