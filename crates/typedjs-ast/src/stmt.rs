//! Statements, bindings and destructuring patterns

use super::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Node<Expr>),

    /// Any declaration in statement position, `let`/`const`/`var` included
    Decl(Node<Decl>),

    Block(Block),

    If {
        test: Node<Expr>,
        consequent: Box<Node<Stmt>>,
        alternate: Option<Box<Node<Stmt>>>,
    },

    /// `for`, `for-in`, `for-of`, `while` and `do-while`
    Loop(Box<Loop>),

    Switch {
        discriminant: Node<Expr>,
        cases: Vec<SwitchCase>,
    },

    Try(Box<TryStmt>),

    Return(Option<Node<Expr>>),

    Throw(Node<Expr>),

    /// `break` or `continue`, with an optional label
    Jump {
        kind: JumpKind,
        label: Option<Node<Ident>>,
    },

    Labeled {
        label: Node<Ident>,
        body: Box<Node<Stmt>>,
    },

    Debugger,

    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Node<Stmt>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    Break,
    Continue,
}

/// `let a: T = x, b = y`
#[derive(Debug, Clone, PartialEq)]
pub struct BindingList {
    pub kind: BindingKind,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Let,
    Const,
    Var,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BindingKind::Let => "let",
            BindingKind::Const => "const",
            BindingKind::Var => "var",
        })
    }
}

/// One declarator of a binding list
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub target: Node<Pattern>,
    pub annotation: Option<Node<Type>>,
    pub init: Option<Node<Expr>>,
}

impl Binding {
    /// Bound name when the target is a plain identifier
    pub fn name(&self) -> Option<&str> {
        self.target.value.name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub head: LoopHead,
    pub body: Node<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopHead {
    For {
        init: Option<ForInit>,
        test: Option<Node<Expr>>,
        update: Option<Node<Expr>>,
    },
    ForIn {
        left: ForTarget,
        right: Node<Expr>,
    },
    ForOf {
        left: ForTarget,
        right: Node<Expr>,
        is_await: bool,
    },
    While(Node<Expr>),
    DoWhile(Node<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Bindings(BindingList),
    Expr(Node<Expr>),
}

/// Left side of `for-in` / `for-of`
#[derive(Debug, Clone, PartialEq)]
pub enum ForTarget {
    Bindings(BindingList),
    Pattern(Node<Pattern>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub block: Node<Block>,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Node<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Node<Pattern>>,
    pub annotation: Option<Node<Type>>,
    pub body: Node<Block>,
}

/// `case test:` or `default:` (no test) with the statements that follow
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Node<Expr>>,
    pub body: Vec<Node<Stmt>>,
}

/// Binding target. Annotations live on the enclosing [`Binding`] or
/// [`Param`], never on the pattern itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Ident(Ident),

    /// `[a, , b = 1, ...rest]`
    Array {
        elements: Vec<Option<Node<Pattern>>>,
        rest: Option<Box<Node<Pattern>>>,
    },

    /// `{ a, b: c, d = 1, ...rest }`
    Object {
        properties: Vec<PatternProperty>,
        rest: Option<Box<Node<Pattern>>>,
    },

    /// Nested target with a default: `b = 1`
    Default {
        target: Box<Node<Pattern>>,
        value: Box<Node<Expr>>,
    },
}

impl Pattern {
    pub fn name(&self) -> Option<&str> {
        match self {
            Pattern::Ident(ident) => Some(&ident.name),
            Pattern::Default { target, .. } => target.value.name(),
            Pattern::Array { .. } | Pattern::Object { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    pub key: PropertyName,
    pub value: Node<Pattern>,
    pub shorthand: bool,
}
