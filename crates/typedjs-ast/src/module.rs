//! Documents and their import/export items

use super::*;

/// A parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Node<ModuleItem>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleItem {
    Import(Import),
    Export(Export),
    Stmt(Node<Stmt>),
}

impl ModuleItem {
    /// The declaration this item introduces, exported or not
    pub fn decl(&self) -> Option<&Node<Decl>> {
        match self {
            ModuleItem::Stmt(Node {
                value: Stmt::Decl(decl),
                ..
            }) => Some(decl),
            ModuleItem::Export(Export::Decl { decl, .. }) => Some(decl),
            _ => None,
        }
    }
}

/// `import ... from "source"`; a bare `import "source"` has no specifiers
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub type_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import name from`
    Default(Node<Ident>),
    /// `import * as name from`
    Namespace(Node<Ident>),
    /// `{ imported as local }`
    Named {
        imported: Node<Ident>,
        local: Option<Node<Ident>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// `export decl` and `export default decl` for named functions,
    /// classes, interfaces and enums
    Decl {
        decl: Box<Node<Decl>>,
        is_default: bool,
    },

    /// `export default expr`
    Expr(Node<Expr>),

    /// `export { a, b as c }`, optionally re-exported `from` a source
    Names {
        names: Vec<ExportName>,
        source: Option<String>,
    },

    /// `export * from "source"`, `export * as ns from "source"`
    Reexport {
        source: String,
        alias: Option<Node<Ident>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportName {
    pub local: Node<Ident>,
    pub alias: Option<Node<Ident>>,
}
