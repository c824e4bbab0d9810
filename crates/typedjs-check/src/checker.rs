//! Validation pass over one program

use typedjs_ast::{Binding, BindingList, Export, Expr, LineIndex, ModuleItem, Node, Program};

use crate::diagnostic::{Diagnostic, Severity};
use crate::matcher::{Matcher, ValuePolicy};
use crate::registry::TypeRegistry;
use crate::translate::translate;
use crate::types::TypeExpr;

/// Knobs of one validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckOptions {
    /// Severity given to every type finding
    pub severity: Severity,
    pub policy: ValuePolicy,
}

impl CheckOptions {
    /// Findings reported as warnings, the preset editor integrations ship with
    pub fn recommended() -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::default()
        }
    }

    pub fn strict() -> Self {
        Self {
            policy: ValuePolicy::Strict,
            ..Self::default()
        }
    }
}

/// Walks a program in source order, registering type declarations and
/// checking annotated bindings as they are reached
pub struct Checker<'a> {
    pub(crate) registry: TypeRegistry,
    index: &'a LineIndex<'a>,
    options: CheckOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    pub fn new(index: &'a LineIndex<'a>, options: CheckOptions) -> Self {
        Self {
            registry: TypeRegistry::new(),
            index,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Main entry point: validate a whole program
    pub fn check_program(mut self, program: &Program) -> Vec<Diagnostic> {
        for item in &program.items {
            self.check_module_item(&item.value);
        }
        self.diagnostics
    }

    fn check_module_item(&mut self, item: &ModuleItem) {
        match item {
            ModuleItem::Import(_) => {}
            ModuleItem::Export(export) => self.check_export(export),
            ModuleItem::Stmt(stmt) => self.check_stmt(&stmt.value),
        }
    }

    fn check_export(&mut self, export: &Export) {
        match export {
            Export::Decl { decl, .. } => self.check_decl(&decl.value),
            Export::Expr(expr) => self.check_expr(expr),
            Export::Names { .. } | Export::Reexport { .. } => {}
        }
    }

    pub(crate) fn check_bindings(&mut self, list: &BindingList) {
        for binding in &list.bindings {
            self.check_declarator(binding);
        }
    }

    /// An annotated binding with an initializer is validated; the
    /// initializer is walked either way
    fn check_declarator(&mut self, binding: &Binding) {
        let Some(init) = &binding.init else {
            return;
        };

        if let Some(annotation) = &binding.annotation {
            let ty = translate(Some(annotation));
            let context = binding.name().unwrap_or("<pattern>");
            self.check_binding(init, &ty, context);
        }

        self.check_expr(init);
    }

    fn check_binding(&mut self, init: &Node<Expr>, ty: &TypeExpr, context: &str) {
        let findings = Matcher::new(&self.registry, self.options.policy).explain(init, ty, context);
        if !findings.is_empty() {
            tracing::debug!(binding = context, ty = %ty, count = findings.len(), "binding failed validation");
        }

        let severity = self.options.severity;
        let index = self.index;
        self.diagnostics.extend(
            findings
                .into_iter()
                .map(|diagnostic| diagnostic.locate(index).with_severity(severity)),
        );
    }
}
