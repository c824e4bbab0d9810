//! Structural compatibility between value expressions and type expressions

use std::collections::HashSet;

use typedjs_ast::{format_number, Expr, Node, ObjectProperty, Span};

use crate::classify::{classify, literal_value, strip_parens, Classification};
use crate::diagnostic::Diagnostic;
use crate::registry::{EnumValues, ResolvedType, TypeRegistry, MAX_RESOLUTION_HOPS};
use crate::stack::ensure_sufficient_stack;
use crate::types::{LiteralValue, ObjectShape, PrimitiveKind, TypeExpr};

/// How values of statically unknown type are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValuePolicy {
    /// Unclassified values are compatible with every type
    #[default]
    Lenient,
    /// Unclassified values only match `any` and `unknown`
    Strict,
}

/// Decides whether values satisfy types, resolving names through one registry.
///
/// `hops` counts named references followed without descending into the
/// value; entering an element or property starts a fresh budget.
pub struct Matcher<'r> {
    registry: &'r TypeRegistry,
    policy: ValuePolicy,
}

impl<'r> Matcher<'r> {
    pub fn new(registry: &'r TypeRegistry, policy: ValuePolicy) -> Self {
        Self { registry, policy }
    }

    pub fn matches(&self, value: &Node<Expr>, ty: &TypeExpr) -> bool {
        let matched = self.matches_within(value, ty, 0);
        tracing::trace!(ty = %ty, matched, "matched value");
        matched
    }

    fn matches_within(&self, value: &Node<Expr>, ty: &TypeExpr, hops: usize) -> bool {
        ensure_sufficient_stack(|| self.matches_value(value, ty, hops))
    }

    fn matches_value(&self, value: &Node<Expr>, ty: &TypeExpr, hops: usize) -> bool {
        let value = strip_parens(value);

        match ty {
            TypeExpr::Primitive(PrimitiveKind::Any | PrimitiveKind::Unknown) => true,
            TypeExpr::Primitive(prim) => match classify(value) {
                Classification::Known(tag) => tag.satisfies(*prim),
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::Literal(expected) => match literal_value(value) {
                Some(actual) => actual == *expected,
                None => self.accepts_unclassified(value),
            },
            TypeExpr::Union(members) => members
                .iter()
                .any(|member| self.matches_within(value, member, hops)),
            TypeExpr::Intersection(members) => members
                .iter()
                .all(|member| self.matches_within(value, member, hops)),
            TypeExpr::ArrayOf(elem) => match &value.value {
                Expr::Array(elements) => elements.iter().all(|element| match element {
                    Some(element) => self.matches_within(element, elem, 0),
                    None => false,
                }),
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::Tuple(elems) => match &value.value {
                Expr::Array(elements) => {
                    elements.len() == elems.len()
                        && elements.iter().zip(elems).all(|(element, ty)| match element {
                            Some(element) => self.matches_within(element, ty, 0),
                            None => false,
                        })
                }
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::MapOf(key, val) => match &value.value {
                Expr::Object(_) => true,
                Expr::New { callee, args } if is_ident(callee, "Map") => {
                    self.map_entries_match(args, key, val)
                }
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::SetOf(elem) => match &value.value {
                Expr::Object(_) => true,
                Expr::New { callee, args } if is_ident(callee, "Set") => {
                    self.set_elements_match(args, elem)
                }
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::RecordOf(key, val) => match &value.value {
                Expr::Object(props) => self.record_matches(props, key, val),
                _ => self.accepts_unclassified(value),
            },
            TypeExpr::ObjectShape(_) => {
                matches!(value.value, Expr::Object(_)) || self.accepts_unclassified(value)
            }
            TypeExpr::Optional(inner) => {
                matches!(value.value, Expr::Literal(typedjs_ast::Literal::Undefined))
                    || self.matches_within(value, inner, hops)
            }
            TypeExpr::NamedReference(_) => self.matches_reference(value, ty, hops),
        }
    }

    fn matches_reference(&self, value: &Node<Expr>, ty: &TypeExpr, hops: usize) -> bool {
        if hops >= MAX_RESOLUTION_HOPS {
            return self.accepts_unclassified(value);
        }

        match self.registry.resolve_type(ty) {
            ResolvedType::Interface(..) => {
                matches!(value.value, Expr::Object(_)) || self.accepts_unclassified(value)
            }
            ResolvedType::Alias(_, body) => self.matches_within(value, body, hops + 1),
            ResolvedType::Enum(name, values) => self.enum_matches(value, name, values),
            ResolvedType::Direct(ty) => self.matches_within(value, ty, hops),
            ResolvedType::Opaque(_) => self.accepts_unclassified(value),
        }
    }

    /// Member access on the same enum, or a literal equal to one of its values
    fn enum_matches(&self, value: &Node<Expr>, enum_name: &str, values: &EnumValues) -> bool {
        if let Some((object, member)) = enum_member_access(value) {
            if self.registry.is_enum(object) {
                return object == enum_name && values.get(member).is_some();
            }
        }

        match literal_value(value) {
            Some(literal) => values.contains(&literal),
            None => self.accepts_unclassified(value),
        }
    }

    /// `new Map()` or `new Map([[k, v], ...])`; entries that are not pair
    /// literals are not inspected
    fn map_entries_match(&self, args: &[Node<Expr>], key: &TypeExpr, val: &TypeExpr) -> bool {
        let Some(first) = args.first() else {
            return true;
        };
        let Expr::Array(entries) = &strip_parens(first).value else {
            return true;
        };

        entries.iter().flatten().all(|entry| match &strip_parens(entry).value {
            Expr::Array(pair) => match pair.as_slice() {
                [Some(k), Some(v)] => {
                    self.matches_within(k, key, 0) && self.matches_within(v, val, 0)
                }
                _ => true,
            },
            _ => true,
        })
    }

    /// `new Set()` or `new Set([e, ...])`
    fn set_elements_match(&self, args: &[Node<Expr>], elem: &TypeExpr) -> bool {
        let Some(first) = args.first() else {
            return true;
        };
        let Expr::Array(elements) = &strip_parens(first).value else {
            return true;
        };

        elements
            .iter()
            .flatten()
            .filter(|element| !matches!(element.value, Expr::Spread(_)))
            .all(|element| self.matches_within(element, elem, 0))
    }

    fn record_matches(
        &self,
        props: &[Node<ObjectProperty>],
        key: &TypeExpr,
        val: &TypeExpr,
    ) -> bool {
        props.iter().all(|prop| match &prop.value {
            ObjectProperty::Property { key: name, value, .. } => {
                let key_ok = match name.text() {
                    Some(text) => self.key_matches(&text, key, 0),
                    None => true,
                };
                key_ok && self.matches_within(value, val, 0)
            }
            ObjectProperty::Method { key: name, .. } => {
                let key_ok = match name.text() {
                    Some(text) => self.key_matches(&text, key, 0),
                    None => true,
                };
                key_ok && val.is_top()
            }
            ObjectProperty::Spread(_) => true,
        })
    }

    /// Whether an object key satisfies a record key type
    fn key_matches(&self, key: &str, ty: &TypeExpr, hops: usize) -> bool {
        match ty {
            TypeExpr::Primitive(PrimitiveKind::String | PrimitiveKind::Any | PrimitiveKind::Unknown) => {
                true
            }
            TypeExpr::Primitive(PrimitiveKind::Number) => is_numeric_key(key),
            TypeExpr::Literal(LiteralValue::String(s)) => s == key,
            TypeExpr::Literal(LiteralValue::Number(n)) => format_number(*n) == key,
            TypeExpr::Union(members) => members.iter().any(|m| self.key_matches(key, m, hops)),
            TypeExpr::Intersection(members) => {
                members.iter().all(|m| self.key_matches(key, m, hops))
            }
            TypeExpr::NamedReference(_) if hops < MAX_RESOLUTION_HOPS => {
                match self.registry.resolve_type(ty) {
                    ResolvedType::Alias(_, body) => self.key_matches(key, body, hops + 1),
                    ResolvedType::Enum(_, values) => values.contains_key(key),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn accepts_unclassified(&self, value: &Node<Expr>) -> bool {
        self.policy == ValuePolicy::Lenient && classify(value) == Classification::Unsupported
    }

    /// Object shape behind a type, following at most the remaining hop budget
    fn shape_of<'t>(&'t self, ty: &'t TypeExpr, hops: usize) -> Option<(&'t ObjectShape, Option<&'t str>)> {
        match ty {
            TypeExpr::ObjectShape(shape) => Some((shape, None)),
            TypeExpr::Optional(inner) => self.shape_of(inner, hops),
            TypeExpr::NamedReference(_) if hops < MAX_RESOLUTION_HOPS => {
                match self.registry.resolve_type(ty) {
                    ResolvedType::Interface(name, shape) => Some((shape, Some(name))),
                    ResolvedType::Alias(name, body) => self
                        .shape_of(body, hops + 1)
                        .map(|(shape, inner)| (shape, inner.or(Some(name)))),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Diagnostics for a value checked against a type; empty when it matches.
    /// `context` names the object being validated in shape diagnostics.
    pub fn explain(&self, value: &Node<Expr>, ty: &TypeExpr, context: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.explain_within(value, ty, context, 0, &mut diagnostics);
        diagnostics
    }

    fn explain_within(
        &self,
        value: &Node<Expr>,
        ty: &TypeExpr,
        context: &str,
        hops: usize,
        out: &mut Vec<Diagnostic>,
    ) {
        ensure_sufficient_stack(|| self.explain_value(value, ty, context, hops, out))
    }

    fn explain_value(
        &self,
        value: &Node<Expr>,
        ty: &TypeExpr,
        context: &str,
        hops: usize,
        out: &mut Vec<Diagnostic>,
    ) {
        let value = strip_parens(value);
        if ty.is_top() {
            return;
        }

        // object literals against a shape get per-property findings
        if let Expr::Object(_) = value.value {
            if let Some((shape, name)) = self.shape_of(ty, hops) {
                out.extend(self.validate_object(value, shape, name.unwrap_or(context)));
                return;
            }
        }

        if self.matches_within(value, ty, hops) {
            return;
        }

        let span = value.span;
        let actual = classify(value).tag_name();

        match ty {
            TypeExpr::Tuple(elems) => match &value.value {
                Expr::Array(elements) if elements.len() != elems.len() => {
                    out.push(Diagnostic::invalid_tuple(span, elems.len(), elements.len()));
                }
                Expr::Array(elements) => {
                    for (element, elem_ty) in elements.iter().zip(elems) {
                        self.explain_element(element.as_ref(), elem_ty, span, context, out);
                    }
                }
                _ => out.push(Diagnostic::type_mismatch(span, ty, actual)),
            },
            TypeExpr::ArrayOf(elem_ty) => match &value.value {
                Expr::Array(elements) => {
                    for element in elements {
                        self.explain_element(element.as_ref(), elem_ty, span, context, out);
                    }
                }
                _ => out.push(Diagnostic::type_mismatch(span, ty, actual)),
            },
            TypeExpr::RecordOf(key_ty, val_ty) => match &value.value {
                Expr::Object(props) => {
                    let before = out.len();
                    self.explain_record(props, key_ty, val_ty, context, out);
                    if out.len() == before {
                        out.push(Diagnostic::type_mismatch(span, ty, actual));
                    }
                }
                _ => out.push(Diagnostic::type_mismatch(span, ty, actual)),
            },
            TypeExpr::Union(_) => out.push(Diagnostic::invalid_union(span, ty)),
            TypeExpr::Literal(expected) => {
                out.push(Diagnostic::invalid_literal(span, expected, value_text(value, actual)));
            }
            TypeExpr::Optional(inner) => self.explain_within(value, inner, context, hops, out),
            TypeExpr::NamedReference(name) if hops < MAX_RESOLUTION_HOPS => {
                match self.registry.resolve_type(ty) {
                    ResolvedType::Alias(alias, body) => {
                        self.explain_within(value, body, alias, hops + 1, out)
                    }
                    ResolvedType::Interface(_, shape) => {
                        out.push(Diagnostic::type_mismatch(span, shape, actual));
                    }
                    ResolvedType::Enum(enum_name, _) => {
                        out.push(Diagnostic::invalid_enum(span, value_text(value, actual), enum_name));
                    }
                    ResolvedType::Direct(_) | ResolvedType::Opaque(_) => {
                        out.push(Diagnostic::type_mismatch(span, name, actual));
                    }
                }
            }
            _ => out.push(Diagnostic::type_mismatch(span, ty, actual)),
        }
    }

    /// Array or tuple position; holes are reported on the whole array
    fn explain_element(
        &self,
        element: Option<&Node<Expr>>,
        ty: &TypeExpr,
        array_span: Span,
        context: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        match element {
            Some(element) => self.explain_within(element, ty, context, 0, out),
            None if !ty.is_top() => out.push(Diagnostic::type_mismatch(array_span, ty, "undefined")),
            None => {}
        }
    }

    /// Record entries whose key or value does not fit, each reported on
    /// the entry itself
    fn explain_record(
        &self,
        props: &[Node<ObjectProperty>],
        key_ty: &TypeExpr,
        val_ty: &TypeExpr,
        context: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        for prop in props {
            let (name, value) = match &prop.value {
                ObjectProperty::Property { key, value, .. } => (key, Some(value)),
                ObjectProperty::Method { key, .. } => (key, None),
                ObjectProperty::Spread(_) => continue,
            };

            if let Some(text) = name.text() {
                if !self.key_matches(&text, key_ty, 0) {
                    out.push(Diagnostic::type_mismatch(prop.span, key_ty, LiteralValue::String(text)));
                    continue;
                }
            }

            match value {
                Some(value) => self.explain_within(value, val_ty, context, 0, out),
                None if !val_ty.is_top() => {
                    out.push(Diagnostic::type_mismatch(prop.span, val_ty, "function"));
                }
                None => {}
            }
        }
    }

    /// Per-property validation of an object literal against a shape.
    ///
    /// Reports unexpected properties and mismatched values in property order,
    /// then missing required properties in declaration order. Spread members
    /// and computed keys are not inspected.
    pub fn validate_object(
        &self,
        object: &Node<Expr>,
        shape: &ObjectShape,
        context: &str,
    ) -> Vec<Diagnostic> {
        let object = strip_parens(object);
        let Expr::Object(props) = &object.value else {
            return vec![Diagnostic::type_mismatch(object.span, shape, classify(object).tag_name())];
        };

        let mut diagnostics = Vec::new();
        let mut provided = HashSet::new();

        for prop in props {
            let (key, value) = match &prop.value {
                ObjectProperty::Property { key, value, .. } => (key, Some(value)),
                ObjectProperty::Method { key, .. } => (key, None),
                ObjectProperty::Spread(_) => continue,
            };
            let Some(name) = key.text() else {
                continue;
            };

            match shape.property(&name) {
                None if shape.index_signature.is_none() => {
                    diagnostics.push(Diagnostic::extra_property(prop.span, &name, context));
                }
                None => {}
                Some(declared) => match value {
                    Some(value) => self.validate_property(
                        value,
                        declared.unwrap_optional(),
                        &name,
                        context,
                        &mut diagnostics,
                    ),
                    None if !declared.unwrap_optional().is_top() => {
                        diagnostics.push(Diagnostic::type_mismatch(
                            prop.span,
                            declared.unwrap_optional(),
                            "function",
                        ));
                    }
                    None => {}
                },
            }

            provided.insert(name);
        }

        for (name, declared) in &shape.properties {
            if !matches!(declared, TypeExpr::Optional(_)) && !provided.contains(name) {
                diagnostics.push(Diagnostic::missing_property(object.span, name, context));
            }
        }

        diagnostics
    }

    fn validate_property(
        &self,
        value: &Node<Expr>,
        declared: &TypeExpr,
        name: &str,
        context: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        let value = strip_parens(value);

        if let Expr::Object(_) = value.value {
            if let Some((shape, _)) = self.shape_of(declared, 0) {
                let nested = format!("{}.{}", context, name);
                out.extend(ensure_sufficient_stack(|| self.validate_object(value, shape, &nested)));
                return;
            }
        }

        if !self.matches_within(value, declared, 0) {
            out.push(Diagnostic::type_mismatch(value.span, declared, classify(value).tag_name()));
        }
    }
}

/// Keys a number converts back to exactly: `1`, `-2`, `0.5`; not `01`,
/// `1e3` or `NaN`
fn is_numeric_key(key: &str) -> bool {
    key.parse::<f64>()
        .map_or(false, |n| n.is_finite() && format_number(n) == key)
}

fn is_ident(expr: &Node<Expr>, name: &str) -> bool {
    matches!(&expr.value, Expr::Ident(ident) if ident.name == name)
}

/// `Enum.Member` as a pair of names
fn enum_member_access(value: &Node<Expr>) -> Option<(&str, &str)> {
    match &value.value {
        Expr::Member {
            object,
            property,
            optional: false,
        } => match &strip_parens(object).value {
            Expr::Ident(ident) => Some((ident.name.as_str(), property.value.name.as_str())),
            _ => None,
        },
        _ => None,
    }
}

/// Literal text of a value for diagnostics, or its tag
fn value_text(value: &Node<Expr>, tag: &str) -> String {
    if let Some(literal) = literal_value(value) {
        return literal.to_string();
    }
    match enum_member_access(value) {
        Some((object, member)) => format!("{}.{}", object, member),
        None => tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::translate::translate_type;
    use pretty_assertions::assert_eq;
    use typedjs_ast::Decl;

    /// Registers the declarations in `decls` and returns it with the
    /// annotation and initializer of the last declarator
    fn setup(source: &str) -> (TypeRegistry, TypeExpr, Node<Expr>) {
        let program = typedjs_parser::parse(source).unwrap();
        let mut registry = TypeRegistry::new();
        let mut binding = None;

        for item in &program.items {
            let Some(decl) = item.value.decl() else {
                continue;
            };
            match &decl.value {
                Decl::Interface(interface) => registry.declare_interface(
                    interface.name.value.name.clone(),
                    crate::translate::shape_from_members(&interface.body.members),
                ),
                Decl::TypeAlias(alias) => registry
                    .declare_alias(alias.name.value.name.clone(), translate_type(&alias.ty.value)),
                Decl::Enum(decl) => {
                    registry.declare_enum(decl.name.value.name.clone(), EnumValues::from_decl(decl))
                }
                Decl::Bindings(list) => {
                    let first = &list.bindings[0];
                    let ty = translate_type(&first.annotation.as_ref().unwrap().value);
                    binding = Some((ty, first.init.clone().unwrap()));
                }
                _ => {}
            }
        }

        let (ty, init) = binding.unwrap();
        (registry, ty, init)
    }

    fn check(source: &str) -> bool {
        let (registry, ty, init) = setup(source);
        Matcher::new(&registry, ValuePolicy::Lenient).matches(&init, &ty)
    }

    fn check_strict(source: &str) -> bool {
        let (registry, ty, init) = setup(source);
        Matcher::new(&registry, ValuePolicy::Strict).matches(&init, &ty)
    }

    fn explain(source: &str) -> Vec<Diagnostic> {
        let (registry, ty, init) = setup(source);
        Matcher::new(&registry, ValuePolicy::Lenient).explain(&init, &ty, "x")
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_primitives() {
        assert!(check("let x: string = 'a';"));
        assert!(!check("let x: string = 1;"));
        assert!(check("let x: number = -1;"));
        assert!(check("let x: bigint = 10n;"));
        assert!(!check("let x: number = 10n;"));
        assert!(check("let x: null = null;"));
        assert!(!check("let x: undefined = null;"));
        assert!(check("let x: object = {};"));
        assert!(!check("let x: object = [];"));
        assert!(check("let x: any = [];"));
        assert!(check("let x: unknown = 1;"));
    }

    #[test]
    fn test_literals_compare_type_and_value() {
        assert!(check("let x: 0 = 0;"));
        assert!(!check("let x: '0' = 0;"));
        assert!(check("let x: -1 = -1;"));
        assert!(!check("let x: 1 = -1;"));
        assert!(check("let x: true = true;"));
        assert!(check("let x: 10n = 10n;"));
        assert!(!check("let x: 10 = 10n;"));
    }

    #[test]
    fn test_unions_and_intersections() {
        assert!(check("let x: string | number = 1;"));
        assert!(!check("let x: string | number = true;"));
        assert!(check("let x: { a: string } & { b: string } = { a: 'x' };"));
        assert!(!check("let x: string & number = 'a';"));
    }

    #[test]
    fn test_arrays() {
        assert!(check("let x: number[] = [];"));
        assert!(check("let x: number[] = [1, 2, 3];"));
        assert!(!check("let x: number[] = [1, 'two'];"));
        assert!(!check("let x: number[] = [1, , 3];"));
        assert!(!check("let x: number[] = 'abc';"));
    }

    #[test]
    fn test_tuples() {
        assert!(check("let x: [number, string] = [1, 'a'];"));
        assert!(!check("let x: [number, string] = [1];"));
        assert!(!check("let x: [number, string] = [1, 'a', true];"));
        assert!(!check("let x: [number, string] = [1, 2];"));
    }

    #[test]
    fn test_containers() {
        assert!(check("let m: Map<string, number> = {};"));
        assert!(check("let m: Map<string, number> = new Map();"));
        assert!(check("let m: Map<string, number> = new Map([['a', 1], ['b', 2]]);"));
        assert!(!check("let m: Map<string, number> = new Map([['a', 'b']]);"));
        assert!(check("let s: Set<number> = new Set([1, 2]);"));
        assert!(!check("let s: Set<number> = new Set(['x']);"));
        assert!(!check("let s: Set<number> = 5;"));
        assert!(check("let r: Record<string, number> = { a: 1, b: 2 };"));
        assert!(!check("let r: Record<string, number> = { a: 'x' };"));
        assert!(check("let r: Record<'a' | 'b', number> = { a: 1 };"));
        assert!(!check("let r: Record<'a' | 'b', number> = { c: 1 };"));
        assert!(check("let r: Record<number, string> = { 1: 'one' };"));
    }

    #[test]
    fn test_unclassified_values_follow_policy() {
        assert!(check("let x: number = compute();"));
        assert!(!check_strict("let x: number = compute();"));
        assert!(check_strict("let x: any = compute();"));
        assert!(check_strict("let m: Map<string, number> = new Map();"));
    }

    #[test]
    fn test_named_references() {
        assert!(check("interface User { name: string } let u: User = { name: 'a' };"));
        assert!(!check("interface User { name: string } let u: User = 'a';"));
        assert!(check("type Id = string | number; let id: Id = 7;"));
        assert!(!check("type Id = string | number; let id: Id = true;"));
        assert!(!check("let u: Missing = { name: 'a' };"));
        assert!(check("let u: Missing = load();"));
    }

    #[test]
    fn test_resolution_stops_after_one_hop() {
        let source = "type Inner = string; type Outer = Inner; let x: Outer = 'a';";
        assert!(!check(source));

        // a reference inside a structure gets a fresh budget
        assert!(check("type Name = string; type Names = Name[]; let x: Names = ['a'];"));
    }

    #[test]
    fn test_self_referential_alias_terminates() {
        assert!(check("type Loop = Loop | string; let x: Loop = 'a';"));
        assert!(!check("type Loop = Loop | string; let x: Loop = 1;"));
    }

    #[test]
    fn test_enum_membership() {
        let decls = "enum Color { Red, Green = 'g' } enum Size { Small }";
        assert!(check(&format!("{} let c: Color = Color.Red;", decls)));
        assert!(!check(&format!("{} let c: Color = Color.Blue;", decls)));
        assert!(!check(&format!("{} let c: Color = Size.Small;", decls)));
        assert!(check(&format!("{} let c: Color = 0;", decls)));
        assert!(check(&format!("{} let c: Color = 'g';", decls)));
        assert!(!check(&format!("{} let c: Color = 7;", decls)));

        let flags = "enum Flags { A, B = 'b', C, D = 1 << 2, E }";
        assert!(check(&format!("{} let f: Flags = 3;", flags)));
        assert!(!check(&format!("{} let f: Flags = 4;", flags)));
    }

    #[test]
    fn test_explain_literal_and_union() {
        let diagnostics = explain("let x: 'on' = 'off';");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::InvalidLiteral]);
        assert_eq!(diagnostics[0].message, "Expected literal value \"on\", got \"off\"");

        let diagnostics = explain("type Status = 'active' | 'inactive'; let s: Status = 'pending';");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::InvalidUnion]);
        assert_eq!(
            diagnostics[0].message,
            "Value does not match any type in union: \"active\" | \"inactive\""
        );
    }

    #[test]
    fn test_explain_tuple() {
        let diagnostics = explain("let p: [number, string] = [1, 2, 3];");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::InvalidTuple]);
        assert_eq!(diagnostics[0].datum("expected"), Some("2"));

        let diagnostics = explain("type Pair = [number, string]; let p: Pair = [1, 2];");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::TypeMismatch]);
        assert_eq!(diagnostics[0].datum("expected"), Some("string"));
        assert_eq!(diagnostics[0].datum("actual"), Some("number"));
    }

    #[test]
    fn test_explain_array_elements() {
        let diagnostics = explain("let xs: number[] = [1, 'a', true];");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::TypeMismatch, DiagnosticKind::TypeMismatch]
        );
        assert_eq!(diagnostics[1].datum("actual"), Some("boolean"));
    }

    #[test]
    fn test_explain_enum() {
        let diagnostics = explain("enum Color { Red } let c: Color = 3;");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::InvalidEnum]);
        assert_eq!(diagnostics[0].message, "Value 3 is not valid for enum Color");
    }

    #[test]
    fn test_explain_matching_value_is_silent() {
        assert!(explain("let x: string = 'ok';").is_empty());
        assert!(explain("let x: number = compute();").is_empty());
    }

    #[test]
    fn test_validate_object_missing_and_extra() {
        let decl = "interface User { name: string; age: number }";

        let diagnostics = explain(&format!("{} let u: User = {{ name: 'Alice' }};", decl));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::MissingProperty]);
        assert_eq!(diagnostics[0].message, "Property 'age' is missing in 'User'");

        let diagnostics = explain(&format!(
            "{} let u: User = {{ name: 'Alice', age: 30, extra: true }};",
            decl
        ));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ExtraProperty]);
        assert_eq!(diagnostics[0].message, "Unexpected property 'extra' in 'User'");
    }

    #[test]
    fn test_validate_object_values_and_optionals() {
        let decl = "interface User { name: string; age?: number }";

        assert!(explain(&format!("{} let u: User = {{ name: 'a' }};", decl)).is_empty());

        let diagnostics = explain(&format!("{} let u: User = {{ name: 1, age: 'x' }};", decl));
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::TypeMismatch, DiagnosticKind::TypeMismatch]
        );
        assert_eq!(diagnostics[1].datum("expected"), Some("number"));
    }

    #[test]
    fn test_explain_record_entries() {
        let source = "let r: Record<'a' | 'b', number> = { a: 1, b: 'x', c: 2 };";
        let diagnostics = explain(source);
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::TypeMismatch, DiagnosticKind::TypeMismatch]
        );
        assert_eq!(diagnostics[0].datum("actual"), Some("string"));
        assert_eq!(diagnostics[1].datum("expected"), Some("\"a\" | \"b\""));
        assert_eq!(diagnostics[1].datum("actual"), Some("\"c\""));

        let start = source.find("b: 'x'").unwrap();
        assert_eq!(diagnostics[0].span.start, start + 3);
    }

    #[test]
    fn test_numeric_record_keys_must_be_canonical() {
        assert!(check("let r: Record<number, string> = { 0: 'a', '-1': 'b', 0.5: 'c' };"));
        assert!(!check("let r: Record<number, string> = { NaN: 'a' };"));
        assert!(!check("let r: Record<number, string> = { inf: 'a' };"));
        assert!(!check("let r: Record<number, string> = { '01': 'a' };"));
        assert!(!check("let r: Record<number, string> = { '1e3': 'a' };"));
    }

    #[test]
    fn test_methods_only_satisfy_top_types() {
        let diagnostics = explain("interface Named { name: string; run: unknown } let n: Named = { name() {}, run() {} };");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::TypeMismatch]);
        assert_eq!(diagnostics[0].datum("expected"), Some("string"));
        assert_eq!(diagnostics[0].datum("actual"), Some("function"));

        assert!(!check("let r: Record<string, number> = { total() {} };"));
        assert!(check("let r: Record<string, unknown> = { total() {} };"));
    }

    #[test]
    fn test_index_signature_accepts_unknown_keys() {
        let diagnostics = explain(
            "interface Bag { id: number; [key: string]: unknown } let b: Bag = { id: 1, color: 'red' };",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_nested_objects_use_dotted_context() {
        let source = "interface Address { city: string } \
                      interface User { address: Address } \
                      let u: User = { address: { town: 'x' } };";
        let diagnostics = explain(source);
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::ExtraProperty, DiagnosticKind::MissingProperty]
        );
        assert_eq!(diagnostics[0].datum("interfaceName"), Some("User.address"));
    }

    #[test]
    fn test_inline_shape_uses_given_context() {
        let diagnostics = explain("let point: { x: number } = { y: 1 };");
        assert_eq!(diagnostics[0].datum("interfaceName"), Some("x"));
    }

    #[test]
    fn test_interface_elements_match_by_construction() {
        let decl = "interface Item { id: number }";
        assert!(explain(&format!("{} let items: Item[] = [{{ id: 'two' }}];", decl)).is_empty());

        let diagnostics = explain(&format!("{} let items: Item[] = [{{ id: 1 }}, 'two'];", decl));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::TypeMismatch]);
        assert_eq!(diagnostics[0].datum("expected"), Some("{ id: number }"));
        assert_eq!(diagnostics[0].datum("actual"), Some("string"));
    }
}
