//! Declared types of one validation pass

use std::collections::HashMap;

use typedjs_ast::{format_number, EnumDecl};

use crate::classify::literal_value;
use crate::types::{LiteralValue, ObjectShape, TypeExpr};

/// How many named references a single resolution may follow. An alias whose
/// body is itself a reference resolves to that reference, which is then
/// treated as opaque.
pub const MAX_RESOLUTION_HOPS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEntry {
    Interface(ObjectShape),
    Alias(TypeExpr),
    Enum(EnumValues),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    Number(f64),
    String(String),
    /// Boolean or bigint literal initializer; matches no value
    Other,
}

/// Enum members and their values, in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumValues {
    members: Vec<(String, EnumValue)>,
}

impl EnumValues {
    /// Evaluates member values: numbering starts at 0 and continues from the
    /// last explicit numeric initializer. A member without a literal
    /// initializer (`D = 1 << 2`) takes the next number.
    pub fn from_decl(decl: &EnumDecl) -> Self {
        let mut members = Vec::with_capacity(decl.members.len());
        let mut next = 0.0;

        for member in &decl.members {
            let value = match member.init.as_ref().and_then(literal_value) {
                Some(LiteralValue::Number(n)) => {
                    next = n + 1.0;
                    EnumValue::Number(n)
                }
                Some(LiteralValue::String(s)) => EnumValue::String(s),
                Some(LiteralValue::Boolean(_) | LiteralValue::BigInt(_)) => EnumValue::Other,
                None => {
                    let value = EnumValue::Number(next);
                    next += 1.0;
                    value
                }
            };
            members.push((member.name.value.name.clone(), value));
        }

        Self { members }
    }

    pub fn get(&self, member: &str) -> Option<&EnumValue> {
        self.members
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumValue)> {
        self.members.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a literal equals the value of some member
    pub fn contains(&self, literal: &LiteralValue) -> bool {
        self.members.iter().any(|(_, value)| match (value, literal) {
            (EnumValue::Number(a), LiteralValue::Number(b)) => a == b,
            (EnumValue::String(a), LiteralValue::String(b)) => a == b,
            _ => false,
        })
    }

    /// Whether an object key names some member value (`Record<Color, _>`)
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.iter().any(|(_, value)| match value {
            EnumValue::Number(n) => format_number(*n) == key,
            EnumValue::String(s) => s == key,
            EnumValue::Other => false,
        })
    }
}

/// Result of resolving a type expression through the registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedType<'a> {
    /// Not a named reference
    Direct(&'a TypeExpr),
    Interface(&'a str, &'a ObjectShape),
    Alias(&'a str, &'a TypeExpr),
    Enum(&'a str, &'a EnumValues),
    /// Unknown name
    Opaque(&'a str),
}

/// Name → declaration table. Owned by one pass; later declarations of a
/// name replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_interface(&mut self, name: impl Into<String>, shape: ObjectShape) {
        self.declare(name.into(), RegistryEntry::Interface(shape));
    }

    pub fn declare_alias(&mut self, name: impl Into<String>, ty: TypeExpr) {
        self.declare(name.into(), RegistryEntry::Alias(ty));
    }

    pub fn declare_enum(&mut self, name: impl Into<String>, values: EnumValues) {
        self.declare(name.into(), RegistryEntry::Enum(values));
    }

    fn declare(&mut self, name: String, entry: RegistryEntry) {
        tracing::debug!(name = %name, kind = entry.kind_name(), "declared type");
        if self.entries.insert(name.clone(), entry).is_some() {
            tracing::debug!(name = %name, "replaced earlier declaration");
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Performs a single lookup for a named reference
    pub fn resolve_type<'a>(&'a self, ty: &'a TypeExpr) -> ResolvedType<'a> {
        let TypeExpr::NamedReference(name) = ty else {
            return ResolvedType::Direct(ty);
        };

        match self.entries.get_key_value(name.as_str()) {
            Some((name, RegistryEntry::Interface(shape))) => ResolvedType::Interface(name, shape),
            Some((name, RegistryEntry::Alias(body))) => ResolvedType::Alias(name, body),
            Some((name, RegistryEntry::Enum(values))) => ResolvedType::Enum(name, values),
            None => ResolvedType::Opaque(name),
        }
    }

    pub fn is_enum(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(RegistryEntry::Enum(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegistryEntry {
    fn kind_name(&self) -> &'static str {
        match self {
            RegistryEntry::Interface(_) => "interface",
            RegistryEntry::Alias(_) => "alias",
            RegistryEntry::Enum(_) => "enum",
        }
    }
}
