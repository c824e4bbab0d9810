//! Annotation syntax → type expressions

use typedjs_ast::{LiteralType, Node, Type, TypeMember};

use crate::types::{IndexSignature, LiteralValue, ObjectShape, TypeExpr};

/// Translates a type annotation. A missing annotation is `any`; forms the
/// checker has no model for degrade to `unknown`.
pub fn translate(annotation: Option<&Node<Type>>) -> TypeExpr {
    match annotation {
        Some(node) => translate_type(&node.value),
        None => TypeExpr::ANY,
    }
}

pub fn translate_type(ty: &Type) -> TypeExpr {
    match ty {
        Type::Primitive(prim) => TypeExpr::Primitive((*prim).into()),
        Type::Literal(lit) => TypeExpr::Literal(match lit {
            LiteralType::String(s) => LiteralValue::String(s.clone()),
            LiteralType::Number(n) => LiteralValue::Number(*n),
            LiteralType::Boolean(b) => LiteralValue::Boolean(*b),
            LiteralType::BigInt(digits) => LiteralValue::BigInt(digits.clone()),
        }),
        Type::Union(types) => TypeExpr::Union(translate_all(types)),
        Type::Intersection(types) => TypeExpr::Intersection(translate_all(types)),
        Type::Array(elem) => TypeExpr::ArrayOf(Box::new(translate_type(&elem.value))),
        Type::Tuple(elems) => TypeExpr::Tuple(translate_all(elems)),
        Type::Reference { name, args } => {
            builtin_container(&name.value.name, args)
                .unwrap_or_else(|| TypeExpr::NamedReference(name.value.name.clone()))
        }
        Type::Object(object) => TypeExpr::ObjectShape(shape_from_members(&object.members)),
        Type::Paren(inner) => translate_type(&inner.value),
        Type::Function(_) | Type::Query(_) | Type::KeyOf(_) | Type::Indexed { .. } => {
            TypeExpr::UNKNOWN
        }
    }
}

fn translate_all(types: &[Node<Type>]) -> Vec<TypeExpr> {
    types.iter().map(|ty| translate_type(&ty.value)).collect()
}

/// `Array<T>`, `Set<T>`, `Map<K, V>` and `Record<K, V>` with exactly their
/// arity; anything else is left to the registry
fn builtin_container(name: &str, args: &[Node<Type>]) -> Option<TypeExpr> {
    let container = match (name, args) {
        ("Array", [elem]) => TypeExpr::ArrayOf(Box::new(translate_type(&elem.value))),
        ("Set", [elem]) => TypeExpr::SetOf(Box::new(translate_type(&elem.value))),
        ("Map", [key, value]) => TypeExpr::MapOf(
            Box::new(translate_type(&key.value)),
            Box::new(translate_type(&value.value)),
        ),
        ("Record", [key, value]) => TypeExpr::RecordOf(
            Box::new(translate_type(&key.value)),
            Box::new(translate_type(&value.value)),
        ),
        _ => return None,
    };
    Some(container)
}

/// Builds a shape from interface or object-type members. Method signatures
/// become `unknown` properties; computed names are skipped.
pub fn shape_from_members(members: &[TypeMember]) -> ObjectShape {
    let mut shape = ObjectShape::new();

    for member in members {
        match member {
            TypeMember::Property {
                key, ty, optional, ..
            } => {
                if let Some(name) = key.text() {
                    shape.insert(name, optional_if(translate_type(&ty.value), *optional));
                }
            }
            TypeMember::Method { key, optional, .. } => {
                if let Some(name) = key.text() {
                    shape.insert(name, optional_if(TypeExpr::UNKNOWN, *optional));
                }
            }
            TypeMember::Index { key, value, .. } => {
                shape.index_signature = Some(IndexSignature {
                    key_type: Box::new(translate_type(&key.value)),
                    value_type: Box::new(translate_type(&value.value)),
                });
            }
        }
    }

    shape
}

fn optional_if(ty: TypeExpr, optional: bool) -> TypeExpr {
    if optional {
        TypeExpr::Optional(Box::new(ty))
    } else {
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;
    use pretty_assertions::assert_eq;
    use typedjs_ast::Decl;

    /// Annotation of the first binding in `source`
    fn annotation(source: &str) -> TypeExpr {
        let program = typedjs_parser::parse(source).unwrap();
        match program.items[0].value.decl().map(|decl| &decl.value) {
            Some(Decl::Bindings(list)) => translate(list.bindings[0].annotation.as_ref()),
            other => panic!("expected bindings, got {:?}", other),
        }
    }

    fn string() -> TypeExpr {
        TypeExpr::Primitive(PrimitiveKind::String)
    }

    fn number() -> TypeExpr {
        TypeExpr::Primitive(PrimitiveKind::Number)
    }

    #[test]
    fn test_missing_annotation_is_any() {
        assert_eq!(translate(None), TypeExpr::ANY);
        assert_eq!(annotation("let x = 1;"), TypeExpr::ANY);
    }

    #[test]
    fn test_primitives_and_literals() {
        assert_eq!(annotation("let x: string;"), string());
        assert_eq!(annotation("let x: bigint;"), TypeExpr::Primitive(PrimitiveKind::Bigint));
        assert_eq!(
            annotation("let x: -1;"),
            TypeExpr::Literal(LiteralValue::Number(-1.0))
        );
        assert_eq!(
            annotation("let x: 'on' | false;"),
            TypeExpr::Union(vec![
                TypeExpr::Literal(LiteralValue::String("on".into())),
                TypeExpr::Literal(LiteralValue::Boolean(false)),
            ])
        );
    }

    #[test]
    fn test_arrays_and_tuples() {
        assert_eq!(annotation("let x: number[];"), TypeExpr::ArrayOf(Box::new(number())));
        assert_eq!(annotation("let x: Array<number>;"), TypeExpr::ArrayOf(Box::new(number())));
        assert_eq!(
            annotation("let x: [number, string];"),
            TypeExpr::Tuple(vec![number(), string()])
        );
        assert_eq!(
            annotation("let x: (string | number)[];"),
            TypeExpr::ArrayOf(Box::new(TypeExpr::Union(vec![string(), number()])))
        );
    }

    #[test]
    fn test_containers_need_their_arity() {
        assert_eq!(
            annotation("let x: Map<string, number>;"),
            TypeExpr::MapOf(Box::new(string()), Box::new(number()))
        );
        assert_eq!(annotation("let x: Set<string>;"), TypeExpr::SetOf(Box::new(string())));
        assert_eq!(
            annotation("let x: Record<string, number>;"),
            TypeExpr::RecordOf(Box::new(string()), Box::new(number()))
        );
        assert_eq!(
            annotation("let x: Map<string>;"),
            TypeExpr::NamedReference("Map".into())
        );
        assert_eq!(annotation("let x: Array;"), TypeExpr::NamedReference("Array".into()));
    }

    #[test]
    fn test_user_generics_are_plain_references() {
        assert_eq!(
            annotation("let x: Box<number>;"),
            TypeExpr::NamedReference("Box".into())
        );
    }

    #[test]
    fn test_object_type() {
        let mut expected = ObjectShape::new();
        expected.insert("name", string());
        expected.insert("age", TypeExpr::Optional(Box::new(number())));
        expected.insert("greet", TypeExpr::UNKNOWN);
        expected.index_signature = Some(IndexSignature {
            key_type: Box::new(string()),
            value_type: Box::new(TypeExpr::UNKNOWN),
        });

        assert_eq!(
            annotation("let x: { name: string; age?: number; greet(): void; [key: string]: unknown };"),
            TypeExpr::ObjectShape(expected)
        );
    }

    #[test]
    fn test_unsupported_forms_degrade() {
        assert_eq!(annotation("let x: (a: number) => void;"), TypeExpr::UNKNOWN);
        assert_eq!(annotation("let x: typeof config;"), TypeExpr::UNKNOWN);
        assert_eq!(annotation("let x: keyof User;"), TypeExpr::UNKNOWN);
        assert_eq!(annotation("let x: User['name'];"), TypeExpr::UNKNOWN);
        assert_eq!(annotation("let x: (string);"), string());
    }
}
