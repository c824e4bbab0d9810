//! Declaration handling: type registration and function/class bodies

use typedjs_ast::{Class, ClassMember, Decl, EnumDecl, Function, InterfaceDecl, Param, Type};

use crate::checker::Checker;
use crate::registry::{EnumValues, RegistryEntry};
use crate::translate::{shape_from_members, translate_type};
use crate::types::ObjectShape;

impl Checker<'_> {
    pub(crate) fn check_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Bindings(list) => self.check_bindings(list),
            Decl::Interface(interface) => self.register_interface(interface),
            Decl::TypeAlias(alias) => self
                .registry
                .declare_alias(alias.name.value.name.clone(), translate_type(&alias.ty.value)),
            Decl::Enum(enum_decl) => self.register_enum(enum_decl),
            Decl::Function(function) => self.check_function(function),
            Decl::Class(class) => self.check_class(class),
        }
    }

    /// Parents already in the registry contribute their properties first;
    /// the interface's own members override them
    fn register_interface(&mut self, interface: &InterfaceDecl) {
        let mut shape = ObjectShape::new();

        for parent in &interface.parents {
            let Type::Reference { name, .. } = &parent.value else {
                continue;
            };
            match self.registry.resolve(&name.value.name) {
                Some(RegistryEntry::Interface(inherited)) => shape.extend_from(inherited),
                _ => tracing::debug!(
                    interface = %interface.name.value.name,
                    parent = %name.value.name,
                    "ignoring unknown parent interface"
                ),
            }
        }

        shape.extend_from(&shape_from_members(&interface.body.members));
        self.registry
            .declare_interface(interface.name.value.name.clone(), shape);
    }

    fn register_enum(&mut self, enum_decl: &EnumDecl) {
        let values = EnumValues::from_decl(enum_decl);
        self.registry
            .declare_enum(enum_decl.name.value.name.clone(), values);
    }

    pub(crate) fn check_function(&mut self, function: &Function) {
        self.check_params(&function.params);
        if let Some(body) = &function.body {
            self.check_block(&body.value);
        }
    }

    /// Parameter defaults may hold nested functions with bindings of their own
    pub(crate) fn check_params(&mut self, params: &[Param]) {
        for default in params.iter().filter_map(|param| param.default.as_ref()) {
            self.check_expr(default);
        }
    }

    pub(crate) fn check_class(&mut self, class: &Class) {
        if let Some(heritage) = &class.heritage {
            self.check_expr(heritage);
        }

        for member in &class.members {
            match member {
                ClassMember::Constructor { params, body } => {
                    self.check_params(params);
                    if let Some(body) = body {
                        self.check_block(&body.value);
                    }
                }
                ClassMember::Method { function, .. } => self.check_function(function),
                ClassMember::Field { init, .. } => {
                    if let Some(init) = init {
                        self.check_expr(init);
                    }
                }
                ClassMember::StaticBlock(body) => self.check_block(&body.value),
            }
        }
    }
}
