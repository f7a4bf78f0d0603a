//! The declare phase for composite and interface declarations, and the
//! check phase for concrete composites.
//!
//! Declaring registers a near-empty placeholder type so that fields,
//! functions, and initializers elsewhere in the same scope can already refer
//! to the declared type; members are populated by the check phase.

use vela_ir::ast::{
    Access, CompositeDeclaration, DeclarationKind, Identifier, InterfaceDeclaration, Members,
};
use vela_ir::Name;

use crate::checker::{Checker, ContainerKind};
use crate::fault;
use crate::functions::FunctionCheckFlags;
use crate::types::{Type, TypeId};

/// Identifier occurrences sharing one body namespace, in tie-break order:
/// fields, functions, nested composites, nested interfaces.
pub(crate) fn body_identifier_occurrences(
    members: &Members,
    composites: &[CompositeDeclaration],
    interfaces: &[InterfaceDeclaration],
) -> Vec<(Identifier, DeclarationKind)> {
    let mut occurrences = Vec::new();
    for field in &members.fields {
        occurrences.push((field.identifier, DeclarationKind::Field));
    }
    for function in &members.functions {
        occurrences.push((function.identifier, DeclarationKind::Function));
    }
    for composite in composites {
        occurrences.push((composite.identifier, composite.declaration_kind()));
    }
    for interface in interfaces {
        occurrences.push((interface.identifier, interface.declaration_kind()));
    }
    occurrences
}

/// Find the nested declaration node carrying `name`, for re-declaring the
/// produced nested type in the check phase.
pub(crate) fn find_nested_declaration(
    composites: &[CompositeDeclaration],
    interfaces: &[InterfaceDeclaration],
    name: Name,
) -> Option<(Identifier, DeclarationKind, Access)> {
    interfaces
        .iter()
        .map(|declaration| {
            (
                declaration.identifier,
                declaration.declaration_kind(),
                declaration.access,
            )
        })
        .chain(composites.iter().map(|declaration| {
            (
                declaration.identifier,
                declaration.declaration_kind(),
                declaration.access,
            )
        }))
        .find(|(identifier, _, _)| identifier.name == name)
}

impl Checker<'_> {
    /// Declare phase for an interface declaration. Returns the placeholder's
    /// id; the caller passes it back to `check_interface_declaration` once
    /// every sibling has been declared.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn declare_interface_declaration(
        &mut self,
        declaration: &InterfaceDeclaration,
    ) -> TypeId {
        let identifier = declaration.identifier;

        // Fields and functions may already refer to the interface itself;
        // the placeholder makes the name resolvable before members exist.
        let type_id =
            self.registry
                .alloc_interface(identifier.name, declaration.kind, declaration.span);

        self.declare_type(
            identifier,
            Type::Interface(type_id),
            declaration.declaration_kind(),
            declaration.access,
        );

        self.declare_nested(
            type_id,
            &declaration.composite_declarations,
            &declaration.interface_declarations,
        );

        // Members and initializer parameter types are deliberately left
        // unset: signatures may refer to siblings not yet declared.
        type_id
    }

    /// Declare phase for a concrete composite declaration.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn declare_composite_declaration(
        &mut self,
        declaration: &CompositeDeclaration,
    ) -> TypeId {
        let identifier = declaration.identifier;

        let type_id =
            self.registry
                .alloc_composite(identifier.name, declaration.kind, declaration.span);

        self.declare_type(
            identifier,
            Type::Composite(type_id),
            declaration.declaration_kind(),
            declaration.access,
        );

        self.declare_nested(
            type_id,
            &declaration.composite_declarations,
            &declaration.interface_declarations,
        );

        type_id
    }

    /// Declare the nested declarations of a body inside fresh type and
    /// value scope layers, attach the produced types to the enclosing
    /// entry's nested-type map, and wire container back-references.
    ///
    /// Nested concrete composites are checked right away; nested interfaces
    /// are only declared here and checked during the enclosing check phase,
    /// so that nested siblings can reference each other.
    fn declare_nested(
        &mut self,
        type_id: TypeId,
        composites: &[CompositeDeclaration],
        interfaces: &[InterfaceDeclaration],
    ) {
        self.with_type_scope(|checker| {
            checker.with_value_scope(|checker| {
                let mut interface_ids = Vec::with_capacity(interfaces.len());
                for nested_interface in interfaces {
                    let nested_id = checker.declare_interface_declaration(nested_interface);
                    interface_ids.push(nested_id);
                    checker.attach_nested_type(
                        type_id,
                        nested_interface.identifier.name,
                        nested_id,
                        Type::Interface(nested_id),
                    );
                }
                checker.nested_interface_types.insert(type_id, interface_ids);

                let mut composite_ids = Vec::with_capacity(composites.len());
                for nested_composite in composites {
                    let nested_id = checker.declare_composite_declaration(nested_composite);
                    composite_ids.push(nested_id);
                    checker.attach_nested_type(
                        type_id,
                        nested_composite.identifier.name,
                        nested_id,
                        Type::Composite(nested_id),
                    );
                }

                for (nested_composite, nested_id) in composites.iter().zip(composite_ids) {
                    checker.check_composite_declaration(nested_composite, nested_id);
                }
            });
        });
    }

    /// Record a nested type in the enclosing entry's map (first declaration
    /// wins on a name collision) and wire its container back-reference.
    fn attach_nested_type(
        &mut self,
        container_id: TypeId,
        name: Name,
        nested_id: TypeId,
        nested_type: Type,
    ) {
        self.registry.entry_mut(nested_id).container = Some(container_id);
        self.registry
            .entry_mut(container_id)
            .nested_types
            .entry(name)
            .or_insert(nested_type);
    }

    /// Check phase for a concrete composite declaration. Conformance
    /// checking against declared interfaces is a separate checker and not
    /// run here.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_composite_declaration(
        &mut self,
        declaration: &CompositeDeclaration,
        type_id: TypeId,
    ) {
        self.with_container_checking(type_id, |checker| {
            checker.check_declaration_access_modifier(
                declaration.access,
                declaration.declaration_kind(),
                declaration.identifier.span,
            );

            checker.check_fields_access_modifier(
                &declaration.members.fields,
                declaration.kind.is_resource(),
            );

            let occurrences = body_identifier_occurrences(
                &declaration.members,
                &declaration.composite_declarations,
                &declaration.interface_declarations,
            );
            checker.check_nested_identifiers(&occurrences);

            checker.with_type_scope(|checker| {
                checker.redeclare_nested_types(
                    type_id,
                    &declaration.composite_declarations,
                    &declaration.interface_declarations,
                );

                let members = checker.members_and_origins(&declaration.members);
                let initializer_parameter_types =
                    checker.initializer_parameter_type_annotations(&declaration.members);

                let entry = checker.registry.entry_mut(type_id);
                entry.members = members.clone();
                entry.initializer_parameter_types = initializer_parameter_types;

                checker.check_initializers(
                    &declaration.members,
                    &members,
                    ContainerKind::Composite,
                    declaration.declaration_kind(),
                    declaration.span,
                );
                checker.check_destructors(
                    &declaration.members,
                    ContainerKind::Composite,
                    declaration.kind,
                    declaration.declaration_kind(),
                );
                checker.check_unknown_special_functions(&declaration.members);
                checker.check_composite_functions(declaration, type_id);
                checker.check_resource_field_nesting(&members, declaration.kind);

                checker.check_nested_interfaces(type_id, &declaration.interface_declarations);
            });
        });
    }

    /// Re-declare the nested types produced in the declare phase into a
    /// freshly entered type scope, so member signatures can reference them.
    pub(crate) fn redeclare_nested_types(
        &mut self,
        type_id: TypeId,
        composites: &[CompositeDeclaration],
        interfaces: &[InterfaceDeclaration],
    ) {
        let nested_types: Vec<(Name, Type)> = self
            .registry
            .entry(type_id)
            .nested_types
            .iter()
            .map(|(name, ty)| (*name, ty.clone()))
            .collect();

        for (name, nested_type) in nested_types {
            let Some((identifier, declaration_kind, access)) =
                find_nested_declaration(composites, interfaces, name)
            else {
                // A registered nested type always has a declaration node.
                fault::internal("nested type without a nested declaration");
            };
            self.declare_type(identifier, nested_type, declaration_kind, access);
        }
    }

    /// Run the check phase of the nested interfaces recorded during the
    /// declare phase, inside the currently entered nested type scope.
    pub(crate) fn check_nested_interfaces(
        &mut self,
        type_id: TypeId,
        interfaces: &[InterfaceDeclaration],
    ) {
        let nested_ids = self
            .nested_interface_types
            .get(&type_id)
            .cloned()
            .unwrap_or_default();
        for (nested_interface, nested_id) in interfaces.iter().zip(nested_ids) {
            self.check_interface_declaration(nested_interface, nested_id);
        }
    }

    /// Check the functions of a concrete composite body. `self` is bound
    /// once for the whole body; each function's parameters live in their
    /// own scope.
    fn check_composite_functions(
        &mut self,
        declaration: &CompositeDeclaration,
        type_id: TypeId,
    ) {
        let mut flags = FunctionCheckFlags::DECLARE_FUNCTION | FunctionCheckFlags::REQUIRE_BODY;
        if declaration.kind.is_resource() {
            flags |= FunctionCheckFlags::ALLOW_AUTH_MODIFIER;
        }
        self.with_value_scope(|checker| {
            checker.declare_self_value(Type::Composite(type_id));
            for function in &declaration.members.functions {
                checker.visit_function_declaration(function, flags);
            }
        });
    }
}
