//! The check phase for interface declarations.
//!
//! Runs once every sibling declaration has been declared, so member
//! signatures can reference siblings and nested types freely. Every rule
//! violation is a diagnostic and checking continues past it.

use vela_ir::ast::{DeclarationKind, FunctionBlock, InterfaceDeclaration};

use crate::checker::{Checker, ContainerKind};
use crate::declarations::body_identifier_occurrences;
use crate::functions::FunctionCheckFlags;
use crate::types::{Type, TypeId};
use vela_diagnostic::{Diagnostic, ErrorCode};

impl Checker<'_> {
    /// Check phase for an interface declaration: populate the placeholder
    /// registered by `declare_interface_declaration` and validate the
    /// declaration body.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_interface_declaration(
        &mut self,
        declaration: &InterfaceDeclaration,
        type_id: TypeId,
    ) {
        self.with_container_checking(type_id, |checker| {
            checker.check_declaration_access_modifier(
                declaration.access,
                declaration.declaration_kind(),
                declaration.identifier.span,
            );

            // NOTE: function access is checked separately, inside function
            // checking, where the resource-receiver context is known.
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

            // Re-enter a scope for nested types, so initializer, field, and
            // function signatures can reference them.
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
                    ContainerKind::Interface,
                    declaration.declaration_kind(),
                    declaration.span,
                );
                checker.check_destructors(
                    &declaration.members,
                    ContainerKind::Interface,
                    declaration.kind,
                    declaration.declaration_kind(),
                );
                checker.check_unknown_special_functions(&declaration.members);
                checker.check_interface_functions(declaration, type_id);
                checker.check_resource_field_nesting(&members, declaration.kind);
                checker.check_composite_kind_support(
                    declaration.kind,
                    declaration.declaration_kind(),
                    declaration.identifier,
                );

                checker.check_nested_interfaces(type_id, &declaration.interface_declarations);
            });
        });
    }

    /// Check the functions of an interface body. Each function gets a fresh
    /// value scope: function declarations are not visible to each other,
    /// and `self` is only visible inside the function.
    fn check_interface_functions(
        &mut self,
        declaration: &InterfaceDeclaration,
        type_id: TypeId,
    ) {
        let mut flags = FunctionCheckFlags::empty();
        if declaration.kind.is_resource() {
            flags |= FunctionCheckFlags::ALLOW_AUTH_MODIFIER;
        }

        for function in &declaration.members.functions {
            self.with_value_scope(|checker| {
                // Required so function signatures can reference the
                // enclosing type.
                checker.declare_self_value(Type::Interface(type_id));

                checker.visit_function_declaration(function, flags);

                if let Some(block) = &function.function_block {
                    checker.check_interface_special_function_block(
                        block,
                        declaration.declaration_kind(),
                        DeclarationKind::Function,
                    );
                }
            });
        }
    }

    /// The interface body rule: a member body may declare only a contract.
    ///
    /// - statements present: invalid implementation, at the first statement;
    /// - neither statements nor conditions: invalid implementation, at the
    ///   block start;
    /// - conditions and nothing else: legal.
    pub(crate) fn check_interface_special_function_block(
        &mut self,
        block: &FunctionBlock,
        container_kind: DeclarationKind,
        implemented_kind: DeclarationKind,
    ) {
        if let Some(first_statement) = block.block.statements.first() {
            self.report(
                Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "{} in a {} may not declare an implementation",
                        implemented_kind.name(),
                        container_kind.name()
                    ))
                    .with_label(first_statement.span, "executable statement in an interface")
                    .with_note("interface members declare only pre- and post-conditions"),
            );
        } else if !block.has_conditions() {
            self.report(
                Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "{} in a {} declares neither conditions nor an implementation",
                        implemented_kind.name(),
                        container_kind.name()
                    ))
                    .with_label(block.span.at_start(), "empty block")
                    .with_note("remove the block or declare pre- or post-conditions"),
            );
        }
    }
}
