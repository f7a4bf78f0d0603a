//! Member collection and the member-level legality rules: initializers,
//! destructors, special functions, and resource field nesting.

use std::collections::BTreeMap;

use vela_diagnostic::{Diagnostic, ErrorCode};
use vela_ir::ast::{
    CompositeKind, DeclarationKind, Identifier, Members, StatementKind, VariableKind,
};
use vela_ir::{Name, Span};

use crate::checker::{Checker, ContainerKind};
use crate::type_resolution::Resolution;
use crate::types::{Member, Type, TypeAnnotation};

impl Checker<'_> {
    /// Compute the member set (fields + functions) with resolved types,
    /// access, and origin spans. Field annotations resolve with reporting;
    /// function signatures resolve silently here because function checking
    /// resolves them again with reporting.
    ///
    /// Name collisions are reported by `check_nested_identifiers`; the
    /// first-declared member wins the map slot.
    pub(crate) fn members_and_origins(&mut self, members: &Members) -> BTreeMap<Name, Member> {
        let mut member_map: BTreeMap<Name, Member> = BTreeMap::new();

        for field in &members.fields {
            let annotation =
                self.convert_type_annotation(&field.type_annotation, Resolution::Report);
            self.check_self_nesting(&annotation.ty, field.identifier);
            member_map.entry(field.identifier.name).or_insert(Member {
                identifier: field.identifier.name,
                access: field.access,
                declaration_kind: DeclarationKind::Field,
                variable_kind: field.variable_kind,
                type_annotation: annotation,
                declared_at: field.identifier.span,
            });
        }

        for function in &members.functions {
            let parameters: Vec<Type> = function
                .parameter_list
                .parameters
                .iter()
                .map(|parameter| {
                    self.convert_type_annotation(&parameter.type_annotation, Resolution::Silent)
                        .ty
                })
                .collect();
            let return_type = function.return_type_annotation.as_ref().map_or(
                Type::Void,
                |annotation| {
                    self.convert_type_annotation(annotation, Resolution::Silent).ty
                },
            );
            member_map
                .entry(function.identifier.name)
                .or_insert(Member {
                    identifier: function.identifier.name,
                    access: function.access,
                    declaration_kind: DeclarationKind::Function,
                    variable_kind: VariableKind::Constant,
                    type_annotation: TypeAnnotation {
                        is_resource: false,
                        ty: Type::Function {
                            parameters,
                            return_type: Box::new(return_type),
                        },
                    },
                    declared_at: function.identifier.span,
                });
        }

        member_map
    }

    /// Resolve the initializer parameter type annotations from the (at most
    /// one) initializer signature.
    pub(crate) fn initializer_parameter_type_annotations(
        &mut self,
        members: &Members,
    ) -> Vec<TypeAnnotation> {
        members.initializers().next().map_or_else(Vec::new, |initializer| {
            initializer
                .function
                .parameter_list
                .parameters
                .iter()
                .map(|parameter| {
                    self.convert_type_annotation(&parameter.type_annotation, Resolution::Report)
                })
                .collect()
        })
    }

    /// Check initializer legality and, for concrete composites, that every
    /// non-optional field is definitely assigned. Interfaces relax the
    /// assignment requirement when the initializer has no body, because the
    /// body is supplied by the conforming concrete type.
    pub(crate) fn check_initializers(
        &mut self,
        members: &Members,
        member_map: &BTreeMap<Name, Member>,
        container_kind: ContainerKind,
        containing_declaration_kind: DeclarationKind,
        declaration_span: Span,
    ) {
        let initializers: Vec<_> = members.initializers().collect();

        for extra in initializers.iter().skip(1) {
            self.report(
                Diagnostic::error(ErrorCode::E2009)
                    .with_message("more than one initializer declared")
                    .with_label(extra.function.identifier.span, "extra initializer")
                    .with_note("initializer overloading is not supported"),
            );
        }

        let Some(initializer) = initializers.first() else {
            if container_kind == ContainerKind::Composite && !members.fields.is_empty() {
                self.report(
                    Diagnostic::error(ErrorCode::E2006)
                        .with_message("missing initializer for declaration with fields")
                        .with_label(declaration_span.at_start(), "initializer required"),
                );
            }
            return;
        };

        match container_kind {
            ContainerKind::Interface => {
                // An interface initializer body, when present, may only
                // state conditions.
                if let Some(block) = &initializer.function.function_block {
                    self.check_interface_special_function_block(
                        block,
                        containing_declaration_kind,
                        DeclarationKind::Initializer,
                    );
                }
            }
            ContainerKind::Composite => {
                self.check_field_initialization(members, member_map, *initializer);
            }
        }
    }

    /// Straight-line definite assignment: a field counts as initialized when
    /// the initializer body assigns `self.<field>` at the top level.
    fn check_field_initialization(
        &mut self,
        members: &Members,
        member_map: &BTreeMap<Name, Member>,
        initializer: &vela_ir::ast::SpecialFunctionDeclaration,
    ) {
        let assigned: rustc_hash::FxHashSet<Name> = initializer
            .function
            .function_block
            .as_ref()
            .map(|block| {
                block
                    .block
                    .statements
                    .iter()
                    .filter_map(|statement| match statement.kind {
                        StatementKind::Assignment { target } => Some(target),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        for field in &members.fields {
            if assigned.contains(&field.identifier.name) {
                continue;
            }
            // Optional fields default to nil.
            if let Some(member) = member_map.get(&field.identifier.name) {
                if matches!(member.type_annotation.ty, Type::Optional(_)) {
                    continue;
                }
            }
            self.report(
                Diagnostic::error(ErrorCode::E2006)
                    .with_message(format!(
                        "field `{}` is not initialized",
                        self.interner.lookup(field.identifier.name)
                    ))
                    .with_label(field.identifier.span, "declared here")
                    .with_secondary_label(
                        initializer.function.identifier.span,
                        "not assigned in this initializer",
                    ),
            );
        }
    }

    /// Check destructor legality: resources only, no parameters, at most
    /// one; interface destructor bodies may only state conditions.
    pub(crate) fn check_destructors(
        &mut self,
        members: &Members,
        container_kind: ContainerKind,
        composite_kind: CompositeKind,
        containing_declaration_kind: DeclarationKind,
    ) {
        let destructors: Vec<_> = members.destructors().collect();

        for extra in destructors.iter().skip(1) {
            self.report(
                Diagnostic::error(ErrorCode::E2009)
                    .with_message("more than one destructor declared")
                    .with_label(extra.function.identifier.span, "extra destructor"),
            );
        }

        let Some(destructor) = destructors.first() else {
            return;
        };

        if !composite_kind.is_resource() {
            self.report(
                Diagnostic::error(ErrorCode::E2007)
                    .with_message(format!(
                        "destructor is not valid in a {}",
                        containing_declaration_kind.name()
                    ))
                    .with_label(destructor.function.identifier.span, "only resources are destructible"),
            );
        }

        if !destructor.function.parameter_list.parameters.is_empty() {
            self.report(
                Diagnostic::error(ErrorCode::E2007)
                    .with_message("destructor cannot have parameters")
                    .with_label(destructor.function.parameter_list.span, "remove the parameters"),
            );
        }

        match container_kind {
            ContainerKind::Interface => {
                if let Some(block) = &destructor.function.function_block {
                    self.check_interface_special_function_block(
                        block,
                        containing_declaration_kind,
                        DeclarationKind::Destructor,
                    );
                }
            }
            ContainerKind::Composite => {
                if destructor.function.function_block.is_none() {
                    self.report(
                        Diagnostic::error(ErrorCode::E2011)
                            .with_message("destructor is missing a body")
                            .with_label(destructor.function.identifier.span, "body required here"),
                    );
                }
            }
        }
    }

    /// Reject special functions that are neither initializers nor
    /// destructors.
    pub(crate) fn check_unknown_special_functions(&mut self, members: &Members) {
        for special in &members.special_functions {
            if matches!(
                special.kind,
                DeclarationKind::Initializer | DeclarationKind::Destructor
            ) {
                continue;
            }
            self.report(
                Diagnostic::error(ErrorCode::E2008)
                    .with_message(format!(
                        "unknown special function `{}`",
                        self.interner.lookup(special.function.identifier.name)
                    ))
                    .with_label(special.function.identifier.span, "expected `init` or `destroy`"),
            );
        }
    }

    /// Resource-field-nesting legality over the resolved member set:
    /// a resource-typed field requires a resource container kind, and a
    /// resource type may never sit inside a plain container type (array,
    /// dictionary, optional), which is not resource-aware.
    pub(crate) fn check_resource_field_nesting(
        &mut self,
        member_map: &BTreeMap<Name, Member>,
        composite_kind: CompositeKind,
    ) {
        for member in member_map.values() {
            if member.declaration_kind != DeclarationKind::Field {
                continue;
            }
            let field_type = &member.type_annotation.ty;
            if field_type.is_resource(&self.registry) {
                if !composite_kind.is_resource() {
                    let name = self.interner.lookup(member.identifier).to_owned();
                    self.report(
                        Diagnostic::error(ErrorCode::E2004)
                            .with_message(format!(
                                "resource field `{name}` is not valid in a {} declaration",
                                composite_kind.keyword()
                            ))
                            .with_label(member.declared_at, "resource value needs a resource container"),
                    );
                }
            } else if field_type.contains_resource(&self.registry) {
                let name = self.interner.lookup(member.identifier).to_owned();
                self.report(
                    Diagnostic::error(ErrorCode::E2004)
                        .with_message(format!(
                            "field `{name}` nests a resource inside a non-resource container type"
                        ))
                        .with_label(member.declared_at, "plain containers cannot hold resources"),
                );
            }
        }
    }

    /// Reject composite kinds that do not admit interface declarations.
    pub(crate) fn check_composite_kind_support(
        &mut self,
        composite_kind: CompositeKind,
        declaration_kind: DeclarationKind,
        identifier: Identifier,
    ) {
        if matches!(composite_kind, CompositeKind::Event | CompositeKind::Enum) {
            let name = self.interner.lookup(identifier.name);
            self.report(
                Diagnostic::error(ErrorCode::E2005)
                    .with_message(format!(
                        "{} declarations are not supported: `{}` cannot be a {}",
                        composite_kind.keyword(),
                        name,
                        declaration_kind.name()
                    ))
                    .with_label(identifier.span, "unsupported declaration kind"),
            );
        }
    }

    /// Report a field whose type nests a declaration whose check phase is
    /// currently on the stack, i.e. illegal direct or indirect self-nesting.
    fn check_self_nesting(&mut self, ty: &Type, field_identifier: Identifier) {
        if ty.contains_any_id(&self.container_types) {
            let name = self.interner.lookup(field_identifier.name);
            self.report(
                Diagnostic::error(ErrorCode::E2013)
                    .with_message(format!(
                        "field `{name}` nests the declaration that contains it"
                    ))
                    .with_label(field_identifier.span, "self-nesting is not allowed"),
            );
        }
    }
}
