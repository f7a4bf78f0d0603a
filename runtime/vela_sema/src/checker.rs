//! The declaration checker: state, scope discipline, and the program driver.
//!
//! Checking is a two-phase protocol. The declare phase registers a
//! placeholder type for every sibling declaration so that forward and
//! mutual references resolve; the check phase then populates and validates
//! each declaration against its placeholder.

use rustc_hash::FxHashSet;

use vela_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode};
use vela_ir::ast::{Access, DeclarationKind, Identifier, Program, VariableKind};
use vela_ir::{Name, Span, StringInterner};

use crate::activations::Activations;
use crate::types::{Type, TypeId, TypeRegistry};

/// Whether a body being checked belongs to a concrete composite or to an
/// interface; several member rules relax for interfaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Composite,
    Interface,
}

/// A value-scope binding (`self`, a parameter).
#[derive(Clone, Debug)]
pub struct Variable {
    pub declaration_kind: DeclarationKind,
    pub ty: Type,
}

/// The declaration checker.
///
/// One checker instance runs one single-threaded checking pass; the registry
/// it fills is safe for read-only sharing afterwards.
pub struct Checker<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) registry: TypeRegistry,
    pub(crate) type_activations: Activations<Type>,
    pub(crate) value_activations: Activations<Variable>,
    pub(crate) diagnostics: DiagnosticQueue,
    /// Types whose check phase is currently on the stack; drives the
    /// illegal self-nesting check.
    pub(crate) container_types: FxHashSet<TypeId>,
    /// Nested interface types per enclosing type, in source order. The
    /// declare phase records them; the enclosing check phase runs theirs.
    pub(crate) nested_interface_types: rustc_hash::FxHashMap<TypeId, Vec<TypeId>>,
}

impl<'a> Checker<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self::with_config(interner, DiagnosticConfig::default())
    }

    pub fn with_config(interner: &'a StringInterner, config: DiagnosticConfig) -> Self {
        Checker {
            interner,
            registry: TypeRegistry::new(),
            type_activations: Activations::new(),
            value_activations: Activations::new(),
            diagnostics: DiagnosticQueue::with_config(config),
            container_types: FxHashSet::default(),
            nested_interface_types: rustc_hash::FxHashMap::default(),
        }
    }

    /// The type registry. Finalized entries are read-only to callers.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Drain the accumulated diagnostics, sorted by primary span.
    pub fn flush_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    /// Check a whole source unit: declare every top-level sibling before
    /// checking any of them, so siblings can reference each other freely.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_program(&mut self, program: &Program) {
        let interface_ids: Vec<TypeId> = program
            .interface_declarations
            .iter()
            .map(|declaration| self.declare_interface_declaration(declaration))
            .collect();
        let composite_ids: Vec<TypeId> = program
            .composite_declarations
            .iter()
            .map(|declaration| self.declare_composite_declaration(declaration))
            .collect();
        tracing::debug!("declare phase complete");

        for (declaration, type_id) in program.interface_declarations.iter().zip(interface_ids) {
            self.check_interface_declaration(declaration, type_id);
        }
        for (declaration, type_id) in program.composite_declarations.iter().zip(composite_ids) {
            self.check_composite_declaration(declaration, type_id);
        }
        tracing::debug!("check phase complete");
    }

    // Scope discipline

    /// Run `f` inside a fresh type-scope layer; the layer is popped on every
    /// exit path out of `f`.
    pub(crate) fn with_type_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.type_activations.enter();
        let result = f(self);
        self.type_activations.leave();
        result
    }

    /// Run `f` inside a fresh value-scope layer.
    pub(crate) fn with_value_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.value_activations.enter();
        let result = f(self);
        self.value_activations.leave();
        result
    }

    /// Run `f` with `type_id`'s container-checking flag set; the flag is
    /// cleared on every exit path out of `f`.
    pub(crate) fn with_container_checking<R>(
        &mut self,
        type_id: TypeId,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.container_types.insert(type_id);
        let result = f(self);
        self.container_types.remove(&type_id);
        result
    }

    // Declaration helpers

    /// Report a diagnostic and keep checking.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }

    /// Declare a type identifier in the innermost type scope, reporting a
    /// redeclaration diagnostic on collision (the first binding stays).
    pub(crate) fn declare_type(
        &mut self,
        identifier: Identifier,
        ty: Type,
        declaration_kind: DeclarationKind,
        access: Access,
    ) {
        if self
            .type_activations
            .declare(identifier.name, ty)
            .is_err()
        {
            let name = self.interner.lookup(identifier.name);
            let mut diagnostic = Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "cannot redeclare {} `{name}`",
                    declaration_kind.name()
                ))
                .with_label(identifier.span, "redeclared here");
            if access.is_specified() {
                diagnostic = diagnostic.with_note(format!(
                    "declared as `{} {}`",
                    access.keyword(),
                    declaration_kind.name()
                ));
            }
            self.report(diagnostic);
        }
    }

    /// Declare a value identifier in the innermost value scope, reporting a
    /// redeclaration diagnostic on collision.
    pub(crate) fn declare_value(&mut self, identifier: Identifier, variable: Variable) {
        let declaration_kind = variable.declaration_kind;
        if self
            .value_activations
            .declare(identifier.name, variable)
            .is_err()
        {
            let name = self.interner.lookup(identifier.name);
            let diagnostic = Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "cannot redeclare {} `{name}`",
                    declaration_kind.name()
                ))
                .with_label(identifier.span, "redeclared here");
            self.report(diagnostic);
        }
    }

    /// Bind `self` to the type under check, so member signatures can
    /// reference the enclosing type.
    pub(crate) fn declare_self_value(&mut self, ty: Type) {
        let self_name = self.interner.intern("self");
        // `self` is bound in a scope that was just entered, so this cannot
        // collide with a user declaration.
        let _ = self.value_activations.declare(
            self_name,
            Variable {
                declaration_kind: DeclarationKind::SelfValue,
                ty,
            },
        );
    }

    // Access modifier rules

    /// Validate the access modifier on a declaration itself.
    pub(crate) fn check_declaration_access_modifier(
        &mut self,
        access: Access,
        declaration_kind: DeclarationKind,
        span: Span,
    ) {
        match access {
            Access::PublicSettable => {
                self.report(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`pub(set)` is not a valid access modifier for a {}",
                            declaration_kind.name()
                        ))
                        .with_label(span, "only variable fields can be `pub(set)`"),
                );
            }
            Access::Authorized => {
                self.report(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`access(auth)` is not a valid access modifier for a {}",
                            declaration_kind.name()
                        ))
                        .with_label(span, "only members of resource kinds can be `access(auth)`"),
                );
            }
            Access::NotSpecified | Access::Private | Access::Public => {}
        }
    }

    /// Validate field access modifiers. Function access is validated inside
    /// function checking, where the resource-receiver context is known.
    pub(crate) fn check_fields_access_modifier(
        &mut self,
        fields: &[vela_ir::ast::FieldDeclaration],
        in_resource: bool,
    ) {
        for field in fields {
            match field.access {
                Access::PublicSettable if field.variable_kind == VariableKind::Constant => {
                    self.report(
                        Diagnostic::error(ErrorCode::E2002)
                            .with_message(format!(
                                "`pub(set)` requires a variable field, but `{}` is `let`",
                                self.interner.lookup(field.identifier.name)
                            ))
                            .with_label(field.identifier.span, "constant field"),
                    );
                }
                Access::Authorized if !in_resource => {
                    self.report(
                        Diagnostic::error(ErrorCode::E2002)
                            .with_message(format!(
                                "`access(auth)` is only valid on members of resource kinds, \
                                 but `{}` is not in a resource",
                                self.interner.lookup(field.identifier.name)
                            ))
                            .with_label(field.identifier.span, "authorized access here"),
                    );
                }
                _ => {}
            }
        }
    }

    /// Check that fields, functions, and nested type declarations of one
    /// body share a single collision-free namespace.
    ///
    /// Tie-break: occurrences are visited in source order (fields, then
    /// functions, then nested composites, then nested interfaces) and every
    /// occurrence after the first is reported against the first.
    pub(crate) fn check_nested_identifiers(&mut self, occurrences: &[(Identifier, DeclarationKind)]) {
        let mut first_by_name: rustc_hash::FxHashMap<Name, (Identifier, DeclarationKind)> =
            rustc_hash::FxHashMap::default();
        for (identifier, declaration_kind) in occurrences {
            match first_by_name.entry(identifier.name) {
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert((*identifier, *declaration_kind));
                }
                std::collections::hash_map::Entry::Occupied(entry) => {
                    let (first, first_kind) = *entry.get();
                    let name = self.interner.lookup(identifier.name);
                    self.report(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!(
                                "{} `{name}` conflicts with a {} of the same name",
                                declaration_kind.name(),
                                first_kind.name()
                            ))
                            .with_label(identifier.span, "conflicting declaration")
                            .with_secondary_label(first.span, "first declared here"),
                    );
                }
            }
        }
    }
}
