//! Function declaration checking shared by interface and composite bodies.

use bitflags::bitflags;

use vela_diagnostic::{Diagnostic, ErrorCode};
use vela_ir::ast::{Access, DeclarationKind, FunctionDeclaration};

use crate::checker::{Checker, Variable};
use crate::type_resolution::Resolution;
use crate::types::{Type, TypeAnnotation};

bitflags! {
    /// Options for checking one function declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct FunctionCheckFlags: u8 {
        /// Bind the function's own identifier in the enclosing value scope
        /// (concrete composite bodies; interface functions are not visible
        /// to each other).
        const DECLARE_FUNCTION = 1 << 0;
        /// A missing body is an error (concrete composites; interfaces
        /// allow absent bodies).
        const REQUIRE_BODY = 1 << 1;
        /// `access(auth)` is a legal function access modifier (resource
        /// receivers only).
        const ALLOW_AUTH_MODIFIER = 1 << 2;
    }
}

impl Checker<'_> {
    /// Check one function declaration: access modifier, signature
    /// resolution, parameter bindings. Parameters bind in a fresh value
    /// scope; the caller owns the surrounding scope and the `self` binding.
    pub(crate) fn visit_function_declaration(
        &mut self,
        function: &FunctionDeclaration,
        flags: FunctionCheckFlags,
    ) {
        self.check_function_access_modifier(function, flags);

        let parameter_types: Vec<TypeAnnotation> = function
            .parameter_list
            .parameters
            .iter()
            .map(|parameter| {
                self.convert_type_annotation(&parameter.type_annotation, Resolution::Report)
            })
            .collect();

        let return_type = function.return_type_annotation.as_ref().map_or(
            TypeAnnotation {
                is_resource: false,
                ty: Type::Void,
            },
            |annotation| self.convert_type_annotation(annotation, Resolution::Report),
        );

        if flags.contains(FunctionCheckFlags::DECLARE_FUNCTION) {
            self.declare_value(
                function.identifier,
                Variable {
                    declaration_kind: DeclarationKind::Function,
                    ty: Type::Function {
                        parameters: parameter_types
                            .iter()
                            .map(|annotation| annotation.ty.clone())
                            .collect(),
                        return_type: Box::new(return_type.ty.clone()),
                    },
                },
            );
        }

        // Parameters are visible to the body and the condition blocks only.
        self.with_value_scope(|checker| {
            for (parameter, annotation) in function
                .parameter_list
                .parameters
                .iter()
                .zip(&parameter_types)
            {
                checker.declare_value(
                    parameter.identifier,
                    Variable {
                        declaration_kind: DeclarationKind::Parameter,
                        ty: annotation.ty.clone(),
                    },
                );
            }
        });

        if flags.contains(FunctionCheckFlags::REQUIRE_BODY) && function.function_block.is_none() {
            self.report(
                Diagnostic::error(ErrorCode::E2011)
                    .with_message(format!(
                        "function `{}` is missing a body",
                        self.interner.lookup(function.identifier.name)
                    ))
                    .with_label(function.identifier.span, "body required here"),
            );
        }
    }

    fn check_function_access_modifier(
        &mut self,
        function: &FunctionDeclaration,
        flags: FunctionCheckFlags,
    ) {
        match function.access {
            Access::PublicSettable => {
                self.report(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`pub(set)` is not a valid access modifier for function `{}`",
                            self.interner.lookup(function.identifier.name)
                        ))
                        .with_label(
                            function.identifier.span,
                            "only variable fields can be `pub(set)`",
                        ),
                );
            }
            Access::Authorized if !flags.contains(FunctionCheckFlags::ALLOW_AUTH_MODIFIER) => {
                self.report(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`access(auth)` is only valid on members of resource kinds, \
                             but `{}` is not in a resource",
                            self.interner.lookup(function.identifier.name)
                        ))
                        .with_label(function.identifier.span, "authorized access here"),
                );
            }
            _ => {}
        }
    }
}
