//! Resolution of parsed type annotations against the scope stack.

use vela_diagnostic::{Diagnostic, ErrorCode};
use vela_ir::ast;

use crate::checker::Checker;
use crate::types::{Type, TypeAnnotation};

/// Whether resolution failures should be reported. Member collection
/// resolves function signatures that function checking resolves again;
/// exactly one of the two passes reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Report,
    Silent,
}

impl Checker<'_> {
    /// Resolve a type annotation, validating the resource-move marker
    /// against the resolved type.
    pub(crate) fn convert_type_annotation(
        &mut self,
        annotation: &ast::TypeAnnotation,
        resolution: Resolution,
    ) -> TypeAnnotation {
        let ty = self.convert_parsed_type(&annotation.ty, resolution);

        if resolution == Resolution::Report && !ty.is_invalid() {
            let is_resource_type = ty.is_resource(&self.registry);
            if annotation.is_resource && !is_resource_type {
                self.report(
                    Diagnostic::error(ErrorCode::E2012)
                        .with_message("resource-move annotation `@` on a non-resource type")
                        .with_label(annotation.span, "remove the `@`"),
                );
            } else if !annotation.is_resource && is_resource_type {
                self.report(
                    Diagnostic::error(ErrorCode::E2012)
                        .with_message("resource type is missing the resource-move annotation `@`")
                        .with_label(annotation.span, "add `@` before the type"),
                );
            }
        }

        TypeAnnotation {
            is_resource: annotation.is_resource,
            ty,
        }
    }

    /// Resolve a parsed type tree. Named references check builtins first,
    /// then the type scope stack; misses resolve to [`Type::Invalid`].
    pub(crate) fn convert_parsed_type(
        &mut self,
        parsed: &ast::ParsedType,
        resolution: Resolution,
    ) -> Type {
        match parsed {
            ast::ParsedType::Named(identifier) => {
                if let Some(builtin) = Type::builtin(self.interner.lookup(identifier.name)) {
                    return builtin;
                }
                if let Some(ty) = self.type_activations.lookup(identifier.name) {
                    return ty.clone();
                }
                if resolution == Resolution::Report {
                    let name = self.interner.lookup(identifier.name);
                    self.report(
                        Diagnostic::error(ErrorCode::E2010)
                            .with_message(format!("cannot find type `{name}` in this scope"))
                            .with_label(identifier.span, "not declared"),
                    );
                }
                Type::Invalid
            }
            ast::ParsedType::Optional { inner, .. } => {
                Type::Optional(Box::new(self.convert_parsed_type(inner, resolution)))
            }
            ast::ParsedType::Array { element, .. } => {
                Type::Array(Box::new(self.convert_parsed_type(element, resolution)))
            }
            ast::ParsedType::Dictionary { key, value, .. } => Type::Dictionary {
                key: Box::new(self.convert_parsed_type(key, resolution)),
                value: Box::new(self.convert_parsed_type(value, resolution)),
            },
            ast::ParsedType::Reference {
                authorized, inner, ..
            } => Type::Reference {
                authorized: *authorized,
                referenced: Box::new(self.convert_parsed_type(inner, resolution)),
            },
        }
    }
}
