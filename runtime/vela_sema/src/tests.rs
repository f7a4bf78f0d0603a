//! Checker tests: the two-phase protocol, the interface body rules, and the
//! member legality rules.

use pretty_assertions::assert_eq;

use vela_diagnostic::{Diagnostic, DiagnosticConfig, ErrorCode};
use vela_ir::ast::{
    Access, Block, CompositeDeclaration, CompositeKind, Condition, DeclarationKind,
    FieldDeclaration, FunctionBlock, FunctionDeclaration, Identifier, InterfaceDeclaration,
    Members, ParameterList, ParsedType, Program, SpecialFunctionDeclaration, Statement,
    StatementKind, TypeAnnotation, VariableKind,
};
use vela_ir::{Span, StringInterner};

use crate::{Checker, Type, TypeId};

fn ident(interner: &StringInterner, name: &str, start: u32) -> Identifier {
    let len = u32::try_from(name.len()).unwrap();
    Identifier::new(interner.intern(name), Span::new(start, start + len))
}

fn named_annotation(
    interner: &StringInterner,
    type_name: &str,
    is_resource: bool,
    start: u32,
) -> TypeAnnotation {
    let ty = ParsedType::Named(ident(interner, type_name, start));
    let span = ty.span();
    TypeAnnotation {
        is_resource,
        ty,
        span,
    }
}

fn array_annotation(
    interner: &StringInterner,
    element_type_name: &str,
    start: u32,
) -> TypeAnnotation {
    let element = ParsedType::Named(ident(interner, element_type_name, start + 1));
    let span = Span::new(start, start + 10);
    TypeAnnotation {
        is_resource: false,
        ty: ParsedType::Array {
            element: Box::new(element),
            span,
        },
        span,
    }
}

fn let_field(
    interner: &StringInterner,
    name: &str,
    type_annotation: TypeAnnotation,
    start: u32,
) -> FieldDeclaration {
    FieldDeclaration {
        access: Access::NotSpecified,
        variable_kind: VariableKind::Constant,
        identifier: ident(interner, name, start),
        type_annotation,
        span: Span::new(start, start + 20),
    }
}

fn function(
    interner: &StringInterner,
    name: &str,
    function_block: Option<FunctionBlock>,
    start: u32,
) -> FunctionDeclaration {
    FunctionDeclaration {
        access: Access::NotSpecified,
        identifier: ident(interner, name, start),
        parameter_list: ParameterList::default(),
        return_type_annotation: None,
        function_block,
        span: Span::new(start, start + 30),
    }
}

fn conditions_only_block(start: u32) -> FunctionBlock {
    FunctionBlock {
        block: Block {
            statements: Vec::new(),
            span: Span::new(start, start + 10),
        },
        pre_conditions: vec![Condition {
            span: Span::new(start + 1, start + 5),
            message: None,
        }],
        post_conditions: Vec::new(),
        span: Span::new(start, start + 10),
    }
}

fn statements_block(start: u32) -> FunctionBlock {
    FunctionBlock {
        block: Block {
            statements: vec![Statement {
                kind: StatementKind::Expression,
                span: Span::new(start + 1, start + 5),
            }],
            span: Span::new(start, start + 10),
        },
        pre_conditions: Vec::new(),
        post_conditions: Vec::new(),
        span: Span::new(start, start + 10),
    }
}

fn empty_block(start: u32) -> FunctionBlock {
    FunctionBlock {
        block: Block {
            statements: Vec::new(),
            span: Span::new(start, start + 2),
        },
        pre_conditions: Vec::new(),
        post_conditions: Vec::new(),
        span: Span::new(start, start + 2),
    }
}

fn assignment(interner: &StringInterner, target: &str, start: u32) -> Statement {
    Statement {
        kind: StatementKind::Assignment {
            target: interner.intern(target),
        },
        span: Span::new(start, start + 8),
    }
}

fn initializer(
    interner: &StringInterner,
    function_block: Option<FunctionBlock>,
    start: u32,
) -> SpecialFunctionDeclaration {
    SpecialFunctionDeclaration {
        kind: DeclarationKind::Initializer,
        function: function(interner, "init", function_block, start),
    }
}

fn destructor(
    interner: &StringInterner,
    function_block: Option<FunctionBlock>,
    start: u32,
) -> SpecialFunctionDeclaration {
    SpecialFunctionDeclaration {
        kind: DeclarationKind::Destructor,
        function: function(interner, "destroy", function_block, start),
    }
}

fn interface(
    interner: &StringInterner,
    kind: CompositeKind,
    name: &str,
    members: Members,
    start: u32,
) -> InterfaceDeclaration {
    InterfaceDeclaration {
        access: Access::NotSpecified,
        kind,
        identifier: ident(interner, name, start),
        members,
        composite_declarations: Vec::new(),
        interface_declarations: Vec::new(),
        span: Span::new(start, start + 200),
    }
}

fn composite(
    interner: &StringInterner,
    kind: CompositeKind,
    name: &str,
    members: Members,
    start: u32,
) -> CompositeDeclaration {
    CompositeDeclaration {
        access: Access::NotSpecified,
        kind,
        identifier: ident(interner, name, start),
        conformances: Vec::new(),
        members,
        composite_declarations: Vec::new(),
        interface_declarations: Vec::new(),
        span: Span::new(start, start + 200),
    }
}

fn checked_interface<'a>(
    interner: &'a StringInterner,
    declaration: &InterfaceDeclaration,
) -> (Checker<'a>, TypeId) {
    let mut checker = Checker::with_config(interner, DiagnosticConfig::unlimited());
    let type_id = checker.declare_interface_declaration(declaration);
    checker.check_interface_declaration(declaration, type_id);
    (checker, type_id)
}

fn check_interface(
    interner: &StringInterner,
    declaration: &InterfaceDeclaration,
) -> (Vec<Diagnostic>, TypeId) {
    let (mut checker, type_id) = checked_interface(interner, declaration);
    (checker.flush_diagnostics(), type_id)
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|diagnostic| diagnostic.code).collect()
}

#[test]
fn interface_function_with_conditions_only_is_legal() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Provider",
        Members {
            functions: vec![function(
                &interner,
                "withdraw",
                Some(conditions_only_block(50)),
                40,
            )],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![]);
}

#[test]
fn interface_function_without_block_is_legal() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Describable",
        Members {
            functions: vec![function(&interner, "describe", None, 40)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![]);
}

#[test]
fn interface_function_with_statement_is_invalid_implementation() {
    let interner = StringInterner::new();
    let block = statements_block(50);
    let first_statement_span = block.block.statements[0].span;
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Provider",
        Members {
            functions: vec![function(&interner, "withdraw", Some(block), 40)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2003]);
    assert_eq!(diagnostics[0].primary_span(), Some(first_statement_span));
}

#[test]
fn interface_function_with_empty_block_is_invalid_implementation() {
    let interner = StringInterner::new();
    let block = empty_block(50);
    let block_start = block.span.at_start();
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Provider",
        Members {
            functions: vec![function(&interner, "withdraw", Some(block), 40)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2003]);
    assert_eq!(diagnostics[0].primary_span(), Some(block_start));
}

#[test]
fn resource_in_plain_array_field_is_illegal_nesting() {
    let interner = StringInterner::new();
    let vault = composite(
        &interner,
        CompositeKind::Resource,
        "Vault",
        Members::default(),
        0,
    );
    let collection = interface(
        &interner,
        CompositeKind::Resource,
        "Collection",
        Members {
            fields: vec![let_field(
                &interner,
                "vaults",
                array_annotation(&interner, "Vault", 320),
                310,
            )],
            ..Members::default()
        },
        300,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    checker.check_program(&Program {
        composite_declarations: vec![vault],
        interface_declarations: vec![collection],
    });

    assert_eq!(codes(&checker.flush_diagnostics()), vec![ErrorCode::E2004]);
}

#[test]
fn resource_field_in_struct_interface_is_illegal() {
    let interner = StringInterner::new();
    let vault = composite(
        &interner,
        CompositeKind::Resource,
        "Vault",
        Members::default(),
        0,
    );
    let holder = interface(
        &interner,
        CompositeKind::Struct,
        "Holder",
        Members {
            fields: vec![let_field(
                &interner,
                "vault",
                named_annotation(&interner, "Vault", true, 320),
                310,
            )],
            ..Members::default()
        },
        300,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    checker.check_program(&Program {
        composite_declarations: vec![vault],
        interface_declarations: vec![holder],
    });

    assert_eq!(codes(&checker.flush_diagnostics()), vec![ErrorCode::E2004]);
}

#[test]
fn sibling_interfaces_with_same_identifier_collide_once() {
    let interner = StringInterner::new();
    let first = interface(
        &interner,
        CompositeKind::Struct,
        "Token",
        Members::default(),
        0,
    );
    let second = interface(
        &interner,
        CompositeKind::Struct,
        "Token",
        Members::default(),
        300,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    checker.check_program(&Program {
        composite_declarations: Vec::new(),
        interface_declarations: vec![first, second],
    });

    assert_eq!(codes(&checker.flush_diagnostics()), vec![ErrorCode::E2001]);
    // Both declarations were still registered and checked independently.
    assert_eq!(checker.registry().len(), 2);
}

#[test]
fn forward_references_between_siblings_resolve() {
    let interner = StringInterner::new();
    // `Wallet` is declared after the interface that references it.
    let holder = interface(
        &interner,
        CompositeKind::Struct,
        "Holder",
        Members {
            fields: vec![let_field(
                &interner,
                "wallet",
                named_annotation(&interner, "Wallet", false, 40),
                30,
            )],
            ..Members::default()
        },
        0,
    );
    let wallet = composite(
        &interner,
        CompositeKind::Struct,
        "Wallet",
        Members::default(),
        300,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    checker.check_program(&Program {
        composite_declarations: vec![wallet],
        interface_declarations: vec![holder],
    });

    assert_eq!(codes(&checker.flush_diagnostics()), vec![]);
}

#[test]
fn check_phase_is_idempotent() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Provider",
        Members {
            fields: vec![let_field(
                &interner,
                "balance",
                named_annotation(&interner, "UFix64", false, 40),
                30,
            )],
            functions: vec![function(
                &interner,
                "withdraw",
                Some(statements_block(80)),
                70,
            )],
            ..Members::default()
        },
        0,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    let type_id = checker.declare_interface_declaration(&declaration);

    checker.check_interface_declaration(&declaration, type_id);
    let first_diagnostics = checker.flush_diagnostics();
    let first_members = checker.registry().entry(type_id).members.clone();

    checker.check_interface_declaration(&declaration, type_id);
    let second_diagnostics = checker.flush_diagnostics();
    let second_members = checker.registry().entry(type_id).members.clone();

    assert_eq!(first_diagnostics, second_diagnostics);
    assert_eq!(first_members, second_members);
}

#[test]
fn nested_type_round_trips_with_container_back_reference() {
    let interner = StringInterner::new();
    let inner = interface(
        &interner,
        CompositeKind::Struct,
        "Inner",
        Members::default(),
        50,
    );
    let mut outer = interface(
        &interner,
        CompositeKind::Contract,
        "Outer",
        Members::default(),
        0,
    );
    outer.interface_declarations.push(inner);

    let (mut checker, outer_id) = checked_interface(&interner, &outer);
    assert_eq!(codes(&checker.flush_diagnostics()), vec![]);

    let inner_name = interner.intern("Inner");
    let nested = checker
        .registry()
        .entry(outer_id)
        .nested_types
        .get(&inner_name)
        .cloned();
    let Some(Type::Interface(inner_id)) = nested else {
        panic!("nested interface not registered under its identifier");
    };
    assert_eq!(checker.registry().entry(inner_id).container, Some(outer_id));
}

#[test]
fn multiple_initializers_are_unsupported() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Pair",
        Members {
            special_functions: vec![
                initializer(&interner, None, 30),
                initializer(&interner, None, 60),
            ],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2009]);
}

#[test]
fn destructor_on_struct_interface_is_invalid() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Disposable",
        Members {
            special_functions: vec![destructor(&interner, None, 30)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2007]);
}

#[test]
fn interface_initializer_with_statements_is_invalid_implementation() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Vault",
        Members {
            special_functions: vec![initializer(&interner, Some(statements_block(40)), 30)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2003]);
}

#[test]
fn enum_interface_is_unsupported() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Enum,
        "Direction",
        Members::default(),
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2005]);
}

#[test]
fn composite_initializer_must_assign_every_field() {
    let interner = StringInterner::new();
    let init_block = FunctionBlock {
        block: Block {
            statements: vec![assignment(&interner, "balance", 60)],
            span: Span::new(55, 90),
        },
        pre_conditions: Vec::new(),
        post_conditions: Vec::new(),
        span: Span::new(55, 90),
    };
    let declaration = composite(
        &interner,
        CompositeKind::Resource,
        "Vault",
        Members {
            fields: vec![
                let_field(
                    &interner,
                    "balance",
                    named_annotation(&interner, "UFix64", false, 20),
                    10,
                ),
                let_field(
                    &interner,
                    "owner",
                    named_annotation(&interner, "Address", false, 40),
                    30,
                ),
            ],
            special_functions: vec![initializer(&interner, Some(init_block), 50)],
            ..Members::default()
        },
        0,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    let type_id = checker.declare_composite_declaration(&declaration);
    checker.check_composite_declaration(&declaration, type_id);

    let diagnostics = checker.flush_diagnostics();
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2006]);
    assert!(diagnostics[0].message.contains("owner"));
}

#[test]
fn composite_with_fields_requires_an_initializer() {
    let interner = StringInterner::new();
    let declaration = composite(
        &interner,
        CompositeKind::Struct,
        "Point",
        Members {
            fields: vec![let_field(
                &interner,
                "x",
                named_annotation(&interner, "Int", false, 20),
                10,
            )],
            ..Members::default()
        },
        0,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    let type_id = checker.declare_composite_declaration(&declaration);
    checker.check_composite_declaration(&declaration, type_id);

    assert_eq!(codes(&checker.flush_diagnostics()), vec![ErrorCode::E2006]);
}

#[test]
fn optional_fields_need_no_assignment() {
    let interner = StringInterner::new();
    let optional_annotation = {
        let inner = ParsedType::Named(ident(&interner, "Int", 21));
        let span = Span::new(20, 25);
        TypeAnnotation {
            is_resource: false,
            ty: ParsedType::Optional {
                inner: Box::new(inner),
                span,
            },
            span,
        }
    };
    let declaration = composite(
        &interner,
        CompositeKind::Struct,
        "Config",
        Members {
            fields: vec![let_field(&interner, "limit", optional_annotation, 10)],
            special_functions: vec![initializer(&interner, Some(empty_block(40)), 30)],
            ..Members::default()
        },
        0,
    );

    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    let type_id = checker.declare_composite_declaration(&declaration);
    checker.check_composite_declaration(&declaration, type_id);

    assert_eq!(codes(&checker.flush_diagnostics()), vec![]);
}

#[test]
fn field_and_function_identifiers_share_one_namespace() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Token",
        Members {
            fields: vec![let_field(
                &interner,
                "balance",
                named_annotation(&interner, "Int", false, 20),
                10,
            )],
            functions: vec![function(&interner, "balance", None, 40)],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2001]);
}

#[test]
fn self_nesting_field_is_rejected() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Resource,
        "Matryoshka",
        Members {
            fields: vec![let_field(
                &interner,
                "inner",
                named_annotation(&interner, "Matryoshka", true, 30),
                20,
            )],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2013]);
}

#[test]
fn unknown_type_annotation_is_reported_once() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Holder",
        Members {
            fields: vec![let_field(
                &interner,
                "mystery",
                named_annotation(&interner, "Nonexistent", false, 30),
                20,
            )],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2010]);
}

#[test]
fn unknown_special_function_is_rejected() {
    let interner = StringInterner::new();
    let declaration = interface(
        &interner,
        CompositeKind::Struct,
        "Token",
        Members {
            special_functions: vec![SpecialFunctionDeclaration {
                kind: DeclarationKind::Function,
                function: function(&interner, "setup", None, 30),
            }],
            ..Members::default()
        },
        0,
    );

    let (diagnostics, _) = check_interface(&interner, &declaration);
    assert_eq!(codes(&diagnostics), vec![ErrorCode::E2008]);
}

#[test]
fn crypto_algorithm_catalogs_register_as_enums() {
    let interner = StringInterner::new();
    let mut checker = Checker::with_config(&interner, DiagnosticConfig::unlimited());
    let (signature_id, hash_id) = checker.register_crypto_algorithm_types();

    let signature_entry = checker.registry().entry(signature_id);
    assert_eq!(
        interner.lookup(signature_entry.identifier),
        "SignatureAlgorithm"
    );
    assert_eq!(signature_entry.composite_kind, CompositeKind::Enum);
    assert_eq!(signature_entry.enum_cases.len(), 3);
    assert_eq!(
        interner.lookup(signature_entry.enum_cases[0]),
        "ECDSA_P256"
    );

    let raw_value = interner.intern(crate::ENUM_RAW_VALUE_FIELD_NAME);
    assert!(signature_entry.members.contains_key(&raw_value));

    let hash_entry = checker.registry().entry(hash_id);
    assert_eq!(hash_entry.enum_cases.len(), 5);
    assert_eq!(interner.lookup(hash_entry.enum_cases[4]), "KMAC128");

    // Registered identifiers resolve in the type scope.
    let vault = interface(
        &interner,
        CompositeKind::Struct,
        "Signed",
        Members {
            fields: vec![let_field(
                &interner,
                "algorithm",
                named_annotation(&interner, "SignatureAlgorithm", false, 420),
                410,
            )],
            ..Members::default()
        },
        400,
    );
    let type_id = checker.declare_interface_declaration(&vault);
    checker.check_interface_declaration(&vault, type_id);
    assert_eq!(codes(&checker.flush_diagnostics()), vec![]);
}

#[test]
fn catalog_ordinals_are_stable() {
    use crate::{HashAlgorithm, SignatureAlgorithm};

    let signature_raws: Vec<u8> = SignatureAlgorithm::ALL
        .iter()
        .map(|algorithm| algorithm.raw_value())
        .collect();
    assert_eq!(signature_raws, vec![0, 1, 2]);

    let hash_names: Vec<&str> = HashAlgorithm::ALL
        .iter()
        .map(|algorithm| algorithm.name())
        .collect();
    assert_eq!(
        hash_names,
        vec!["SHA2_256", "SHA2_384", "SHA3_256", "SHA3_384", "KMAC128"]
    );

    assert_eq!(
        crate::signature_algorithm_from_raw(1),
        SignatureAlgorithm::EcdsaSecp256k1
    );
    assert_eq!(crate::hash_algorithm_from_raw(0), HashAlgorithm::Sha2_256);
}
