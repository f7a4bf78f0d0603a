//! Registration of externally supplied fixed enum types, and the crypto
//! algorithm catalogs the runtime ships with.
//!
//! The checker registers these as opaque enum types: identifier, raw
//! backing integer type, ordered case list. It does not parse or validate
//! the cases. Each case is an instance of the enum type, and the only
//! member of the type itself is the `rawValue` field.

use std::collections::BTreeMap;

use vela_ir::ast::{Access, CompositeKind, DeclarationKind, Identifier, VariableKind};
use vela_ir::{Name, Span};

use crate::checker::Checker;
use crate::fault;
use crate::types::{IntegerKind, Member, Type, TypeAnnotation, TypeId};

/// One case of an externally supplied fixed enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuiltinEnumCase {
    /// Canonical case name.
    pub name: &'static str,
    /// Stable ordinal.
    pub raw_value: u8,
    /// Documentation string.
    pub doc_string: &'static str,
}

/// Supported signing algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    EcdsaP256,
    EcdsaSecp256k1,
    BlsBls12381,
}

impl SignatureAlgorithm {
    pub const ALL: [SignatureAlgorithm; 3] = [
        SignatureAlgorithm::EcdsaP256,
        SignatureAlgorithm::EcdsaSecp256k1,
        SignatureAlgorithm::BlsBls12381,
    ];

    /// Canonical name of this signing algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256 => "ECDSA_P256",
            SignatureAlgorithm::EcdsaSecp256k1 => "ECDSA_Secp256k1",
            SignatureAlgorithm::BlsBls12381 => "BLSBLS12381",
        }
    }

    /// Stable ordinal.
    pub const fn raw_value(self) -> u8 {
        match self {
            SignatureAlgorithm::EcdsaP256 => 0,
            SignatureAlgorithm::EcdsaSecp256k1 => 1,
            SignatureAlgorithm::BlsBls12381 => 2,
        }
    }

    pub const fn doc_string(self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256 => {
                "Elliptic Curve Digital Signature Algorithm (ECDSA) on the NIST P-256 curve"
            }
            SignatureAlgorithm::EcdsaSecp256k1 => {
                "Elliptic Curve Digital Signature Algorithm (ECDSA) on the secp256k1 curve"
            }
            SignatureAlgorithm::BlsBls12381 => "BLS signature algorithm on the BLS 12-381 curve",
        }
    }

    const fn case(self) -> BuiltinEnumCase {
        BuiltinEnumCase {
            name: self.name(),
            raw_value: self.raw_value(),
            doc_string: self.doc_string(),
        }
    }
}

/// Supported hashing algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha2_256,
    Sha2_384,
    Sha3_256,
    Sha3_384,
    Kmac128,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Sha2_256,
        HashAlgorithm::Sha2_384,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Kmac128,
    ];

    /// Canonical name of this hashing algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "SHA2_256",
            HashAlgorithm::Sha2_384 => "SHA2_384",
            HashAlgorithm::Sha3_256 => "SHA3_256",
            HashAlgorithm::Sha3_384 => "SHA3_384",
            HashAlgorithm::Kmac128 => "KMAC128",
        }
    }

    /// Stable ordinal.
    pub const fn raw_value(self) -> u8 {
        match self {
            HashAlgorithm::Sha2_256 => 0,
            HashAlgorithm::Sha2_384 => 1,
            HashAlgorithm::Sha3_256 => 2,
            HashAlgorithm::Sha3_384 => 3,
            HashAlgorithm::Kmac128 => 4,
        }
    }

    pub const fn doc_string(self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "Secure Hashing Algorithm 2 (SHA-2) with a 256-bit digest",
            HashAlgorithm::Sha2_384 => "Secure Hashing Algorithm 2 (SHA-2) with a 384-bit digest",
            HashAlgorithm::Sha3_256 => "Secure Hashing Algorithm 3 (SHA-3) with a 256-bit digest",
            HashAlgorithm::Sha3_384 => "Secure Hashing Algorithm 3 (SHA-3) with a 384-bit digest",
            HashAlgorithm::Kmac128 => "KECCAK message authentication code with a 128-bit digest",
        }
    }

    const fn case(self) -> BuiltinEnumCase {
        BuiltinEnumCase {
            name: self.name(),
            raw_value: self.raw_value(),
            doc_string: self.doc_string(),
        }
    }
}

pub const SIGNATURE_ALGORITHM_TYPE_NAME: &str = "SignatureAlgorithm";
pub const HASH_ALGORITHM_TYPE_NAME: &str = "HashAlgorithm";

/// Name of the single member every enum instance exposes.
pub const ENUM_RAW_VALUE_FIELD_NAME: &str = "rawValue";

impl Checker<'_> {
    /// Register an externally supplied fixed enum type in the current type
    /// scope. The case list is taken as-is; ordinals must already be stable.
    pub fn register_builtin_enum(
        &mut self,
        identifier: &str,
        raw_type: Type,
        cases: &[BuiltinEnumCase],
    ) -> TypeId {
        let name = self.interner.intern(identifier);
        let type_id = self
            .registry
            .alloc_composite(name, CompositeKind::Enum, Span::DUMMY);

        // Members of the enum type are *not* the cases: each case is an
        // instance of the enum type, and an instance has a single member,
        // the raw value field.
        let raw_value_name = self.interner.intern(ENUM_RAW_VALUE_FIELD_NAME);
        let mut members = BTreeMap::new();
        members.insert(
            raw_value_name,
            Member {
                identifier: raw_value_name,
                access: Access::Public,
                declaration_kind: DeclarationKind::Field,
                variable_kind: VariableKind::Constant,
                type_annotation: TypeAnnotation {
                    is_resource: false,
                    ty: raw_type.clone(),
                },
                declared_at: Span::DUMMY,
            },
        );

        let case_names: Vec<Name> = cases
            .iter()
            .map(|case| self.interner.intern(case.name))
            .collect();

        let entry = self.registry.entry_mut(type_id);
        entry.members = members;
        entry.enum_raw_type = Some(raw_type);
        entry.enum_cases = case_names;

        self.declare_type(
            Identifier::new(name, Span::DUMMY),
            Type::Composite(type_id),
            DeclarationKind::Enumeration,
            Access::Public,
        );

        type_id
    }

    /// Register the `SignatureAlgorithm` and `HashAlgorithm` catalogs.
    pub fn register_crypto_algorithm_types(&mut self) -> (TypeId, TypeId) {
        let signature_cases: Vec<BuiltinEnumCase> = SignatureAlgorithm::ALL
            .iter()
            .map(|algorithm| algorithm.case())
            .collect();
        let hash_cases: Vec<BuiltinEnumCase> = HashAlgorithm::ALL
            .iter()
            .map(|algorithm| algorithm.case())
            .collect();

        let signature_type_id = self.register_builtin_enum(
            SIGNATURE_ALGORITHM_TYPE_NAME,
            Type::Integer(IntegerKind::UInt8),
            &signature_cases,
        );
        let hash_type_id = self.register_builtin_enum(
            HASH_ALGORITHM_TYPE_NAME,
            Type::Integer(IntegerKind::UInt8),
            &hash_cases,
        );
        (signature_type_id, hash_type_id)
    }
}

/// Look up a catalog entry by ordinal; out-of-range ordinals are a caller
/// defect, not user input.
pub fn signature_algorithm_from_raw(raw_value: u8) -> SignatureAlgorithm {
    SignatureAlgorithm::ALL
        .into_iter()
        .find(|algorithm| algorithm.raw_value() == raw_value)
        .unwrap_or_else(|| fault::internal("unknown signature algorithm ordinal"))
}

/// Look up a catalog entry by ordinal.
pub fn hash_algorithm_from_raw(raw_value: u8) -> HashAlgorithm {
    HashAlgorithm::ALL
        .into_iter()
        .find(|algorithm| algorithm.raw_value() == raw_value)
        .unwrap_or_else(|| fault::internal("unknown hash algorithm ordinal"))
}
