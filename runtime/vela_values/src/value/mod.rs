//! Runtime values.
//!
//! The variant set is closed: the interpreter never grows it at runtime, and
//! the visitor dispatch in [`crate::visitor`] matches it exhaustively, so
//! adding a variant is a compile-time obligation to handle it everywhere.
//!
//! Heap-backed payloads go through the [`Heap`] factory methods on `Value`;
//! external code cannot construct heap payloads directly.

mod account;
mod composite;
mod fixed_point;
mod function;
mod reference;

use num_bigint::{BigInt, BigUint};

pub use account::{
    AuthAccountContractsValue, AuthAccountValue, DeployedContractValue, PublicAccountValue,
};
pub use composite::{ArrayValue, CompositeValue, DictionaryKey, DictionaryValue};
pub use fixed_point::{Fix64Value, UFix64Value};
pub use function::{BoundFunctionValue, HostFn, HostFunctionValue, InterpretedFunctionValue};
pub use reference::{
    AddressValue, CapabilityValue, EphemeralReferenceValue, LinkValue, PathDomain, PathValue,
    StorageReferenceValue,
};

use vela_sema::Type;

use crate::heap::Heap;

/// A runtime value.
///
/// Exactly four variants are prunable containers: `Array`, `Dictionary`,
/// `Composite`, and `Some`. Every other variant is a traversal leaf.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives
    Void,
    Bool(bool),

    // Signed integers
    /// Arbitrary-precision signed integer.
    Int(BigInt),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(BigInt),

    // Unsigned integers
    /// Arbitrary-precision unsigned integer.
    UInt(BigUint),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt256(BigUint),

    // Words: fixed-width bit patterns with modular arithmetic
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),

    // Fixed-point decimals
    Fix64(Fix64Value),
    UFix64(UFix64Value),

    // Text
    String(Heap<String>),

    // Containers (prunable)
    Array(Heap<ArrayValue>),
    Dictionary(Heap<DictionaryValue>),
    Composite(Heap<CompositeValue>),
    /// Optional-present wrapper around exactly one value.
    Some(Heap<Value>),
    /// Optional-absent.
    Nil,

    // References
    StorageRef(Heap<StorageReferenceValue>),
    EphemeralRef(Heap<EphemeralReferenceValue>),

    // Access and identity
    Address(AddressValue),
    Capability(Heap<CapabilityValue>),
    Link(Heap<LinkValue>),
    Path(PathValue),

    // Functions
    InterpretedFunction(Heap<InterpretedFunctionValue>),
    HostFunction(HostFunctionValue),
    BoundFunction(Heap<BoundFunctionValue>),

    // Account-facing
    AuthAccount(AuthAccountValue),
    PublicAccount(PublicAccountValue),
    AuthAccountContracts(AuthAccountContractsValue),
    DeployedContract(Heap<DeployedContractValue>),

    // A static type reified as a value
    Type(Heap<Type>),
}

// Factory methods (the only way to construct heap-backed variants)

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Heap::new(ArrayValue::new(elements)))
    }

    #[inline]
    pub fn dictionary(dictionary: DictionaryValue) -> Self {
        Value::Dictionary(Heap::new(dictionary))
    }

    #[inline]
    pub fn composite(composite: CompositeValue) -> Self {
        Value::Composite(Heap::new(composite))
    }

    #[inline]
    pub fn some(value: Value) -> Self {
        Value::Some(Heap::new(value))
    }

    #[inline]
    pub fn storage_ref(reference: StorageReferenceValue) -> Self {
        Value::StorageRef(Heap::new(reference))
    }

    /// Create an ephemeral reference sharing `referenced`'s allocation.
    #[inline]
    pub fn ephemeral_ref(authorized: bool, referenced: Value) -> Self {
        Value::EphemeralRef(Heap::new(EphemeralReferenceValue {
            authorized,
            referenced: Heap::new(referenced),
        }))
    }

    #[inline]
    pub fn capability(capability: CapabilityValue) -> Self {
        Value::Capability(Heap::new(capability))
    }

    #[inline]
    pub fn link(link: LinkValue) -> Self {
        Value::Link(Heap::new(link))
    }

    #[inline]
    pub fn interpreted_function(function: InterpretedFunctionValue) -> Self {
        Value::InterpretedFunction(Heap::new(function))
    }

    #[inline]
    pub fn bound_function(receiver: Value, function: Value) -> Self {
        Value::BoundFunction(Heap::new(BoundFunctionValue { receiver, function }))
    }

    #[inline]
    pub fn deployed_contract(contract: DeployedContractValue) -> Self {
        Value::DeployedContract(Heap::new(contract))
    }

    #[inline]
    pub fn type_value(ty: Type) -> Self {
        Value::Type(Heap::new(ty))
    }
}

impl Value {
    /// Short kind name, for debugging and traversal-order assertions.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Void => "Void",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Int128(_) => "Int128",
            Value::Int256(_) => "Int256",
            Value::UInt(_) => "UInt",
            Value::UInt8(_) => "UInt8",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::UInt128(_) => "UInt128",
            Value::UInt256(_) => "UInt256",
            Value::Word8(_) => "Word8",
            Value::Word16(_) => "Word16",
            Value::Word32(_) => "Word32",
            Value::Word64(_) => "Word64",
            Value::Fix64(_) => "Fix64",
            Value::UFix64(_) => "UFix64",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Dictionary(_) => "Dictionary",
            Value::Composite(_) => "Composite",
            Value::Some(_) => "Some",
            Value::Nil => "Nil",
            Value::StorageRef(_) => "StorageRef",
            Value::EphemeralRef(_) => "EphemeralRef",
            Value::Address(_) => "Address",
            Value::Capability(_) => "Capability",
            Value::Link(_) => "Link",
            Value::Path(_) => "Path",
            Value::InterpretedFunction(_) => "InterpretedFunction",
            Value::HostFunction(_) => "HostFunction",
            Value::BoundFunction(_) => "BoundFunction",
            Value::AuthAccount(_) => "AuthAccount",
            Value::PublicAccount(_) => "PublicAccount",
            Value::AuthAccountContracts(_) => "AuthAccountContracts",
            Value::DeployedContract(_) => "DeployedContract",
            Value::Type(_) => "Type",
        }
    }

    /// Whether this variant is one of the four prunable containers.
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Dictionary(_) | Value::Composite(_) | Value::Some(_)
        )
    }

    /// Render the value for user output. Identifiers interned as [`Name`]s
    /// render as placeholders; callers with an interner can do better.
    ///
    /// [`Name`]: vela_ir::Name
    pub fn display_value(&self) -> String {
        match self {
            Value::Void => "()".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Int8(n) => n.to_string(),
            Value::Int16(n) => n.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Int128(n) => n.to_string(),
            Value::Int256(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::UInt8(n) => n.to_string(),
            Value::UInt16(n) => n.to_string(),
            Value::UInt32(n) => n.to_string(),
            Value::UInt64(n) => n.to_string(),
            Value::UInt128(n) => n.to_string(),
            Value::UInt256(n) => n.to_string(),
            Value::Word8(n) => n.to_string(),
            Value::Word16(n) => n.to_string(),
            Value::Word32(n) => n.to_string(),
            Value::Word64(n) => n.to_string(),
            Value::Fix64(v) => v.to_string(),
            Value::UFix64(v) => v.to_string(),
            Value::String(s) => format!("{s:?}"),
            Value::Array(array) => {
                let inner: Vec<_> = array.elements.iter().map(Value::display_value).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Dictionary(dictionary) => {
                let inner: Vec<_> = dictionary
                    .keys
                    .iter()
                    .map(|key| {
                        let value = dictionary
                            .get(key)
                            .map_or_else(|| "?".to_string(), Value::display_value);
                        format!("{}: {}", key.display_value(), value)
                    })
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Composite(composite) => {
                let inner: Vec<_> = composite
                    .fields
                    .iter()
                    .map(|(_, value)| value.display_value())
                    .collect();
                format!("<composite>({})", inner.join(", "))
            }
            Value::Some(inner) => inner.display_value(),
            Value::Nil => "nil".to_string(),
            Value::StorageRef(_) | Value::EphemeralRef(_) => "<reference>".to_string(),
            Value::Address(address) => address.to_string(),
            Value::Capability(capability) => format!("Capability({})", capability.address),
            Value::Link(_) => "<link>".to_string(),
            Value::Path(path) => format!("/{}/<id>", path.domain.name()),
            Value::InterpretedFunction(_) | Value::BoundFunction(_) => "<function>".to_string(),
            Value::HostFunction(host) => format!("<host function {}>", host.name),
            Value::AuthAccount(account) => format!("AuthAccount({})", account.address),
            Value::PublicAccount(account) => format!("PublicAccount({})", account.address),
            Value::AuthAccountContracts(contracts) => {
                format!("AuthAccount.Contracts({})", contracts.address)
            }
            Value::DeployedContract(contract) => {
                format!("DeployedContract({})", contract.address)
            }
            Value::Type(ty) => format!("Type<{ty:?}>"),
        }
    }
}
