//! Visitor dispatch over the runtime value hierarchy.
//!
//! Traversal order is a fixed preorder: a container's callback fires before
//! its children, and children are visited in declared order (array index
//! order, dictionary insertion order with each key before its value, field
//! declaration order, the `Some` inner value). Storage encoding and
//! resource-invalidation marking both ride on this order being stable, so it
//! is a hard contract, not an implementation detail.
//!
//! Exactly four variants are prunable: array, dictionary, composite, and
//! optional-present. Their callbacks return a [`Traversal`] decision;
//! returning [`Traversal::Prune`] skips the whole subtree. Every other
//! variant is a leaf.

use num_bigint::{BigInt, BigUint};

use vela_sema::Type;

use crate::value::{
    ArrayValue, AuthAccountContractsValue, AuthAccountValue, BoundFunctionValue, CapabilityValue,
    CompositeValue, DeployedContractValue, DictionaryValue, EphemeralReferenceValue, Fix64Value,
    HostFunctionValue, InterpretedFunctionValue, LinkValue, PathValue, PublicAccountValue,
    StorageReferenceValue, UFix64Value,
};
use crate::value::{AddressValue, Value};

/// Continuation decision returned by a container visit callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Recurse into the container's children.
    Continue,
    /// Skip the container's children entirely.
    Prune,
}

/// Per-variant visit callbacks.
///
/// Every method is defaulted (no-op for leaves, [`Traversal::Continue`]
/// for the four containers) so a visitor implements only the slots it
/// cares about. `visit_value` fires for every node, before its variant
/// slot.
pub trait Visitor {
    /// Called for every node, before the variant-specific method.
    fn visit_value(&mut self, _value: &Value) {}

    fn visit_void(&mut self) {}
    fn visit_bool(&mut self, _value: bool) {}

    fn visit_int(&mut self, _value: &BigInt) {}
    fn visit_int8(&mut self, _value: i8) {}
    fn visit_int16(&mut self, _value: i16) {}
    fn visit_int32(&mut self, _value: i32) {}
    fn visit_int64(&mut self, _value: i64) {}
    fn visit_int128(&mut self, _value: i128) {}
    fn visit_int256(&mut self, _value: &BigInt) {}

    fn visit_uint(&mut self, _value: &BigUint) {}
    fn visit_uint8(&mut self, _value: u8) {}
    fn visit_uint16(&mut self, _value: u16) {}
    fn visit_uint32(&mut self, _value: u32) {}
    fn visit_uint64(&mut self, _value: u64) {}
    fn visit_uint128(&mut self, _value: u128) {}
    fn visit_uint256(&mut self, _value: &BigUint) {}

    fn visit_word8(&mut self, _value: u8) {}
    fn visit_word16(&mut self, _value: u16) {}
    fn visit_word32(&mut self, _value: u32) {}
    fn visit_word64(&mut self, _value: u64) {}

    fn visit_fix64(&mut self, _value: Fix64Value) {}
    fn visit_ufix64(&mut self, _value: UFix64Value) {}

    fn visit_string(&mut self, _value: &str) {}

    /// Container: array elements are visited in index order.
    fn visit_array(&mut self, _value: &ArrayValue) -> Traversal {
        Traversal::Continue
    }

    /// Container: entries are visited in key insertion order, each key
    /// before its value.
    fn visit_dictionary(&mut self, _value: &DictionaryValue) -> Traversal {
        Traversal::Continue
    }

    /// Container: fields are visited in declaration order.
    fn visit_composite(&mut self, _value: &CompositeValue) -> Traversal {
        Traversal::Continue
    }

    /// Container: wraps exactly one child value.
    fn visit_some(&mut self, _value: &Value) -> Traversal {
        Traversal::Continue
    }

    fn visit_nil(&mut self) {}

    fn visit_storage_ref(&mut self, _value: &StorageReferenceValue) {}
    fn visit_ephemeral_ref(&mut self, _value: &EphemeralReferenceValue) {}

    fn visit_address(&mut self, _value: AddressValue) {}
    fn visit_capability(&mut self, _value: &CapabilityValue) {}
    fn visit_link(&mut self, _value: &LinkValue) {}
    fn visit_path(&mut self, _value: PathValue) {}

    fn visit_interpreted_function(&mut self, _value: &InterpretedFunctionValue) {}
    fn visit_host_function(&mut self, _value: &HostFunctionValue) {}
    fn visit_bound_function(&mut self, _value: &BoundFunctionValue) {}

    fn visit_auth_account(&mut self, _value: AuthAccountValue) {}
    fn visit_public_account(&mut self, _value: PublicAccountValue) {}
    fn visit_auth_account_contracts(&mut self, _value: AuthAccountContractsValue) {}
    fn visit_deployed_contract(&mut self, _value: &DeployedContractValue) {}

    fn visit_type(&mut self, _value: &Type) {}
}

/// Run a visitor over a value. Results are communicated through visitor
/// state; the traversal itself never mutates the value graph.
pub fn walk_value(value: &Value, visitor: &mut dyn Visitor) {
    value.accept(visitor);
}

impl Value {
    /// Dispatch a traversal over this value.
    ///
    /// Each reachable node is visited exactly once per invocation, in fixed
    /// preorder, unless an ancestor's callback pruned its subtree.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_value(self);
        match self {
            Value::Void => visitor.visit_void(),
            Value::Bool(value) => visitor.visit_bool(*value),

            Value::Int(value) => visitor.visit_int(value),
            Value::Int8(value) => visitor.visit_int8(*value),
            Value::Int16(value) => visitor.visit_int16(*value),
            Value::Int32(value) => visitor.visit_int32(*value),
            Value::Int64(value) => visitor.visit_int64(*value),
            Value::Int128(value) => visitor.visit_int128(*value),
            Value::Int256(value) => visitor.visit_int256(value),

            Value::UInt(value) => visitor.visit_uint(value),
            Value::UInt8(value) => visitor.visit_uint8(*value),
            Value::UInt16(value) => visitor.visit_uint16(*value),
            Value::UInt32(value) => visitor.visit_uint32(*value),
            Value::UInt64(value) => visitor.visit_uint64(*value),
            Value::UInt128(value) => visitor.visit_uint128(*value),
            Value::UInt256(value) => visitor.visit_uint256(value),

            Value::Word8(value) => visitor.visit_word8(*value),
            Value::Word16(value) => visitor.visit_word16(*value),
            Value::Word32(value) => visitor.visit_word32(*value),
            Value::Word64(value) => visitor.visit_word64(*value),

            Value::Fix64(value) => visitor.visit_fix64(*value),
            Value::UFix64(value) => visitor.visit_ufix64(*value),

            Value::String(value) => visitor.visit_string(value),

            Value::Array(array) => {
                if visitor.visit_array(array) == Traversal::Continue {
                    for element in &array.elements {
                        element.accept(visitor);
                    }
                }
            }
            Value::Dictionary(dictionary) => {
                if visitor.visit_dictionary(dictionary) == Traversal::Continue {
                    for key in &dictionary.keys {
                        key.accept(visitor);
                        let Some(entry_value) = dictionary.get(key) else {
                            vela_sema::fault::internal("dictionary key without an entry");
                        };
                        entry_value.accept(visitor);
                    }
                }
            }
            Value::Composite(composite) => {
                if visitor.visit_composite(composite) == Traversal::Continue {
                    for (_, field_value) in &composite.fields {
                        field_value.accept(visitor);
                    }
                }
            }
            Value::Some(inner) => {
                if visitor.visit_some(inner) == Traversal::Continue {
                    inner.accept(visitor);
                }
            }
            Value::Nil => visitor.visit_nil(),

            Value::StorageRef(reference) => visitor.visit_storage_ref(reference),
            Value::EphemeralRef(reference) => visitor.visit_ephemeral_ref(reference),

            Value::Address(address) => visitor.visit_address(*address),
            Value::Capability(capability) => visitor.visit_capability(capability),
            Value::Link(link) => visitor.visit_link(link),
            Value::Path(path) => visitor.visit_path(*path),

            Value::InterpretedFunction(function) => visitor.visit_interpreted_function(function),
            Value::HostFunction(function) => visitor.visit_host_function(function),
            Value::BoundFunction(function) => visitor.visit_bound_function(function),

            Value::AuthAccount(account) => visitor.visit_auth_account(*account),
            Value::PublicAccount(account) => visitor.visit_public_account(*account),
            Value::AuthAccountContracts(contracts) => {
                visitor.visit_auth_account_contracts(*contracts);
            }
            Value::DeployedContract(contract) => visitor.visit_deployed_contract(contract),

            Value::Type(ty) => visitor.visit_type(ty),
        }
    }
}

type UnitSlot = Option<Box<dyn FnMut()>>;
type Slot<T> = Option<Box<dyn FnMut(&T)>>;
type CopySlot<T> = Option<Box<dyn FnMut(T)>>;
type ContainerSlot<T> = Option<Box<dyn FnMut(&T) -> Traversal>>;

/// A visitor assembled from optional callback slots, one per variant.
///
/// Any unset slot behaves as a no-op for leaf variants and as "continue"
/// for container variants, so a partial traversal sets only the slots it
/// reacts to.
#[derive(Default)]
pub struct EmptyVisitor {
    pub value_visitor: Slot<Value>,
    pub void_visitor: UnitSlot,
    pub bool_visitor: CopySlot<bool>,
    pub int_visitor: Slot<BigInt>,
    pub int8_visitor: CopySlot<i8>,
    pub int16_visitor: CopySlot<i16>,
    pub int32_visitor: CopySlot<i32>,
    pub int64_visitor: CopySlot<i64>,
    pub int128_visitor: CopySlot<i128>,
    pub int256_visitor: Slot<BigInt>,
    pub uint_visitor: Slot<BigUint>,
    pub uint8_visitor: CopySlot<u8>,
    pub uint16_visitor: CopySlot<u16>,
    pub uint32_visitor: CopySlot<u32>,
    pub uint64_visitor: CopySlot<u64>,
    pub uint128_visitor: CopySlot<u128>,
    pub uint256_visitor: Slot<BigUint>,
    pub word8_visitor: CopySlot<u8>,
    pub word16_visitor: CopySlot<u16>,
    pub word32_visitor: CopySlot<u32>,
    pub word64_visitor: CopySlot<u64>,
    pub fix64_visitor: CopySlot<Fix64Value>,
    pub ufix64_visitor: CopySlot<UFix64Value>,
    pub string_visitor: Slot<str>,
    pub array_visitor: ContainerSlot<ArrayValue>,
    pub dictionary_visitor: ContainerSlot<DictionaryValue>,
    pub composite_visitor: ContainerSlot<CompositeValue>,
    pub some_visitor: ContainerSlot<Value>,
    pub nil_visitor: UnitSlot,
    pub storage_ref_visitor: Slot<StorageReferenceValue>,
    pub ephemeral_ref_visitor: Slot<EphemeralReferenceValue>,
    pub address_visitor: CopySlot<AddressValue>,
    pub capability_visitor: Slot<CapabilityValue>,
    pub link_visitor: Slot<LinkValue>,
    pub path_visitor: CopySlot<PathValue>,
    pub interpreted_function_visitor: Slot<InterpretedFunctionValue>,
    pub host_function_visitor: Slot<HostFunctionValue>,
    pub bound_function_visitor: Slot<BoundFunctionValue>,
    pub auth_account_visitor: CopySlot<AuthAccountValue>,
    pub public_account_visitor: CopySlot<PublicAccountValue>,
    pub auth_account_contracts_visitor: CopySlot<AuthAccountContractsValue>,
    pub deployed_contract_visitor: Slot<DeployedContractValue>,
    pub type_visitor: Slot<Type>,
}

impl EmptyVisitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for EmptyVisitor {
    fn visit_value(&mut self, value: &Value) {
        if let Some(slot) = &mut self.value_visitor {
            slot(value);
        }
    }

    fn visit_void(&mut self) {
        if let Some(slot) = &mut self.void_visitor {
            slot();
        }
    }

    fn visit_bool(&mut self, value: bool) {
        if let Some(slot) = &mut self.bool_visitor {
            slot(value);
        }
    }

    fn visit_int(&mut self, value: &BigInt) {
        if let Some(slot) = &mut self.int_visitor {
            slot(value);
        }
    }

    fn visit_int8(&mut self, value: i8) {
        if let Some(slot) = &mut self.int8_visitor {
            slot(value);
        }
    }

    fn visit_int16(&mut self, value: i16) {
        if let Some(slot) = &mut self.int16_visitor {
            slot(value);
        }
    }

    fn visit_int32(&mut self, value: i32) {
        if let Some(slot) = &mut self.int32_visitor {
            slot(value);
        }
    }

    fn visit_int64(&mut self, value: i64) {
        if let Some(slot) = &mut self.int64_visitor {
            slot(value);
        }
    }

    fn visit_int128(&mut self, value: i128) {
        if let Some(slot) = &mut self.int128_visitor {
            slot(value);
        }
    }

    fn visit_int256(&mut self, value: &BigInt) {
        if let Some(slot) = &mut self.int256_visitor {
            slot(value);
        }
    }

    fn visit_uint(&mut self, value: &BigUint) {
        if let Some(slot) = &mut self.uint_visitor {
            slot(value);
        }
    }

    fn visit_uint8(&mut self, value: u8) {
        if let Some(slot) = &mut self.uint8_visitor {
            slot(value);
        }
    }

    fn visit_uint16(&mut self, value: u16) {
        if let Some(slot) = &mut self.uint16_visitor {
            slot(value);
        }
    }

    fn visit_uint32(&mut self, value: u32) {
        if let Some(slot) = &mut self.uint32_visitor {
            slot(value);
        }
    }

    fn visit_uint64(&mut self, value: u64) {
        if let Some(slot) = &mut self.uint64_visitor {
            slot(value);
        }
    }

    fn visit_uint128(&mut self, value: u128) {
        if let Some(slot) = &mut self.uint128_visitor {
            slot(value);
        }
    }

    fn visit_uint256(&mut self, value: &BigUint) {
        if let Some(slot) = &mut self.uint256_visitor {
            slot(value);
        }
    }

    fn visit_word8(&mut self, value: u8) {
        if let Some(slot) = &mut self.word8_visitor {
            slot(value);
        }
    }

    fn visit_word16(&mut self, value: u16) {
        if let Some(slot) = &mut self.word16_visitor {
            slot(value);
        }
    }

    fn visit_word32(&mut self, value: u32) {
        if let Some(slot) = &mut self.word32_visitor {
            slot(value);
        }
    }

    fn visit_word64(&mut self, value: u64) {
        if let Some(slot) = &mut self.word64_visitor {
            slot(value);
        }
    }

    fn visit_fix64(&mut self, value: Fix64Value) {
        if let Some(slot) = &mut self.fix64_visitor {
            slot(value);
        }
    }

    fn visit_ufix64(&mut self, value: UFix64Value) {
        if let Some(slot) = &mut self.ufix64_visitor {
            slot(value);
        }
    }

    fn visit_string(&mut self, value: &str) {
        if let Some(slot) = &mut self.string_visitor {
            slot(value);
        }
    }

    fn visit_array(&mut self, value: &ArrayValue) -> Traversal {
        match &mut self.array_visitor {
            Some(slot) => slot(value),
            None => Traversal::Continue,
        }
    }

    fn visit_dictionary(&mut self, value: &DictionaryValue) -> Traversal {
        match &mut self.dictionary_visitor {
            Some(slot) => slot(value),
            None => Traversal::Continue,
        }
    }

    fn visit_composite(&mut self, value: &CompositeValue) -> Traversal {
        match &mut self.composite_visitor {
            Some(slot) => slot(value),
            None => Traversal::Continue,
        }
    }

    fn visit_some(&mut self, value: &Value) -> Traversal {
        match &mut self.some_visitor {
            Some(slot) => slot(value),
            None => Traversal::Continue,
        }
    }

    fn visit_nil(&mut self) {
        if let Some(slot) = &mut self.nil_visitor {
            slot();
        }
    }

    fn visit_storage_ref(&mut self, value: &StorageReferenceValue) {
        if let Some(slot) = &mut self.storage_ref_visitor {
            slot(value);
        }
    }

    fn visit_ephemeral_ref(&mut self, value: &EphemeralReferenceValue) {
        if let Some(slot) = &mut self.ephemeral_ref_visitor {
            slot(value);
        }
    }

    fn visit_address(&mut self, value: AddressValue) {
        if let Some(slot) = &mut self.address_visitor {
            slot(value);
        }
    }

    fn visit_capability(&mut self, value: &CapabilityValue) {
        if let Some(slot) = &mut self.capability_visitor {
            slot(value);
        }
    }

    fn visit_link(&mut self, value: &LinkValue) {
        if let Some(slot) = &mut self.link_visitor {
            slot(value);
        }
    }

    fn visit_path(&mut self, value: PathValue) {
        if let Some(slot) = &mut self.path_visitor {
            slot(value);
        }
    }

    fn visit_interpreted_function(&mut self, value: &InterpretedFunctionValue) {
        if let Some(slot) = &mut self.interpreted_function_visitor {
            slot(value);
        }
    }

    fn visit_host_function(&mut self, value: &HostFunctionValue) {
        if let Some(slot) = &mut self.host_function_visitor {
            slot(value);
        }
    }

    fn visit_bound_function(&mut self, value: &BoundFunctionValue) {
        if let Some(slot) = &mut self.bound_function_visitor {
            slot(value);
        }
    }

    fn visit_auth_account(&mut self, value: AuthAccountValue) {
        if let Some(slot) = &mut self.auth_account_visitor {
            slot(value);
        }
    }

    fn visit_public_account(&mut self, value: PublicAccountValue) {
        if let Some(slot) = &mut self.public_account_visitor {
            slot(value);
        }
    }

    fn visit_auth_account_contracts(&mut self, value: AuthAccountContractsValue) {
        if let Some(slot) = &mut self.auth_account_contracts_visitor {
            slot(value);
        }
    }

    fn visit_deployed_contract(&mut self, value: &DeployedContractValue) {
        if let Some(slot) = &mut self.deployed_contract_visitor {
            slot(value);
        }
    }

    fn visit_type(&mut self, value: &Type) {
        if let Some(slot) = &mut self.type_visitor {
            slot(value);
        }
    }
}
