//! Container value payloads: arrays, dictionaries, and composite records.

use num_bigint::BigInt;
use rustc_hash::FxHashMap;

use vela_ir::ast::CompositeKind;
use vela_ir::Name;

use super::{AddressValue, Fix64Value, PathValue, UFix64Value, Value};

/// An ordered array of values.
#[derive(Clone, Debug, Default)]
pub struct ArrayValue {
    pub elements: Vec<Value>,
}

impl ArrayValue {
    pub fn new(elements: Vec<Value>) -> Self {
        ArrayValue { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A hashable projection of a value usable as a dictionary key.
///
/// Dictionary keys are restricted to scalar kinds; the static checker
/// guarantees this upstream, so an unkeyable key at runtime is an internal
/// fault, not user input. All integer kinds normalize into one numeric key
/// space.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DictionaryKey {
    String(String),
    Int(BigInt),
    Fix64(Fix64Value),
    UFix64(UFix64Value),
    Bool(bool),
    Address(AddressValue),
    Path(PathValue),
}

impl DictionaryKey {
    /// Project a value into its key form, if its kind is keyable.
    pub fn for_value(value: &Value) -> Option<DictionaryKey> {
        let key = match value {
            Value::String(s) => DictionaryKey::String((**s).clone()),
            Value::Bool(b) => DictionaryKey::Bool(*b),
            Value::Address(address) => DictionaryKey::Address(*address),
            Value::Path(path) => DictionaryKey::Path(*path),
            Value::Fix64(v) => DictionaryKey::Fix64(*v),
            Value::UFix64(v) => DictionaryKey::UFix64(*v),
            Value::Int(v) | Value::Int256(v) => DictionaryKey::Int(v.clone()),
            Value::Int8(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::Int16(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::Int32(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::Int64(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::Int128(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::UInt(v) | Value::UInt256(v) => {
                DictionaryKey::Int(BigInt::from(v.clone()))
            }
            Value::UInt8(v) | Value::Word8(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::UInt16(v) | Value::Word16(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::UInt32(v) | Value::Word32(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::UInt64(v) | Value::Word64(v) => DictionaryKey::Int(BigInt::from(*v)),
            Value::UInt128(v) => DictionaryKey::Int(BigInt::from(*v)),
            _ => return None,
        };
        Some(key)
    }
}

/// A key-value mapping with unique keys and deterministic traversal order.
///
/// Keys keep their insertion order; the entry map serves lookup. Traversal
/// iterates `keys` in insertion order, visiting each key before its value.
#[derive(Clone, Debug, Default)]
pub struct DictionaryValue {
    pub keys: Vec<Value>,
    entries: FxHashMap<DictionaryKey, Value>,
}

impl DictionaryValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert an entry, returning the previous value for the key. Inserting
    /// over an existing key keeps the key's original insertion position.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        let dictionary_key = Self::key_for(&key);
        let previous = self.entries.insert(dictionary_key, value);
        if previous.is_none() {
            self.keys.push(key);
        }
        previous
    }

    /// Look up the value for a key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(&Self::key_for(key))
    }

    /// Remove an entry, returning its value.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let dictionary_key = Self::key_for(key);
        let removed = self.entries.remove(&dictionary_key);
        if removed.is_some() {
            self.keys
                .retain(|existing| Self::key_for(existing) != dictionary_key);
        }
        removed
    }

    fn key_for(key: &Value) -> DictionaryKey {
        DictionaryKey::for_value(key).unwrap_or_else(|| {
            vela_sema::fault::internal("value kind is not a valid dictionary key")
        })
    }
}

/// A composite record: named fields in declaration order.
#[derive(Clone, Debug)]
pub struct CompositeValue {
    /// Qualified identifier of the composite's type.
    pub qualified_identifier: Name,
    pub kind: CompositeKind,
    /// Fields in declaration order.
    pub fields: Vec<(Name, Value)>,
}

impl CompositeValue {
    pub fn new(
        qualified_identifier: Name,
        kind: CompositeKind,
        fields: Vec<(Name, Value)>,
    ) -> Self {
        CompositeValue {
            qualified_identifier,
            kind,
            fields,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: Name) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }
}
