//! Function value payloads.
//!
//! Functions are leaves for traversal: a traversal never descends into a
//! captured scope or a bound receiver.

use rustc_hash::FxHashMap;

use vela_ir::ast::FunctionDeclaration;
use vela_ir::Name;

use super::Value;
use crate::heap::Heap;

/// Native callback signature for host functions.
pub type HostFn = fn(&[Value]) -> Result<Value, String>;

/// A function defined in source, closed over its captured scope.
#[derive(Clone, Debug)]
pub struct InterpretedFunctionValue {
    pub identifier: Name,
    /// The declaration node the body lives in.
    pub declaration: Heap<FunctionDeclaration>,
    /// Captured bindings, by name.
    pub captures: FxHashMap<Name, Value>,
}

impl InterpretedFunctionValue {
    pub fn new(
        identifier: Name,
        declaration: FunctionDeclaration,
        captures: FxHashMap<Name, Value>,
    ) -> Self {
        InterpretedFunctionValue {
            identifier,
            declaration: Heap::new(declaration),
            captures,
        }
    }
}

/// A function backed by a native callback.
#[derive(Copy, Clone, Debug)]
pub struct HostFunctionValue {
    pub name: &'static str,
    pub function: HostFn,
}

impl HostFunctionValue {
    pub const fn new(name: &'static str, function: HostFn) -> Self {
        HostFunctionValue { name, function }
    }
}

/// A function bound to a receiver value.
#[derive(Clone, Debug)]
pub struct BoundFunctionValue {
    pub receiver: Value,
    pub function: Value,
}
