//! Static semantic checking for Vela declarations.
//!
//! The centerpiece is the two-phase interface declaration checker: every
//! sibling declaration is first *declared* (a placeholder type registered so
//! forward and mutual references resolve), then *checked* (members and
//! nested types populated, a dozen legality rules enforced). User-facing
//! violations accumulate as diagnostics and never abort a run; internal
//! invariant violations abort through [`fault`].

mod activations;
mod builtin;
mod checker;
mod declarations;
pub mod fault;
mod functions;
mod interface;
mod members;
mod type_resolution;
mod types;

pub use activations::{Activations, ActivationsGuard, AlreadyDeclared};
pub use builtin::{
    hash_algorithm_from_raw, signature_algorithm_from_raw, BuiltinEnumCase, HashAlgorithm,
    SignatureAlgorithm, ENUM_RAW_VALUE_FIELD_NAME, HASH_ALGORITHM_TYPE_NAME,
    SIGNATURE_ALGORITHM_TYPE_NAME,
};
pub use checker::{Checker, ContainerKind, Variable};
pub use functions::FunctionCheckFlags;
pub use types::{
    FixedPointKind, IntegerKind, Member, Type, TypeAnnotation, TypeEntry, TypeId, TypeRegistry,
};

#[cfg(test)]
mod tests;
