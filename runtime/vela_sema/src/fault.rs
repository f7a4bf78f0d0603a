//! Internal invariant faults.
//!
//! A fault means the checker or an upstream collaborator is defective, never
//! that the user wrote bad code. Faults abort the checking process instead
//! of flowing through the diagnostic queue; letting them share the user
//! channel would hide checker bugs behind ordinary error output.

/// Abort on an internal invariant violation.
///
/// Call sites mark conditions that are unreachable given well-formed parser
/// output, e.g. a registered nested type with no matching declaration node.
#[cold]
pub fn internal(message: &str) -> ! {
    panic!("internal invariant violation: {message}")
}
