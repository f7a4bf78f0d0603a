//! Diagnostic system for the Vela declaration checker.
//!
//! User-facing rule violations are accumulated here and never abort a
//! checking run. Internal invariant faults take a different channel
//! entirely (`vela_sema::fault`); keeping the two separate is load-bearing:
//! a diagnostic is a user mistake, a fault is a checker defect.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
