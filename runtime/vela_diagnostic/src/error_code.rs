//! Stable error codes for checker diagnostics.

use std::fmt;

/// Error codes for all checker diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E2xxx: Declaration checking errors
/// - E9xxx: Internal faults (should never reach users)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Declaration checking (E2xxx)
    /// Identifier already declared in the same scope
    E2001,
    /// Invalid access modifier for a declaration or member
    E2002,
    /// Interface member declares an implementation (or nothing at all)
    E2003,
    /// Resource value nested inside a non-resource container type
    E2004,
    /// Composite kind does not admit interface declarations
    E2005,
    /// Field not definitely assigned by the initializer
    E2006,
    /// Destructor on a non-resource kind, or destructor with parameters
    E2007,
    /// Special function that is neither an initializer nor a destructor
    E2008,
    /// More than one initializer or destructor declared
    E2009,
    /// Type name cannot be resolved in the current scope
    E2010,
    /// Concrete declaration member is missing a body
    E2011,
    /// Resource-move annotation (`@`) mismatch with the annotated type
    E2012,
    /// Type nests itself, directly or through another declaration under check
    E2013,

    // Internal faults (E9xxx)
    /// Internal invariant violation
    E9001,
}

impl ErrorCode {
    /// The code as a string, e.g. `"E2001"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
