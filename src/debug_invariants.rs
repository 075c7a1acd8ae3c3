//! Invariant validation hooks shared across the crate.
//!
//! Structures with non-trivial internal invariants (the polygon arena, most
//! notably) implement [`DebugInvariants`]. Checks run after mutations in debug
//! builds and whenever the `check-invariants` feature is enabled; release
//! builds without the feature pay nothing.

use crate::drift_error::DriftError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), DriftError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! drift_debug_assert_ok {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
