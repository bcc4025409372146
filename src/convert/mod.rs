//! Loose value coercion.
//!
//! # Responsibilities
//! - Convert a tagged dynamic `Value` into strings, bytes, integers and floats
//! - Offer a strict (`try_to_*`) and a lossy (`to_*`) form of every conversion
//!
//! # Design Decisions
//! - Lossy conversions return the zero value and report the failure through
//!   an explicit `Diagnostics` sink instead of printing
//! - Narrowing conversions are range checked; out of range is a failure

mod value;

pub use value::{CoerceError, Value};

/// Receives failures from lossy conversions.
pub trait Diagnostics {
    fn coercion_failed(&self, to: &'static str, error: &CoerceError);
}

/// Ignores failures.
impl Diagnostics for () {
    fn coercion_failed(&self, _to: &'static str, _error: &CoerceError) {}
}

/// Logs failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn coercion_failed(&self, to: &'static str, error: &CoerceError) {
        tracing::warn!(to, error = %error, "Value coercion failed");
    }
}
