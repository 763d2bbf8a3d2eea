#![deny(missing_docs)]
#![doc = "Core traits and value types shared by the RCF closed-form renderer, the local verification engines and the orchestrator."]

use std::fmt::Debug;

pub mod closed_form;
pub mod complex;
mod config;
pub mod errors;
mod polynomial;
mod types;

pub use closed_form::ClosedForm;
pub use complex::Complex64;
pub use config::{RenderConfig, MAX_PRECISION};
pub use errors::{ErrorInfo, RcfError};
pub use polynomial::Polynomial;
pub use types::{order_out_of_range, GeneralTerm, LinearRecurrenceSpec, MAX_INDEX, MAX_ORDER};

/// Structured per-term access exposed by some closed-form handles.
///
/// Buffers are returned exactly as the solver produced them; callers are
/// responsible for validating their shape.
pub trait TermStructure {
    /// Number of terms in the closed form.
    fn term_count(&self) -> usize;

    /// Interleaved `[re0, im0, re1, im1, ...]` polynomial coefficients of a term,
    /// in ascending powers.
    fn term_poly(&self, index: usize) -> Vec<f64>;

    /// `[re, im]` geometric base of a term.
    fn term_base(&self, index: usize) -> Vec<f64>;
}

/// Opaque closed-form result owned by an external solver.
///
/// A handle is consumed by reference while it is alive and released exactly
/// once through [`ClosedFormHandle::release`]. Taking `self: Box<Self>` makes
/// use-after-release and double release unrepresentable for owners.
pub trait ClosedFormHandle: Debug {
    /// Structured per-term access, when the handle supports it.
    fn term_structure(&self) -> Option<&dyn TermStructure>;

    /// The handle's own generic string form, written with `variable` as the index.
    fn notation(&self, variable: &str) -> String;

    /// Evaluates the closed form at `n`, returned as `[re, im]`.
    fn term(&self, n: u64) -> [f64; 2];

    /// Releases every solver-side resource held by the handle.
    fn release(self: Box<Self>);
}
