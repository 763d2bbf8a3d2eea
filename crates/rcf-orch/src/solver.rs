use std::future::Future;
use std::pin::Pin;

use rcf_core::{ClosedFormHandle, LinearRecurrenceSpec, RcfError};

/// Future returned by [`SolverPort::solve`].
pub type SolveFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Box<dyn ClosedFormHandle>, RcfError>> + 'a>>;

/// External recurrence solver consumed by the orchestrator.
///
/// Handles returned by the port are owned by the caller, which must release
/// each of them exactly once.
pub trait SolverPort {
    /// Solves `spec` into a closed-form handle.
    fn solve(&self, spec: LinearRecurrenceSpec) -> SolveFuture<'_>;

    /// Partial sum `S(n) = Σ_{k=1..n} a(k)` of a solved closed form.
    ///
    /// Solvers without this capability return `None`.
    fn partial_sum(
        &self,
        _handle: &dyn ClosedFormHandle,
    ) -> Option<Result<Box<dyn ClosedFormHandle>, RcfError>> {
        None
    }
}
