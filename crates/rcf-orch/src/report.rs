use rcf_core::Complex64;
use rcf_render::RendererKind;
use serde::{Deserialize, Serialize};

use crate::input::ScenarioKind;

/// Independent evaluations of one run at the verification index.
///
/// Agreement is never asserted here; callers decide what deviation matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Index `n` every value refers to.
    pub index: u64,
    /// The solver handle's own `term(n)`.
    pub solver: Complex64,
    /// Forward simulation of the recurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Complex64>,
    /// Direct summation, for sum scenarios.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct: Option<Complex64>,
    /// The partial-sum handle's `term(n)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_sum_solver: Option<Complex64>,
    /// Prefix sum of the forward simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_sum_forward: Option<Complex64>,
}

impl Verification {
    /// Largest distance between any two values describing the same quantity.
    pub fn max_deviation(&self) -> f64 {
        let primary: Vec<Complex64> = std::iter::once(self.solver)
            .chain(self.forward)
            .chain(self.direct)
            .collect();
        let partial: Vec<Complex64> = self
            .partial_sum_solver
            .into_iter()
            .chain(self.partial_sum_forward)
            .collect();
        rcf_verify::max_deviation(&primary).max(rcf_verify::max_deviation(&partial))
    }
}

/// Everything a completed run displays, plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Monotonic identifier of the run within its orchestrator.
    pub run_id: u64,
    /// Scenario that was solved.
    pub scenario: ScenarioKind,
    /// SHA-256 of the canonical JSON of the solved recurrence.
    pub spec_hash: String,
    /// Label for the user's input, e.g. `a(n) = a(n - 1) + a(n - 2) =`.
    pub label: String,
    /// Canonical notation of the closed form.
    pub notation: String,
    /// Renderer that produced `notation`.
    pub renderer: RendererKind,
    /// Canonical notation of the partial sum, when the solver provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_sum_notation: Option<String>,
    /// Numeric cross-checks.
    pub verification: Verification,
}
