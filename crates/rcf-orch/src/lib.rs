#![deny(missing_docs)]
#![doc = "Orchestrates solver-backed runs: input validation, rendering, local verification and last-request-wins commits."]

mod guard;
mod hash;
mod input;
mod orchestrator;
mod replay;
mod report;
mod serde;
mod solver;

pub use guard::HandleGuard;
pub use hash::stable_hash_string;
pub use input::{
    clamp_index, prepare, PreparedRun, RecurrenceInput, Scenario, ScenarioKind, SumInput,
    TermInput,
};
pub use orchestrator::{Orchestrator, RunError, RunErrorKind, RunOptions, RunOutcome, VerifyMode};
pub use replay::{ClosedFormDocument, ReplaySolver};
pub use report::{RunReport, Verification};
pub use serde::{from_json_slice, to_canonical_json_bytes};
pub use solver::{SolveFuture, SolverPort};
