//! Per-run control flow with last-request-wins commits.
//!
//! Runs share one orchestrator and one committed-result slot. Each run takes
//! a fresh identifier from a monotonic counter and clears the slot when it
//! starts; a completion is committed only if its identifier is still the
//! latest when it arrives, so a superseded run can finish without touching
//! what is displayed.

use std::cell::{Cell, RefCell};

use log::{debug, info, warn};
use rcf_core::complex;
use rcf_core::{ClosedForm, ErrorInfo, RcfError, RenderConfig, MAX_INDEX};
use rcf_render::{recurrence_label, render_closed_form, sum_label};
use rcf_verify::{direct_sum, forward_eval, forward_prefix_sum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guard::HandleGuard;
use crate::hash::stable_hash_string;
use crate::input::{prepare, PreparedRun, Scenario, ScenarioKind};
use crate::report::{RunReport, Verification};
use crate::solver::SolverPort;

/// Which local engines a run evaluates alongside the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerifyMode {
    /// Forward simulation only.
    Forward,
    /// Direct summation only (sum scenarios).
    Direct,
    /// Every applicable engine.
    #[default]
    Both,
}

impl VerifyMode {
    fn forward(self) -> bool {
        matches!(self, VerifyMode::Forward | VerifyMode::Both)
    }

    fn direct(self) -> bool {
        matches!(self, VerifyMode::Direct | VerifyMode::Both)
    }
}

/// Settings applied to a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Display settings for every rendered string.
    pub render: RenderConfig,
    /// Index at which the closed form is cross-checked.
    pub index: u64,
    /// Engines used for the cross-check.
    pub verify: VerifyMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            index: 10,
            verify: VerifyMode::Both,
        }
    }
}

/// Which stage of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunErrorKind {
    /// Input was rejected before the solver was called.
    InvalidInput,
    /// The solver could not produce a closed form.
    Solver,
    /// The closed form could not be rendered by any path.
    Render,
}

impl RunErrorKind {
    fn of(error: &RcfError) -> Self {
        match error {
            RcfError::InvalidInput(_) | RcfError::Serde(_) => RunErrorKind::InvalidInput,
            RcfError::Solver(_) => RunErrorKind::Solver,
            RcfError::Render(_) => RunErrorKind::Render,
        }
    }
}

/// Failed run, tagged with the stage that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("run {run_id} failed ({kind:?}): {error}")]
pub struct RunError {
    /// Identifier of the failed run.
    pub run_id: u64,
    /// Failing stage.
    pub kind: RunErrorKind,
    /// Underlying error.
    pub error: RcfError,
}

/// How a call to [`Orchestrator::run`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run finished and its report was committed.
    Completed(RunReport),
    /// The run failed and its error was committed.
    Failed(RunError),
    /// A newer run started first; nothing was committed.
    Superseded(u64),
}

/// Drives runs against a solver and keeps the latest committed result.
///
/// Single-threaded by construction: state lives in `Cell`/`RefCell`, and the
/// only suspension point of a run is the solver call.
pub struct Orchestrator<S> {
    solver: S,
    latest: Cell<u64>,
    committed: RefCell<Option<Result<RunReport, RunError>>>,
}

impl<S: SolverPort> Orchestrator<S> {
    /// Creates an orchestrator with an empty committed slot.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            latest: Cell::new(0),
            committed: RefCell::new(None),
        }
    }

    /// The wrapped solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Identifier of the most recently started run, zero before the first.
    pub fn latest_run(&self) -> u64 {
        self.latest.get()
    }

    /// Snapshot of the result currently on display, if any.
    ///
    /// The slot is copied out so no borrow outlives the call; holding a
    /// snapshot across [`Orchestrator::run`] is fine.
    pub fn committed(&self) -> Option<Result<RunReport, RunError>> {
        self.committed.borrow().clone()
    }

    /// Runs `scenario` end to end.
    ///
    /// Starting a run invalidates every run still in flight. The result is
    /// committed only if no newer run started before it completed.
    pub async fn run(&self, scenario: &Scenario, options: &RunOptions) -> RunOutcome {
        let run_id = self.begin();
        let result = self.execute(run_id, scenario, options).await;
        self.commit(run_id, result)
    }

    fn begin(&self) -> u64 {
        let run_id = self.latest.get() + 1;
        self.latest.set(run_id);
        self.committed.replace(None);
        debug!("run {run_id} started");
        run_id
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.latest.get() == run_id
    }

    fn commit(&self, run_id: u64, result: Result<RunReport, RunError>) -> RunOutcome {
        if !self.is_current(run_id) {
            warn!(
                "discarding result of run {run_id}; run {} is newer",
                self.latest.get()
            );
            return RunOutcome::Superseded(run_id);
        }
        self.committed.replace(Some(result.clone()));
        match result {
            Ok(report) => {
                info!("run {run_id} committed: {}", report.notation);
                RunOutcome::Completed(report)
            }
            Err(error) => {
                warn!("{error}");
                RunOutcome::Failed(error)
            }
        }
    }

    async fn execute(
        &self,
        run_id: u64,
        scenario: &Scenario,
        options: &RunOptions,
    ) -> Result<RunReport, RunError> {
        let fail = |error: RcfError| RunError {
            run_id,
            kind: RunErrorKind::of(&error),
            error,
        };
        options.render.validate().map_err(fail)?;
        check_index(options.index).map_err(fail)?;
        let prepared = prepare(scenario).map_err(fail)?;
        let spec_hash = stable_hash_string(&prepared.spec).map_err(fail)?;
        let label = match prepared.kind {
            ScenarioKind::Recurrence => recurrence_label(&prepared.spec, &options.render),
            ScenarioKind::Sum => sum_label(&prepared.spec.forcing_terms, &options.render),
        };

        if prepared.is_trivial() {
            debug!("run {run_id}: empty sum, skipping solver");
            let rendered =
                render_closed_form(&ClosedForm::zero(), &options.render).map_err(fail)?;
            let zero = Some(complex::ZERO);
            return Ok(RunReport {
                run_id,
                scenario: prepared.kind,
                spec_hash,
                label,
                notation: rendered.text,
                renderer: rendered.renderer,
                partial_sum_notation: None,
                verification: Verification {
                    index: options.index,
                    solver: complex::ZERO,
                    forward: zero.filter(|_| options.verify.forward()),
                    direct: zero.filter(|_| options.verify.direct()),
                    partial_sum_solver: None,
                    partial_sum_forward: None,
                },
            });
        }

        debug!("run {run_id}: solving recurrence {spec_hash}");
        let handle = self
            .solver
            .solve(prepared.spec.clone())
            .await
            .map_err(|err| RunError {
                run_id,
                kind: RunErrorKind::Solver,
                error: err,
            })?;
        let primary = HandleGuard::new("closed-form", handle);
        if !self.is_current(run_id) {
            debug!("run {run_id}: superseded while solving, result will be discarded");
        }

        let partial = match prepared.kind {
            ScenarioKind::Recurrence => self
                .solver
                .partial_sum(&*primary)
                .transpose()
                .map_err(|err| RunError {
                    run_id,
                    kind: RunErrorKind::Solver,
                    error: err,
                })?
                .map(|handle| HandleGuard::new("partial-sum", handle)),
            ScenarioKind::Sum => None,
        };

        let rendered = render_closed_form(&*primary, &options.render).map_err(fail)?;
        let partial_sum_notation = partial
            .as_ref()
            .map(|guard| render_closed_form(&**guard, &options.render).map(|r| r.text))
            .transpose()
            .map_err(fail)?;

        let verification =
            verify(&prepared, &primary, partial.as_ref(), options).map_err(fail)?;
        if let Some(guard) = partial {
            guard.release();
        }
        primary.release();

        Ok(RunReport {
            run_id,
            scenario: prepared.kind,
            spec_hash,
            label,
            notation: rendered.text,
            renderer: rendered.renderer,
            partial_sum_notation,
            verification,
        })
    }
}

fn check_index(index: u64) -> Result<(), RcfError> {
    if index > MAX_INDEX {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new(
                "index-out-of-range",
                "verification index exceeds the supported maximum",
            )
            .with_context("index", index.to_string())
            .with_context("max", MAX_INDEX.to_string()),
        ));
    }
    Ok(())
}

fn verify(
    prepared: &PreparedRun,
    primary: &HandleGuard,
    partial: Option<&HandleGuard>,
    options: &RunOptions,
) -> Result<Verification, RcfError> {
    let n = options.index;
    let spec = &prepared.spec;
    let forward = if options.verify.forward() {
        Some(forward_eval(spec, n, None)?)
    } else {
        None
    };
    let direct = if prepared.kind == ScenarioKind::Sum && options.verify.direct() {
        Some(direct_sum(&spec.forcing_terms, n)?)
    } else {
        None
    };
    let (partial_sum_solver, partial_sum_forward) = match partial {
        Some(guard) => (
            Some(complex::from_pair(guard.term(n))),
            Some(forward_prefix_sum(spec, n)?),
        ),
        None => (None, None),
    };
    Ok(Verification {
        index: n,
        solver: complex::from_pair(primary.term(n)),
        forward,
        direct,
        partial_sum_solver,
        partial_sum_forward,
    })
}
