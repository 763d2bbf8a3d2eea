//! Solver port backed by closed forms that were solved ahead of time.

use log::debug;
use rcf_core::{ClosedForm, ClosedFormHandle, ErrorInfo, LinearRecurrenceSpec, RcfError};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::serde::from_json_slice;
use crate::solver::{SolveFuture, SolverPort};

/// Saved solver output for one recurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedFormDocument {
    /// Recurrence the closed form solves.
    pub spec: LinearRecurrenceSpec,
    /// Closed form of `a(n)`.
    pub closed_form: ClosedForm,
    /// Closed form of `S(n) = Σ_{k=1..n} a(k)`, when it was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_sum: Option<ClosedForm>,
}

impl ClosedFormDocument {
    /// Parses a document from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, RcfError> {
        let document: Self = from_json_slice(data)?;
        document.spec.validate()?;
        Ok(document)
    }
}

/// Replays a [`ClosedFormDocument`] through the [`SolverPort`] interface.
#[derive(Debug, Clone)]
pub struct ReplaySolver {
    document: ClosedFormDocument,
    spec_hash: String,
}

impl ReplaySolver {
    /// Creates a replay solver for `document`.
    pub fn new(document: ClosedFormDocument) -> Result<Self, RcfError> {
        let spec_hash = stable_hash_string(&document.spec)?;
        Ok(Self {
            document,
            spec_hash,
        })
    }

    fn lookup(&self, spec: &LinearRecurrenceSpec) -> Result<Box<dyn ClosedFormHandle>, RcfError> {
        let requested = stable_hash_string(spec)?;
        if requested != self.spec_hash {
            return Err(RcfError::Solver(
                ErrorInfo::new(
                    "solver-spec-mismatch",
                    "saved closed form was produced for a different recurrence",
                )
                .with_context("requested", requested)
                .with_context("available", self.spec_hash.clone())
                .with_hint("solve the recurrence again and save the new output"),
            ));
        }
        debug!("replaying saved closed form {}", self.spec_hash);
        Ok(Box::new(self.document.closed_form.clone()))
    }
}

impl SolverPort for ReplaySolver {
    fn solve(&self, spec: LinearRecurrenceSpec) -> SolveFuture<'_> {
        Box::pin(async move { self.lookup(&spec) })
    }

    fn partial_sum(
        &self,
        _handle: &dyn ClosedFormHandle,
    ) -> Option<Result<Box<dyn ClosedFormHandle>, RcfError>> {
        self.document
            .partial_sum
            .clone()
            .map(|sum| Ok(Box::new(sum) as Box<dyn ClosedFormHandle>))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use rcf_core::complex;
    use rcf_core::GeneralTerm;

    use super::*;

    fn document() -> ClosedFormDocument {
        ClosedFormDocument {
            spec: LinearRecurrenceSpec::new(
                vec![complex::Complex64::new(2.0, 0.0)],
                Vec::new(),
                vec![complex::ONE],
            )
            .unwrap(),
            closed_form: ClosedForm::new(vec![GeneralTerm::real(&[1.0], 2.0).unwrap()]),
            partial_sum: None,
        }
    }

    #[test]
    fn replays_matching_spec() {
        let doc = document();
        let solver = ReplaySolver::new(doc.clone()).unwrap();
        let handle = block_on(solver.solve(doc.spec.clone())).unwrap();
        assert_eq!(handle.term(5), [32.0, 0.0]);
        assert!(solver.partial_sum(handle.as_ref()).is_none());
        handle.release();
    }

    #[test]
    fn rejects_other_spec() {
        let solver = ReplaySolver::new(document()).unwrap();
        let other = LinearRecurrenceSpec::partial_sum(Vec::new());
        let err = block_on(solver.solve(other)).unwrap_err();
        assert!(matches!(err, RcfError::Solver(_)));
        assert_eq!(err.info().code, "solver-spec-mismatch");
    }

    #[test]
    fn document_json_roundtrip() {
        let doc = document();
        let bytes = serde_json::to_vec(&doc).unwrap();
        assert_eq!(ClosedFormDocument::from_json_slice(&bytes).unwrap(), doc);
    }
}
