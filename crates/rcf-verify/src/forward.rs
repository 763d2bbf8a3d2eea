use log::trace;
use rcf_core::complex::{self, Complex64};
use rcf_core::{ErrorInfo, LinearRecurrenceSpec, RcfError, MAX_INDEX};

/// Simulates the recurrence and returns `a[n]`.
///
/// Simulation starts from `precomputed` when given, otherwise from the
/// initial values, and extends index by index. A lag that reaches before
/// index 0 contributes zero.
pub fn forward_eval(
    spec: &LinearRecurrenceSpec,
    n: u64,
    precomputed: Option<&[Complex64]>,
) -> Result<Complex64, RcfError> {
    let index = checked_index(n)?;
    if let Some(values) = precomputed {
        if let Some(&value) = values.get(index) {
            return Ok(value);
        }
    }
    let values = extend(spec, n, precomputed)?;
    Ok(values[index])
}

/// Returns `a[0..=n]`.
pub fn forward_sequence(spec: &LinearRecurrenceSpec, n: u64) -> Result<Vec<Complex64>, RcfError> {
    let index = checked_index(n)?;
    let mut values = extend(spec, n, None)?;
    values.truncate(index + 1);
    Ok(values)
}

/// Prefix sum `Σ_{i=1..n} a[i]` of the simulated sequence.
pub fn forward_prefix_sum(spec: &LinearRecurrenceSpec, n: u64) -> Result<Complex64, RcfError> {
    let values = forward_sequence(spec, n)?;
    Ok(values.iter().skip(1).sum())
}

fn checked_index(n: u64) -> Result<usize, RcfError> {
    if n > MAX_INDEX {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new(
                "index-out-of-range",
                "verification index exceeds the supported maximum",
            )
            .with_context("index", n.to_string())
            .with_context("max", MAX_INDEX.to_string()),
        ));
    }
    usize::try_from(n).map_err(|_| {
        RcfError::InvalidInput(
            ErrorInfo::new("index-out-of-range", "verification index does not fit in memory")
                .with_context("index", n.to_string()),
        )
    })
}

fn extend(
    spec: &LinearRecurrenceSpec,
    n: u64,
    precomputed: Option<&[Complex64]>,
) -> Result<Vec<Complex64>, RcfError> {
    spec.validate()?;
    let seed = precomputed.unwrap_or(&spec.initial_values);
    if let Some(position) = seed.iter().position(|&value| !complex::is_finite(value)) {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new(
                "non-finite-input",
                "precomputed values hold NaN or infinite entries",
            )
            .with_context("field", "precomputed")
            .with_context("position", position.to_string()),
        ));
    }
    let target = checked_index(n)?;
    let mut values = Vec::with_capacity(target.max(seed.len()) + 1);
    values.extend_from_slice(seed);
    for i in values.len()..=target {
        let homogeneous: Complex64 = spec
            .homogeneous_coeffs
            .iter()
            .enumerate()
            .filter_map(|(offset, &coeff)| {
                i.checked_sub(offset + 1).map(|lag| coeff * values[lag])
            })
            .sum();
        let value = homogeneous + spec.forcing_at(i as u64);
        trace!("forward a[{i}] = {value}");
        values.push(value);
    }
    Ok(values)
}
