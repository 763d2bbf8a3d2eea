use rcf_core::{Complex64, RenderConfig};

/// Formats a real number rounded to `precision` decimals without trailing zeros.
///
/// Rounding is half away from zero; negative zero prints as `0`.
pub fn format_number(value: f64, precision: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scale = 10f64.powi(precision as i32);
    let scaled = (value * scale).round() / scale;
    let rounded = if scaled.is_finite() { scaled } else { value };
    let mut text = format!("{:.*}", precision as usize, rounded);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Formats a complex number in canonical notation.
///
/// Components whose magnitude is below `tol` count as zero; an imaginary
/// magnitude within `tol` of one prints as a bare `i`.
pub fn format_complex(value: Complex64, tol: f64, precision: u32) -> String {
    let re = if value.re.abs() < tol { 0.0 } else { value.re };
    let im = if value.im.abs() < tol { 0.0 } else { value.im };
    if im == 0.0 {
        return format_number(re, precision);
    }
    let magnitude = im.abs();
    let imaginary = if (magnitude - 1.0).abs() < tol {
        "i".to_string()
    } else {
        format!("{} \\cdot i", format_number(magnitude, precision))
    };
    if re == 0.0 {
        return if im < 0.0 {
            format!("-{imaginary}")
        } else {
            imaginary
        };
    }
    let sign = if im < 0.0 { '-' } else { '+' };
    format!("{} {sign} {imaginary}", format_number(re, precision))
}

/// Formats a verification value with the display precision of `config`.
pub fn format_value(value: Complex64, config: &RenderConfig) -> String {
    format_complex(value, config.tolerance(), config.precision)
}

/// Collapses a magnitude within `tol` of zero or one onto that value.
///
/// Both renderers snap every displayed number through here, component by
/// component, before deciding which factors and parentheses to keep.
pub(crate) fn snap_component(value: f64, tol: f64) -> f64 {
    if value.abs() < tol {
        0.0
    } else if (value.abs() - 1.0).abs() < tol {
        value.signum()
    } else {
        value
    }
}

/// [`snap_component`] applied to both parts.
pub(crate) fn snap(value: Complex64, tol: f64) -> Complex64 {
    Complex64::new(snap_component(value.re, tol), snap_component(value.im, tol))
}

/// Returns whether both components survive tolerance collapsing.
pub(crate) fn has_both_parts(value: Complex64, tol: f64) -> bool {
    value.re.abs() >= tol && value.im.abs() >= tol
}

/// Wraps `text` in `\left( … \right)` when it contains a space or a sign.
pub fn enclose_if_needed(text: &str) -> String {
    if text.contains([' ', '+', '-']) {
        format!("\\left({text}\\right)")
    } else {
        text.to_string()
    }
}

/// Collapses `+ -` into `- ` after joining signed pieces with `" + "`.
pub(crate) fn collapse_signs(text: &str) -> String {
    text.replace("+ -", "- ")
}
