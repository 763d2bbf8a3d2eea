//! Fallback rendering over a handle's generic string form.
//!
//! The rewrite runs in two stages. Token passes (regex substitutions) round
//! numbers, brace exponents and make every multiplication explicit. A
//! structural pass then walks top-level summands and `\cdot` factors to drop
//! zero summands, strip unit multipliers and decide which parentheses to keep.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rcf_core::{ClosedFormHandle, RcfError, RenderConfig};

use crate::number::{collapse_signs, enclose_if_needed, format_number, snap_component};
use crate::{ClosedFormRenderer, RendererKind};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?(?:[eE][+-]?\d+)?").expect("valid number regex"));
static BARE_EXPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^([0-9]+|[A-Za-z_]+)").expect("valid exponent regex"));
static DIGIT_FACTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)([A-Za-z_(])").expect("valid digit factor regex"));
static GROUP_FACTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)([A-Za-z_(])").expect("valid group factor regex"));
static SPACED_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9A-Za-z_})]) \(").expect("valid spaced group regex"));
static TIGHT_SIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)([+-])").expect("valid sign regex"));

const CDOT: &str = " \\cdot ";

/// Renders from [`ClosedFormHandle::notation`] by text substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl ClosedFormRenderer for TextRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Text
    }

    fn render(
        &self,
        handle: &dyn ClosedFormHandle,
        config: &RenderConfig,
    ) -> Result<String, RcfError> {
        config.validate()?;
        Ok(rewrite_notation(&handle.notation(&config.variable), config))
    }
}

/// Rewrites a solver's plain notation into canonical notation.
pub fn rewrite_notation(notation: &str, config: &RenderConfig) -> String {
    let tokens = apply_token_passes(notation.trim(), config);
    if tokens.is_empty() {
        return "0".to_string();
    }
    rewrite_sum(&tokens)
}

fn apply_token_passes(text: &str, config: &RenderConfig) -> String {
    let tol = config.tolerance();
    let rounded = NUMBER.replace_all(text, |caps: &Captures| {
        let token = &caps[0];
        match token.parse::<f64>() {
            Ok(value) => format_number(snap_component(value, tol), config.precision),
            Err(_) => token.to_string(),
        }
    });
    let braced = BARE_EXPONENT.replace_all(&rounded, "^{${1}}");
    let digits = DIGIT_FACTOR.replace_all(&braced, "${1} \\cdot ${2}");
    let groups = GROUP_FACTOR.replace_all(&digits, ") \\cdot ${1}");
    let spaced = SPACED_GROUP.replace_all(&groups, "${1} \\cdot (");
    TIGHT_SIGN.replace_all(&spaced, "${1} ${2} ").into_owned()
}

/// Splits at top-level ` + ` / ` - ` boundaries into `(negative, body)` pairs.
fn split_summands(text: &str) -> Vec<(bool, String)> {
    let mut summands = Vec::new();
    let mut depth = 0usize;
    let mut negative = false;
    let mut current = String::new();
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => {
                let rest = &text[idx..];
                let sign = if rest.starts_with(" + ") {
                    Some(false)
                } else if rest.starts_with(" - ") {
                    Some(true)
                } else {
                    None
                };
                if let Some(next_negative) = sign {
                    summands.push((negative, std::mem::take(&mut current)));
                    negative = next_negative;
                    chars.next();
                    chars.next();
                    continue;
                }
            }
            _ => {}
        }
        current.push(ch);
    }
    summands.push((negative, current));
    summands
}

fn split_factors(text: &str) -> Vec<&str> {
    let mut factors = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let bytes = text.as_bytes();
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && text[idx..].starts_with(CDOT) => {
                factors.push(&text[start..idx]);
                idx += CDOT.len();
                start = idx;
                continue;
            }
            _ => {}
        }
        idx += 1;
    }
    factors.push(&text[start..]);
    factors
}

fn rewrite_sum(text: &str) -> String {
    let mut parts = Vec::new();
    for (negative, body) in split_summands(text) {
        let body = body.trim();
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (!negative, rest.trim_start()),
            None => (negative, body),
        };
        if let Some(rewritten) = rewrite_summand(body) {
            if negative {
                parts.push(format!("-{rewritten}"));
            } else {
                parts.push(rewritten);
            }
        }
    }
    if parts.is_empty() {
        return "0".to_string();
    }
    collapse_signs(&parts.join(" + ").replace("--", ""))
}

fn rewrite_summand(body: &str) -> Option<String> {
    let mut kept = Vec::new();
    let mut negate = false;
    for factor in split_factors(body) {
        let factor = rewrite_factor(factor.trim())?;
        match factor.as_str() {
            "1" => {}
            "-1" => negate = !negate,
            _ => kept.push(factor),
        }
    }
    let text = match kept.as_slice() {
        [] => "1".to_string(),
        [only] if !negate => unwrap_group(only).to_string(),
        _ => kept.join(CDOT),
    };
    Some(if negate { format!("-{text}") } else { text })
}

/// Rewrites one factor; `None` marks a factor that zeroes the whole summand.
fn rewrite_factor(factor: &str) -> Option<String> {
    if factor == "0" {
        return None;
    }
    let Some(close) = matching_paren(factor) else {
        return Some(factor.to_string());
    };
    let inner = rewrite_sum(&factor[1..close]);
    let suffix = &factor[close + 1..];
    if suffix.is_empty() {
        if inner == "0" {
            return None;
        }
        if split_summands(&inner).len() > 1 {
            return Some(format!("\\left({inner}\\right)"));
        }
        return Some(inner);
    }
    if inner == "1" {
        return Some("1".to_string());
    }
    Some(format!("{}{suffix}", enclose_if_needed(&inner)))
}

/// A group standing alone as a summand needs no parentheses.
fn unwrap_group(text: &str) -> &str {
    text.strip_prefix("\\left(")
        .and_then(|rest| rest.strip_suffix("\\right)"))
        .unwrap_or(text)
}

fn matching_paren(factor: &str) -> Option<usize> {
    if !factor.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (idx, ch) in factor.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
