//! Structured error types shared across RCF crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`RcfError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, lengths, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for closed-form rendering and verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum RcfError {
    /// Non-finite or out-of-range user input, rejected before any solver call.
    #[error("invalid input: {0}")]
    InvalidInput(ErrorInfo),
    /// The external solver was unreachable or reported a failure.
    #[error("solver error: {0}")]
    Solver(ErrorInfo),
    /// Malformed per-term data exposed by a closed-form handle.
    #[error("render error: {0}")]
    Render(ErrorInfo),
    /// Serialization, schema and configuration file errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl RcfError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            RcfError::InvalidInput(info)
            | RcfError::Solver(info)
            | RcfError::Render(info)
            | RcfError::Serde(info) => info,
        }
    }

    /// Shorthand for an [`RcfError::InvalidInput`] with the given code and message.
    pub fn invalid_input(code: &str, message: impl Into<String>) -> Self {
        RcfError::InvalidInput(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`RcfError::Render`] with the given code and message.
    pub fn render(code: &str, message: impl Into<String>) -> Self {
        RcfError::Render(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`RcfError::Solver`] with the given code and message.
    pub fn solver(code: &str, message: impl Into<String>) -> Self {
        RcfError::Solver(ErrorInfo::new(code, message))
    }
}
