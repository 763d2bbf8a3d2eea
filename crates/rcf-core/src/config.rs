use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, RcfError};

/// Largest supported display precision (reliable decimal digits of an f64).
pub const MAX_PRECISION: u32 = 15;

/// Display settings shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Number of decimal digits kept when displaying numbers.
    #[serde(default = "RenderConfig::default_precision")]
    pub precision: u32,
    /// Symbol used for the sequence index.
    #[serde(default = "RenderConfig::default_variable")]
    pub variable: String,
}

impl RenderConfig {
    const fn default_precision() -> u32 {
        4
    }

    fn default_variable() -> String {
        "n".to_string()
    }

    /// Creates a configuration with the given precision and the default variable.
    pub fn new(precision: u32) -> Result<Self, RcfError> {
        let config = Self {
            precision,
            variable: Self::default_variable(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the display variable.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Threshold `5 · 10^(-precision)` below which magnitudes collapse to zero.
    pub fn tolerance(&self) -> f64 {
        5.0 * 10f64.powi(-(self.precision as i32))
    }

    /// Checks the precision range and that the variable is a non-empty identifier.
    pub fn validate(&self) -> Result<(), RcfError> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(RcfError::InvalidInput(
                ErrorInfo::new("precision-out-of-range", "precision must lie in 1..=15")
                    .with_context("precision", self.precision.to_string()),
            ));
        }
        let valid_variable = !self.variable.is_empty()
            && self
                .variable
                .chars()
                .all(|ch| ch.is_ascii_alphabetic() || ch == '_')
            && self.variable != "i";
        if !valid_variable {
            return Err(RcfError::InvalidInput(
                ErrorInfo::new(
                    "invalid-variable",
                    "display variable must be alphabetic and distinct from `i`",
                )
                .with_context("variable", self.variable.clone()),
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            variable: Self::default_variable(),
        }
    }
}
