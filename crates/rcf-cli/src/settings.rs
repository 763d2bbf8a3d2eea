use std::error::Error;
use std::fs;
use std::path::Path;

use rcf_core::{RcfError, RenderConfig};
use rcf_orch::{RunOptions, VerifyMode};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of an orchestrated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Decimal digits kept in displayed numbers.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Index variable used in rendered notation.
    #[serde(default = "default_variable")]
    pub variable: String,
    /// Index at which the closed form is cross-checked.
    #[serde(default = "default_verify_index")]
    pub verify_index: u64,
    /// Local engines used for the cross-check.
    #[serde(default)]
    pub verify: VerifyMode,
}

fn default_precision() -> u32 {
    4
}

fn default_variable() -> String {
    "n".to_string()
}

fn default_verify_index() -> u64 {
    10
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            variable: default_variable(),
            verify_index: default_verify_index(),
            verify: VerifyMode::default(),
        }
    }
}

impl RunSettings {
    /// Reads settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let settings: RunSettings = serde_yaml::from_str(&contents)?;
        Ok(settings)
    }

    /// Validated options for one run.
    pub fn to_options(&self) -> Result<RunOptions, RcfError> {
        let render = RenderConfig::new(self.precision)?.with_variable(self.variable.clone());
        render.validate()?;
        Ok(RunOptions {
            render,
            index: self.verify_index,
            verify: self.verify,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: RunSettings = serde_yaml::from_str("precision: 6\n").unwrap();
        assert_eq!(settings.precision, 6);
        assert_eq!(settings.variable, "n");
        assert_eq!(settings.verify_index, 10);
        assert_eq!(settings.verify, VerifyMode::Both);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variable: k\nverify_index: 25\nverify: direct").unwrap();
        let settings = RunSettings::load(file.path()).unwrap();
        let options = settings.to_options().unwrap();
        assert_eq!(options.render.variable, "k");
        assert_eq!(options.index, 25);
        assert_eq!(options.verify, VerifyMode::Direct);
    }

    #[test]
    fn invalid_precision_is_rejected() {
        let settings = RunSettings {
            precision: 40,
            ..RunSettings::default()
        };
        assert_eq!(
            settings.to_options().unwrap_err().info().code,
            "precision-out-of-range"
        );
    }
}
