//! Pipeline configuration
//!
//! Loaded from the environment (with `.env` support), overridable from the CLI.
//! Invalid values fail fast at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_ATTACK_THRESHOLD, ENV_ATTACK_THRESHOLD, ENV_MODEL_PATH, ENV_PARALLEL,
    ENV_RECORD_POLICY, MODEL_FILE_NAME,
};
use crate::error::{IdpsError, IdpsResult};

/// How per-record failures (non-numeric values, scorer errors) are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordPolicy {
    /// First failing record rejects the whole batch
    #[default]
    FailFast,
    /// Failing records are dropped, listed in the report, and the batch continues
    Skip,
}

impl RecordPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordPolicy::FailFast => "fail-fast",
            RecordPolicy::Skip => "skip",
        }
    }
}

impl FromStr for RecordPolicy {
    type Err = IdpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" | "abort" => Ok(RecordPolicy::FailFast),
            "skip" => Ok(RecordPolicy::Skip),
            other => Err(IdpsError::Config(format!(
                "unknown record policy '{}' (expected fail-fast or skip)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RecordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Probability strictly above this is an attack
    pub attack_threshold: f64,

    /// Per-record failure handling
    pub record_policy: RecordPolicy,

    /// Score and classify records on the rayon pool
    pub parallel: bool,

    /// Exported ONNX model; `None` means look in the data dir
    pub model_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            attack_threshold: DEFAULT_ATTACK_THRESHOLD,
            record_policy: RecordPolicy::FailFast,
            parallel: false,
            model_path: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Values are parsed but not range-checked here, so CLI overrides can be
    /// applied first. `Pipeline::new` validates the final configuration.
    pub fn from_env() -> IdpsResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> IdpsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let attack_threshold = match lookup(ENV_ATTACK_THRESHOLD) {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                IdpsError::Config(format!("{} is not a number: '{}'", ENV_ATTACK_THRESHOLD, raw))
            })?,
            None => defaults.attack_threshold,
        };

        let record_policy = match lookup(ENV_RECORD_POLICY) {
            Some(raw) => raw.parse()?,
            None => defaults.record_policy,
        };

        let parallel = match lookup(ENV_PARALLEL) {
            Some(raw) => parse_flag(ENV_PARALLEL, &raw)?,
            None => defaults.parallel,
        };

        let model_path = lookup(ENV_MODEL_PATH)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            attack_threshold,
            record_policy,
            parallel,
            model_path,
        })
    }

    pub fn validate(&self) -> IdpsResult<()> {
        if !(0.0..=1.0).contains(&self.attack_threshold) {
            return Err(IdpsError::Config(format!(
                "attack threshold must be within [0, 1], got {}",
                self.attack_threshold
            )));
        }
        Ok(())
    }

    /// Model path to load: the configured one, else the data-dir default if present
    pub fn resolve_model_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.model_path {
            return Some(path.clone());
        }
        let default = default_model_path();
        default.exists().then_some(default)
    }
}

fn parse_flag(key: &str, raw: &str) -> IdpsResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(IdpsError::Config(format!("{} is not a boolean: '{}'", key, other))),
    }
}

/// `<data dir>/flow-idps/model.onnx`
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
        .join(MODEL_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.attack_threshold, 0.5);
        assert_eq!(config.record_policy, RecordPolicy::FailFast);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_is_config_error() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = PipelineConfig {
                attack_threshold: bad,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), "config_error");
        }
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        for ok in [0.0, 1.0] {
            let config = PipelineConfig {
                attack_threshold: ok,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_record_policy_parse() {
        assert_eq!("skip".parse::<RecordPolicy>().unwrap(), RecordPolicy::Skip);
        assert_eq!(" Fail-Fast ".parse::<RecordPolicy>().unwrap(), RecordPolicy::FailFast);
        assert!("later".parse::<RecordPolicy>().is_err());
    }

    #[test]
    fn test_explicit_model_path_wins() {
        let config = PipelineConfig {
            model_path: Some(PathBuf::from("/tmp/custom.onnx")),
            ..Default::default()
        };
        assert_eq!(config.resolve_model_path(), Some(PathBuf::from("/tmp/custom.onnx")));
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_lookup_defaults_when_unset() {
        let config = PipelineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.attack_threshold, DEFAULT_ATTACK_THRESHOLD);
        assert_eq!(config.record_policy, RecordPolicy::FailFast);
        assert!(!config.parallel);
        assert!(config.model_path.is_none());
    }

    #[test]
    fn test_lookup_reads_all_values() {
        let config = PipelineConfig::from_lookup(lookup_from(&[
            (ENV_ATTACK_THRESHOLD, " 0.7 "),
            (ENV_RECORD_POLICY, "skip"),
            (ENV_PARALLEL, "TRUE"),
            (ENV_MODEL_PATH, "/opt/models/flow.onnx"),
        ]))
        .unwrap();

        assert_eq!(config.attack_threshold, 0.7);
        assert_eq!(config.record_policy, RecordPolicy::Skip);
        assert!(config.parallel);
        assert_eq!(config.model_path, Some(PathBuf::from("/opt/models/flow.onnx")));
    }

    #[test]
    fn test_non_numeric_threshold_is_config_error() {
        let err = PipelineConfig::from_lookup(lookup_from(&[(ENV_ATTACK_THRESHOLD, "high")]))
            .unwrap_err();
        assert_eq!(err.kind(), "config_error");
        assert!(err.summary().contains(ENV_ATTACK_THRESHOLD));
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = PipelineConfig::from_lookup(lookup_from(&[(ENV_RECORD_POLICY, "retry")]))
            .unwrap_err();
        assert_eq!(err.kind(), "config_error");
    }

    #[test]
    fn test_out_of_range_threshold_fails_validation_not_parsing() {
        let config = PipelineConfig::from_lookup(lookup_from(&[(ENV_ATTACK_THRESHOLD, "1.5")]))
            .unwrap();
        assert_eq!(config.validate().unwrap_err().kind(), "config_error");
    }

    #[test]
    fn test_override_repairs_out_of_range_env_threshold() {
        let mut config = PipelineConfig::from_lookup(lookup_from(&[(ENV_ATTACK_THRESHOLD, "7")]))
            .unwrap();
        config.attack_threshold = 0.7;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parallel_flag_parsing() {
        for (raw, expected) in [("1", true), ("on", true), ("0", false), ("no", false)] {
            let config = PipelineConfig::from_lookup(lookup_from(&[(ENV_PARALLEL, raw)])).unwrap();
            assert_eq!(config.parallel, expected, "value {}", raw);
        }

        let err = PipelineConfig::from_lookup(lookup_from(&[(ENV_PARALLEL, "maybe")])).unwrap_err();
        assert_eq!(err.kind(), "config_error");
    }
}
