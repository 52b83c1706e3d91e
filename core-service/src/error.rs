//! Error handling
//!
//! Every failure the pipeline can report, each with a machine-readable kind
//! and a human-readable summary. Batches are deterministic so nothing here is
//! retried: the caller has to resupply corrected data.

use thiserror::Error;

use crate::constants::MISSING_FEATURES_PREVIEW;

pub type IdpsResult<T> = Result<T, IdpsError>;

#[derive(Debug, Error)]
pub enum IdpsError {
    /// Required feature columns absent from the batch
    #[error("{}", missing_features_message(.missing))]
    MissingFeatures { missing: Vec<String> },

    /// Unreadable or malformed input
    #[error("Malformed batch: {0}")]
    Parse(String),

    /// Non-numeric value in a required column
    #[error("Record {row}: column '{column}' is not numeric (got '{value}')")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Scorer unavailable or returned an out-of-range probability
    #[error("Scoring failed for record {id}: {reason}")]
    Scoring { id: usize, reason: String },

    /// Invalid configuration, detected at startup
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IdpsError {
    /// Stable identifier for logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            IdpsError::MissingFeatures { .. } => "schema_error",
            IdpsError::Parse(_) => "parse_error",
            IdpsError::InvalidValue { .. } => "type_error",
            IdpsError::Scoring { .. } => "scoring_error",
            IdpsError::Config(_) => "config_error",
            IdpsError::Io(_) => "io_error",
        }
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Full list of missing columns (the message only shows a preview)
    pub fn missing_features(&self) -> Option<&[String]> {
        match self {
            IdpsError::MissingFeatures { missing } => Some(missing),
            _ => None,
        }
    }
}

impl From<csv::Error> for IdpsError {
    fn from(err: csv::Error) -> Self {
        IdpsError::Parse(err.to_string())
    }
}

fn missing_features_message(missing: &[String]) -> String {
    let preview = missing
        .iter()
        .take(MISSING_FEATURES_PREVIEW)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if missing.len() > MISSING_FEATURES_PREVIEW {
        format!("Missing {} required features: {}...", missing.len(), preview)
    } else {
        format!("Missing {} required features: {}", missing.len(), preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_features_message_truncates() {
        let missing: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let err = IdpsError::MissingFeatures { missing };

        assert_eq!(err.to_string(), "Missing 5 required features: a, b, c...");
        assert_eq!(err.missing_features().map(|m| m.len()), Some(5));
        assert_eq!(err.kind(), "schema_error");
    }

    #[test]
    fn test_missing_features_message_short_list() {
        let err = IdpsError::MissingFeatures {
            missing: vec!["destination_port".to_string()],
        };
        assert_eq!(err.summary(), "Missing 1 required features: destination_port");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(IdpsError::Parse("x".into()).kind(), "parse_error");
        assert_eq!(IdpsError::Config("x".into()).kind(), "config_error");
        assert_eq!(
            IdpsError::Scoring { id: 1, reason: "x".into() }.kind(),
            "scoring_error"
        );
        assert!(IdpsError::Config("x".into()).missing_features().is_none());
    }
}
