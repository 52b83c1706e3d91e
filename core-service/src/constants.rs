//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment lookups live in `logic::config`, this file only holds values.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Flow IDPS";

/// Probability above which a flow is classified as an attack (strict `>`)
pub const DEFAULT_ATTACK_THRESHOLD: f64 = 0.5;

/// How many missing feature names a user-facing schema error lists
pub const MISSING_FEATURES_PREVIEW: usize = 3;

/// Number of equal-width bins in the probability distribution
pub const PROBABILITY_BINS: usize = 20;

/// Default number of detailed rows in the text report
pub const DEFAULT_DETAIL_ROWS: usize = 10;

// ============================================
// Environment variable names
// ============================================

pub const ENV_ATTACK_THRESHOLD: &str = "IDPS_ATTACK_THRESHOLD";
pub const ENV_RECORD_POLICY: &str = "IDPS_RECORD_POLICY";
pub const ENV_PARALLEL: &str = "IDPS_PARALLEL";
pub const ENV_MODEL_PATH: &str = "IDPS_MODEL_PATH";

/// Directory (under the platform data dir) searched for `model.onnx`
pub const DATA_DIR_NAME: &str = "flow-idps";

/// File name of the exported probability model
pub const MODEL_FILE_NAME: &str = "model.onnx";
