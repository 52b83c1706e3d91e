//! Flow IDPS Core
//!
//! Batch intrusion detection over network-flow statistics: validate the
//! feature schema, score each flow, label attacks by rule, summarize.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{IdpsError, IdpsResult};
pub use logic::config::{PipelineConfig, RecordPolicy};
pub use logic::features::{FlowRecord, LayoutInfo};
pub use logic::model::{HeuristicScorer, OnnxScorer, ProbabilityScorer};
pub use logic::pipeline::Pipeline;
pub use logic::report::BatchReport;
pub use logic::threat::{AttackLabel, Classification, ClassificationResult};
