//! Report Module - Aggregation and Presentation
//!
//! ## Structure
//! - `summary`: Batch statistics (counts, rate, histogram, threat level)
//! - `mitigation`: Advice per attack type
//! - `batch`: The report envelope returned for one batch
//! - `render`: Text and JSON output

pub mod summary;
pub mod mitigation;
pub mod batch;
pub mod render;

pub use summary::{summarize, AttackTypeCount, BatchSummary, ProbabilityBin, ThreatLevel};
pub use mitigation::{advice_for, mitigation_for, MitigationAdvice};
pub use batch::BatchReport;
pub use render::{
    format_average, format_percent, format_probability, render_json, render_text, DisplaySummary,
};
