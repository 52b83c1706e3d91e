//! Threat Module
//!
//! Attack-type disambiguation for flows the model already scored as attacks.
//!
//! ## Structure
//! - `types`: Core types (AttackLabel, Classification, ClassificationResult)
//! - `rules`: The ordered rule set
//! - `classifier`: Cascade evaluation and per-record classification
//!
//! ## Usage
//! ```ignore
//! use flow_idps_core::logic::threat::{classify_attack_type, AttackLabel};
//!
//! match classify_attack_type(&flow) {
//!     AttackLabel::SynFlood => println!("enable SYN cookies"),
//!     label => println!("{}", label),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

// Re-export main types for convenience
pub use types::{AttackLabel, Classification, ClassificationResult};

pub use rules::{apply_rules, AttackRule, ATTACK_RULES};

pub use classifier::{classify_attack_type, classify_record, explain_match, RuleMatch};
