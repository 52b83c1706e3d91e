//! Features Module - Flow Feature Schema
//!
//! The fixed, ordered set of 78 flow statistics a batch must carry,
//! and the typed record built from them.

pub mod layout;
pub mod record;


pub use layout::{
    feature_index, feature_name, layout_hash, missing_features, LayoutInfo, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use record::FlowRecord;
