//! Name-based mapping suggestions from source columns to schema fields.

mod engine;
mod utils;

pub use engine::{ConfidenceLevel, FieldRank, MappingEngine, Suggestion, confidence, suggest};
pub use utils::normalize_name;
