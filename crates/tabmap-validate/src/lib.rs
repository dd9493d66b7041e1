//! Value validation and mapping reports.
//!
//! - [`validate`] checks and converts one raw cell against one field.
//! - [`evaluate`] dry-runs a mapping over a few sample rows and scores it.
//!
//! Both are pure: no I/O, no logging, no panics on bad input.

pub mod datetime;
mod field;
pub mod numeric;
mod report;

pub use field::{REQUIRED_MESSAGE, validate};
pub use report::{DEFAULT_SAMPLE_ROWS, ReportOptions, evaluate, mapping_score};
