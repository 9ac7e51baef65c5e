//! Reporting for packbench
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Text and JSON benchmark reports
//! - Status messages

#![warn(missing_docs)]

pub mod output;
pub mod report;

pub use report::{to_json, write_json, TextReporter};
