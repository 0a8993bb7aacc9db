// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_possible_truncation: Progress percentages and page counts fit in u8/u32
// - cast_precision_loss: Acceptable for progress ratio arithmetic
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - items_after_statements: Response structs are clearer near their usage
// - module_name_repetitions: Extractor types are named after their format
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::case_sensitive_file_extension_comparisons
)]

pub mod api;
pub mod clean;
pub mod config;
pub mod error;
pub mod extract;
pub mod progress;
