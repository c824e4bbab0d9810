//! # TypedJS Driver
//!
//! File-level pipeline behind the `typedjs` command: reading documents,
//! validating them in parallel and collecting per-file reports.

pub mod error;
pub mod pipeline;

pub use error::DriverError;
pub use pipeline::{check_file, check_files, FileReport};
