//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console messages
//! - Spinners for long walks
//! - Text and JSON result rendering

pub mod console;
pub mod progress;
pub mod report;

pub use self::console::{print_error, print_info, print_warning};
pub use progress::{create_spinner, hidden_spinner};
pub use report::{
    format_bytes, print_reports, render, HashReport, OutputFormat, Report, SanitizeReport,
    SizeReport, SniffReport, StorageReport,
};
