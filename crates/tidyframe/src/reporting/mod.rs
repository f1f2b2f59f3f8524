//! Report rendering.
//!
//! Reports are plain serde types (see [`crate::types`]); this module turns
//! them into text lines for the CLI and for callers that relay results to
//! a user.
//!
//! # Example
//!
//! ```rust,ignore
//! use tidyframe::reporting::ReportFormatter;
//!
//! let outcome = tidyframe::clean(&df, &["customer_id"])?;
//! for line in ReportFormatter::cleaning_summary(&outcome.report) {
//!     println!("  - {}", line);
//! }
//! ```

mod formatter;

pub use formatter::ReportFormatter;
