//! Deterministic CSV Cleaning Library
//!
//! A small, pure cleaning engine built on Polars, plus the CSV loader and
//! writer that sit on either side of it.
//!
//! # Overview
//!
//! - **Duplicate removal**: identical rows collapse to their first occurrence
//! - **Critical columns**: rows missing a critical value are always dropped
//! - **Threshold rule**: other columns are imputed (median for numeric, mode
//!   for categorical) when more than 5% of their values are missing, and
//!   otherwise have their incomplete rows dropped
//! - **Structured report**: every decision is recorded per column
//!
//! The same input and configuration always produce the same table and
//! report. The engine never performs I/O and never mutates its input.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tidyframe::io::{load_csv, write_csv, LoadOptions};
//! use tidyframe::{CleaningConfig, DataCleaner};
//!
//! let df = load_csv("data.csv".as_ref(), &LoadOptions::default())?;
//!
//! let config = CleaningConfig::builder()
//!     .critical_columns(["customer_id", "product_id"])
//!     .build()?;
//!
//! let (mut cleaned, report) = DataCleaner::new(config).clean(&df)?.into_parts();
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! write_csv(&mut cleaned, "cleaned.csv".as_ref())?;
//! ```
//!
//! # Processing order
//!
//! Non-critical columns are handled one after another in table column
//! order. Under the default [`ThresholdBasis::Sequential`] a column's
//! missing fraction is measured after earlier columns have dropped their
//! rows, so reordering columns can change the outcome.
//! [`ThresholdBasis::Snapshot`] measures every column against the table as
//! it stood after critical drops instead.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, clean, remove_duplicates};
pub use config::{
    CleaningConfig, CleaningConfigBuilder, ConfigValidationError, NumericTolerance,
    ThresholdBasis,
};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use profiler::{DataProfiler, infer_column_kind};
pub use reporting::ReportFormatter;
pub use types::{
    CleaningOutcome, CleaningReport, ColumnAction, ColumnAnalysis, ColumnKind, ColumnReport,
    DatasetAnalysis, DropReason,
};

static_assertions::assert_impl_all!(CleaningConfig: Send, Sync);
static_assertions::assert_impl_all!(CleaningReport: Send, Sync);
