//! The cleaning engine.
//!
//! One invocation runs two stages against a borrowed table:
//! 1. Duplicate removal (first occurrence kept)
//! 2. Missing-value handling: rows missing a critical value are dropped,
//!    then each other column is either imputed (median or mode) when its
//!    missing fraction exceeds the threshold, or has its incomplete rows
//!    dropped otherwise
//!
//! The engine never performs I/O and never mutates the caller's table. Any
//! error aborts the whole invocation, so callers never see a report for a
//! partially cleaned table.

mod dedup;
mod missing;

pub use dedup::remove_duplicates;

use crate::config::CleaningConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::profiler::infer_column_kinds;
use crate::types::{CleaningOutcome, CleaningReport};
use missing::MissingValueHandler;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Deterministic, stateless cleaner for one table at a time.
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleaningConfig,
}

static_assertions::assert_impl_all!(DataCleaner: Send, Sync);

impl DataCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean `df`, returning a new table and the report describing it.
    ///
    /// # Errors
    /// - [`CleaningError::Configuration`] if a critical column is not in `df`
    /// - [`CleaningError::InvalidConfig`] if the threshold is out of range
    /// - [`CleaningError::EmptyColumn`] if a column needs a fill but has no
    ///   values to compute one from
    pub fn clean(&self, df: &DataFrame) -> Result<CleaningOutcome> {
        self.config.validate()?;
        self.validate_columns(df)?;

        info!(
            "Cleaning {} rows x {} columns ({} critical)",
            df.height(),
            df.width(),
            self.config.critical_columns.len()
        );

        // Kinds come from the untouched input so every later step agrees.
        let kinds: HashMap<String, _> = infer_column_kinds(df, self.config.numeric_tolerance)
            .into_iter()
            .collect();

        let rows_before = df.height();
        let (deduped, duplicates_removed) = if self.config.remove_duplicates {
            remove_duplicates(df).context("Failed to remove duplicate rows")?
        } else {
            (df.clone(), 0)
        };
        debug!("Removed {} duplicate rows", duplicates_removed);

        let (data, columns) = MissingValueHandler::new(&self.config, &kinds).handle(deduped)?;

        let report = CleaningReport {
            rows_before,
            rows_after: data.height(),
            duplicates_removed,
            columns,
        };
        info!(
            "Cleaning complete: {} -> {} rows, {} values imputed",
            report.rows_before,
            report.rows_after,
            report.values_imputed()
        );

        Ok(CleaningOutcome { data, report })
    }

    fn validate_columns(&self, df: &DataFrame) -> Result<()> {
        let names = df.get_column_names();
        for critical in &self.config.critical_columns {
            if !names.iter().any(|n| n.as_str() == critical) {
                return Err(CleaningError::Configuration {
                    column: critical.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Clean `df` with default settings and the given critical columns.
pub fn clean<S: AsRef<str>>(df: &DataFrame, critical_columns: &[S]) -> Result<CleaningOutcome> {
    let config = CleaningConfig::builder()
        .critical_columns(critical_columns.iter().map(|c| c.as_ref().to_string()))
        .build()?;
    DataCleaner::new(config).clean(df)
}
