//! Configuration types for the cleaning engine.
//!
//! This module provides configuration options using the builder pattern,
//! and JSON loading for callers that keep their settings on disk.

use crate::error::{CleaningError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default fraction of missing values above which a non-critical column is
/// imputed instead of having its incomplete rows dropped.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.05;

/// Which table state the missing fraction of a non-critical column is
/// measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    /// Each column sees the table as left by every column processed before
    /// it, so earlier row drops shrink later denominators.
    #[default]
    Sequential,
    /// Every column's fraction and fill value come from the table as it
    /// stood right after critical-column drops.
    Snapshot,
}

/// How forgiving numeric parsing is during column type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NumericTolerance {
    /// Only plain numbers (`42`, `-1.5`, `3e4`) after trimming whitespace.
    #[default]
    Strict,
    /// Also accept currency symbols, percent signs and thousands separators
    /// (`$1,234.56`, `12%`).
    Lenient,
}

/// Configuration for one cleaning invocation.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tidyframe::config::{CleaningConfig, ThresholdBasis};
///
/// let config = CleaningConfig::builder()
///     .critical_columns(["customer_id", "product_id"])
///     .threshold_basis(ThresholdBasis::Snapshot)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Columns in which any missing value invalidates the whole row.
    /// Every name must exist in the table being cleaned.
    /// Default: empty
    pub critical_columns: Vec<String>,

    /// Missing fraction (0.0 - 1.0) above which non-critical columns are
    /// imputed. At or below it, incomplete rows are dropped.
    /// Default: 0.05 (5%)
    pub missing_threshold: f64,

    /// Denominator basis for non-critical missing fractions.
    /// Default: Sequential
    pub threshold_basis: ThresholdBasis,

    /// Numeric parse tolerance used to classify columns.
    /// Default: Strict
    pub numeric_tolerance: NumericTolerance,

    /// Whether to remove duplicate rows before handling missing values.
    /// Default: true
    pub remove_duplicates: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            critical_columns: Vec::new(),
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            threshold_basis: ThresholdBasis::default(),
            numeric_tolerance: NumericTolerance::default(),
            remove_duplicates: true,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CleaningConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether `column` is flagged critical.
    pub fn is_critical(&self, column: &str) -> bool {
        self.critical_columns.iter().any(|c| c == column)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "missing_threshold".to_string(),
                value: self.missing_threshold,
            });
        }

        if let Some(name) = self.critical_columns.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigValidationError::BlankCriticalColumn(name.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Critical column names must not be blank (got '{0}')")]
    BlankCriticalColumn(String),
}

impl From<ConfigValidationError> for CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    critical_columns: Vec<String>,
    missing_threshold: Option<f64>,
    threshold_basis: Option<ThresholdBasis>,
    numeric_tolerance: Option<NumericTolerance>,
    remove_duplicates: Option<bool>,
}

impl CleaningConfigBuilder {
    /// Flag a single column as critical.
    pub fn critical_column(mut self, column: impl Into<String>) -> Self {
        self.critical_columns.push(column.into());
        self
    }

    /// Flag several columns as critical.
    pub fn critical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Set the missing fraction above which non-critical columns are imputed.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.05 = 5%)
    pub fn missing_threshold(mut self, threshold: f64) -> Self {
        self.missing_threshold = Some(threshold);
        self
    }

    /// Set the denominator basis for non-critical missing fractions.
    pub fn threshold_basis(mut self, basis: ThresholdBasis) -> Self {
        self.threshold_basis = Some(basis);
        self
    }

    /// Set the numeric parse tolerance for column type inference.
    pub fn numeric_tolerance(mut self, tolerance: NumericTolerance) -> Self {
        self.numeric_tolerance = Some(tolerance);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            critical_columns: self.critical_columns,
            missing_threshold: self.missing_threshold.unwrap_or(DEFAULT_MISSING_THRESHOLD),
            threshold_basis: self.threshold_basis.unwrap_or_default(),
            numeric_tolerance: self.numeric_tolerance.unwrap_or_default(),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
