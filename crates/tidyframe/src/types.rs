use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Inferred kind of a column, used to choose between median and mode fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Why rows were dropped for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The column is critical: any missing value invalidates the row.
    Critical,
    /// The missing fraction was at or below the imputation threshold.
    BelowThreshold,
}

/// What the engine did to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ColumnAction {
    /// Nothing was missing.
    None,
    DropRows {
        rows_dropped: usize,
        reason: DropReason,
    },
    FillMedian {
        values_imputed: usize,
        fill_value: f64,
    },
    FillMode {
        values_imputed: usize,
        fill_value: String,
    },
}

impl ColumnAction {
    /// Rows removed from the table by this action.
    pub fn rows_dropped(&self) -> usize {
        match self {
            ColumnAction::DropRows { rows_dropped, .. } => *rows_dropped,
            _ => 0,
        }
    }

    /// Cells filled by this action.
    pub fn values_imputed(&self) -> usize {
        match self {
            ColumnAction::FillMedian { values_imputed, .. }
            | ColumnAction::FillMode { values_imputed, .. } => *values_imputed,
            _ => 0,
        }
    }
}

/// Per-column entry of a [`CleaningReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    pub critical: bool,
    pub kind: ColumnKind,
    /// Missing values counted when the decision was made.
    pub missing_count: usize,
    /// `missing_count` over the rows of the table the decision was made on.
    pub missing_fraction: f64,
    #[serde(flatten)]
    pub action: ColumnAction,
}

/// Structured summary of one cleaning invocation.
///
/// Column entries are listed in processing order: critical columns first,
/// then non-critical columns, each group in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    pub columns: Vec<ColumnReport>,
}

impl CleaningReport {
    /// Rows removed by missing-value handling (duplicates excluded).
    pub fn rows_dropped(&self) -> usize {
        self.columns.iter().map(|c| c.action.rows_dropped()).sum()
    }

    /// Cells filled across all columns.
    pub fn values_imputed(&self) -> usize {
        self.columns.iter().map(|c| c.action.values_imputed()).sum()
    }

    /// Look up the entry for a column.
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Cleaned table plus the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub data: DataFrame,
    pub report: CleaningReport,
}

impl CleaningOutcome {
    pub fn into_parts(self) -> (DataFrame, CleaningReport) {
        (self.data, self.report)
    }
}

// ============================================================================
// Dataset analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub name: String,
    /// Polars dtype name as loaded.
    pub data_type: String,
    pub kind: ColumnKind,
    /// Distinct non-missing values.
    pub unique_values: usize,
    pub missing_values: usize,
}

/// Quality overview of a dataset before cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub total_rows: usize,
    pub total_columns: usize,
    pub duplicate_rows: usize,
    pub total_missing: usize,
    pub columns: Vec<ColumnAnalysis>,
}

impl DatasetAnalysis {
    /// Names of columns with at least one missing value.
    pub fn columns_with_missing(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.missing_values > 0)
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_action_serialization() {
        let report = ColumnReport {
            column: "age".to_string(),
            critical: false,
            kind: ColumnKind::Numeric,
            missing_count: 2,
            missing_fraction: 0.2,
            action: ColumnAction::FillMedian {
                values_imputed: 2,
                fill_value: 31.0,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], "fill_median");
        assert_eq!(json["values_imputed"], 2);
        assert_eq!(json["kind"], "numeric");

        let back: ColumnReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_report_totals() {
        let report = CleaningReport {
            rows_before: 10,
            rows_after: 7,
            duplicates_removed: 1,
            columns: vec![
                ColumnReport {
                    column: "id".to_string(),
                    critical: true,
                    kind: ColumnKind::Numeric,
                    missing_count: 2,
                    missing_fraction: 2.0 / 9.0,
                    action: ColumnAction::DropRows {
                        rows_dropped: 2,
                        reason: DropReason::Critical,
                    },
                },
                ColumnReport {
                    column: "city".to_string(),
                    critical: false,
                    kind: ColumnKind::Categorical,
                    missing_count: 3,
                    missing_fraction: 3.0 / 7.0,
                    action: ColumnAction::FillMode {
                        values_imputed: 3,
                        fill_value: "Oslo".to_string(),
                    },
                },
            ],
        };

        assert_eq!(report.rows_dropped(), 2);
        assert_eq!(report.values_imputed(), 3);
        assert!(report.column("city").is_some());
        assert!(report.column("zip").is_none());
    }
}
