use crate::types::{CleaningReport, ColumnAction, DatasetAnalysis, DropReason};

/// Columns listed by name in the analysis overview before truncating.
const MAX_LISTED_COLUMNS: usize = 5;

/// Renders reports as plain text lines for terminals and logs.
pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per stage or column action, in processing order.
    ///
    /// Columns with nothing missing are omitted.
    pub fn cleaning_summary(report: &CleaningReport) -> Vec<String> {
        let mut lines = Vec::new();

        if report.duplicates_removed > 0 {
            let pct = if report.rows_before > 0 {
                report.duplicates_removed as f64 / report.rows_before as f64 * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "Removed {} duplicate rows ({:.1}%)",
                report.duplicates_removed, pct
            ));
        } else {
            lines.push("No duplicate rows found".to_string());
        }

        for col in &report.columns {
            let line = match &col.action {
                ColumnAction::None => continue,
                ColumnAction::DropRows {
                    rows_dropped,
                    reason: DropReason::Critical,
                } => format!(
                    "Removed {} rows missing critical column '{}'",
                    rows_dropped, col.column
                ),
                ColumnAction::DropRows {
                    rows_dropped,
                    reason: DropReason::BelowThreshold,
                } => format!(
                    "Removed {} rows missing '{}' ({:.1}% missing, at or below threshold)",
                    rows_dropped,
                    col.column,
                    col.missing_fraction * 100.0
                ),
                ColumnAction::FillMedian {
                    values_imputed,
                    fill_value,
                } => format!(
                    "Filled {} missing values in '{}' with median: {}",
                    values_imputed, col.column, fill_value
                ),
                ColumnAction::FillMode {
                    values_imputed,
                    fill_value,
                } => format!(
                    "Filled {} missing values in '{}' with mode: '{}'",
                    values_imputed, col.column, fill_value
                ),
            };
            lines.push(line);
        }

        lines.push(format!(
            "Rows: {} -> {}",
            report.rows_before, report.rows_after
        ));
        lines
    }

    /// Dataset overview: shape, column names, and quality issues.
    pub fn analysis_summary(analysis: &DatasetAnalysis) -> Vec<String> {
        let names: Vec<&str> = analysis.columns.iter().map(|c| c.name.as_str()).collect();
        let listed = names
            .iter()
            .take(MAX_LISTED_COLUMNS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let ellipsis = if names.len() > MAX_LISTED_COLUMNS {
            "..."
        } else {
            ""
        };

        let mut lines = vec![
            format!("Total rows: {}", analysis.total_rows),
            format!("Total columns: {}", analysis.total_columns),
            format!("Columns: {}{}", listed, ellipsis),
            format!("Duplicate rows found: {}", analysis.duplicate_rows),
            format!("Total missing values: {}", analysis.total_missing),
            format!(
                "Columns with missing data: {}",
                analysis.columns_with_missing().len()
            ),
        ];

        for col in &analysis.columns {
            lines.push(format!(
                "  {} [{} / {}]: {} unique, {} missing",
                col.name,
                col.data_type,
                col.kind.as_str(),
                col.unique_values,
                col.missing_values
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnAnalysis, ColumnKind, ColumnReport};

    #[test]
    fn test_cleaning_summary_lines() {
        let report = CleaningReport {
            rows_before: 4,
            rows_after: 2,
            duplicates_removed: 1,
            columns: vec![
                ColumnReport {
                    column: "id".to_string(),
                    critical: true,
                    kind: ColumnKind::Numeric,
                    missing_count: 1,
                    missing_fraction: 1.0 / 3.0,
                    action: ColumnAction::DropRows {
                        rows_dropped: 1,
                        reason: DropReason::Critical,
                    },
                },
                ColumnReport {
                    column: "qty".to_string(),
                    critical: false,
                    kind: ColumnKind::Numeric,
                    missing_count: 0,
                    missing_fraction: 0.0,
                    action: ColumnAction::None,
                },
                ColumnReport {
                    column: "city".to_string(),
                    critical: false,
                    kind: ColumnKind::Categorical,
                    missing_count: 1,
                    missing_fraction: 0.5,
                    action: ColumnAction::FillMode {
                        values_imputed: 1,
                        fill_value: "Oslo".to_string(),
                    },
                },
            ],
        };

        let lines = ReportFormatter::cleaning_summary(&report);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Removed 1 duplicate rows (25.0%)");
        assert!(lines[1].contains("critical column 'id'"));
        assert!(lines[2].contains("mode: 'Oslo'"));
        assert_eq!(lines[3], "Rows: 4 -> 2");
    }

    #[test]
    fn test_cleaning_summary_empty_report() {
        let lines = ReportFormatter::cleaning_summary(&CleaningReport::default());
        assert_eq!(lines, vec!["No duplicate rows found", "Rows: 0 -> 0"]);
    }

    #[test]
    fn test_analysis_summary_truncates_columns() {
        let columns = (0..7)
            .map(|i| ColumnAnalysis {
                name: format!("c{}", i),
                data_type: "i64".to_string(),
                kind: ColumnKind::Numeric,
                unique_values: 3,
                missing_values: usize::from(i == 0),
            })
            .collect();
        let analysis = DatasetAnalysis {
            total_rows: 3,
            total_columns: 7,
            duplicate_rows: 0,
            total_missing: 1,
            columns,
        };

        let lines = ReportFormatter::analysis_summary(&analysis);

        assert_eq!(lines[2], "Columns: c0, c1, c2, c3, c4...");
        assert_eq!(lines[5], "Columns with missing data: 1");
        assert_eq!(lines.len(), 6 + 7);
    }
}
