//! Missing-value handling: critical-column drops, then the threshold rule
//! for every other column.

use crate::config::{CleaningConfig, ThresholdBasis};
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::types::{ColumnAction, ColumnKind, ColumnReport, DropReason};
use crate::utils::{missing_count, present_mask};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fills above this fraction get a warning in the logs.
const HEAVY_MISSING_FRACTION: f64 = 0.5;

/// What to do with a non-critical column, decided before touching the table.
#[derive(Debug, Clone, PartialEq)]
enum Plan {
    Skip,
    Drop,
    FillMedian(f64),
    FillMode(String),
}

#[derive(Debug)]
struct Decision {
    missing_count: usize,
    missing_fraction: f64,
    plan: Plan,
}

/// Applies the missing-value rules to an already deduplicated table.
pub(crate) struct MissingValueHandler<'a> {
    config: &'a CleaningConfig,
    kinds: &'a HashMap<String, ColumnKind>,
}

impl<'a> MissingValueHandler<'a> {
    pub(crate) fn new(config: &'a CleaningConfig, kinds: &'a HashMap<String, ColumnKind>) -> Self {
        Self { config, kinds }
    }

    /// Handle critical columns, then non-critical columns, each group in
    /// table column order. Row drops are cumulative across both groups.
    pub(crate) fn handle(&self, df: DataFrame) -> Result<(DataFrame, Vec<ColumnReport>)> {
        let mut df = df;
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut reports = Vec::with_capacity(names.len());

        for name in names.iter().filter(|n| self.config.is_critical(n)) {
            let missing_count = missing_in(&df, name)?;
            let missing_fraction = fraction(missing_count, df.height());

            let action = if missing_count == 0 {
                ColumnAction::None
            } else {
                df = drop_missing_rows(&df, name)?;
                debug!(
                    "Dropped {} rows with missing critical column '{}'",
                    missing_count, name
                );
                ColumnAction::DropRows {
                    rows_dropped: missing_count,
                    reason: DropReason::Critical,
                }
            };

            reports.push(self.column_report(name, true, missing_count, missing_fraction, action));
        }

        let snapshot = match self.config.threshold_basis {
            ThresholdBasis::Snapshot => Some(df.clone()),
            ThresholdBasis::Sequential => None,
        };

        for name in names.iter().filter(|n| !self.config.is_critical(n)) {
            let decision = {
                let basis = snapshot.as_ref().unwrap_or(&df);
                self.decide(basis, name)?
            };

            let action = self.apply_plan(&mut df, name, decision.plan)?;
            reports.push(self.column_report(
                name,
                false,
                decision.missing_count,
                decision.missing_fraction,
                action,
            ));
        }

        Ok((df, reports))
    }

    /// Choose between dropping rows and filling, measured against `basis`.
    fn decide(&self, basis: &DataFrame, name: &str) -> Result<Decision> {
        let missing_count = missing_in(basis, name)?;
        let missing_fraction = fraction(missing_count, basis.height());

        let plan = if missing_count == 0 {
            Plan::Skip
        } else if missing_fraction > self.config.missing_threshold {
            let series = basis.column(name)?.as_materialized_series();
            match self.kind_of(name) {
                ColumnKind::Numeric => {
                    let median =
                        StatisticalImputer::median_value(series, self.config.numeric_tolerance)?;
                    Plan::FillMedian(median.ok_or_else(|| empty_column(name))?)
                }
                ColumnKind::Categorical => {
                    let mode = StatisticalImputer::mode_value(series)?;
                    Plan::FillMode(mode.ok_or_else(|| empty_column(name))?)
                }
            }
        } else {
            Plan::Drop
        };

        debug!(
            "Column '{}': {} missing ({:.2}%), plan {:?}",
            name,
            missing_count,
            missing_fraction * 100.0,
            plan
        );
        if missing_fraction > HEAVY_MISSING_FRACTION && plan != Plan::Drop {
            warn!(
                "Column '{}' is {:.1}% missing; imputed values will dominate it",
                name,
                missing_fraction * 100.0
            );
        }

        Ok(Decision {
            missing_count,
            missing_fraction,
            plan,
        })
    }

    /// Apply a plan to the working table. Counts reflect the working table,
    /// which under a snapshot basis may have fewer gaps than the snapshot.
    fn apply_plan(&self, df: &mut DataFrame, name: &str, plan: Plan) -> Result<ColumnAction> {
        let current_missing = missing_in(df, name)?;

        let action = match plan {
            Plan::Skip => ColumnAction::None,
            Plan::Drop => {
                if current_missing > 0 {
                    *df = drop_missing_rows(df, name)?;
                }
                ColumnAction::DropRows {
                    rows_dropped: current_missing,
                    reason: DropReason::BelowThreshold,
                }
            }
            Plan::FillMedian(fill_value) => {
                let filled = {
                    let series = df.column(name)?.as_materialized_series();
                    StatisticalImputer::fill_numeric(
                        series,
                        fill_value,
                        self.config.numeric_tolerance,
                    )?
                };
                df.replace(name, filled)?;
                ColumnAction::FillMedian {
                    values_imputed: current_missing,
                    fill_value,
                }
            }
            Plan::FillMode(fill_value) => {
                let filled = {
                    let series = df.column(name)?.as_materialized_series();
                    StatisticalImputer::fill_categorical(series, &fill_value)?
                };
                df.replace(name, filled)?;
                ColumnAction::FillMode {
                    values_imputed: current_missing,
                    fill_value,
                }
            }
        };

        Ok(action)
    }

    fn kind_of(&self, name: &str) -> ColumnKind {
        self.kinds
            .get(name)
            .copied()
            .unwrap_or(ColumnKind::Categorical)
    }

    fn column_report(
        &self,
        name: &str,
        critical: bool,
        missing_count: usize,
        missing_fraction: f64,
        action: ColumnAction,
    ) -> ColumnReport {
        ColumnReport {
            column: name.to_string(),
            critical,
            kind: self.kind_of(name),
            missing_count,
            missing_fraction,
            action,
        }
    }
}

fn missing_in(df: &DataFrame, name: &str) -> Result<usize> {
    Ok(missing_count(df.column(name)?.as_materialized_series())?)
}

fn fraction(missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        missing as f64 / rows as f64
    }
}

fn drop_missing_rows(df: &DataFrame, name: &str) -> Result<DataFrame> {
    let mask = present_mask(df.column(name)?.as_materialized_series())?;
    Ok(df.filter(&mask)?)
}

fn empty_column(name: &str) -> CleaningError {
    CleaningError::EmptyColumn {
        column: name.to_string(),
    }
}
