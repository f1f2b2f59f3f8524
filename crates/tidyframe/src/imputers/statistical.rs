//! Median and mode imputation.

use crate::config::NumericTolerance;
use crate::utils::to_float_series;
use polars::prelude::*;
use std::collections::HashMap;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Median of the non-missing values, or `None` when there are none.
    ///
    /// Even-length inputs average the two middle values.
    pub fn median_value(series: &Series, tolerance: NumericTolerance) -> PolarsResult<Option<f64>> {
        let floats = to_float_series(series, tolerance)?;
        Ok(floats.median())
    }

    /// Most frequent non-missing value, compared as text.
    ///
    /// Ties go to the value whose first occurrence comes earliest in the
    /// series.
    pub fn mode_value(series: &Series) -> PolarsResult<Option<String>> {
        let strings = series.cast(&DataType::String)?;

        // value -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, value) in strings.str()?.into_iter().enumerate() {
            if let Some(value) = value {
                counts.entry(value).or_insert((0, idx)).0 += 1;
            }
        }

        let mode = counts
            .into_iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(value, _)| value.to_string());

        Ok(mode)
    }

    /// Fill missing values of a numeric column, returning a `Float64` Series.
    pub fn fill_numeric(
        series: &Series,
        fill_value: f64,
        tolerance: NumericTolerance,
    ) -> PolarsResult<Series> {
        let floats = to_float_series(series, tolerance)?;
        let filled: Float64Chunked = floats
            .f64()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(fill_value)))
            .collect();

        Ok(filled.with_name(series.name().clone()).into_series())
    }

    /// Fill missing values of a categorical column, returning a `String` Series.
    pub fn fill_categorical(series: &Series, fill_value: &str) -> PolarsResult<Series> {
        let strings = series.cast(&DataType::String)?;
        let filled: StringChunked = strings
            .str()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(fill_value)))
            .collect();

        Ok(filled.with_name(series.name().clone()).into_series())
    }
}
