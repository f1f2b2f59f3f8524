//! Shared helpers for numeric parsing and dtype checks.

use crate::config::NumericTolerance;
use polars::prelude::*;

/// Whether values of `dtype` are already numbers and need no parsing.
///
/// Covers every integer width (including `Int128`), both floats and
/// `Decimal`.
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_numeric()
}

/// Number of missing cells. NaN in a float column counts as missing.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    if !series.dtype().is_float() {
        return Ok(series.null_count());
    }
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .filter(|v| v.is_none_or(f64::is_nan))
        .count())
}

/// Row mask that is `true` where the cell holds a usable value.
pub fn present_mask(series: &Series) -> PolarsResult<BooleanChunked> {
    if !series.dtype().is_float() {
        return Ok(series.is_not_null());
    }
    let floats = series.cast(&DataType::Float64)?;
    let mask: BooleanChunked = floats
        .f64()?
        .into_iter()
        .map(|v| v.is_some_and(|x| !x.is_nan()))
        .collect();
    Ok(mask.with_name(series.name().clone()))
}

/// Characters stripped before parsing under [`NumericTolerance::Lenient`].
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Strip currency, percent and grouping characters, e.g. `"£2,500"` to `"2500"`.
pub fn clean_numeric_string(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !NUMERIC_FORMAT_CHARS.contains(c))
        .collect()
}

/// Parse a string as a finite `f64` under the given tolerance.
pub fn parse_numeric(s: &str, tolerance: NumericTolerance) -> Option<f64> {
    let parsed = match tolerance {
        NumericTolerance::Strict => s.trim().parse::<f64>().ok(),
        NumericTolerance::Lenient => {
            let cleaned = clean_numeric_string(s);
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
    };
    parsed.filter(|v| v.is_finite())
}

/// Convert a Series to `Float64`, keeping nulls in place.
///
/// Native numeric columns are cast and NaN becomes null. String columns are
/// parsed value by value under `tolerance`, and any unparseable value
/// becomes null.
pub fn to_float_series(series: &Series, tolerance: NumericTolerance) -> PolarsResult<Series> {
    if is_numeric_dtype(series.dtype()) {
        let cast = series.cast(&DataType::Float64)?;
        let values: Float64Chunked = cast
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        return Ok(values.with_name(series.name().clone()).into_series());
    }

    let strings = series.cast(&DataType::String)?;
    let values: Float64Chunked = strings
        .str()?
        .into_iter()
        .map(|v| v.and_then(|s| parse_numeric(s, tolerance)))
        .collect();

    Ok(values.with_name(series.name().clone()).into_series())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_numeric_dtypes() {
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(is_numeric_dtype(&DataType::Int128));
        assert!(is_numeric_dtype(&DataType::Decimal(Some(10), Some(2))));
        assert!(!is_numeric_dtype(&DataType::Date));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_strip_formatting_characters() {
        assert_eq!(clean_numeric_string("£2,500"), "2500");
        assert_eq!(clean_numeric_string(" 7.5 % "), "7.5");
        assert_eq!(clean_numeric_string("€ 12 000,"), "12000");
        assert_eq!(clean_numeric_string("-$3"), "-3");
    }

    #[test]
    fn test_parse_numeric_strict() {
        assert_eq!(parse_numeric("42", NumericTolerance::Strict), Some(42.0));
        assert_eq!(parse_numeric(" -1.5 ", NumericTolerance::Strict), Some(-1.5));
        assert_eq!(parse_numeric("3e2", NumericTolerance::Strict), Some(300.0));
        assert_eq!(parse_numeric("$1,234", NumericTolerance::Strict), None);
        assert_eq!(parse_numeric("inf", NumericTolerance::Strict), None);
        assert_eq!(parse_numeric("hello", NumericTolerance::Strict), None);
    }

    #[test]
    fn test_parse_numeric_lenient() {
        assert_eq!(
            parse_numeric("$1,234.56", NumericTolerance::Lenient),
            Some(1234.56)
        );
        assert_eq!(parse_numeric("12%", NumericTolerance::Lenient), Some(12.0));
        assert_eq!(parse_numeric("$", NumericTolerance::Lenient), None);
        assert_eq!(parse_numeric("abc", NumericTolerance::Lenient), None);
    }

    #[test]
    fn test_to_float_series_from_strings() {
        let series = Series::new("price".into(), &[Some("$1,000"), None, Some("2.5")]);
        let floats = to_float_series(&series, NumericTolerance::Lenient).unwrap();

        assert_eq!(floats.dtype(), &DataType::Float64);
        assert_eq!(floats.null_count(), 1);
        assert_eq!(floats.f64().unwrap().get(0), Some(1000.0));
        assert_eq!(floats.f64().unwrap().get(2), Some(2.5));
    }

    #[test]
    fn test_to_float_series_from_ints() {
        let series = Series::new("qty".into(), &[Some(1i64), None, Some(3)]);
        let floats = to_float_series(&series, NumericTolerance::Strict).unwrap();

        assert_eq!(floats.dtype(), &DataType::Float64);
        assert_eq!(floats.f64().unwrap().get(2), Some(3.0));
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let series = Series::new("v".into(), &[Some(1.0), Some(f64::NAN), None, Some(3.0)]);

        assert_eq!(missing_count(&series).unwrap(), 2);
        let mask: Vec<Option<bool>> = present_mask(&series).unwrap().into_iter().collect();
        assert_eq!(mask, vec![Some(true), Some(false), Some(false), Some(true)]);

        let floats = to_float_series(&series, NumericTolerance::Strict).unwrap();
        assert_eq!(floats.null_count(), 2);
    }

    #[test]
    fn test_decimal_and_int128_cast_to_float() {
        let decimal = Series::new("amount".into(), &[Some(1.5), None, Some(4.25)])
            .cast(&DataType::Decimal(Some(10), Some(2)))
            .unwrap();
        let floats = to_float_series(&decimal, NumericTolerance::Strict).unwrap();
        assert_eq!(floats.f64().unwrap().get(2), Some(4.25));

        let wide = Series::new("big".into(), &[Some(7i64), None])
            .cast(&DataType::Int128)
            .unwrap();
        let floats = to_float_series(&wide, NumericTolerance::Strict).unwrap();
        assert_eq!(floats.f64().unwrap().get(0), Some(7.0));
        assert_eq!(missing_count(&wide).unwrap(), 1);
    }
}
