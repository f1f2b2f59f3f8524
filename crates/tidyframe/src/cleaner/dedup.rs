use polars::prelude::*;

/// Remove duplicate rows, keeping the first occurrence of each.
///
/// Rows are duplicates when every column holds an equal value, with
/// missing equal to missing. Row order of the survivors is preserved.
/// Returns the deduplicated table and the number of rows removed.
pub fn remove_duplicates(df: &DataFrame) -> PolarsResult<(DataFrame, usize)> {
    if df.width() == 0 || df.height() < 2 {
        return Ok((df.clone(), 0));
    }

    let before = df.height();
    let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    let removed = before - deduped.height();

    Ok((deduped, removed))
}
