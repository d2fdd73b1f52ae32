//! Partition/annotate engine: column checks, flag filtering, numeric
//! descending sort, and tagged concatenation.

use std::cmp::Ordering;

use crate::error::{TransformError, TransformResult};
use crate::table::Table;

////////////////////////////////////////////////////////////////////////////////
// #region SchemaChecks

/// Fail with [`TransformError::Schema`] listing every name in `names` that is
/// not a column of `table`.
///
/// Row count is irrelevant: a zero-row table with all columns passes.
pub fn require_columns(table: &Table, names: &[&str]) -> TransformResult<()> {
    let l_missing: Vec<String> = names
        .iter()
        .filter(|c_name| !table.has_column(c_name))
        .map(|c_name| c_name.to_string())
        .collect();
    if l_missing.is_empty() {
        return Ok(());
    }

    Err(TransformError::schema(
        format!(
            "Required columns {names:?} do not exist in the dataset (missing: {l_missing:?})."
        ),
        l_missing,
    ))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Partition

/// Rows whose `column` equals `match_value` exactly, in input order.
pub fn partition_by_flag(table: &Table, column: &str, match_value: &str) -> TransformResult<Table> {
    require_columns(table, &[column])?;
    let l_mask: Vec<bool> = table
        .column_values(column)?
        .iter()
        .map(|val| val.as_deref() == Some(match_value))
        .collect();
    let table_part = table.filter_rows(&l_mask)?;
    log::debug!(
        "partition {column}=={match_value:?}: {} of {} rows",
        table_part.height(),
        table.height()
    );
    Ok(table_part)
}

/// Rows ordered by `column` read as a number, largest first.
///
/// Empty and non-numeric cells go last. The sort is stable, so ties and the
/// non-numeric tail keep their input order.
pub fn sort_descending(table: &Table, column: &str) -> TransformResult<Table> {
    require_columns(table, &[column])?;
    let l_keys: Vec<Option<f64>> = table
        .column_values(column)?
        .iter()
        .map(|val| val.as_deref().and_then(parse_sort_key))
        .collect();

    let mut l_idx_rows: Vec<usize> = (0..l_keys.len()).collect();
    l_idx_rows.sort_by(|n_left, n_right| compare_descending(l_keys[*n_left], l_keys[*n_right]));
    table.take_rows(&l_idx_rows)
}

/// Partition on `column` into (`value_yes`, `value_no`) sets, each sorted
/// descending by `sort_column`. Rows matching neither value are dropped.
pub fn split_by_flag(
    table: &Table,
    column: &str,
    value_yes: &str,
    value_no: &str,
    sort_column: &str,
) -> TransformResult<(Table, Table)> {
    require_columns(table, &[column, sort_column])?;
    let table_yes = sort_descending(&partition_by_flag(table, column, value_yes)?, sort_column)?;
    let table_no = sort_descending(&partition_by_flag(table, column, value_no)?, sort_column)?;
    Ok((table_yes, table_no))
}

fn parse_sort_key(c_value: &str) -> Option<f64> {
    c_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n_value| !n_value.is_nan())
}

fn compare_descending(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(n_left), Some(n_right)) => n_right.total_cmp(&n_left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Annotate

/// Tag every row of `table_a` with `label_a` and every row of `table_b` with
/// `label_b` under a new `column`, then stack A's rows before B's.
///
/// The result's columns are A's, then B's columns A lacks, then `column`.
/// Cells for columns a row's source table lacked are empty. Fails with
/// [`TransformError::Schema`] when `column` already exists in either input.
pub fn annotate_and_concat(
    table_a: &Table,
    table_b: &Table,
    column: &str,
    label_a: &str,
    label_b: &str,
) -> TransformResult<Table> {
    if table_a.has_column(column) || table_b.has_column(column) {
        return Err(TransformError::schema(
            format!("Column {column:?} already exists; refusing to overwrite it."),
            vec![column.to_string()],
        ));
    }

    let mut l_colnames = table_a.columns();
    for c_name in table_b.columns() {
        if !l_colnames.contains(&c_name) {
            l_colnames.push(c_name);
        }
    }

    let n_height_a = table_a.height();
    let n_height_b = table_b.height();
    let mut l_columns = Vec::with_capacity(l_colnames.len() + 1);
    for c_name in l_colnames {
        let mut l_values = derive_values_or_empty(table_a, &c_name)?;
        l_values.extend(derive_values_or_empty(table_b, &c_name)?);
        l_columns.push((c_name, l_values));
    }

    let mut l_labels = vec![Some(label_a.to_string()); n_height_a];
    l_labels.extend(vec![Some(label_b.to_string()); n_height_b]);
    l_columns.push((column.to_string(), l_labels));

    let table = Table::from_columns(l_columns)?;
    log::debug!(
        "annotate {column}: {n_height_a} rows as {label_a:?}, {n_height_b} rows as {label_b:?}"
    );
    Ok(table)
}

fn derive_values_or_empty(table: &Table, column: &str) -> TransformResult<Vec<Option<String>>> {
    if table.has_column(column) {
        table.column_values(column)
    } else {
        Ok(vec![None; table.height()])
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
