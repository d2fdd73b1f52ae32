//! Row/column table model backed by a string-typed polars `DataFrame`.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{
    BooleanChunked, Column, DataFrame, IdxCa, IdxSize, NamedFrom, NewChunkedArray, PlSmallStr,
    PolarsError, Series,
};

use crate::error::{TransformError, TransformResult};

/// In-memory table: ordered rows over one ordered, non-empty list of named
/// columns. Every cell is either text (kept exactly as read) or empty.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    /// Build a table from `(column name, cell values)` pairs.
    ///
    /// All value vectors must have the same length; names must be unique and
    /// at least one column is required.
    pub fn from_columns(l_columns: Vec<(String, Vec<Option<String>>)>) -> TransformResult<Self> {
        if l_columns.is_empty() {
            return Err(TransformError::schema(
                "A table must have at least one column.",
                vec![],
            ));
        }

        let l_colnames: Vec<String> = l_columns.iter().map(|(name, _)| name.clone()).collect();
        validate_unique_columns(&l_colnames)?;

        let n_height = l_columns[0].1.len();
        if let Some((c_name, l_values)) = l_columns
            .iter()
            .find(|(_, l_values)| l_values.len() != n_height)
        {
            return Err(TransformError::Table(format!(
                "Column {c_name:?} has {} values, expected {n_height}.",
                l_values.len()
            )));
        }

        let l_cols: Vec<Column> = l_columns
            .into_iter()
            .map(|(c_name, l_values)| {
                Column::from(Series::new(PlSmallStr::from(c_name.as_str()), l_values))
            })
            .collect();

        let df = DataFrame::new(l_cols).map_err(derive_polars_error)?;
        Ok(Self { df })
    }

    /// Ordered column names.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Whether `name` is one of the columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.df
            .get_column_names_str()
            .into_iter()
            .any(|c_name| c_name == name)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Cell values of one column, in row order.
    pub fn column_values(&self, name: &str) -> TransformResult<Vec<Option<String>>> {
        if !self.has_column(name) {
            return Err(TransformError::schema(
                format!("Column not found: {name:?}"),
                vec![name.to_string()],
            ));
        }
        let col = self.df.column(name).map_err(derive_polars_error)?;
        derive_string_values(col)
    }

    /// All columns as `(name, values)` pairs, in column order.
    pub fn to_columns(&self) -> TransformResult<Vec<(String, Vec<Option<String>>)>> {
        self.df
            .get_columns()
            .iter()
            .map(|col| Ok((col.name().to_string(), derive_string_values(col)?)))
            .collect()
    }

    /// One row as a column-name map; `None` when `n_idx_row` is out of range.
    pub fn row(&self, n_idx_row: usize) -> TransformResult<Option<BTreeMap<String, Option<String>>>> {
        if n_idx_row >= self.height() {
            return Ok(None);
        }
        let mut dict_row = BTreeMap::new();
        for (c_name, l_values) in self.to_columns()? {
            dict_row.insert(c_name, l_values[n_idx_row].clone());
        }
        Ok(Some(dict_row))
    }

    /// Keep rows where `l_mask` is `true`, preserving order.
    pub(crate) fn filter_rows(&self, l_mask: &[bool]) -> TransformResult<Self> {
        if l_mask.len() != self.height() {
            return Err(TransformError::Table(format!(
                "Row mask has {} entries, expected {}.",
                l_mask.len(),
                self.height()
            )));
        }
        let mask = BooleanChunked::from_slice(PlSmallStr::from_static("mask"), l_mask);
        let df = self.df.filter(&mask).map_err(derive_polars_error)?;
        Ok(Self { df })
    }

    /// Gather rows by position, in the given order.
    pub(crate) fn take_rows(&self, l_idx_rows: &[usize]) -> TransformResult<Self> {
        let l_idx_native = l_idx_rows
            .iter()
            .map(|n_idx| {
                IdxSize::try_from(*n_idx)
                    .map_err(|_| TransformError::Table(format!("row index overflow: {n_idx}")))
            })
            .collect::<TransformResult<Vec<IdxSize>>>()?;
        let idx = IdxCa::from_vec(PlSmallStr::from_static("idx"), l_idx_native);
        let df = self.df.take(&idx).map_err(derive_polars_error)?;
        Ok(Self { df })
    }
}

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> TransformResult<()> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let l_dupes: Vec<(&str, Vec<usize>)> = dict_pos
        .into_iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .collect();
    let c_msg = l_dupes
        .iter()
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {l_pos:?}", l_pos.len()))
        .collect::<Vec<_>>()
        .join("; ");

    Err(TransformError::schema(
        format!("Duplicate column names detected: {c_msg}"),
        l_dupes
            .into_iter()
            .map(|(c_name, _)| c_name.to_string())
            .collect(),
    ))
}

fn derive_string_values(col: &Column) -> TransformResult<Vec<Option<String>>> {
    let ca = col
        .as_materialized_series()
        .str()
        .map_err(derive_polars_error)?;
    Ok(ca
        .into_iter()
        .map(|val| val.map(ToString::to_string))
        .collect())
}

pub(crate) fn derive_polars_error(err: PolarsError) -> TransformError {
    TransformError::Table(format!("polars error: {err}"))
}
