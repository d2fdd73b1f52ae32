//! Delimited-text loader.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::TUP_UTF8_BOM;
use crate::error::{TransformError, TransformResult};
use crate::spec::SpecCsvReadOptions;
use crate::table::Table;

/// Parse comma-separated bytes (first record is the header) into a [`Table`].
pub fn load_table(v_bytes: &[u8]) -> TransformResult<Table> {
    load_table_with_options(v_bytes, &SpecCsvReadOptions::default())
}

/// Parse delimited bytes into a [`Table`] using `options`.
///
/// Values are kept as read; empty fields become empty cells and short
/// records are padded with empty cells. Repeated header names are suffixed
/// (`A`, `A.1`, `A.2`). Fails with [`TransformError::Parse`] on non-UTF-8
/// input, a missing header row, or a record with more fields than the
/// header.
pub fn load_table_with_options(
    v_bytes: &[u8],
    options: &SpecCsvReadOptions,
) -> TransformResult<Table> {
    let v_bytes = v_bytes.strip_prefix(&TUP_UTF8_BOM).unwrap_or(v_bytes);
    let c_text = std::str::from_utf8(v_bytes)
        .map_err(|err| TransformError::Parse(format!("Input is not valid UTF-8: {err}")))?;
    if c_text.trim().is_empty() {
        return Err(TransformError::Parse("Input has no header row.".to_string()));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(true)
        .flexible(true)
        .trim(if options.if_trim_fields {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(c_text.as_bytes());

    let l_colnames_raw: Vec<String> = csv_reader
        .headers()
        .map_err(|err| TransformError::Parse(format!("Failed to read header row: {err}")))?
        .iter()
        .enumerate()
        .map(|(n_idx, c_name)| derive_header_name(n_idx, c_name))
        .collect();
    if l_colnames_raw.is_empty() {
        return Err(TransformError::Parse("Input has no header row.".to_string()));
    }
    let l_colnames = derive_unique_header_names(l_colnames_raw);
    let n_width = l_colnames.len();

    let mut l_values_by_col: Vec<Vec<Option<String>>> = vec![Vec::new(); l_colnames.len()];
    for (n_idx_record, res_record) in csv_reader.records().enumerate() {
        let record = res_record.map_err(|err| {
            TransformError::Parse(format!(
                "Malformed record at data row {}: {err}",
                n_idx_record + 1
            ))
        })?;
        if record.len() > n_width {
            return Err(TransformError::Parse(format!(
                "Malformed record at data row {}: expected at most {n_width} fields, found {}.",
                n_idx_record + 1,
                record.len()
            )));
        }
        for (n_idx_col, l_values) in l_values_by_col.iter_mut().enumerate() {
            l_values.push(
                record
                    .get(n_idx_col)
                    .filter(|c_field| !c_field.is_empty())
                    .map(ToString::to_string),
            );
        }
    }

    let table = Table::from_columns(l_colnames.into_iter().zip(l_values_by_col).collect())?;
    log::debug!(
        "loaded table: rows={} cols={}",
        table.height(),
        table.width()
    );
    Ok(table)
}

/// Blank header cells get positional names (`Unnamed: 3`), as spreadsheet
/// exports with trailing delimiters commonly produce them.
fn derive_header_name(n_idx: usize, c_name: &str) -> String {
    if c_name.is_empty() {
        format!("Unnamed: {n_idx}")
    } else {
        c_name.to_string()
    }
}

/// Suffix repeated names with `.1`, `.2`, ... skipping suffixed names that
/// are already taken.
fn derive_unique_header_names(l_colnames: Vec<String>) -> Vec<String> {
    let set_names_raw: BTreeSet<String> = l_colnames.iter().cloned().collect();
    let mut set_names_used: BTreeSet<String> = BTreeSet::new();
    let mut dict_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut l_unique = Vec::with_capacity(l_colnames.len());
    for c_name in l_colnames {
        if set_names_used.insert(c_name.clone()) {
            l_unique.push(c_name);
            continue;
        }
        let n_count = dict_counts.entry(c_name.clone()).or_insert(0);
        let c_name_new = loop {
            *n_count += 1;
            let c_candidate = format!("{c_name}.{n_count}");
            if !set_names_raw.contains(&c_candidate) && !set_names_used.contains(&c_candidate) {
                break c_candidate;
            }
        };
        log::debug!("renamed repeated header {c_name:?} to {c_name_new:?}");
        set_names_used.insert(c_name_new.clone());
        l_unique.push(c_name_new);
    }
    l_unique
}
