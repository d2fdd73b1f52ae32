//! Single-category and combined processing operations.

use std::path::Path;

use unbilledkit_io_xlsx::{SpecNamedSheet, write_workbook_with_options};
use unbilledkit_io_zip::{SpecArchiveEntry, package_files};
use unbilledkit_table::{
    Table, TransformError, TransformResult, annotate_and_concat, load_table_with_options,
    require_columns, split_by_flag,
};

use crate::conf::{C_MIME_XLSX, C_MIME_ZIP};
use crate::spec::{SpecOutputFile, SpecProcessOptions};

////////////////////////////////////////////////////////////////////////////////
// #region UploadValidation

/// Fail with [`TransformError::Config`] unless `file_name` has an accepted
/// extension (case-insensitive) and `n_bytes` is within the upload limit.
pub fn validate_upload(file_name: &str, n_bytes: usize) -> TransformResult<()> {
    validate_upload_with_options(file_name, n_bytes, &SpecProcessOptions::default())
}

pub fn validate_upload_with_options(
    file_name: &str,
    n_bytes: usize,
    options: &SpecProcessOptions,
) -> TransformResult<()> {
    let c_extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let if_allowed = c_extension
        .as_deref()
        .is_some_and(|ext| options.l_upload_extensions.iter().any(|c| c == ext));
    if !if_allowed {
        log::warn!("rejected upload {file_name:?}: extension not allowed");
        return Err(TransformError::Config(format!(
            "Invalid file type for {file_name:?}; allowed extensions: {:?}.",
            options.l_upload_extensions
        )));
    }
    if n_bytes > options.n_bytes_upload_max {
        log::warn!("rejected upload {file_name:?}: {n_bytes} bytes");
        return Err(TransformError::Config(format!(
            "Upload {file_name:?} is {n_bytes} bytes; the limit is {} bytes.",
            options.n_bytes_upload_max
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Single

/// Load one category CSV and render the `GovtCAN_Yes`/`GovtCAN_No` workbook
/// named `Unbilled_CAT_<category>.xlsx`.
pub fn process_single(v_bytes: &[u8], category: &str) -> TransformResult<SpecOutputFile> {
    process_single_with_options(v_bytes, category, &SpecProcessOptions::default())
}

pub fn process_single_with_options(
    v_bytes: &[u8],
    category: &str,
    options: &SpecProcessOptions,
) -> TransformResult<SpecOutputFile> {
    let table = load_input_table(v_bytes, options)?;
    let output = render_single_workbook(&table, category, options)?;
    log::info!(
        "processed category {category:?}: {} rows -> {} ({} bytes)",
        table.height(),
        output.file_name,
        output.v_bytes.len()
    );
    Ok(output)
}

/// The flag-partitioned, sorted sheets of one category workbook.
pub fn derive_category_sheets(
    table: &Table,
    options: &SpecProcessOptions,
) -> TransformResult<Vec<SpecNamedSheet>> {
    let l_required: Vec<&str> = options
        .l_required_columns
        .iter()
        .map(String::as_str)
        .collect();
    require_columns(table, &l_required)?;

    let (table_yes, table_no) = split_by_flag(
        table,
        &options.col_flag,
        &options.flag_yes,
        &options.flag_no,
        &options.col_sort,
    )?;
    Ok(vec![
        SpecNamedSheet::new(options.sheet_name_yes.as_str(), table_yes),
        SpecNamedSheet::new(options.sheet_name_no.as_str(), table_no),
    ])
}

fn render_single_workbook(
    table: &Table,
    category: &str,
    options: &SpecProcessOptions,
) -> TransformResult<SpecOutputFile> {
    let l_sheets = derive_category_sheets(table, options)?;
    let (v_bytes, _) =
        write_workbook_with_options(&l_sheets, options.xlsx_write_options.clone())?;
    Ok(SpecOutputFile {
        file_name: options.derive_category_file_name(category),
        mime_type: C_MIME_XLSX.to_string(),
        v_bytes,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Combined

/// Process category A and B inputs into `processed_files.zip`, holding both
/// single-category workbooks and the combined workbook.
///
/// Any failure aborts the whole call; no partial archive is returned.
pub fn process_combined(v_bytes_a: &[u8], v_bytes_b: &[u8]) -> TransformResult<SpecOutputFile> {
    process_combined_with_options(v_bytes_a, v_bytes_b, &SpecProcessOptions::default())
}

pub fn process_combined_with_options(
    v_bytes_a: &[u8],
    v_bytes_b: &[u8],
    options: &SpecProcessOptions,
) -> TransformResult<SpecOutputFile> {
    let table_a = load_input_table(v_bytes_a, options)?;
    let table_b = load_input_table(v_bytes_b, options)?;

    let output_a = render_single_workbook(&table_a, &options.category_a, options)?;
    let output_b = render_single_workbook(&table_b, &options.category_b, options)?;

    let table_combined = annotate_and_concat(
        &table_a,
        &table_b,
        &options.col_category,
        &options.category_a,
        &options.category_b,
    )?;
    let l_sheets = vec![SpecNamedSheet::new(
        options.sheet_name_combined.as_str(),
        table_combined,
    )];
    let (v_bytes_combined, _) =
        write_workbook_with_options(&l_sheets, options.xlsx_write_options.clone())?;

    let v_bytes = package_files(&[
        SpecArchiveEntry::new(output_a.file_name, output_a.v_bytes),
        SpecArchiveEntry::new(output_b.file_name, output_b.v_bytes),
        SpecArchiveEntry::new(options.derive_combined_file_name(), v_bytes_combined),
    ])?;
    log::info!(
        "processed combined categories: {} + {} rows -> {} ({} bytes)",
        table_a.height(),
        table_b.height(),
        options.file_name_archive,
        v_bytes.len()
    );
    Ok(SpecOutputFile {
        file_name: options.file_name_archive.clone(),
        mime_type: C_MIME_ZIP.to_string(),
        v_bytes,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

fn load_input_table(v_bytes: &[u8], options: &SpecProcessOptions) -> TransformResult<Table> {
    load_table_with_options(v_bytes, &options.csv_read_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const C_INPUT_A: &[u8] = b"ISGOVTCAN,DIVNCODE,LASTDEMAND\nYes,1,100\nNo,2,50\nYes,3,200\n";

    #[test]
    fn validate_upload_checks_extension_and_size() {
        assert!(validate_upload("demand.csv", 10).is_ok());
        assert!(validate_upload("DEMAND.CSV", 10).is_ok());
        assert!(validate_upload("archive.tar.csv", 0).is_ok());

        for c_name in ["demand.xlsx", "demand", "csv", ".csv.txt"] {
            assert!(
                matches!(validate_upload(c_name, 10), Err(TransformError::Config(_))),
                "{c_name} should be rejected"
            );
        }

        let n_limit = crate::conf::N_BYTES_UPLOAD_MAX;
        assert!(validate_upload("demand.csv", n_limit).is_ok());
        assert!(matches!(
            validate_upload("demand.csv", n_limit + 1),
            Err(TransformError::Config(_))
        ));
    }

    #[test]
    fn derive_category_sheets_splits_and_sorts() {
        let table = unbilledkit_table::load_table(C_INPUT_A).expect("load");
        let l_sheets =
            derive_category_sheets(&table, &SpecProcessOptions::default()).expect("sheets");

        assert_eq!(l_sheets[0].sheet_name, "GovtCAN_Yes");
        assert_eq!(l_sheets[1].sheet_name, "GovtCAN_No");
        assert_eq!(
            l_sheets[0].table.column_values("DIVNCODE").expect("col"),
            vec![Some("3".to_string()), Some("1".to_string())]
        );
        assert_eq!(
            l_sheets[1].table.column_values("DIVNCODE").expect("col"),
            vec![Some("2".to_string())]
        );
    }

    #[test]
    fn process_single_names_file_by_category() {
        let output = process_single(C_INPUT_A, "B").expect("process");
        assert_eq!(output.file_name, "Unbilled_CAT_B.xlsx");
        assert_eq!(output.mime_type, C_MIME_XLSX);
        assert!(output.v_bytes.starts_with(b"PK"));

        let output = process_single(C_INPUT_A, "").expect("process");
        assert_eq!(output.file_name, "Unbilled_CAT_.xlsx");
    }

    #[test]
    fn process_single_accepts_short_rows() {
        const C_INPUT_SHORT: &[u8] = b"ISGOVTCAN,DIVNCODE,LASTDEMAND\nYes,1,100\nYes,3\n";
        let output = process_single(C_INPUT_SHORT, "A").expect("process");
        assert_eq!(output.file_name, "Unbilled_CAT_A.xlsx");

        let table = unbilledkit_table::load_table(C_INPUT_SHORT).expect("load");
        let l_sheets =
            derive_category_sheets(&table, &SpecProcessOptions::default()).expect("sheets");
        assert_eq!(
            l_sheets[0].table.column_values("DIVNCODE").expect("col"),
            vec![Some("1".to_string()), Some("3".to_string())]
        );
    }

    #[test]
    fn process_single_propagates_parse_errors() {
        assert!(matches!(
            process_single(b"", "A"),
            Err(TransformError::Parse(_))
        ));
        assert!(matches!(
            process_single(b"ISGOVTCAN,DIVNCODE,LASTDEMAND\nYes,1,100,extra\n", "A"),
            Err(TransformError::Parse(_))
        ));
    }
}
