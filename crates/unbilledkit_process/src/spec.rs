//! Processing options and output model.

use unbilledkit_io_xlsx::SpecXlsxWriteOptions;
use unbilledkit_table::SpecCsvReadOptions;

use crate::conf::{
    C_CATEGORY_A, C_CATEGORY_B, C_COL_CATEGORY, C_COL_FLAG, C_COL_SORT, C_FILE_NAME_ARCHIVE,
    C_FILE_NAME_PREFIX, C_FLAG_NO, C_FLAG_YES, C_SHEET_NAME_COMBINED, C_SHEET_NAME_NO,
    C_SHEET_NAME_YES, N_BYTES_UPLOAD_MAX, TUP_REQUIRED_COLUMNS, TUP_UPLOAD_EXTENSIONS,
};

////////////////////////////////////////////////////////////////////////////////
// #region ProcessOptions

/// Names, labels and reader/writer options for the processing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecProcessOptions {
    pub l_required_columns: Vec<String>,
    pub col_flag: String,
    pub col_sort: String,
    pub flag_yes: String,
    pub flag_no: String,

    pub sheet_name_yes: String,
    pub sheet_name_no: String,
    pub sheet_name_combined: String,

    /// Column tagging each combined row with its source category.
    pub col_category: String,
    pub category_a: String,
    pub category_b: String,

    pub file_name_prefix: String,
    pub file_name_archive: String,

    pub n_bytes_upload_max: usize,
    pub l_upload_extensions: Vec<String>,

    pub csv_read_options: SpecCsvReadOptions,
    pub xlsx_write_options: SpecXlsxWriteOptions,
}

impl Default for SpecProcessOptions {
    fn default() -> Self {
        Self {
            l_required_columns: TUP_REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            col_flag: C_COL_FLAG.to_string(),
            col_sort: C_COL_SORT.to_string(),
            flag_yes: C_FLAG_YES.to_string(),
            flag_no: C_FLAG_NO.to_string(),
            sheet_name_yes: C_SHEET_NAME_YES.to_string(),
            sheet_name_no: C_SHEET_NAME_NO.to_string(),
            sheet_name_combined: C_SHEET_NAME_COMBINED.to_string(),
            col_category: C_COL_CATEGORY.to_string(),
            category_a: C_CATEGORY_A.to_string(),
            category_b: C_CATEGORY_B.to_string(),
            file_name_prefix: C_FILE_NAME_PREFIX.to_string(),
            file_name_archive: C_FILE_NAME_ARCHIVE.to_string(),
            n_bytes_upload_max: N_BYTES_UPLOAD_MAX,
            l_upload_extensions: TUP_UPLOAD_EXTENSIONS.iter().map(|c| c.to_string()).collect(),
            csv_read_options: SpecCsvReadOptions::default(),
            xlsx_write_options: SpecXlsxWriteOptions::default(),
        }
    }
}

impl SpecProcessOptions {
    /// `Unbilled_CAT_<category>.xlsx`.
    pub fn derive_category_file_name(&self, category: &str) -> String {
        format!("{}{category}.xlsx", self.file_name_prefix)
    }

    /// `Unbilled_CAT_<A>_and_<B>_Combined.xlsx`.
    pub fn derive_combined_file_name(&self) -> String {
        format!(
            "{}{}_and_{}_Combined.xlsx",
            self.file_name_prefix, self.category_a, self.category_b
        )
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputSpecification

/// A finished artifact handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutputFile {
    /// Suggested download name.
    pub file_name: String,
    /// Media type of `v_bytes`.
    pub mime_type: String,
    pub v_bytes: Vec<u8>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
