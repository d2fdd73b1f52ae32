//! Processing constants: input schema, sheet and file names, upload limits.

/// Column holding the government-account flag.
pub const C_COL_FLAG: &str = "ISGOVTCAN";
/// Column holding the division code.
pub const C_COL_DIVISION: &str = "DIVNCODE";
/// Column the partitions are sorted by, largest first.
pub const C_COL_SORT: &str = "LASTDEMAND";
/// Columns every input table must carry (case-sensitive).
pub const TUP_REQUIRED_COLUMNS: [&str; 3] = [C_COL_FLAG, C_COL_DIVISION, C_COL_SORT];

pub const C_FLAG_YES: &str = "Yes";
pub const C_FLAG_NO: &str = "No";

pub const C_SHEET_NAME_YES: &str = "GovtCAN_Yes";
pub const C_SHEET_NAME_NO: &str = "GovtCAN_No";
pub const C_SHEET_NAME_COMBINED: &str = "Combined";

/// Column added to the combined sheet to tell the categories apart.
pub const C_COL_CATEGORY: &str = "HCC Type";
pub const C_CATEGORY_A: &str = "A";
pub const C_CATEGORY_B: &str = "B";
/// Category used when the caller names none.
pub const C_CATEGORY_DEFAULT: &str = C_CATEGORY_A;

/// Prefix of every produced workbook name.
pub const C_FILE_NAME_PREFIX: &str = "Unbilled_CAT_";
pub const C_FILE_NAME_ARCHIVE: &str = "processed_files.zip";

pub const C_MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const C_MIME_ZIP: &str = "application/zip";

/// Largest accepted upload (16 MiB).
pub const N_BYTES_UPLOAD_MAX: usize = 16 * 1024 * 1024;
/// Accepted upload extensions, lowercase and without the dot.
pub const TUP_UPLOAD_EXTENSIONS: [&str; 1] = ["csv"];
