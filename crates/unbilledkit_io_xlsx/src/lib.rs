//! `unbilledkit_io_xlsx` v1:
//! Workbook writer for `Table` sheets.
//!
//! Modules:
//! - `conf`   : Excel limits, header styling constants and default presets
//! - `spec`   : formats, write options, named sheets and reports
//! - `util`   : pure helper functions (numeric inference, widths, names)
//! - `writer` : rust_xlsxwriter-backed kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_HEADER_FILL_COLOR, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_WIDTH_CELL_PADDING, TUP_EXCEL_ILLEGAL, TUP_HEADER_FILL_POSITIONS,
    derive_default_xlsx_formats, derive_default_xlsx_write_options,
};
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat,
    SpecNamedSheet, SpecSheetReport, SpecXlsxFormatSet, SpecXlsxReport, SpecXlsxWriteOptions,
};
pub use util::{derive_column_widths, sanitize_sheet_name, select_header_fill_columns};
pub use writer::{XlsxWriter, write_workbook, write_workbook_with_options};
