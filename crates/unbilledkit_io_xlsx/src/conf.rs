//! XLSX constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecXlsxFormatSet, SpecXlsxWriteOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Solid fill color of highlighted header cells.
pub const C_HEADER_FILL_COLOR: &str = "FFC000";
/// 1-based column positions whose header cell is highlighted (`A` and `P`).
pub const TUP_HEADER_FILL_POSITIONS: [usize; 2] = [1, 16];
/// Character units added to the widest cell of a column.
pub const N_WIDTH_CELL_PADDING: usize = 2;

/// Creation timestamp written to document properties (`yyyy, mm, dd`).
pub const TUP_CREATION_DATE_PINNED: (u16, u8, u8) = (2000, 1, 1);

/// Build default format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> SpecXlsxFormatSet {
    let cfg_header_fmt_spec = SpecCellFormat {
        bold: Some(true),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecXlsxFormatSet {
        text: SpecCellFormat::default(),
        number: SpecCellFormat::default(),
        header_highlight: cfg_header_fmt_spec.with_(SpecCellFormat {
            bg_color: Some(C_HEADER_FILL_COLOR.to_string()),
            ..Default::default()
        }),
        header: cfg_header_fmt_spec,
    }
}

/// Build default write options.
pub fn derive_default_xlsx_write_options() -> SpecXlsxWriteOptions {
    SpecXlsxWriteOptions::default()
}
