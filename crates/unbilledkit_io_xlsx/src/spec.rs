//! Shared XLSX specification models.

use unbilledkit_table::Table;

use crate::conf::{N_WIDTH_CELL_PADDING, TUP_HEADER_FILL_POSITIONS};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; `None` fields leave the Excel default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Solid background fill color (`RRGGBB`).
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

/// Format presets a writer applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxFormatSet {
    /// Body cells of text columns.
    pub text: SpecCellFormat,
    /// Body cells of numeric columns.
    pub number: SpecCellFormat,
    /// Header cells.
    pub header: SpecCellFormat,
    /// Header cells at the highlighted positions.
    pub header_highlight: SpecCellFormat,
}

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only.
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells (default).
    #[default]
    All,
}

/// Autofit policy for per-sheet write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
    /// Optional cap on the final width.
    pub width_cell_max: Option<usize>,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::All,
            width_cell_padding: N_WIDTH_CELL_PADDING,
            width_cell_max: None,
        }
    }
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Write columns whose non-empty cells all parse as finite numbers as
    /// numeric cells.
    pub infer_numeric_cols: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// 1-based column positions whose header gets the highlight format.
    pub header_fill_positions: Vec<usize>,
    /// Pin the document creation timestamp so identical input yields
    /// identical bytes.
    pub if_pin_creation_time: bool,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            infer_numeric_cols: true,
            policy_autofit: SpecAutofitCellsPolicy::default(),
            header_fill_positions: TUP_HEADER_FILL_POSITIONS.to_vec(),
            if_pin_creation_time: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecification

/// One table rendered as one named worksheet.
#[derive(Debug, Clone)]
pub struct SpecNamedSheet {
    /// Display name, unique within one workbook.
    pub sheet_name: String,
    /// Sheet content.
    pub table: Table,
}

impl SpecNamedSheet {
    /// Pair `sheet_name` with `table`.
    pub fn new(sheet_name: impl Into<String>, table: Table) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            table,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// What was written for one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetReport {
    /// Actual sheet name in workbook.
    pub sheet_name: String,
    /// Data rows written below the header.
    pub n_rows: usize,
    /// Columns written.
    pub n_cols: usize,
    /// Final width per column; empty when autofit is disabled.
    pub widths_by_col: Vec<usize>,
    /// Zero-based columns written as numeric cells.
    pub cols_idx_numeric: Vec<usize>,
    /// Zero-based columns whose header cell got the highlight fill.
    pub cols_idx_header_fill: Vec<usize>,
}

/// Per-workbook report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets in write order.
    pub sheets: Vec<SpecSheetReport>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
