//! XLSX writer kernel that renders tables into a styled workbook.

use std::collections::BTreeSet;

use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatPattern, Workbook, Worksheet,
    XlsxError,
};
use unbilledkit_table::{Table, TransformError, TransformResult};

use crate::conf::{
    TUP_CREATION_DATE_PINNED, derive_default_xlsx_formats, derive_default_xlsx_write_options,
};
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecNamedSheet, SpecSheetReport, SpecXlsxFormatSet,
    SpecXlsxReport, SpecXlsxWriteOptions,
};
use crate::util::{
    convert_cell_value, derive_column_widths, is_numeric_column, sanitize_sheet_name,
    select_header_fill_columns, validate_sheet_dimensions,
};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory; [`Self::close`] consumes the writer
/// and returns the serialized bytes, so nothing outlives the call that owns
/// it on either the success or the error path.
pub struct XlsxWriter {
    workbook: Workbook,
    fmts: SpecXlsxFormatSet,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(derive_default_xlsx_formats(), SpecXlsxWriteOptions::default())
    }
}

impl XlsxWriter {
    /// Create writer with format presets and options.
    pub fn new(fmts: SpecXlsxFormatSet, write_options: SpecXlsxWriteOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            fmts,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
        }
    }

    /// Return snapshot of per-sheet write reports.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Number of sheets written so far.
    pub fn sheet_count(&self) -> usize {
        self.report.sheets.len()
    }

    /// Serialize the workbook to bytes.
    pub fn close(mut self) -> TransformResult<Vec<u8>> {
        self.ensure_ready_to_save()?;
        self.workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error)
    }

    /// Write `table` as one worksheet named `sheet_name`.
    ///
    /// Row 1 holds the column names (bold, centered, highlighted at the
    /// configured positions); data rows follow in table order. Column widths
    /// are set from the widest cell plus padding.
    pub fn write_sheet(&mut self, sheet_name: &str, table: &Table) -> TransformResult<()> {
        let sheet_name_clean = sanitize_sheet_name(sheet_name, "_");
        if sheet_name_clean != sheet_name {
            self.report.warn(format!(
                "Sheet name {sheet_name:?} normalized to {sheet_name_clean:?}."
            ));
        }
        let c_key_sheet_name = sheet_name_clean.to_lowercase();
        if self.set_sheet_names_existing.contains(&c_key_sheet_name) {
            return Err(TransformError::Config(format!(
                "Duplicate sheet name in one workbook: {sheet_name_clean:?}"
            )));
        }

        let n_height = table.height();
        let n_width = table.width();
        validate_sheet_dimensions(&sheet_name_clean, n_height, n_width)?;

        let l_columns = table.to_columns()?;
        let l_colnames: Vec<String> = l_columns.iter().map(|(c_name, _)| c_name.clone()).collect();
        let l_values_by_col: Vec<Vec<Option<String>>> =
            l_columns.into_iter().map(|(_, l_values)| l_values).collect();

        let l_cols_idx_numeric: Vec<usize> = if self.write_options.infer_numeric_cols {
            l_values_by_col
                .iter()
                .enumerate()
                .filter(|(_, l_values)| is_numeric_column(l_values))
                .map(|(n_idx, _)| n_idx)
                .collect()
        } else {
            vec![]
        };
        let l_cols_idx_header_fill =
            select_header_fill_columns(n_width, &self.write_options.header_fill_positions);
        let l_widths_by_col = derive_column_widths(
            &l_colnames,
            &l_values_by_col,
            &self.write_options.policy_autofit,
        );

        let fmt_header = derive_rust_xlsx_format(&self.fmts.header);
        let fmt_header_highlight = derive_rust_xlsx_format(&self.fmts.header_highlight);
        let fmt_text = derive_rust_xlsx_format(&self.fmts.text);
        let fmt_number = derive_rust_xlsx_format(&self.fmts.number);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_clean)
            .map_err(derive_xlsx_error)?;

        for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
            let fmt = if l_cols_idx_header_fill.contains(&n_idx_col) {
                &fmt_header_highlight
            } else {
                &fmt_header
            };
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, c_name, fmt)
                .map_err(derive_xlsx_error)?;
        }

        for (n_idx_col, l_values) in l_values_by_col.iter().enumerate() {
            let if_is_numeric_col = l_cols_idx_numeric.contains(&n_idx_col);
            let fmt = if if_is_numeric_col {
                &fmt_number
            } else {
                &fmt_text
            };
            for (n_idx_row, value) in l_values.iter().enumerate() {
                let value = convert_cell_value(value.as_deref(), if_is_numeric_col);
                write_cell_with_format(worksheet, n_idx_row + 1, n_idx_col, &value, fmt)?;
            }
        }

        for (n_idx_col, n_width) in l_widths_by_col.iter().enumerate() {
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, *n_width as f64)
                .map_err(derive_xlsx_error)?;
        }

        log::debug!(
            "wrote sheet {sheet_name_clean:?}: rows={n_height} cols={n_width} numeric={l_cols_idx_numeric:?}"
        );

        self.set_sheet_names_existing.insert(c_key_sheet_name);
        self.report.sheets.push(SpecSheetReport {
            sheet_name: sheet_name_clean,
            n_rows: n_height,
            n_cols: n_width,
            widths_by_col: l_widths_by_col,
            cols_idx_numeric: l_cols_idx_numeric,
            cols_idx_header_fill: l_cols_idx_header_fill,
        });
        Ok(())
    }

    fn ensure_ready_to_save(&mut self) -> TransformResult<()> {
        if self.report.sheets.is_empty() {
            return Err(TransformError::Config(
                "A workbook needs at least one sheet.".to_string(),
            ));
        }
        if self.write_options.if_pin_creation_time {
            let (n_year, n_month, n_day) = TUP_CREATION_DATE_PINNED;
            let dt_creation =
                ExcelDateTime::from_ymd(n_year, n_month, n_day).map_err(derive_xlsx_error)?;
            let properties = DocProperties::new().set_creation_datetime(&dt_creation);
            self.workbook.set_properties(&properties);
        }
        Ok(())
    }
}

/// Render `sheets` in order into one workbook with the default presets.
pub fn write_workbook(sheets: &[SpecNamedSheet]) -> TransformResult<Vec<u8>> {
    write_workbook_with_options(sheets, derive_default_xlsx_write_options())
        .map(|(v_bytes, _)| v_bytes)
}

/// Render `sheets` in order into one workbook; also return the write report.
pub fn write_workbook_with_options(
    sheets: &[SpecNamedSheet],
    write_options: SpecXlsxWriteOptions,
) -> TransformResult<(Vec<u8>, SpecXlsxReport)> {
    let mut writer = XlsxWriter::new(derive_default_xlsx_formats(), write_options);
    for sheet in sheets {
        writer.write_sheet(&sheet.sheet_name, &sheet.table)?;
    }
    let report = writer.report();
    let v_bytes = writer.close()?;
    Ok((v_bytes, report))
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> TransformResult<()> {
    match value {
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(val.as_str());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "justify" => Some(FormatAlign::Justify),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> TransformResult<u32> {
    u32::try_from(value).map_err(|_| TransformError::Write(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> TransformResult<u16> {
    u16::try_from(value)
        .map_err(|_| TransformError::Write(format!("column index overflow: {value}")))
}

fn derive_xlsx_error(err: XlsxError) -> TransformError {
    TransformError::Write(format!("xlsx write error: {err}"))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use unbilledkit_table::load_table;

    use super::*;
    use crate::spec::EnumAutofitColumnsRule;

    fn read_entry(v_bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(v_bytes)).expect("open xlsx");
        let mut file = archive.by_name(name).expect("xlsx entry");
        let mut c_text = String::new();
        file.read_to_string(&mut c_text).expect("read entry");
        c_text
    }

    fn read_all_entries(v_bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(v_bytes)).expect("open xlsx");
        let mut l_entries = Vec::new();
        for n_idx in 0..archive.len() {
            let mut file = archive.by_index(n_idx).expect("xlsx entry");
            let mut v_data = Vec::new();
            file.read_to_end(&mut v_data).expect("read entry");
            l_entries.push((file.name().to_string(), v_data));
        }
        l_entries
    }

    fn wide_table(n_cols: usize) -> Table {
        let c_header = (1..=n_cols)
            .map(|n_idx| format!("C{n_idx}"))
            .collect::<Vec<_>>()
            .join(",");
        let c_row = (1..=n_cols)
            .map(|n_idx| n_idx.to_string())
            .collect::<Vec<_>>()
            .join(",");
        load_table(format!("{c_header}\n{c_row}\n").as_bytes()).expect("load wide table")
    }

    fn demand_sheets() -> Vec<SpecNamedSheet> {
        let table_yes = load_table(b"ISGOVTCAN,DIVNCODE,LASTDEMAND\nYes,3,200\nYes,1,100\n")
            .expect("load yes");
        let table_no =
            load_table(b"ISGOVTCAN,DIVNCODE,LASTDEMAND\nNo,2,50\n").expect("load no");
        vec![
            SpecNamedSheet::new("GovtCAN_Yes", table_yes),
            SpecNamedSheet::new("GovtCAN_No", table_no),
        ]
    }

    #[test]
    fn write_workbook_emits_sheets_in_order() {
        let v_bytes = write_workbook(&demand_sheets()).expect("write workbook");

        let c_workbook_xml = read_entry(&v_bytes, "xl/workbook.xml");
        let n_pos_yes = c_workbook_xml
            .find("name=\"GovtCAN_Yes\"")
            .expect("GovtCAN_Yes sheet");
        let n_pos_no = c_workbook_xml
            .find("name=\"GovtCAN_No\"")
            .expect("GovtCAN_No sheet");
        assert!(n_pos_yes < n_pos_no);

        let c_styles_xml = read_entry(&v_bytes, "xl/styles.xml");
        assert!(c_styles_xml.contains("FFC000"));
        assert!(c_styles_xml.contains("<b/>"));
        assert!(c_styles_xml.contains("horizontal=\"center\""));
    }

    #[test]
    fn write_workbook_reports_widths_numeric_cols_and_fill() {
        let (_, report) =
            write_workbook_with_options(&demand_sheets(), SpecXlsxWriteOptions::default())
                .expect("write workbook");

        assert_eq!(report.sheets.len(), 2);
        let sheet_yes = &report.sheets[0];
        assert_eq!(sheet_yes.sheet_name, "GovtCAN_Yes");
        assert_eq!(sheet_yes.n_rows, 2);
        assert_eq!(sheet_yes.n_cols, 3);
        assert_eq!(sheet_yes.widths_by_col, vec![11, 10, 12]);
        assert_eq!(sheet_yes.cols_idx_numeric, vec![1, 2]);
        assert_eq!(sheet_yes.cols_idx_header_fill, vec![0]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn header_fill_reaches_sixteenth_column_when_present() {
        let sheets = vec![
            SpecNamedSheet::new("Narrow", wide_table(15)),
            SpecNamedSheet::new("Wide", wide_table(17)),
        ];
        let (_, report) = write_workbook_with_options(&sheets, SpecXlsxWriteOptions::default())
            .expect("write workbook");

        assert_eq!(report.sheets[0].cols_idx_header_fill, vec![0]);
        assert_eq!(report.sheets[1].cols_idx_header_fill, vec![0, 15]);
    }

    /// Style index attribute of cell `c_ref` in a worksheet part.
    fn cell_style_idx(c_sheet_xml: &str, c_ref: &str) -> Option<String> {
        let n_start = c_sheet_xml.find(&format!("<c r=\"{c_ref}\""))?;
        let c_tag = &c_sheet_xml[n_start..n_start + c_sheet_xml[n_start..].find('>')?];
        let n_attr = c_tag.find(" s=\"")? + " s=\"".len();
        let n_attr_end = n_attr + c_tag[n_attr..].find('"')?;
        Some(c_tag[n_attr..n_attr_end].to_string())
    }

    #[test]
    fn header_fill_style_lands_on_a1_and_p1_only() {
        let sheets = vec![SpecNamedSheet::new("Wide", wide_table(17))];
        let v_bytes = write_workbook(&sheets).expect("write workbook");
        let c_sheet_xml = read_entry(&v_bytes, "xl/worksheets/sheet1.xml");

        let c_style_fill = cell_style_idx(&c_sheet_xml, "A1").expect("A1 style");
        assert_eq!(cell_style_idx(&c_sheet_xml, "P1"), Some(c_style_fill.clone()));

        let c_style_plain = cell_style_idx(&c_sheet_xml, "O1").expect("O1 style");
        assert_ne!(c_style_plain, c_style_fill);
        for c_ref in ["B1", "Q1"] {
            assert_eq!(cell_style_idx(&c_sheet_xml, c_ref), Some(c_style_plain.clone()));
        }
    }

    #[test]
    fn write_workbook_is_deterministic() {
        let v_first = write_workbook(&demand_sheets()).expect("first write");
        let v_second = write_workbook(&demand_sheets()).expect("second write");
        assert_eq!(read_all_entries(&v_first), read_all_entries(&v_second));
    }

    #[test]
    fn write_workbook_rejects_duplicate_and_empty_sheet_lists() {
        let mut sheets = demand_sheets();
        sheets[1].sheet_name = "govtcan_yes".to_string();
        assert!(matches!(
            write_workbook(&sheets),
            Err(TransformError::Config(_))
        ));

        assert!(matches!(write_workbook(&[]), Err(TransformError::Config(_))));
    }

    #[test]
    fn writer_normalizes_sheet_names_with_warning() {
        let mut writer = XlsxWriter::default();
        writer
            .write_sheet("A/B", &wide_table(2))
            .expect("write sheet");
        let report = writer.report();
        assert_eq!(report.sheets[0].sheet_name, "A_B");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(writer.sheet_count(), 1);
        assert!(!writer.close().expect("close").is_empty());
    }

    #[test]
    fn writer_respects_disabled_inference_and_autofit() {
        let options = SpecXlsxWriteOptions {
            infer_numeric_cols: false,
            policy_autofit: crate::spec::SpecAutofitCellsPolicy {
                rule_columns: EnumAutofitColumnsRule::None,
                ..Default::default()
            },
            ..SpecXlsxWriteOptions::default()
        };
        let (_, report) =
            write_workbook_with_options(&demand_sheets(), options).expect("write workbook");
        assert!(report.sheets[0].cols_idx_numeric.is_empty());
        assert!(report.sheets[0].widths_by_col.is_empty());
    }
}
