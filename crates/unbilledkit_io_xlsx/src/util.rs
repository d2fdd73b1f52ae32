//! Stateless helper utilities used by the XLSX writer kernel.

use unbilledkit_table::{TransformError, TransformResult};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Parse a cell as a finite number, ignoring surrounding whitespace.
pub fn parse_finite_number(c_value: &str) -> Option<f64> {
    c_value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n_value| n_value.is_finite())
}

/// Whether every non-empty cell parses as a finite number.
///
/// A column with no non-empty cells is not numeric.
pub fn is_numeric_column(l_values: &[Option<String>]) -> bool {
    let mut if_seen_value = false;
    for c_value in l_values.iter().flatten() {
        if parse_finite_number(c_value).is_none() {
            return false;
        }
        if_seen_value = true;
    }
    if_seen_value
}

/// Normalize one raw cell for writing.
pub fn convert_cell_value(value: Option<&str>, if_is_numeric_col: bool) -> EnumCellValue {
    let Some(c_value) = value else {
        return EnumCellValue::None;
    };
    if if_is_numeric_col && let Some(n_value) = parse_finite_number(c_value) {
        return EnumCellValue::Number(n_value);
    }
    EnumCellValue::String(c_value.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Display length of one cell: its character count, `0` when empty.
pub fn estimate_width_len(value: Option<&str>) -> usize {
    value.map_or(0, |c_value| c_value.chars().count())
}

/// Final width per column: widest cell under `policy.rule_columns`, plus
/// padding, optionally capped. Empty when autofit is disabled.
pub fn derive_column_widths(
    l_header: &[String],
    l_values_by_col: &[Vec<Option<String>>],
    policy: &SpecAutofitCellsPolicy,
) -> Vec<usize> {
    if matches!(policy.rule_columns, EnumAutofitColumnsRule::None) {
        return vec![];
    }

    l_header
        .iter()
        .zip(l_values_by_col)
        .map(|(c_header, l_values)| {
            let n_width_header = estimate_width_len(Some(c_header));
            let n_width_body = l_values
                .iter()
                .map(|val| estimate_width_len(val.as_deref()))
                .max()
                .unwrap_or(0);
            let n_width_recorded = match policy.rule_columns {
                EnumAutofitColumnsRule::Header => n_width_header,
                EnumAutofitColumnsRule::Body => n_width_body,
                EnumAutofitColumnsRule::All | EnumAutofitColumnsRule::None => {
                    usize::max(n_width_header, n_width_body)
                }
            };
            let n_width_final = n_width_recorded + policy.width_cell_padding;
            match policy.width_cell_max {
                Some(n_max) => usize::min(n_max, n_width_final),
                None => n_width_final,
            }
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderStyling

/// Zero-based columns (below `n_cols`) whose header is highlighted, given
/// 1-based `positions`.
pub fn select_header_fill_columns(n_cols: usize, positions: &[usize]) -> Vec<usize> {
    let mut l_cols_idx: Vec<usize> = positions
        .iter()
        .filter(|n_pos| **n_pos >= 1 && **n_pos <= n_cols)
        .map(|n_pos| n_pos - 1)
        .collect();
    l_cols_idx.sort_unstable();
    l_cols_idx.dedup();
    l_cols_idx
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Fail with [`TransformError::Write`] when a table does not fit one sheet.
pub fn validate_sheet_dimensions(
    sheet_name: &str,
    height_data: usize,
    width_data: usize,
) -> TransformResult<()> {
    if height_data + 1 > N_NROWS_EXCEL_MAX {
        return Err(TransformError::Write(format!(
            "Sheet {sheet_name:?} has {height_data} data rows; Excel allows {}.",
            N_NROWS_EXCEL_MAX - 1
        )));
    }
    if width_data > N_NCOLS_EXCEL_MAX {
        return Err(TransformError::Write(format!(
            "Sheet {sheet_name:?} has {width_data} columns; Excel allows {N_NCOLS_EXCEL_MAX}."
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|val| (!val.is_empty()).then(|| val.to_string()))
            .collect()
    }

    #[test]
    fn test_numeric_column_detection() {
        assert!(is_numeric_column(&cells(&["100", "", " 2.5 ", "-3", "1e3"])));
        assert!(!is_numeric_column(&cells(&["100", "n/a"])));
        assert!(!is_numeric_column(&cells(&["inf"])));
        assert!(!is_numeric_column(&cells(&["", ""])));
    }

    #[test]
    fn test_convert_cell_value() {
        assert_eq!(convert_cell_value(None, true), EnumCellValue::None);
        assert_eq!(
            convert_cell_value(Some("12"), true),
            EnumCellValue::Number(12.0)
        );
        assert_eq!(
            convert_cell_value(Some("12"), false),
            EnumCellValue::String("12".to_string())
        );
    }

    #[test]
    fn test_column_widths_are_max_len_plus_two() {
        let l_header = vec!["ISGOVTCAN".to_string(), "D".to_string(), "Ünïcode".to_string()];
        let l_values = vec![
            cells(&["Yes", "No"]),
            cells(&["", "12345", "1"]),
            cells(&["ab"]),
        ];

        assert_eq!(
            derive_column_widths(&l_header, &l_values, &SpecAutofitCellsPolicy::default()),
            vec![11, 7, 9]
        );
    }

    #[test]
    fn test_column_widths_follow_rule_and_cap() {
        let l_header = vec!["ID".to_string()];
        let l_values = vec![cells(&["a-very-long-value"])];

        let policy_header = SpecAutofitCellsPolicy {
            rule_columns: EnumAutofitColumnsRule::Header,
            ..SpecAutofitCellsPolicy::default()
        };
        assert_eq!(derive_column_widths(&l_header, &l_values, &policy_header), vec![4]);

        let policy_capped = SpecAutofitCellsPolicy {
            width_cell_max: Some(10),
            ..SpecAutofitCellsPolicy::default()
        };
        assert_eq!(derive_column_widths(&l_header, &l_values, &policy_capped), vec![10]);

        let policy_none = SpecAutofitCellsPolicy {
            rule_columns: EnumAutofitColumnsRule::None,
            ..SpecAutofitCellsPolicy::default()
        };
        assert!(derive_column_widths(&l_header, &l_values, &policy_none).is_empty());
    }

    #[test]
    fn test_header_fill_columns_only_when_present() {
        assert_eq!(select_header_fill_columns(3, &[1, 16]), vec![0]);
        assert_eq!(select_header_fill_columns(16, &[1, 16]), vec![0, 15]);
        assert_eq!(select_header_fill_columns(20, &[16, 1, 1]), vec![0, 15]);
        assert!(select_header_fill_columns(0, &[1, 16]).is_empty());
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("GovtCAN_Yes", "_"), "GovtCAN_Yes");
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_validate_sheet_dimensions() {
        assert!(validate_sheet_dimensions("S", 10, 3).is_ok());
        assert!(validate_sheet_dimensions("S", N_NROWS_EXCEL_MAX, 3).is_err());
        assert!(validate_sheet_dimensions("S", 1, N_NCOLS_EXCEL_MAX + 1).is_err());
    }
}
