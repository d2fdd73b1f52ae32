//! Loader options.

use crate::conf::{C_CSV_DELIMITER_DEFAULT, C_CSV_QUOTE_DEFAULT};

/// Options for parsing delimited text into a [`crate::Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCsvReadOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Trim surrounding whitespace from headers and fields.
    pub if_trim_fields: bool,
}

impl Default for SpecCsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: C_CSV_DELIMITER_DEFAULT,
            quote: C_CSV_QUOTE_DEFAULT,
            if_trim_fields: false,
        }
    }
}
