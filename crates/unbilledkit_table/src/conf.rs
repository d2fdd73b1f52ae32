//! Table loader constants.

/// Default field delimiter.
pub const C_CSV_DELIMITER_DEFAULT: u8 = b',';
/// Default quote character.
pub const C_CSV_QUOTE_DEFAULT: u8 = b'"';
/// UTF-8 byte order mark stripped before parsing.
pub const TUP_UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
