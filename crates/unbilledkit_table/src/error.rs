//! Error taxonomy shared by every unbilledkit crate.

use thiserror::Error;

/// Result alias used across the toolkit.
pub type TransformResult<T> = std::result::Result<T, TransformError>;

/// Typed failure of one transform call.
///
/// Every variant is recoverable at the caller: inputs are deterministic, so
/// nothing is retried, and no partial output accompanies an error.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input bytes could not be decoded or parsed into a table.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required columns are missing, or an added column would collide.
    #[error("Schema error: {message}")]
    Schema {
        /// User-facing description.
        message: String,
        /// Column names the error is about.
        columns: Vec<String>,
    },

    /// Serializing a workbook or archive failed.
    #[error("Write error: {0}")]
    Write(String),

    /// Caller passed invalid arguments.
    #[error("Config error: {0}")]
    Config(String),

    /// The in-memory table backend rejected an operation.
    #[error("Table error: {0}")]
    Table(String),
}

impl TransformError {
    /// Build a schema error listing `columns`.
    pub fn schema(message: impl Into<String>, columns: Vec<String>) -> Self {
        Self::Schema {
            message: message.into(),
            columns,
        }
    }

    /// Short kind tag (`parse`, `schema`, `write`, `config`, `table`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Schema { .. } => "schema",
            Self::Write(_) => "write",
            Self::Config(_) => "config",
            Self::Table(_) => "table",
        }
    }
}
