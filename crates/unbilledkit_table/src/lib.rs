//! `unbilledkit_table` v1:
//! In-memory table model, delimited-text loader and row transforms.
//!
//! Modules:
//! - `conf`   : loader constants
//! - `spec`   : loader options
//! - `error`  : error taxonomy shared by all unbilledkit crates
//! - `table`  : polars-backed `Table`
//! - `loader` : delimited text -> `Table`
//! - `engine` : column checks, partition, sort, annotate/concat
pub mod conf;
pub mod engine;
pub mod error;
pub mod loader;
pub mod spec;
pub mod table;

pub use engine::{
    annotate_and_concat, partition_by_flag, require_columns, sort_descending, split_by_flag,
};
pub use error::{TransformError, TransformResult};
pub use loader::{load_table, load_table_with_options};
pub use spec::SpecCsvReadOptions;
pub use table::{Table, validate_unique_columns};
