//! `unbilledkit_process` v1:
//! Unbilled-demand processing: CSV in, styled workbooks (or an archive of
//! them) out.
//!
//! Modules:
//! - `conf`    : input schema, sheet/file names, upload limits
//! - `spec`    : processing options and output model
//! - `process` : `process_single`, `process_combined`, `validate_upload`
pub mod conf;
pub mod process;
pub mod spec;

pub use conf::{C_CATEGORY_DEFAULT, N_BYTES_UPLOAD_MAX};
pub use process::{
    derive_category_sheets, process_combined, process_combined_with_options, process_single,
    process_single_with_options, validate_upload, validate_upload_with_options,
};
pub use spec::{SpecOutputFile, SpecProcessOptions};
