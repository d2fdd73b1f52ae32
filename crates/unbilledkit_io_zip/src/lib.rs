//! `unbilledkit_io_zip` v1:
//! Archive packager bundling named byte blobs into one zip.
//!
//! Modules:
//! - `conf`    : compression constants
//! - `spec`    : archive entry model
//! - `archive` : zip writer
pub mod archive;
pub mod conf;
pub mod spec;

pub use archive::package_files;
pub use spec::SpecArchiveEntry;
