//! In-memory zip packaging.

use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use unbilledkit_table::{TransformError, TransformResult};
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::conf::COMPRESSION_METHOD_DEFAULT;
use crate::spec::SpecArchiveEntry;

/// Bundle `entries` into one zip archive, in the given order.
///
/// Names must be non-empty and unique, otherwise the call fails with
/// [`TransformError::Config`] before anything is written. An empty entry
/// list yields a valid empty archive.
pub fn package_files(entries: &[SpecArchiveEntry]) -> TransformResult<Vec<u8>> {
    validate_archive_names(entries)?;

    let options = SimpleFileOptions::default().compression_method(COMPRESSION_METHOD_DEFAULT);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        zip.start_file(entry.archive_name.as_str(), options)
            .map_err(derive_zip_error)?;
        zip.write_all(&entry.v_bytes).map_err(|e| {
            TransformError::Write(format!(
                "Failed to write archive entry {:?}: {e}",
                entry.archive_name
            ))
        })?;
    }
    let v_bytes = zip.finish().map_err(derive_zip_error)?.into_inner();

    log::debug!(
        "packaged {} entries into {} bytes",
        entries.len(),
        v_bytes.len()
    );
    Ok(v_bytes)
}

fn validate_archive_names(entries: &[SpecArchiveEntry]) -> TransformResult<()> {
    let mut set_names_seen: BTreeSet<&str> = BTreeSet::new();
    for entry in entries {
        let c_name = entry.archive_name.as_str();
        if c_name.trim().is_empty() {
            return Err(TransformError::Config(
                "Archive entry name must not be empty.".to_string(),
            ));
        }
        if !set_names_seen.insert(c_name) {
            return Err(TransformError::Config(format!(
                "Duplicate archive entry name: {c_name:?}"
            )));
        }
    }
    Ok(())
}

fn derive_zip_error(err: ZipError) -> TransformError {
    TransformError::Write(format!("zip write error: {err}"))
}
