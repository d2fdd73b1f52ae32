//! Archive specification models.

/// One file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecArchiveEntry {
    /// Name of the entry inside the archive.
    pub archive_name: String,
    /// Entry content.
    pub v_bytes: Vec<u8>,
}

impl SpecArchiveEntry {
    pub fn new(archive_name: impl Into<String>, v_bytes: Vec<u8>) -> Self {
        Self {
            archive_name: archive_name.into(),
            v_bytes,
        }
    }
}
