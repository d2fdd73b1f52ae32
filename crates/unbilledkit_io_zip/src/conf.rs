//! Archive constants.

use zip::CompressionMethod;

/// Compression applied to every archive entry.
pub const COMPRESSION_METHOD_DEFAULT: CompressionMethod = CompressionMethod::Deflated;
