//! Error types for GeoTIFF loading.

use thiserror::Error;

/// Result type for GeoTIFF loader operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

/// Error types for GeoTIFF loading.
#[derive(Debug, Error)]
pub enum GeoTiffError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error
    #[error("TIFF decoding error: {0}")]
    Decode(#[from] tiff::TiffError),

    /// Input has more than one band
    #[error("expected a single-band raster, got color type {0}")]
    NotSingleBand(String),

    /// Sample format this tool does not handle
    #[error("unsupported pixel format")]
    UnsupportedPixelFormat,

    /// Decoded sample count does not match the image dimensions
    #[error("malformed image: got {got} samples for a {width}x{height} raster")]
    SampleCountMismatch {
        got: usize,
        width: usize,
        height: usize,
    },
}
