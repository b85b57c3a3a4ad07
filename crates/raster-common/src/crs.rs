//! Coordinate Reference System identification.
//!
//! The pipeline never transforms between reference systems; it only needs to
//! tell whether two rasters claim the same one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CRS identification as read from a raster's georeferencing metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// An EPSG code from the GeoTIFF geo-key directory.
    Epsg(u16),
    /// No parseable CRS metadata. Treated as matching anything: invoking the
    /// tool asserts the inputs are co-registered.
    Unknown,
}

impl CrsCode {
    /// Whether two CRS codes can share one grid without reprojection.
    ///
    /// Only two *known, differing* codes are incompatible.
    pub fn compatible_with(&self, other: &CrsCode) -> bool {
        match (self, other) {
            (CrsCode::Epsg(a), CrsCode::Epsg(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsCode::Epsg(code) => write!(f, "EPSG:{}", code),
            CrsCode::Unknown => write!(f, "unknown"),
        }
    }
}
