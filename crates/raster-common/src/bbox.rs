//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in the CRS of the rasters it subsets.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS, coordinates are in the projection's linear unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its four bounds.
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Build from the CLI argument order: MIN_LON MAX_LON MIN_LAT MAX_LAT.
    ///
    /// Rejects inverted bounds; ordering is validated here at the boundary
    /// rather than guessed at in the clip stage.
    pub fn from_cli_bounds(bounds: [f64; 4]) -> Result<Self, BboxOrderError> {
        let [min_lon, max_lon, min_lat, max_lat] = bounds;
        if min_lon >= max_lon {
            return Err(BboxOrderError::Longitude { min_lon, max_lon });
        }
        if min_lat >= max_lat {
            return Err(BboxOrderError::Latitude { min_lat, max_lat });
        }
        Ok(Self::new(min_lon, max_lon, min_lat, max_lat))
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lon < other.max_lon
            && self.max_lon > other.min_lon
            && self.min_lat < other.max_lat
            && self.max_lat > other.min_lat
    }

    /// Compute the intersection of two bounding boxes.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox {
            min_lon: self.min_lon.max(other.min_lon),
            max_lon: self.max_lon.min(other.max_lon),
            min_lat: self.min_lat.max(other.min_lat),
            max_lat: self.max_lat.min(other.max_lat),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxOrderError {
    #[error("Inverted longitude bounds: min_lon {min_lon} >= max_lon {max_lon}")]
    Longitude { min_lon: f64, max_lon: f64 },

    #[error("Inverted latitude bounds: min_lat {min_lat} >= max_lat {max_lat}")]
    Latitude { min_lat: f64, max_lat: f64 },
}
