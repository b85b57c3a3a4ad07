//! Grid specifications for georeferenced raster data.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// Specification of a regular raster grid.
///
/// Samples are stored row-major starting at the top-left grid point, so for
/// north-up imagery `dy` is negative (rows step southward). `first_x` and
/// `first_y` locate the *center* of the top-left sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns (longitude/X direction)
    pub nx: usize,
    /// Number of rows (latitude/Y direction)
    pub ny: usize,
    /// Pixel size in X direction (degrees or meters depending on CRS)
    pub dx: f64,
    /// Pixel size in Y direction (negative for north-up data)
    pub dy: f64,
    /// Center X coordinate of the first (top-left) sample
    pub first_x: f64,
    /// Center Y coordinate of the first (top-left) sample
    pub first_y: f64,
}

impl GridSpec {
    /// Create a new grid specification.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64, first_x: f64, first_y: f64) -> Self {
        Self {
            nx,
            ny,
            dx,
            dy,
            first_x,
            first_y,
        }
    }

    /// Calculate the bounding box of this grid (sample centers).
    pub fn bbox(&self) -> BoundingBox {
        let last_x = self.first_x + (self.nx.saturating_sub(1)) as f64 * self.dx;
        let last_y = self.first_y + (self.ny.saturating_sub(1)) as f64 * self.dy;

        BoundingBox {
            min_lon: self.first_x.min(last_x),
            max_lon: self.first_x.max(last_x),
            min_lat: self.first_y.min(last_y),
            max_lat: self.first_y.max(last_y),
        }
    }

    /// Coordinates of the sample at column `i`, row `j`.
    pub fn index_to_coord(&self, i: usize, j: usize) -> Option<(f64, f64)> {
        if i >= self.nx || j >= self.ny {
            return None;
        }
        Some((
            self.first_x + i as f64 * self.dx,
            self.first_y + j as f64 * self.dy,
        ))
    }

    /// Fractional (column, row) index of a coordinate, unclamped.
    ///
    /// Used by resampling to interpolate between neighboring samples; callers
    /// decide how to treat positions outside [0, nx-1] x [0, ny-1].
    pub fn coord_to_fractional_index(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.first_x) / self.dx, (y - self.first_y) / self.dy)
    }

    /// Convert coordinates to the nearest in-bounds grid index.
    pub fn coord_to_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (i_f, j_f) = self.coord_to_fractional_index(x, y);

        let i = i_f.round() as isize;
        let j = j_f.round() as isize;

        if i < 0 || j < 0 || i >= self.nx as isize || j >= self.ny as isize {
            return None;
        }

        Some((i as usize, j as usize))
    }

    /// Get the 1D array index for a 2D grid position (row-major).
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// Absolute pixel area in coordinate units, the resolution measure used
    /// to decide which of two grids is coarser.
    pub fn pixel_area(&self) -> f64 {
        (self.dx * self.dy).abs()
    }

    /// Grid spec of a rectangular window of this grid.
    ///
    /// `i0`/`j0` are the window's top-left indices; the window keeps this
    /// grid's resolution and alignment.
    pub fn window(&self, i0: usize, j0: usize, nx: usize, ny: usize) -> GridSpec {
        GridSpec {
            nx,
            ny,
            dx: self.dx,
            dy: self.dy,
            first_x: self.first_x + i0 as f64 * self.dx,
            first_y: self.first_y + j0 as f64 * self.dy,
        }
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }
}
