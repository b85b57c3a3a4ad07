//! In-memory georeferenced raster.

use crate::{BoundingBox, CrsCode, GridSpec};

/// A single-band georeferenced raster.
///
/// Samples are `f32`, stored flat in row-major order matching the grid spec.
/// Missing data is NaN. Pipeline stages never mutate a raster in place; each
/// transformation returns a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub grid: GridSpec,
    pub crs: CrsCode,
    values: Vec<f32>,
}

impl Raster {
    /// Create a raster from a grid spec and row-major samples.
    ///
    /// The sample count must match the grid. A mismatch is a programming
    /// error in the constructing stage, not a user input problem.
    pub fn new(grid: GridSpec, crs: CrsCode, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            grid.len(),
            "raster sample count {} does not match grid {}x{}",
            values.len(),
            grid.nx,
            grid.ny
        );
        Self { grid, crs, values }
    }

    /// Row-major samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.grid.ny, self.grid.nx)
    }

    /// Sample at column `i`, row `j`, or None when out of bounds.
    pub fn value(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.grid.nx || j >= self.grid.ny {
            return None;
        }
        Some(self.values[self.grid.flat_index(i, j)])
    }

    /// Geographic extent of the raster (sample centers).
    pub fn extent(&self) -> BoundingBox {
        self.grid.bbox()
    }

    /// Observed (min, max) of the samples, ignoring NaN.
    ///
    /// Returns None when every sample is NaN.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut has_valid = false;

        for &v in &self.values {
            if v.is_nan() {
                continue;
            }
            has_valid = true;
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        if has_valid {
            Some((min, max))
        } else {
            None
        }
    }

    /// New raster with the same grid and CRS, samples transformed by `f`.
    pub fn map_values<F>(&self, f: F) -> Raster
    where
        F: Fn(f32) -> f32,
    {
        Raster {
            grid: self.grid,
            crs: self.crs,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_raster() -> Raster {
        let grid = GridSpec::new(2, 2, 1.0, -1.0, 0.5, 1.5);
        Raster::new(grid, CrsCode::Epsg(4326), vec![0.0, 10.0, 20.0, 30.0])
    }

    #[test]
    fn test_shape_and_access() {
        let raster = test_raster();
        assert_eq!(raster.shape(), (2, 2));
        assert_eq!(raster.value(1, 0), Some(10.0));
        assert_eq!(raster.value(0, 1), Some(20.0));
        assert_eq!(raster.value(2, 0), None);
    }

    #[test]
    fn test_value_range_ignores_nan() {
        let grid = GridSpec::new(2, 2, 1.0, -1.0, 0.5, 1.5);
        let raster = Raster::new(
            grid,
            CrsCode::Unknown,
            vec![f32::NAN, 5.0, -2.0, f32::NAN],
        );
        assert_eq!(raster.value_range(), Some((-2.0, 5.0)));

        let all_nan = Raster::new(grid, CrsCode::Unknown, vec![f32::NAN; 4]);
        assert_eq!(all_nan.value_range(), None);
    }

    #[test]
    fn test_map_values_returns_new_raster() {
        let raster = test_raster();
        let doubled = raster.map_values(|v| v * 2.0);
        assert_eq!(doubled.value(1, 1), Some(60.0));
        // original untouched
        assert_eq!(raster.value(1, 1), Some(30.0));
    }

    #[test]
    #[should_panic]
    fn test_sample_count_mismatch_panics() {
        let grid = GridSpec::new(2, 2, 1.0, -1.0, 0.5, 1.5);
        Raster::new(grid, CrsCode::Unknown, vec![1.0, 2.0]);
    }
}
