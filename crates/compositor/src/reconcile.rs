//! Grid reconciliation: getting two rasters onto one common grid.

use raster_common::{ChangeMapError, ChangeMapResult, Raster};
use tracing::debug;

/// Resample `source` onto `target`'s grid using bilinear interpolation.
///
/// The output raster has exactly `target`'s grid (resolution, alignment and
/// extent); values come from `source`. Target cells whose centers fall
/// outside the source extent become NaN, as does any cell with a NaN
/// neighborhood in the source.
///
/// Fails with `IncompatibleGrid` when the two rasters carry known, differing
/// coordinate reference systems — this tool does not reproject between CRSs.
pub fn reproject_to_match(source: &Raster, target: &Raster) -> ChangeMapResult<Raster> {
    if !source.crs.compatible_with(&target.crs) {
        return Err(ChangeMapError::IncompatibleGrid(format!(
            "source CRS {} does not match target CRS {}",
            source.crs, target.crs
        )));
    }

    let src_grid = source.grid;
    let dst_grid = target.grid;
    let src = source.values();

    let mut output = vec![f32::NAN; dst_grid.len()];

    for j in 0..dst_grid.ny {
        for i in 0..dst_grid.nx {
            let (x, y) = match dst_grid.index_to_coord(i, j) {
                Some(coord) => coord,
                None => continue,
            };

            let (src_i, src_j) = src_grid.coord_to_fractional_index(x, y);

            // Outside the source's sample-center extent
            if src_i < 0.0
                || src_j < 0.0
                || src_i > (src_grid.nx - 1) as f64
                || src_j > (src_grid.ny - 1) as f64
            {
                continue;
            }

            let i1 = src_i.floor() as usize;
            let j1 = src_j.floor() as usize;
            let i2 = (i1 + 1).min(src_grid.nx - 1);
            let j2 = (j1 + 1).min(src_grid.ny - 1);

            let di = (src_i - i1 as f64) as f32;
            let dj = (src_j - j1 as f64) as f32;

            let v11 = src[src_grid.flat_index(i1, j1)];
            let v21 = src[src_grid.flat_index(i2, j1)];
            let v12 = src[src_grid.flat_index(i1, j2)];
            let v22 = src[src_grid.flat_index(i2, j2)];

            let top = v11 * (1.0 - di) + v21 * di;
            let bottom = v12 * (1.0 - di) + v22 * di;
            output[dst_grid.flat_index(i, j)] = top * (1.0 - dj) + bottom * dj;
        }
    }

    Ok(Raster::new(dst_grid, target.crs, output))
}

/// Bring two rasters onto a common grid.
///
/// Rasters with identical shapes are returned unchanged. Otherwise the finer
/// raster (smaller pixel area from the geotransform) is resampled onto the
/// coarser raster's grid. Pixel area, not a shape heuristic, decides which
/// grid is coarser, so rasters with unequal aspect ratios are ordered
/// correctly.
pub fn reconcile_grids(raster_a: Raster, raster_b: Raster) -> ChangeMapResult<(Raster, Raster)> {
    if raster_a.shape() == raster_b.shape() {
        return Ok((raster_a, raster_b));
    }

    let area_a = raster_a.grid.pixel_area();
    let area_b = raster_b.grid.pixel_area();

    debug!(
        shape_a = ?raster_a.shape(),
        shape_b = ?raster_b.shape(),
        pixel_area_a = area_a,
        pixel_area_b = area_b,
        "raster grids differ, resampling finer onto coarser"
    );

    if area_a < area_b {
        // A is finer: resample A onto B's grid
        let resampled_a = reproject_to_match(&raster_a, &raster_b)?;
        Ok((resampled_a, raster_b))
    } else {
        // B is finer (or tied): resample B onto A's grid
        let resampled_b = reproject_to_match(&raster_b, &raster_a)?;
        Ok((raster_a, resampled_b))
    }
}
