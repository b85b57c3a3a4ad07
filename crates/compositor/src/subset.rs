//! Spatial subsetting: clipping a raster to a geographic bounding box.

use raster_common::{BoundingBox, ChangeMapError, ChangeMapResult, Raster};
use tracing::debug;

// Guards against a sample center landing exactly on a bbox edge being lost
// to floating-point rounding.
const EDGE_EPSILON: f64 = 1e-9;

/// Clip a raster to a bounding box, keeping every sample whose center lies
/// inside it.
///
/// The bbox is assumed to be in the raster's CRS; no reprojection happens
/// here. Fails with `EmptyClip` when the box does not intersect the raster
/// extent (or is too narrow to contain any sample center). The input raster
/// is untouched; a new raster with the reduced grid is returned.
pub fn clip_to_bbox(
    raster: &Raster,
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
) -> ChangeMapResult<Raster> {
    let bbox = BoundingBox::new(min_lon, max_lon, min_lat, max_lat);
    let extent = raster.extent();

    if bbox.intersection(&extent).is_none() {
        return Err(ChangeMapError::EmptyClip(format!(
            "bbox ({}, {}, {}, {}) vs raster extent ({}, {}, {}, {})",
            min_lon,
            max_lon,
            min_lat,
            max_lat,
            extent.min_lon,
            extent.max_lon,
            extent.min_lat,
            extent.max_lat
        )));
    }

    let grid = raster.grid;

    // Fractional index range covered by the bbox on each axis. The min/max
    // shuffle keeps this correct for either sign of dx/dy.
    let (ix_at_min, _) = grid.coord_to_fractional_index(min_lon, 0.0);
    let (ix_at_max, _) = grid.coord_to_fractional_index(max_lon, 0.0);
    let (_, jy_at_min) = grid.coord_to_fractional_index(0.0, min_lat);
    let (_, jy_at_max) = grid.coord_to_fractional_index(0.0, max_lat);

    let (i_lo, i_hi) = (ix_at_min.min(ix_at_max), ix_at_min.max(ix_at_max));
    let (j_lo, j_hi) = (jy_at_min.min(jy_at_max), jy_at_min.max(jy_at_max));

    let i0 = (i_lo - EDGE_EPSILON).ceil().max(0.0) as usize;
    let i1 = (i_hi + EDGE_EPSILON).floor().min((grid.nx - 1) as f64);
    let j0 = (j_lo - EDGE_EPSILON).ceil().max(0.0) as usize;
    let j1 = (j_hi + EDGE_EPSILON).floor().min((grid.ny - 1) as f64);

    if i1 < i0 as f64 || j1 < j0 as f64 {
        return Err(ChangeMapError::EmptyClip(format!(
            "bbox ({}, {}, {}, {}) contains no sample centers",
            min_lon, max_lon, min_lat, max_lat
        )));
    }

    let i1 = i1 as usize;
    let j1 = j1 as usize;
    let out_nx = i1 - i0 + 1;
    let out_ny = j1 - j0 + 1;

    debug!(
        i0, j0, out_nx, out_ny,
        "clipping raster to bbox index window"
    );

    let src = raster.values();
    let mut values = Vec::with_capacity(out_nx * out_ny);
    for j in j0..=j1 {
        for i in i0..=i1 {
            values.push(src[grid.flat_index(i, j)]);
        }
    }

    Ok(Raster::new(
        grid.window(i0, j0, out_nx, out_ny),
        raster.crs,
        values,
    ))
}
