//! Pipeline orchestration: load-to-composite sequencing.

use crate::compose::{compose_rgb, CompositeImage};
use crate::mapping::RgbMapping;
use crate::normalize::{normalize_joint, NormalizationParams};
use crate::reconcile::reconcile_grids;
use crate::subset::clip_to_bbox;
use raster_common::{BoundingBox, ChangeMapResult, Raster};
use tracing::info;

/// Percentile pair used by the --stretch contrast stretch.
const STRETCH_PERCENTILES: (f32, f32) = (2.0, 98.0);

/// Per-run pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Channel assignment for the composite
    pub mapping: RgbMapping,
    /// Optional area of interest, in the rasters' CRS
    pub bbox: Option<BoundingBox>,
    /// Percentile contrast stretch (2nd/98th) instead of the full range
    pub stretch: bool,
}

/// Run the full composite pipeline over two loaded rasters.
///
/// Sequences grid reconciliation, optional bbox subsetting, joint
/// normalization and channel composition. The first failing stage aborts the
/// run; no partial composite is produced.
pub fn run_pipeline(
    raster_a: Raster,
    raster_b: Raster,
    options: &PipelineOptions,
) -> ChangeMapResult<CompositeImage> {
    let (mut raster_a, mut raster_b) = reconcile_grids(raster_a, raster_b)?;
    info!(shape = ?raster_a.shape(), "rasters reconciled to common grid");

    if let Some(bbox) = options.bbox {
        raster_a = clip_to_bbox(&raster_a, bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat)?;
        raster_b = clip_to_bbox(&raster_b, bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat)?;
        info!(shape = ?raster_a.shape(), "rasters clipped to bounding box");
    }

    let params = if options.stretch {
        NormalizationParams::stretch(STRETCH_PERCENTILES.0, STRETCH_PERCENTILES.1)
    } else {
        NormalizationParams::full_range()
    };

    let (norm_a, norm_b) = normalize_joint(&raster_a, &raster_b, &params)?;
    info!(stretch = options.stretch, "rasters jointly normalized");

    Ok(compose_rgb(&norm_a, &norm_b, &options.mapping))
}
