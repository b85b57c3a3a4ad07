//! Value normalization onto a common [0,1] scale.
//!
//! The joint variant is the primary path for change detection: both rasters
//! are scaled by one shared range (pooled across the two images) so that
//! "before" and "after" stay directly comparable. Normalizing each image by
//! its own range would erase exactly the differences the composite is meant
//! to show.

use raster_common::{ChangeMapError, ChangeMapResult, Raster};
use tracing::debug;

/// How the normalization range is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationParams {
    /// None = full observed range; Some((lo, hi)) = percentile contrast
    /// stretch anchored at the lo-th and hi-th percentiles.
    pub percentile_range: Option<(f32, f32)>,
    /// Clamp the scaled output to [0,1]. Out-of-range samples appear under
    /// percentile stretching, where low/high sit inside the observed range.
    pub clip_to_unit: bool,
}

impl Default for NormalizationParams {
    fn default() -> Self {
        Self {
            percentile_range: None,
            clip_to_unit: true,
        }
    }
}

impl NormalizationParams {
    /// Full observed range, clamped output.
    pub fn full_range() -> Self {
        Self::default()
    }

    /// Percentile contrast stretch, clamped output.
    pub fn stretch(min_pct: f32, max_pct: f32) -> Self {
        Self {
            percentile_range: Some((min_pct, max_pct)),
            clip_to_unit: true,
        }
    }
}

/// Normalize a single raster by its own range.
///
/// Fails with `DegenerateRange` when the chosen range has zero width (e.g. a
/// constant-valued raster), which would otherwise divide by zero.
pub fn normalize(raster: &Raster, params: &NormalizationParams) -> ChangeMapResult<Raster> {
    let (low, high) = compute_range(raster.values(), params)?;
    debug!(low, high, "normalizing raster");
    Ok(scale_raster(raster, low, high, params.clip_to_unit))
}

/// Normalize two rasters by their pooled range.
///
/// Low and high (or the percentile pair) are computed over the union of both
/// rasters' samples, then each raster is scaled by that shared range.
pub fn normalize_joint(
    raster_a: &Raster,
    raster_b: &Raster,
    params: &NormalizationParams,
) -> ChangeMapResult<(Raster, Raster)> {
    let mut pooled = Vec::with_capacity(raster_a.values().len() + raster_b.values().len());
    pooled.extend_from_slice(raster_a.values());
    pooled.extend_from_slice(raster_b.values());

    let (low, high) = compute_range(&pooled, params)?;
    debug!(low, high, "jointly normalizing raster pair");

    Ok((
        scale_raster(raster_a, low, high, params.clip_to_unit),
        scale_raster(raster_b, low, high, params.clip_to_unit),
    ))
}

/// Compute the (low, high) anchors for the given samples.
fn compute_range(values: &[f32], params: &NormalizationParams) -> ChangeMapResult<(f32, f32)> {
    let (low, high) = match params.percentile_range {
        None => min_max(values),
        Some((min_pct, max_pct)) => {
            let mut valid: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
            valid.sort_by(f32::total_cmp);
            (percentile(&valid, min_pct), percentile(&valid, max_pct))
        }
    };

    if !(high > low) {
        // Equal anchors (constant data), or NaN anchors (no valid samples)
        return Err(ChangeMapError::DegenerateRange { low, high });
    }

    Ok((low, high))
}

/// NaN-aware min/max. Returns (NaN, NaN) when no sample is valid.
fn min_max(values: &[f32]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut has_valid = false;

    for &v in values {
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
        (min, max)
    } else {
        (f32::NAN, f32::NAN)
    }
}

/// Linear-interpolated percentile over an already-sorted slice.
///
/// Returns NaN for an empty slice.
fn percentile(sorted: &[f32], pct: f32) -> f32 {
    if sorted.is_empty() {
        return f32::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (pct.clamp(0.0, 100.0) / 100.0) as f64 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = (rank - lower as f64) as f32;

    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}

/// Scale samples by (v - low) / (high - low); NaN passes through.
fn scale_raster(raster: &Raster, low: f32, high: f32, clip_to_unit: bool) -> Raster {
    let span = high - low;
    raster.map_values(|v| {
        let scaled = (v - low) / span;
        if clip_to_unit {
            scaled.clamp(0.0, 1.0)
        } else {
            scaled
        }
    })
}
