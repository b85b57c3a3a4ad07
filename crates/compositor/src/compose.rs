//! Channel composition: arranging two normalized rasters into an RGB image.

use crate::mapping::{ChannelSource, RgbMapping};
use raster_common::Raster;

/// A three-channel composite in (row, col, band) layout.
///
/// Samples are interleaved RGB floats in [0,1] (NaN for missing data),
/// row-major from the top-left: `pixels[(row * width + col) * 3 + band]`.
/// This is the terminal output of the pipeline; ownership passes to the
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeImage {
    pub width: usize,
    pub height: usize,
    pixels: Vec<f32>,
}

impl CompositeImage {
    /// Interleaved (row, col, band) samples.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Sample of one band at (col, row).
    pub fn value(&self, col: usize, row: usize, band: usize) -> f32 {
        self.pixels[(row * self.width + col) * 3 + band]
    }

    /// Copy out one full band plane, row-major.
    pub fn band(&self, band: usize) -> Vec<f32> {
        assert!(band < 3);
        self.pixels.iter().skip(band).step_by(3).copied().collect()
    }
}

/// Assemble two normalized rasters into an RGB composite.
///
/// Each mapping slot selects raster A, raster B, or an all-zero plane shaped
/// like raster A. The two rasters must already share one shape; reaching this
/// stage with mismatched shapes means the grid reconciler was bypassed, which
/// is an invariant violation, not user input.
pub fn compose_rgb(
    raster_a_norm: &Raster,
    raster_b_norm: &Raster,
    mapping: &RgbMapping,
) -> CompositeImage {
    assert_eq!(
        raster_a_norm.shape(),
        raster_b_norm.shape(),
        "compose_rgb requires reconciled rasters, got {:?} vs {:?}",
        raster_a_norm.shape(),
        raster_b_norm.shape()
    );

    let (height, width) = raster_a_norm.shape();
    let a = raster_a_norm.values();
    let b = raster_b_norm.values();
    let slots = mapping.slots();

    let mut pixels = Vec::with_capacity(width * height * 3);
    for idx in 0..width * height {
        for source in slots {
            pixels.push(match source {
                ChannelSource::ImageA => a[idx],
                ChannelSource::ImageB => b[idx],
                ChannelSource::Empty => 0.0,
            });
        }
    }

    CompositeImage {
        width,
        height,
        pixels,
    }
}
