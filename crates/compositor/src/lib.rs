//! Raster reconciliation and RGB channel-composition pipeline.
//!
//! Takes two co-registered single-band rasters and produces a three-channel
//! change-detection composite: grids are reconciled onto a common layout,
//! optionally clipped to a bounding box, jointly normalized onto one shared
//! [0,1] scale, and arranged into (row, col, band) channels according to a
//! 3-character mapping.

pub mod compose;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod subset;

pub use compose::{compose_rgb, CompositeImage};
pub use mapping::{ChannelSource, RgbMapping};
pub use normalize::{normalize, normalize_joint, NormalizationParams};
pub use pipeline::{run_pipeline, PipelineOptions};
pub use reconcile::{reconcile_grids, reproject_to_match};
pub use subset::clip_to_bbox;
