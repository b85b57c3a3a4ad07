//! Common types shared across the change-map crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod raster;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{ChangeMapError, ChangeMapResult};
pub use grid::GridSpec;
pub use raster::Raster;
