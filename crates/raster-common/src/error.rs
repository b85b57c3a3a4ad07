//! Error taxonomy for the change-map pipeline.
//!
//! Every error here is fatal for the current run: the pipeline surfaces the
//! first failure and halts, and the CLI turns it into a non-zero exit with
//! the message below. Nothing is retried.

use thiserror::Error;

/// Result type alias using ChangeMapError.
pub type ChangeMapResult<T> = Result<T, ChangeMapError>;

/// Primary error type for change-map operations.
#[derive(Debug, Error)]
pub enum ChangeMapError {
    // === RGB mapping errors ===
    #[error("Invalid RGB mapping '{spec}': expected exactly 3 characters, got {length}")]
    InvalidMappingLength { spec: String, length: usize },

    #[error("Invalid RGB mapping character '{character}' at position {position}: expected one of 'a', 'b', '0'")]
    InvalidMappingCharacter { character: char, position: usize },

    // === Input errors ===
    #[error("Cannot read raster '{path}': {reason}")]
    UnreadableRaster { path: String, reason: String },

    // === Grid errors ===
    #[error("Cannot reconcile raster grids: {0}")]
    IncompatibleGrid(String),

    #[error("Bounding box does not intersect raster extent: {0}")]
    EmptyClip(String),

    // === Normalization errors ===
    #[error("Degenerate normalization range: low == high == {low} (would divide by zero)")]
    DegenerateRange { low: f32, high: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_messages_identify_offender() {
        let err = ChangeMapError::InvalidMappingCharacter {
            character: 'x',
            position: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('x'));
        assert!(msg.contains('1'));

        let err = ChangeMapError::InvalidMappingLength {
            spec: "ab".to_string(),
            length: 2,
        };
        assert!(err.to_string().contains("ab"));
    }
}
