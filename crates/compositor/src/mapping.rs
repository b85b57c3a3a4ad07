//! The 3-character RGB channel-assignment mini-language.
//!
//! Each character assigns one channel, in R, G, B order:
//! - `'a'` — use image A
//! - `'b'` — use image B
//! - `'0'` — leave the channel empty (all zeros)
//!
//! `"aab"` therefore puts the "before" image on red and green and the
//! "after" image on blue, the classic change-detection composite.

use raster_common::{ChangeMapError, ChangeMapResult};

/// What a single RGB channel is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSource {
    /// Use image A's normalized samples
    ImageA,
    /// Use image B's normalized samples
    ImageB,
    /// All-zero channel
    Empty,
}

/// A parsed channel assignment: one source per slot, slot 0 = Red,
/// slot 1 = Green, slot 2 = Blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbMapping {
    pub red: ChannelSource,
    pub green: ChannelSource,
    pub blue: ChannelSource,
}

impl RgbMapping {
    /// Parse a 3-character mapping string.
    ///
    /// Fails with `InvalidMappingLength` when the string is not exactly
    /// three characters, and with `InvalidMappingCharacter` (naming the
    /// character and its position) for anything outside `{a, b, 0}`.
    pub fn parse(spec: &str) -> ChangeMapResult<Self> {
        let chars: Vec<char> = spec.chars().collect();
        if chars.len() != 3 {
            return Err(ChangeMapError::InvalidMappingLength {
                spec: spec.to_string(),
                length: chars.len(),
            });
        }

        let mut slots = [ChannelSource::Empty; 3];
        for (position, &character) in chars.iter().enumerate() {
            slots[position] = match character {
                'a' => ChannelSource::ImageA,
                'b' => ChannelSource::ImageB,
                '0' => ChannelSource::Empty,
                _ => {
                    return Err(ChangeMapError::InvalidMappingCharacter {
                        character,
                        position,
                    })
                }
            };
        }

        Ok(Self {
            red: slots[0],
            green: slots[1],
            blue: slots[2],
        })
    }

    /// The three slots in R, G, B order.
    pub fn slots(&self) -> [ChannelSource; 3] {
        [self.red, self.green, self.blue]
    }
}
