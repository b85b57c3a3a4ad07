//! GeoTIFF geo-key directory parsing.
//!
//! The GeoKeyDirectoryTag (34735) holds u16 quadruples: a 4-entry header
//! (version, revision, minor revision, key count) followed by one
//! (key id, tag location, count, value) entry per key. Short scalar values
//! live inline in the fourth field when the tag location is 0.

/// GTModelTypeGeoKey
const MODEL_TYPE_KEY: u16 = 1024;
/// GeographicTypeGeoKey: EPSG code of a geographic CRS
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
/// ProjectedCSTypeGeoKey: EPSG code of a projected CRS
const PROJECTED_CS_TYPE_KEY: u16 = 3072;

/// Extract the EPSG code from a geo-key directory, if one is declared.
///
/// A projected CRS key wins over a geographic one, matching how GeoTIFF
/// writers emit both for projected data. Returns None for directories that
/// are truncated, inline-less, or carry user-defined (32767) codes.
pub fn epsg_code(directory: &[u16]) -> Option<u16> {
    if directory.len() < 4 {
        return None;
    }

    let key_count = directory[3] as usize;
    let mut geographic = None;
    let mut projected = None;

    for k in 0..key_count {
        let entry = directory.get(4 + k * 4..8 + k * 4)?;
        let (key_id, tag_location, count, value) = (entry[0], entry[1], entry[2], entry[3]);

        // only inline short scalars carry an EPSG code directly
        if tag_location != 0 || count != 1 {
            continue;
        }

        match key_id {
            GEOGRAPHIC_TYPE_KEY => geographic = Some(value),
            PROJECTED_CS_TYPE_KEY => projected = Some(value),
            MODEL_TYPE_KEY => {}
            _ => {}
        }
    }

    // 32767 is "user-defined" in GeoTIFF, not a usable EPSG code
    projected
        .or(geographic)
        .filter(|&code| code != 0 && code != 32767)
}
