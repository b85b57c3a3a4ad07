//! Single-band GeoTIFF loading into the common raster representation.
//!
//! A thin wrapper over the `tiff` crate: decodes the sample plane, reads the
//! georeferencing tags (ModelPixelScale, ModelTiepoint, GeoKeyDirectory)
//! straight from the IFD, and normalizes everything into a row-major
//! `Raster`. Degenerate band axes present in some products' file layouts
//! disappear here: downstream stages always see a plain 2-D plane.

pub mod error;
pub mod geokeys;

pub use error::{GeoTiffError, GeoTiffResult};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::{debug, warn};

use raster_common::{ChangeMapError, ChangeMapResult, CrsCode, GridSpec, Raster};

const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
const MODEL_TIEPOINT_TAG: u16 = 33922;
const GEO_KEY_DIRECTORY_TAG: u16 = 34735;
const GDAL_NODATA_TAG: u16 = 42113;

/// Open a single-band GeoTIFF as a `Raster`.
///
/// Any failure (missing file, multi-band input, unsupported format) is
/// reported as `UnreadableRaster` carrying the offending path. The file
/// handle is owned by the decoder and released on every exit path.
pub fn open(path: &Path) -> ChangeMapResult<Raster> {
    load(path).map_err(|e| ChangeMapError::UnreadableRaster {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load(path: &Path) -> GeoTiffResult<Raster> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;

    let colortype = decoder.colortype()?;
    if !matches!(colortype, ColorType::Gray(_)) {
        return Err(GeoTiffError::NotSingleBand(format!("{:?}", colortype)));
    }

    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);

    let (grid, crs) = read_georeferencing(&mut decoder, width, height);
    let nodata = read_nodata(&mut decoder);

    let mut values = decode_samples(decoder.read_image()?)?;
    if values.len() != width * height {
        return Err(GeoTiffError::SampleCountMismatch {
            got: values.len(),
            width,
            height,
        });
    }

    if let Some(nodata) = nodata {
        for v in &mut values {
            if *v == nodata {
                *v = f32::NAN;
            }
        }
    }

    debug!(
        path = %path.display(),
        width,
        height,
        crs = %crs,
        "loaded single-band raster"
    );

    Ok(Raster::new(grid, crs, values))
}

/// Read the geotransform and CRS from the GeoTIFF tags.
///
/// Files without ModelPixelScale/ModelTiepoint get a unit pixel grid
/// anchored at the origin; the caller asserted co-registration, so a missing
/// transform degrades to index-space alignment with a warning.
fn read_georeferencing<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    width: usize,
    height: usize,
) -> (GridSpec, CrsCode) {
    let pixel_scale = read_f64_tag(decoder, MODEL_PIXEL_SCALE_TAG);
    let tiepoint = read_f64_tag(decoder, MODEL_TIEPOINT_TAG);

    let grid = match (pixel_scale.as_deref(), tiepoint.as_deref()) {
        (Some([sx, sy, ..]), Some([i, j, _, x, y, _, ..])) => {
            // north-up: rows step southward
            let dx = *sx;
            let dy = -*sy;
            // the tiepoint references a pixel corner; samples sit at centers
            let first_x = x - i * dx + dx / 2.0;
            let first_y = y - j * dy + dy / 2.0;
            GridSpec::new(width, height, dx, dy, first_x, first_y)
        }
        _ => {
            warn!("no geotransform tags found, assuming unit pixel grid at the origin");
            GridSpec::new(
                width,
                height,
                1.0,
                -1.0,
                0.5,
                height as f64 - 0.5,
            )
        }
    };

    let crs = decoder
        .find_tag(Tag::Unknown(GEO_KEY_DIRECTORY_TAG))
        .ok()
        .flatten()
        .and_then(|value| value.into_u32_vec().ok())
        .map(|raw| raw.into_iter().map(|v| v as u16).collect::<Vec<u16>>())
        .and_then(|directory| geokeys::epsg_code(&directory))
        .map(CrsCode::Epsg)
        .unwrap_or(CrsCode::Unknown);

    (grid, crs)
}

fn read_f64_tag<R: Read + Seek>(decoder: &mut Decoder<R>, tag: u16) -> Option<Vec<f64>> {
    decoder
        .find_tag(Tag::Unknown(tag))
        .ok()
        .flatten()
        .and_then(|value| value.into_f64_vec().ok())
}

/// GDAL writes the nodata marker as an ASCII tag.
fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f32> {
    decoder
        .get_tag_ascii_string(Tag::Unknown(GDAL_NODATA_TAG))
        .ok()
        .and_then(|s| s.trim().parse::<f32>().ok())
}

/// Convert any supported sample format to an f32 plane.
fn decode_samples(result: DecodingResult) -> GeoTiffResult<Vec<f32>> {
    let values = match result {
        DecodingResult::U8(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        _ => return Err(GeoTiffError::UnsupportedPixelFormat),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tiff::encoder::{colortype, TiffEncoder};

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = open(Path::new("/nonexistent/image.tif")).unwrap_err();
        match err {
            ChangeMapError::UnreadableRaster { path, .. } => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("expected UnreadableRaster, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_file_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a tiff at all").unwrap();
        file.flush().unwrap();

        let err = open(file.path()).unwrap_err();
        assert!(matches!(err, ChangeMapError::UnreadableRaster { .. }));
    }

    #[test]
    fn test_plain_gray_tiff_round_trip() {
        // a gray TIFF without geotags loads on the fallback unit grid
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut encoder = TiffEncoder::new(file.reopen().unwrap()).unwrap();
            encoder
                .write_image::<colortype::Gray32Float>(2, 2, &[0.0, 10.0, 20.0, 30.0])
                .unwrap();
        }

        let raster = open(file.path()).unwrap();
        assert_eq!(raster.shape(), (2, 2));
        assert_eq!(raster.crs, CrsCode::Unknown);
        assert_eq!(raster.values(), &[0.0, 10.0, 20.0, 30.0]);
        // unit grid anchored at the origin, north-up
        assert_eq!(raster.grid.dx, 1.0);
        assert_eq!(raster.grid.dy, -1.0);
    }

    #[test]
    fn test_rgb_tiff_is_rejected_as_multiband() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut encoder = TiffEncoder::new(file.reopen().unwrap()).unwrap();
            encoder
                .write_image::<colortype::RGB8>(1, 1, &[10, 20, 30])
                .unwrap();
        }

        let err = open(file.path()).unwrap_err();
        match err {
            ChangeMapError::UnreadableRaster { reason, .. } => {
                assert!(reason.contains("single-band"), "reason: {}", reason);
            }
            other => panic!("expected UnreadableRaster, got {:?}", other),
        }
    }
}
