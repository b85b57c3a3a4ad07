//! Change-detection map CLI.
//!
//! Loads two single-band rasters, reconciles their grids, optionally clips
//! to a bounding box, jointly normalizes them onto one shared scale and
//! renders an RGB composite PNG. Any pipeline failure exits non-zero with a
//! descriptive message.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use compositor::{run_pipeline, PipelineOptions, RgbMapping};
use raster_common::BoundingBox;

#[derive(Parser, Debug)]
#[command(name = "change-map")]
#[command(about = "Make a change detection map from two single band satellite images")]
struct Args {
    /// Path to the first ("before") input image
    #[arg(short = 'a', long = "image_a")]
    image_a: PathBuf,

    /// Path to the second ("after") input image
    #[arg(short = 'b', long = "image_b")]
    image_b: PathBuf,

    /// Channel assignment: 3 characters over {a, b, 0}, R/G/B order
    /// (e.g. "aab" puts the before image on red+green, after on blue)
    #[arg(long, default_value = "aab")]
    rgb: String,

    /// Clip to a bounding box: MIN_LON MAX_LON MIN_LAT MAX_LAT,
    /// in the rasters' CRS
    #[arg(long, num_args = 4, value_names = ["MIN_LON", "MAX_LON", "MIN_LAT", "MAX_LAT"])]
    bbox: Option<Vec<f64>>,

    /// Contrast stretch to the 2nd/98th percentiles instead of the full range
    #[arg(long)]
    stretch: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "change-map.png")]
    output: PathBuf,

    /// Log progress (INFO level)
    #[arg(short, long)]
    verbose: bool,

    /// Log everything (DEBUG level)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mapping = RgbMapping::parse(&args.rgb)?;

    let bbox = match args.bbox {
        Some(bounds) => {
            let bounds: [f64; 4] = bounds
                .try_into()
                .expect("clap enforces exactly 4 bbox values");
            Some(BoundingBox::from_cli_bounds(bounds)?)
        }
        None => None,
    };

    info!(path = %args.image_a.display(), "loading image A");
    let raster_a = geotiff_parser::open(&args.image_a)?;
    info!(path = %args.image_b.display(), "loading image B");
    let raster_b = geotiff_parser::open(&args.image_b)?;

    let options = PipelineOptions {
        mapping,
        bbox,
        stretch: args.stretch,
    };
    let composite = run_pipeline(raster_a, raster_b, &options)?;

    let png = renderer::render_png(composite)?;
    fs::write(&args.output, &png)
        .with_context(|| format!("cannot write output to '{}'", args.output.display()))?;

    info!(path = %args.output.display(), "change map written");
    Ok(())
}
