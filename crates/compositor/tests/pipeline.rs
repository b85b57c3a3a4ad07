//! End-to-end pipeline scenario over small literal rasters.

use compositor::{run_pipeline, PipelineOptions, RgbMapping};
use raster_common::{BoundingBox, ChangeMapError, CrsCode, GridSpec, Raster};

fn raster_2x2(values: Vec<f32>) -> Raster {
    let grid = GridSpec::new(2, 2, 1.0, -1.0, 0.5, 1.5);
    Raster::new(grid, CrsCode::Epsg(4326), values)
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
}

#[test]
fn change_composite_over_joint_full_range() {
    // before: [[0,10],[20,30]], after: [[5,15],[25,35]]
    let before = raster_2x2(vec![0.0, 10.0, 20.0, 30.0]);
    let after = raster_2x2(vec![5.0, 15.0, 25.0, 35.0]);

    let options = PipelineOptions {
        mapping: RgbMapping::parse("aab").unwrap(),
        bbox: None,
        stretch: false,
    };

    let composite = run_pipeline(before, after, &options).unwrap();

    assert_eq!(composite.width, 2);
    assert_eq!(composite.height, 2);

    // joint range is [0, 35]: red and green carry the before image
    let expected_a = [0.0, 10.0 / 35.0, 20.0 / 35.0, 30.0 / 35.0];
    let expected_b = [5.0 / 35.0, 15.0 / 35.0, 25.0 / 35.0, 1.0];

    for (idx, (&ea, &eb)) in expected_a.iter().zip(expected_b.iter()).enumerate() {
        let (col, row) = (idx % 2, idx / 2);
        assert_close(composite.value(col, row, 0), ea);
        assert_close(composite.value(col, row, 1), ea);
        assert_close(composite.value(col, row, 2), eb);
    }
}

#[test]
fn stretch_flag_selects_pooled_2_98_percentiles() {
    let before = raster_2x2(vec![0.0, 10.0, 20.0, 30.0]);
    let after = raster_2x2(vec![5.0, 15.0, 25.0, 35.0]);

    let options = PipelineOptions {
        mapping: RgbMapping::parse("aab").unwrap(),
        bbox: None,
        stretch: true,
    };

    let composite = run_pipeline(before, after, &options).unwrap();

    // 2nd/98th percentiles of the pooled samples 0,5,...,35: 0.7 and 34.3
    let (low, span) = (0.7_f32, 34.3 - 0.7);
    assert_close(composite.value(1, 0, 0), (10.0 - low) / span);
    assert_close(composite.value(0, 1, 2), (25.0 - low) / span);
    // pooled extremes fall outside the stretched range and clamp
    assert_close(composite.value(0, 0, 0), 0.0);
    assert_close(composite.value(1, 1, 2), 1.0);
}

#[test]
fn identical_inputs_yield_grayscale_composite() {
    let before = raster_2x2(vec![0.0, 10.0, 20.0, 30.0]);
    let after = before.clone();

    let options = PipelineOptions {
        mapping: RgbMapping::parse("aab").unwrap(),
        bbox: None,
        stretch: false,
    };

    let composite = run_pipeline(before, after, &options).unwrap();

    // no change anywhere: all three channels agree at every pixel
    for row in 0..2 {
        for col in 0..2 {
            let r = composite.value(col, row, 0);
            assert_close(composite.value(col, row, 1), r);
            assert_close(composite.value(col, row, 2), r);
        }
    }
}

#[test]
fn non_intersecting_bbox_aborts_the_run() {
    let before = raster_2x2(vec![0.0, 10.0, 20.0, 30.0]);
    let after = raster_2x2(vec![5.0, 15.0, 25.0, 35.0]);

    let options = PipelineOptions {
        mapping: RgbMapping::parse("aab").unwrap(),
        bbox: Some(BoundingBox::new(100.0, 110.0, 40.0, 50.0)),
        stretch: false,
    };

    let err = run_pipeline(before, after, &options).unwrap_err();
    assert!(matches!(err, ChangeMapError::EmptyClip(_)));
}

#[test]
fn constant_scene_aborts_with_degenerate_range() {
    let before = raster_2x2(vec![7.0; 4]);
    let after = raster_2x2(vec![7.0; 4]);

    let options = PipelineOptions {
        mapping: RgbMapping::parse("aab").unwrap(),
        bbox: None,
        stretch: false,
    };

    let err = run_pipeline(before, after, &options).unwrap_err();
    assert!(matches!(err, ChangeMapError::DegenerateRange { .. }));
}

#[test]
fn mixed_resolution_inputs_compose_on_the_coarser_grid() {
    // before at 0.5 deg pixels (4x4), after at 1.0 deg pixels (2x2),
    // covering the same area
    let fine_grid = GridSpec::new(4, 4, 0.5, -0.5, 0.25, 1.75);
    let before = Raster::new(fine_grid, CrsCode::Epsg(4326), vec![10.0; 16]);
    let after = raster_2x2(vec![0.0, 10.0, 20.0, 30.0]);

    let options = PipelineOptions {
        mapping: RgbMapping::parse("a0b").unwrap(),
        bbox: None,
        stretch: false,
    };

    let composite = run_pipeline(before, after, &options).unwrap();
    assert_eq!(composite.width, 2);
    assert_eq!(composite.height, 2);
    // green slot is empty
    assert!(composite.band(1).iter().all(|&v| v == 0.0));
}
