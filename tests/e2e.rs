mod common;

use common::synthetic_image::{checkerboard_u8, rgb_ramp};
use tilt_shift::image::{Image, ImageU8, ImageView, Rgb};
use tilt_shift::{FilterParams, FocusRegion, TileOptions, TiltShift};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn uniform_gray_band_example_is_unchanged() {
    init_logging();
    let image = Image::filled(4, 4, 100.0f32);
    let params = FilterParams::new(FocusRegion::Band {
        center_row: 2,
        radius: 1,
    })
    .with_passes(1)
    .with_tiles(TileOptions::new(2, 2));
    let filter = TiltShift::new(params, 4, 4).unwrap();

    assert_eq!(filter.mask().row(2), &[0.0; 4]);
    assert_eq!(filter.mask().row(0), &[1.0; 4]);

    let out = filter.apply(&image).unwrap();
    for row in out.image.rows() {
        for &v in row {
            assert!((v - 100.0).abs() < 1e-4, "got {v}");
        }
    }
}

#[test]
fn uniform_colour_survives_any_number_of_passes() {
    let color: Rgb = [12.0, 180.0, 250.0];
    let image = Image::filled(37, 23, color);
    for passes in [1, 2, 5] {
        let params = FilterParams::new(FocusRegion::Disc {
            center_x: 10,
            center_y: 11,
            radius: 7,
        })
        .with_passes(passes)
        .with_tiles(TileOptions::new(8, 8));
        let filter = TiltShift::new(params, 37, 23).unwrap();
        let out = filter.apply(&image).unwrap();
        for px in &out.image.data {
            for c in 0..3 {
                assert!((px[c] - color[c]).abs() < 1e-3, "passes={passes}: {px:?}");
            }
        }
    }
}

#[test]
fn checkerboard_stays_sharp_inside_focus_band() {
    init_logging();
    let (width, height) = (64usize, 48usize);
    let buffer = checkerboard_u8(width, height, 4);
    let image = ImageU8::packed(width, height, 1, &buffer).to_gray().unwrap();

    let params = FilterParams::new(FocusRegion::Band {
        center_row: 24,
        radius: 10,
    })
    .with_tiles(TileOptions::new(16, 16));
    let filter = TiltShift::new(params, width, height).unwrap();
    let out = filter.apply(&image).unwrap();

    // |y - 24| <= 8 lies in the no-blur core.
    for y in 16..=32 {
        assert_eq!(out.image.row(y), image.row(y), "row {y} should be untouched");
    }

    let blurred_rows = (0..8).chain(40..48);
    let mut changed = 0;
    for y in blurred_rows {
        for x in 0..width {
            let v = out.image.get(x, y);
            assert!(v > 31.99 && v < 220.01, "({x},{y}) = {v}");
            if (v - image.get(x, y)).abs() > 1.0 {
                changed += 1;
            }
        }
    }
    assert!(changed > 100, "expected visible blur outside focus, changed={changed}");
}

#[test]
fn disc_focus_keeps_centre_and_blurs_corners() {
    let image = rgb_ramp(40, 40);
    let params = FilterParams::new(FocusRegion::Disc {
        center_x: 20,
        center_y: 20,
        radius: 10,
    })
    .with_tiles(TileOptions::new(8, 8));
    let filter = TiltShift::new(params, 40, 40).unwrap();
    assert!((filter.mask().get(29, 20) - 0.5).abs() < 1e-6);

    let out = filter.apply(&image).unwrap();
    assert_eq!(out.image.get(20, 20), image.get(20, 20));
    assert_eq!(out.image.get(24, 23), image.get(24, 23));
    assert_ne!(out.image.get(1, 1), image.get(1, 1));
}

#[test]
fn grading_applies_on_final_output() {
    let image = Image::filled(16, 16, [200.0f32, 100.0, 50.0]);
    let params = FilterParams::new(FocusRegion::Band {
        center_row: 8,
        radius: 4,
    })
    .with_grade(0.5, 0.0)
    .with_tiles(TileOptions::new(4, 4));
    let filter = TiltShift::new(params, 16, 16).unwrap();
    let out = filter.apply(&image).unwrap();
    for px in &out.image.data {
        assert!((px[0] - 100.0).abs() < 1e-3);
        assert!((px[1] - 50.0).abs() < 1e-3);
        assert!((px[2] - 25.0).abs() < 1e-3);
    }

    let contrast = FilterParams::new(FocusRegion::Band {
        center_row: 8,
        radius: 4,
    })
    .with_grade(0.0, 255.0)
    .with_tiles(TileOptions::new(4, 4));
    let filter = TiltShift::new(contrast, 16, 16).unwrap();
    let out = filter.apply(&image).unwrap();
    assert_eq!(out.image.to_u8()[..3], [255, 0, 0]);
}

#[test]
fn report_describes_the_run() {
    let image = Image::filled(20, 10, 0.0f32);
    let params = FilterParams::new(FocusRegion::Band {
        center_row: 5,
        radius: 2,
    })
    .with_passes(2)
    .with_tiles(TileOptions::new(8, 8));
    let filter = TiltShift::new(params, 20, 10).unwrap();
    let out = filter.apply(&image).unwrap();

    let report = &out.report;
    assert_eq!(report.input.tile_count, 3 * 2);
    assert_eq!(report.input.channels, 1);
    assert_eq!(report.passes.len(), 2);
    assert!(report.passes[1].last_pass);

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["input"]["tileCount"], 6);
    assert_eq!(json["passes"][0]["passIndex"], 1);
}
