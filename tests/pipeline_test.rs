// Sheet building and job execution

use std::path::Path;

use image::{Rgba, RgbaImage};

use photo_sheet::compositor::WHITE;
use photo_sheet::config::merged::MergedConfig;
use photo_sheet::error::SheetError;
use photo_sheet::layout::RecipeKind;
use photo_sheet::pipeline::job_runner::{JobConfig, ResolvedInput, run_job};
use photo_sheet::pipeline::orchestrator::run_all_jobs;
use photo_sheet::pipeline::sheet_builder::{SheetInput, build_sheet};
use photo_sheet::segmentation::UniformOracle;

fn plain_config() -> MergedConfig {
    MergedConfig {
        mask_threshold: 0.7,
        remove_background: false,
        border_width: None,
        border_color: Rgba([0, 0, 0, 255]),
        max_total_scale: 7.0,
        jpeg_quality: 95,
        auto_crop: false,
    }
}

fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]))
}

fn near(a: &Rgba<u8>, b: &Rgba<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

fn save_png(path: &Path, image: &RgbaImage) {
    image.save(path).expect("save test image");
}

// ============================================================
// 1. build_sheet
// ============================================================

#[test]
fn test_build_small_passport_with_auto_crop() {
    let config = MergedConfig {
        auto_crop: true,
        ..plain_config()
    };
    let inputs = [SheetInput::new(solid(600, 800, [40, 80, 120]))];
    let canvas = build_sheet(RecipeKind::SmallPassport12Up, &inputs, &[], &config).unwrap();
    assert_eq!(canvas.dimensions(), (1181, 1772));
    // Center of the first cell is covered by the photo.
    assert!(near(
        canvas.get_pixel(25 + 180, 18 + 210),
        &Rgba([40, 80, 120, 255])
    ));
}

#[test]
fn test_build_with_border() {
    let config = MergedConfig {
        border_width: Some(8),
        ..plain_config()
    };
    let inputs = [SheetInput::new(solid(360, 420, [250, 250, 250]))];
    let canvas = build_sheet(RecipeKind::SmallPassport12Up, &inputs, &[], &config).unwrap();
    assert_eq!(*canvas.get_pixel(25, 18), Rgba([0, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(25 + 7, 18 + 100), Rgba([0, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(25 + 8, 18 + 100), Rgba([250, 250, 250, 255]));
}

#[test]
fn test_removed_background_shows_white_canvas() {
    let config = MergedConfig {
        remove_background: true,
        ..plain_config()
    };
    let inputs = [SheetInput::new(solid(360, 420, [10, 10, 10]))
        .with_oracle(Box::new(UniformOracle(0.0)))];
    let canvas = build_sheet(RecipeKind::SmallPassport12Up, &inputs, &[], &config).unwrap();
    assert!(canvas.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_background_removal_without_mask_fails() {
    let config = MergedConfig {
        remove_background: true,
        ..plain_config()
    };
    let inputs = [SheetInput::new(solid(360, 420, [10, 10, 10]))];
    let result = build_sheet(RecipeKind::SmallPassport12Up, &inputs, &[], &config);
    assert!(matches!(result, Err(SheetError::SegmentationError(_))));
}

#[test]
fn test_build_sheet_empty_input() {
    let result = build_sheet(RecipeKind::CollageA4, &[], &[], &plain_config());
    assert!(matches!(result, Err(SheetError::EmptyInput)));
}

#[test]
fn test_build_collage_clamps_scale_to_range() {
    // One 200px image may grow to at most 2.0x.
    let inputs = [SheetInput::new(solid(200, 200, [10, 200, 30]))];
    let canvas = build_sheet(RecipeKind::CollageA4, &inputs, &[5.0], &plain_config()).unwrap();
    assert_eq!(canvas.dimensions(), (2480, 3508));
    assert_ne!(*canvas.get_pixel(465, 465), WHITE);
    assert_eq!(*canvas.get_pixel(475, 100), WHITE);
}

#[test]
fn test_build_collage_requires_one_scale_per_image() {
    let inputs = [SheetInput::new(solid(200, 200, [1, 2, 3]))];
    let result = build_sheet(RecipeKind::CollageA4, &inputs, &[], &plain_config());
    assert!(matches!(result, Err(SheetError::InputCountMismatch { .. })));
}

// ============================================================
// 2. run_job / run_all_jobs
// ============================================================

#[test]
fn test_run_job_writes_png_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("face.png");
    save_png(&input, &solid(360, 420, [90, 30, 60]));

    let config = JobConfig {
        recipe: RecipeKind::SmallPassport12Up,
        inputs: vec![ResolvedInput {
            path: input,
            mask: None,
        }],
        output_path: dir.path().join("out").join("sheet.png"),
        scales: vec![1.0],
        merged: plain_config(),
    };

    let result = run_job(&config).expect("job should succeed");
    assert_eq!((result.width, result.height), (1181, 1772));
    assert_eq!(result.digest.len(), 64);

    let written = image::open(&result.output_path).expect("output decodes").to_rgba8();
    assert_eq!(written.dimensions(), (1181, 1772));
    assert_eq!(*written.get_pixel(30, 30), Rgba([90, 30, 60, 255]));
}

#[test]
fn test_run_job_writes_jpeg_and_applies_mask_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let front = dir.path().join("front.png");
    let back = dir.path().join("back.png");
    let mask = dir.path().join("back_mask.png");
    save_png(&front, &solid(1275, 825, [200, 0, 0]));
    save_png(&back, &solid(1275, 825, [0, 0, 200]));
    image::GrayImage::new(1275, 825).save(&mask).unwrap();

    let config = JobConfig {
        recipe: RecipeKind::IdDocumentPair,
        inputs: vec![
            ResolvedInput {
                path: front,
                mask: Some(mask.clone()),
            },
            ResolvedInput {
                path: back,
                mask: Some(mask),
            },
        ],
        output_path: dir.path().join("id.jpg"),
        scales: vec![1.0, 1.0],
        merged: MergedConfig {
            remove_background: true,
            ..plain_config()
        },
    };

    let result = run_job(&config).expect("job should succeed");
    let written = image::open(&result.output_path).expect("jpeg decodes");
    assert_eq!((written.width(), written.height()), (3150, 4455));
}

#[test]
fn test_run_job_is_repeatable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("face.png");
    save_png(&input, &solid(414, 530, [12, 34, 56]));

    let make = |name: &str| JobConfig {
        recipe: RecipeKind::LargePassport8Up,
        inputs: vec![ResolvedInput {
            path: input.clone(),
            mask: None,
        }],
        output_path: dir.path().join(name),
        scales: vec![1.0],
        merged: plain_config(),
    };

    let a = run_job(&make("a.png")).unwrap();
    let b = run_job(&make("b.png")).unwrap();
    assert_eq!(a.digest, b.digest);
}

#[test]
fn test_run_all_jobs_isolates_failures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good_input = dir.path().join("face.png");
    save_png(&good_input, &solid(360, 420, [1, 2, 3]));

    let jobs = vec![
        JobConfig {
            recipe: RecipeKind::SmallPassport12Up,
            inputs: vec![ResolvedInput {
                path: dir.path().join("missing.png"),
                mask: None,
            }],
            output_path: dir.path().join("bad.png"),
            scales: vec![1.0],
            merged: plain_config(),
        },
        JobConfig {
            recipe: RecipeKind::SmallPassport12Up,
            inputs: vec![ResolvedInput {
                path: good_input,
                mask: None,
            }],
            output_path: dir.path().join("good.png"),
            scales: vec![1.0],
            merged: plain_config(),
        },
    ];

    let results = run_all_jobs(&jobs, 2).expect("pool should build");
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(SheetError::ImageError(_))));
    assert!(results[1].is_ok());
    assert!(dir.path().join("good.png").exists());
    assert!(!dir.path().join("bad.png").exists());
}
