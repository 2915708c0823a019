// Foreground mask adapter and border stroke

use image::{GrayImage, Luma, Rgba, RgbaImage};

use photo_sheet::compositor::mask::{
    ConfidenceMap, DEFAULT_MASK_THRESHOLD, add_border, apply_foreground_mask,
};
use photo_sheet::error::SheetError;
use photo_sheet::segmentation::{MaskFileOracle, UniformOracle, remove_background};

fn photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 128, 255])
    })
}

// ============================================================
// 1. apply_foreground_mask
// ============================================================

#[test]
fn test_zero_confidence_gives_transparent_image() {
    let src = photo(30, 20);
    let out = apply_foreground_mask(
        &src,
        &ConfidenceMap::filled(30, 20, 0.0),
        DEFAULT_MASK_THRESHOLD,
    )
    .unwrap();
    assert_eq!(out.dimensions(), (30, 20));
    assert!(out.pixels().all(|p| p[3] == 0));
}

#[test]
fn test_full_confidence_gives_opaque_copy() {
    let src = photo(30, 20);
    let out = apply_foreground_mask(
        &src,
        &ConfidenceMap::filled(30, 20, 1.0),
        DEFAULT_MASK_THRESHOLD,
    )
    .unwrap();
    assert_eq!(out, src);
}

#[test]
fn test_threshold_is_strict() {
    let src = photo(2, 1);
    let map = ConfidenceMap::new(2, 1, vec![0.7, 0.71]).unwrap();
    let out = apply_foreground_mask(&src, &map, 0.7).unwrap();
    assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    assert_eq!(out.get_pixel(1, 0), src.get_pixel(1, 0));
}

#[test]
fn test_mask_dimension_mismatch() {
    let result = apply_foreground_mask(
        &photo(30, 20),
        &ConfidenceMap::filled(20, 30, 1.0),
        DEFAULT_MASK_THRESHOLD,
    );
    assert!(matches!(
        result,
        Err(SheetError::DimensionMismatch {
            expected: (30, 20),
            actual: (20, 30)
        })
    ));
}

#[test]
fn test_confidence_map_validates_buffer_length() {
    assert!(matches!(
        ConfidenceMap::new(4, 4, vec![0.0; 15]),
        Err(SheetError::DimensionMismatch {
            expected: (4, 4),
            actual: (15, 1)
        })
    ));
    assert!(matches!(
        ConfidenceMap::new(4, 4, vec![0.0; 12]),
        Err(SheetError::DimensionMismatch {
            expected: (4, 4),
            actual: (4, 3)
        })
    ));
    assert!(ConfidenceMap::new(4, 4, vec![0.0; 16]).is_ok());
}

#[test]
fn test_confidence_from_luma() {
    let mut gray = GrayImage::new(2, 1);
    gray.put_pixel(0, 0, Luma([0]));
    gray.put_pixel(1, 0, Luma([255]));
    let map = ConfidenceMap::from_luma(&gray);
    assert_eq!(map.dimensions(), (2, 1));
    assert_eq!(map.get(0, 0), 0.0);
    assert_eq!(map.get(1, 0), 1.0);
}

// ============================================================
// 2. add_border
// ============================================================

#[test]
fn test_border_leaves_interior_untouched() {
    let src = photo(50, 40);
    let red = Rgba([255, 0, 0, 255]);
    let out = add_border(&src, 5, red);
    assert_eq!(out.dimensions(), src.dimensions());

    for y in 0..40 {
        for x in 0..50 {
            let interior = (5..45).contains(&x) && (5..35).contains(&y);
            if interior {
                assert_eq!(out.get_pixel(x, y), src.get_pixel(x, y), "({x}, {y})");
            } else {
                assert_eq!(*out.get_pixel(x, y), red, "({x}, {y})");
            }
        }
    }
}

#[test]
fn test_zero_width_border_is_a_copy() {
    let src = photo(10, 10);
    assert_eq!(add_border(&src, 0, Rgba([0, 0, 0, 255])), src);
}

#[test]
fn test_translucent_border_blends() {
    let src = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
    let out = add_border(&src, 2, Rgba([0, 0, 0, 128]));
    let edge = out.get_pixel(0, 0);
    assert!(edge[0] > 0 && edge[0] < 255);
    assert_eq!(*out.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
}

// ============================================================
// 3. Segmentation oracles
// ============================================================

#[test]
fn test_remove_background_with_uniform_oracle() {
    let src = photo(8, 8);
    let kept = remove_background(&src, &UniformOracle(1.0), DEFAULT_MASK_THRESHOLD).unwrap();
    assert_eq!(kept, src);
    let cleared = remove_background(&src, &UniformOracle(0.2), DEFAULT_MASK_THRESHOLD).unwrap();
    assert!(cleared.pixels().all(|p| p[3] == 0));
}

#[test]
fn test_mask_file_oracle_reads_grayscale_mask() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mask_path = dir.path().join("mask.png");
    let mask = GrayImage::from_fn(10, 4, |x, _| if x < 5 { Luma([255]) } else { Luma([0]) });
    mask.save(&mask_path).expect("save mask");

    let src = photo(10, 4);
    let out =
        remove_background(&src, &MaskFileOracle::new(&mask_path), DEFAULT_MASK_THRESHOLD)
            .unwrap();
    assert_eq!(out.get_pixel(4, 2), src.get_pixel(4, 2));
    assert_eq!(*out.get_pixel(5, 2), Rgba([0, 0, 0, 0]));
}

#[test]
fn test_mask_file_oracle_missing_file() {
    let oracle = MaskFileOracle::new("/nonexistent/mask.png");
    let result = remove_background(&photo(4, 4), &oracle, DEFAULT_MASK_THRESHOLD);
    assert!(matches!(result, Err(SheetError::SegmentationError(_))));
}

#[test]
fn test_mask_file_oracle_size_mismatch_surfaces_at_mask_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mask_path = dir.path().join("mask.png");
    GrayImage::new(3, 3).save(&mask_path).expect("save mask");

    let result = remove_background(
        &photo(4, 4),
        &MaskFileOracle::new(&mask_path),
        DEFAULT_MASK_THRESHOLD,
    );
    assert!(matches!(result, Err(SheetError::DimensionMismatch { .. })));
}
