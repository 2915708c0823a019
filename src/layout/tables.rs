// Pixel geometry for every recipe, at a 300 DPI equivalent.

use std::sync::LazyLock;

use super::{ImageBinding, LayoutRecipe, RecipeKind};
use crate::geometry::Rect;
use crate::geometry::crop::{CropSpec, crop_rect};

/// 10cm x 15cm photo paper.
pub const PHOTO_PAPER_WIDTH: u32 = 1181;
pub const PHOTO_PAPER_HEIGHT: u32 = 1772;

/// A4 at 300 DPI.
pub const A4_WIDTH: u32 = 2480;
pub const A4_HEIGHT: u32 = 3508;

/// Gap around and between collage images.
pub const COLLAGE_MARGIN: u32 = 70;

const LARGE_UNIT_WIDTH: u32 = 500;
const LARGE_UNIT_HEIGHT: u32 = 390;
const LARGE_PAGE_MARGIN: f32 = 80.0;
const LARGE_IMAGE_MARGIN: f32 = 50.0;
/// Each lower tier of the large sheet is pulled up by this many pixels.
const LARGE_TIER_SHIFT: f32 = 15.0;

const SMALL_CELL_WIDTH: u32 = 360;
const SMALL_CELL_HEIGHT: u32 = 420;
const SMALL_COLUMNS: u32 = 3;
const SMALL_ROWS: u32 = 4;

const ID_CANVAS_WIDTH: u32 = 3150;
const ID_CANVAS_HEIGHT: u32 = 4455;
const ID_CARD_WIDTH: u32 = 1275;
const ID_CARD_HEIGHT: u32 = 825;
const ID_TOP_MARGIN: f32 = 400.0;

static LARGE_PASSPORT: LazyLock<LayoutRecipe> = LazyLock::new(large_passport_8up);
static SMALL_PASSPORT: LazyLock<LayoutRecipe> = LazyLock::new(small_passport_12up);
static ID_DOCUMENT: LazyLock<LayoutRecipe> = LazyLock::new(id_document_pair);
static COLLAGE: LazyLock<LayoutRecipe> = LazyLock::new(collage_a4);

pub(super) fn recipe(kind: RecipeKind) -> &'static LayoutRecipe {
    match kind {
        RecipeKind::LargePassport8Up => &*LARGE_PASSPORT,
        RecipeKind::SmallPassport12Up => &*SMALL_PASSPORT,
        RecipeKind::IdDocumentPair => &*ID_DOCUMENT,
        RecipeKind::CollageA4 => &*COLLAGE,
    }
}

pub(super) fn crop_spec(kind: RecipeKind) -> Option<CropSpec> {
    match kind {
        RecipeKind::LargePassport8Up => Some(crop_rect(3.5, 4.5, 414, 530)),
        RecipeKind::SmallPassport12Up => Some(crop_rect(1.21, 1.4, 363, 421)),
        RecipeKind::IdDocumentPair => Some(crop_rect(8.5, 5.5, ID_CARD_WIDTH, ID_CARD_HEIGHT)),
        RecipeKind::CollageA4 => None,
    }
}

/// Two columns by four tiers, each photo turned a quarter.
///
/// The right edge of every cell is measured from the image margin rather
/// than the page margin, and every tier after the first sits 15px higher
/// than a uniform grid would put it.
fn large_passport_8up() -> LayoutRecipe {
    let w = LARGE_UNIT_WIDTH as f32;
    let h = LARGE_UNIT_HEIGHT as f32;
    let m = LARGE_IMAGE_MARGIN;

    let mut cells = Vec::with_capacity(8);
    for tier in 0..4u8 {
        let t = f32::from(tier);
        let top = m - LARGE_TIER_SHIFT * t + t * (h + m);
        let bottom = m + (t + 1.0) * h + t * m;
        for col in 0..2u8 {
            let c = f32::from(col);
            let left = LARGE_PAGE_MARGIN + c * (w + m);
            let right = m + (c + 1.0) * w + c * m;
            cells.push(Rect::new(left, top, right, bottom));
        }
    }

    LayoutRecipe {
        kind: RecipeKind::LargePassport8Up,
        canvas_width: PHOTO_PAPER_WIDTH,
        canvas_height: PHOTO_PAPER_HEIGHT,
        cell_width: LARGE_UNIT_WIDTH,
        cell_height: LARGE_UNIT_HEIGHT,
        rotation_degrees: 90,
        binding: ImageBinding::Repeat,
        cells,
    }
}

/// Four rows by three columns with uniform integer spacing.
fn small_passport_12up() -> LayoutRecipe {
    let h_margin = (PHOTO_PAPER_WIDTH - SMALL_COLUMNS * SMALL_CELL_WIDTH) / (SMALL_COLUMNS + 1);
    let v_margin = (PHOTO_PAPER_HEIGHT - SMALL_ROWS * SMALL_CELL_HEIGHT) / (SMALL_ROWS + 1);

    let mut cells = Vec::with_capacity((SMALL_ROWS * SMALL_COLUMNS) as usize);
    for row in 0..SMALL_ROWS {
        for col in 0..SMALL_COLUMNS {
            let left = h_margin + col * (SMALL_CELL_WIDTH + h_margin);
            let top = v_margin + row * (SMALL_CELL_HEIGHT + v_margin);
            cells.push(Rect::from_size(
                left as f32,
                top as f32,
                SMALL_CELL_WIDTH as f32,
                SMALL_CELL_HEIGHT as f32,
            ));
        }
    }

    LayoutRecipe {
        kind: RecipeKind::SmallPassport12Up,
        canvas_width: PHOTO_PAPER_WIDTH,
        canvas_height: PHOTO_PAPER_HEIGHT,
        cell_width: SMALL_CELL_WIDTH,
        cell_height: SMALL_CELL_HEIGHT,
        rotation_degrees: 0,
        binding: ImageBinding::Repeat,
        cells,
    }
}

/// Front and back side by side, three equal horizontal gaps.
fn id_document_pair() -> LayoutRecipe {
    let w = ID_CARD_WIDTH as f32;
    let h = ID_CARD_HEIGHT as f32;
    let side = (ID_CANVAS_WIDTH - 2 * ID_CARD_WIDTH) as f32 / 3.0;

    LayoutRecipe {
        kind: RecipeKind::IdDocumentPair,
        canvas_width: ID_CANVAS_WIDTH,
        canvas_height: ID_CANVAS_HEIGHT,
        cell_width: ID_CARD_WIDTH,
        cell_height: ID_CARD_HEIGHT,
        rotation_degrees: 0,
        binding: ImageBinding::PerCell,
        cells: vec![
            Rect::from_size(side, ID_TOP_MARGIN, w, h),
            Rect::from_size(2.0 * side + w, ID_TOP_MARGIN, w, h),
        ],
    }
}

fn collage_a4() -> LayoutRecipe {
    LayoutRecipe {
        kind: RecipeKind::CollageA4,
        canvas_width: A4_WIDTH,
        canvas_height: A4_HEIGHT,
        cell_width: 0,
        cell_height: 0,
        rotation_degrees: 0,
        binding: ImageBinding::Free,
        cells: Vec::new(),
    }
}
