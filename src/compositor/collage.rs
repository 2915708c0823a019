// Greedy row packing for free-form collages.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::{blank_canvas, blit};
use crate::error::SheetError;
use crate::geometry::scale::MIN_SCALED_EDGE;
use crate::layout::RecipeKind;
use crate::layout::tables::{A4_HEIGHT, COLLAGE_MARGIN};

/// Largest edge a placed collage image may have. Anything bigger would be
/// clipped away almost entirely while still being resized in full.
pub const MAX_PLACED_EDGE: u32 = 2 * A4_HEIGHT;

/// Where one collage image lands on the canvas, after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

fn scaled_edge(native: u32, scale: f32) -> crate::error::Result<u32> {
    let scaled = (native as f32 * scale).round().max(MIN_SCALED_EDGE);
    if scaled > MAX_PLACED_EDGE as f32 {
        return Err(SheetError::invalid_scale(format!(
            "scale {scale} turns a {native}px edge into {scaled}px (limit {MAX_PLACED_EDGE}px)"
        )));
    }
    Ok(scaled as u32)
}

/// Compute placements for images of the given native sizes.
///
/// Images are placed left to right in input order, separated by the collage
/// margin. When the next image would run past the right edge of the canvas,
/// it starts a new row below the tallest image of the current row. The first
/// image of a row is always placed, however wide. Rows are never checked
/// against the bottom edge.
///
/// Every scale must be a positive finite number, and no scaled edge may
/// exceed [`MAX_PLACED_EDGE`]; otherwise the call fails with
/// [`SheetError::InvalidScale`].
pub fn collage_placements(
    sizes: &[(u32, u32)],
    scales: &[f32],
) -> crate::error::Result<Vec<Placement>> {
    if sizes.len() != scales.len() {
        return Err(SheetError::InputCountMismatch {
            expected: sizes.len(),
            actual: scales.len(),
        });
    }

    if let Some(bad) = scales.iter().find(|s| !s.is_finite() || **s <= 0.0) {
        return Err(SheetError::invalid_scale(format!(
            "collage scale factors must be positive numbers, got {bad}"
        )));
    }

    let canvas_width = i64::from(RecipeKind::CollageA4.recipe().canvas_width);
    let margin = i64::from(COLLAGE_MARGIN);

    let mut x = margin;
    let mut y = margin;
    let mut row_height: i64 = 0;
    let mut row_started = false;
    let mut placements = Vec::with_capacity(sizes.len());

    for (&(width, height), &scale) in sizes.iter().zip(scales) {
        let scaled_width = scaled_edge(width, scale)?;
        let scaled_height = scaled_edge(height, scale)?;

        let mut left = if row_started { x + margin } else { x };
        if row_started && left + i64::from(scaled_width) > canvas_width {
            y += row_height + margin;
            row_height = 0;
            left = margin;
        }

        placements.push(Placement {
            x: left,
            y,
            width: scaled_width,
            height: scaled_height,
        });

        x = left + i64::from(scaled_width);
        row_height = row_height.max(i64::from(scaled_height));
        row_started = true;
    }

    Ok(placements)
}

/// Build an A4 collage from images and their per-image scale factors.
///
/// Placements that run past the canvas are clipped.
pub fn layout_collage(images: &[RgbaImage], scales: &[f32]) -> crate::error::Result<RgbaImage> {
    if images.is_empty() {
        return Err(SheetError::EmptyInput);
    }

    let sizes: Vec<(u32, u32)> = images.iter().map(|img| img.dimensions()).collect();
    let placements = collage_placements(&sizes, scales)?;

    let recipe = RecipeKind::CollageA4.recipe();
    let mut canvas = blank_canvas(recipe.canvas_width, recipe.canvas_height);

    for (image, placement) in images.iter().zip(&placements) {
        if placement.y >= i64::from(recipe.canvas_height) {
            tracing::debug!(?placement, "collage image falls below the canvas");
        }
        if image.dimensions() == (placement.width, placement.height) {
            blit(&mut canvas, image, placement.x, placement.y);
        } else {
            let resized = imageops::resize(
                image,
                placement.width,
                placement.height,
                FilterType::Lanczos3,
            );
            blit(&mut canvas, &resized, placement.x, placement.y);
        }
    }

    tracing::debug!(images = images.len(), "composed collage");
    Ok(canvas)
}
