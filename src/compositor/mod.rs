// Canvas allocation and blitting shared by every recipe.

pub mod collage;
pub mod mask;

use image::{Rgba, RgbaImage, imageops};

use crate::error::SheetError;
use crate::geometry::rotate::rotate;
use crate::layout::{ImageBinding, LayoutRecipe};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Allocate an opaque white canvas.
pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, WHITE)
}

/// Draw `image` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Source pixels are alpha-blended over the canvas. Anything that falls
/// outside the canvas is clipped.
pub fn blit(canvas: &mut RgbaImage, image: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, image, x, y);
}

/// Composite source images onto a fresh canvas according to a fixed-cell
/// recipe.
///
/// Each image is rotated by the recipe's rotation and centered in its cell at
/// its native size; the upstream cropper is responsible for producing the
/// right pixel dimensions. Recipes with [`ImageBinding::Repeat`] take exactly
/// one image and place it in every cell. [`ImageBinding::PerCell`] recipes
/// take one image per cell.
///
/// The collage recipe has no fixed cells; use
/// [`collage::layout_collage`] for it.
pub fn compose(recipe: &LayoutRecipe, images: &[RgbaImage]) -> crate::error::Result<RgbaImage> {
    if images.is_empty() {
        return Err(SheetError::EmptyInput);
    }
    let expected = recipe.expected_inputs().ok_or_else(|| {
        SheetError::invalid_recipe(format!(
            "{} has no fixed cells and cannot be composed directly",
            recipe.kind
        ))
    })?;
    if images.len() != expected {
        return Err(SheetError::InputCountMismatch {
            expected,
            actual: images.len(),
        });
    }

    let prepared = images
        .iter()
        .map(|img| rotate(img, recipe.rotation_degrees))
        .collect::<crate::error::Result<Vec<_>>>()?;

    let mut canvas = blank_canvas(recipe.canvas_width, recipe.canvas_height);
    for (i, cell) in recipe.cells.iter().enumerate() {
        let source = match recipe.binding {
            ImageBinding::Repeat => &prepared[0],
            _ => &prepared[i],
        };
        let (x, y) = cell.centered_origin(source.width(), source.height());
        blit(&mut canvas, source, x, y);
    }

    tracing::debug!(
        recipe = %recipe.kind,
        cells = recipe.cells.len(),
        width = canvas.width(),
        height = canvas.height(),
        "composed sheet"
    );
    Ok(canvas)
}
