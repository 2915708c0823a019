// Per-image preparation followed by compositing.

use image::RgbaImage;
use tracing::{debug, warn};

use crate::compositor::collage::layout_collage;
use crate::compositor::compose;
use crate::compositor::mask::add_border;
use crate::config::merged::MergedConfig;
use crate::error::SheetError;
use crate::geometry::crop::center_crop;
use crate::geometry::scale::scale_range;
use crate::layout::RecipeKind;
use crate::segmentation::{SegmentationOracle, remove_background};

/// A decoded source image and the oracle that segments it, if any.
pub struct SheetInput {
    pub image: RgbaImage,
    pub oracle: Option<Box<dyn SegmentationOracle>>,
}

impl SheetInput {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            oracle: None,
        }
    }

    pub fn with_oracle(mut self, oracle: Box<dyn SegmentationOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }
}

/// Run the optional preparation steps on one image.
///
/// Background removal comes first so the confidence map lines up with the
/// decoded image, then the crop, then the border.
pub fn prepare_image(
    recipe: RecipeKind,
    input: &SheetInput,
    config: &MergedConfig,
) -> crate::error::Result<RgbaImage> {
    let mut image = if config.remove_background {
        let oracle = input.oracle.as_deref().ok_or_else(|| {
            SheetError::segmentation("background removal requested but no mask was supplied")
        })?;
        remove_background(&input.image, oracle, config.mask_threshold)?
    } else {
        input.image.clone()
    };

    if config.auto_crop
        && let Some(spec) = recipe.crop_spec()
    {
        image = center_crop(&image, &spec);
    }

    if let Some(width) = config.border_width {
        image = add_border(&image, width, config.border_color);
    }

    Ok(image)
}

/// Clamp requested collage scales into each image's allowed range.
fn clamp_collage_scales(images: &[RgbaImage], scales: &[f32], max_total: f32) -> Vec<f32> {
    let clamped: Vec<f32> = images
        .iter()
        .zip(scales)
        .map(|(img, &s)| scale_range(images.len(), img.width(), img.height()).clamp(s))
        .collect();

    let total: f32 = clamped.iter().sum();
    if total > max_total {
        warn!(total, max_total, "collage scale factors exceed the total cap");
    }
    clamped
}

/// Build one finished sheet.
///
/// `scales` is only consulted for the collage recipe and must have one entry
/// per input there.
pub fn build_sheet(
    recipe: RecipeKind,
    inputs: &[SheetInput],
    scales: &[f32],
    config: &MergedConfig,
) -> crate::error::Result<RgbaImage> {
    if inputs.is_empty() {
        return Err(SheetError::EmptyInput);
    }

    let prepared = inputs
        .iter()
        .map(|input| prepare_image(recipe, input, config))
        .collect::<crate::error::Result<Vec<_>>>()?;
    debug!(%recipe, images = prepared.len(), "prepared source images");

    match recipe {
        RecipeKind::CollageA4 => {
            if scales.len() != prepared.len() {
                return Err(SheetError::InputCountMismatch {
                    expected: prepared.len(),
                    actual: scales.len(),
                });
            }
            let scales = clamp_collage_scales(&prepared, scales, config.max_total_scale);
            layout_collage(&prepared, &scales)
        }
        _ => compose(recipe.recipe(), &prepared),
    }
}
