use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Constraints handed to the cropper: target aspect ratio and the largest
/// output size it may produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSpec {
    pub aspect_width: f32,
    pub aspect_height: f32,
    pub max_width: u32,
    pub max_height: u32,
}

impl CropSpec {
    /// Target aspect ratio as width / height.
    pub fn aspect(&self) -> f32 {
        self.aspect_width / self.aspect_height
    }
}

/// Build the crop constraints for one output kind.
pub fn crop_rect(
    target_aspect_width: f32,
    target_aspect_height: f32,
    max_result_width: u32,
    max_result_height: u32,
) -> CropSpec {
    CropSpec {
        aspect_width: target_aspect_width,
        aspect_height: target_aspect_height,
        max_width: max_result_width,
        max_height: max_result_height,
    }
}

/// Apply a [`CropSpec`] without user interaction.
///
/// Takes the largest centered region with the target aspect ratio, then
/// downscales it to fit within the maximum size. Images already smaller than
/// the maximum are never upscaled.
pub fn center_crop(image: &RgbaImage, spec: &CropSpec) -> RgbaImage {
    let (width, height) = image.dimensions();
    let aspect = spec.aspect();
    if width == 0 || height == 0 || !aspect.is_finite() || aspect <= 0.0 {
        return image.clone();
    }

    let (crop_width, crop_height) = if (width as f32 / height as f32) > aspect {
        // Source is wider than the target: constrain by height
        let w = ((height as f32 * aspect).round() as u32).clamp(1, width);
        (w, height)
    } else {
        let h = ((width as f32 / aspect).round() as u32).clamp(1, height);
        (width, h)
    };

    let x = (width - crop_width) / 2;
    let y = (height - crop_height) / 2;
    let cropped = imageops::crop_imm(image, x, y, crop_width, crop_height).to_image();

    if crop_width <= spec.max_width && crop_height <= spec.max_height {
        return cropped;
    }

    let factor = (spec.max_width as f32 / crop_width as f32)
        .min(spec.max_height as f32 / crop_height as f32);
    let out_width = ((crop_width as f32 * factor).round() as u32).clamp(1, spec.max_width.max(1));
    let out_height =
        ((crop_height as f32 * factor).round() as u32).clamp(1, spec.max_height.max(1));

    tracing::debug!(
        crop_width,
        crop_height,
        out_width,
        out_height,
        "downscaling cropped region"
    );
    imageops::resize(&cropped, out_width, out_height, FilterType::Lanczos3)
}
