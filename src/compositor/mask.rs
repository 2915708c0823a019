// Foreground masking and border strokes.

use image::{GrayImage, Pixel, Rgba, RgbaImage};

use crate::error::SheetError;

/// Confidence above which a pixel counts as foreground.
pub const DEFAULT_MASK_THRESHOLD: f32 = 0.7;

/// Per-pixel foreground likelihood in `[0, 1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ConfidenceMap {
    /// Wrap a row-major buffer of `width * height` values.
    ///
    /// Any other length is a [`SheetError::DimensionMismatch`]. The reported
    /// size keeps `width` when the length is a whole number of rows and
    /// falls back to a single row otherwise.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> crate::error::Result<Self> {
        let len = values.len();
        if (width as usize).checked_mul(height as usize) != Some(len) {
            let to_u32 = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
            let actual = if width > 0 && len % width as usize == 0 {
                (width, to_u32(len / width as usize))
            } else {
                (to_u32(len), 1)
            };
            return Err(SheetError::DimensionMismatch {
                expected: (width, height),
                actual,
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Map with the same confidence everywhere.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    /// Read a grayscale image as confidence, 0 => 0.0 and 255 => 1.0.
    pub fn from_luma(gray: &GrayImage) -> Self {
        Self {
            width: gray.width(),
            height: gray.height(),
            values: gray.pixels().map(|p| f32::from(p.0[0]) / 255.0).collect(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Cut the foreground out of an image.
///
/// A pixel keeps its color and alpha where the confidence is strictly above
/// `threshold`; everywhere else it becomes fully transparent.
pub fn apply_foreground_mask(
    image: &RgbaImage,
    confidence: &ConfidenceMap,
    threshold: f32,
) -> crate::error::Result<RgbaImage> {
    if confidence.dimensions() != image.dimensions() {
        return Err(SheetError::DimensionMismatch {
            expected: image.dimensions(),
            actual: confidence.dimensions(),
        });
    }

    let masked = RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        if confidence.get(x, y) > threshold {
            *image.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    Ok(masked)
}

/// Stroke a rectangle around the edge of a copy of `image`.
///
/// The stroke is centered on a rectangle inset by half its width, so it
/// covers a band `stroke_width` pixels wide along every edge. Dimensions are
/// unchanged and the interior is left untouched.
pub fn add_border(image: &RgbaImage, stroke_width: u32, color: Rgba<u8>) -> RgbaImage {
    let mut out = image.clone();
    if stroke_width == 0 {
        return out;
    }

    let (width, height) = out.dimensions();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let on_stroke = x < stroke_width
            || y < stroke_width
            || x >= width.saturating_sub(stroke_width)
            || y >= height.saturating_sub(stroke_width);
        if !on_stroke {
            continue;
        }
        if color[3] == 255 {
            *pixel = color;
        } else {
            pixel.blend(&color);
        }
    }
    out
}
