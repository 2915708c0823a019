// Seam for the external foreground segmentation step.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::compositor::mask::{ConfidenceMap, apply_foreground_mask};
use crate::error::SheetError;

/// Produces a foreground confidence map for an image.
///
/// Implementations wrap whatever actually runs segmentation. A failure is
/// returned as an error and the image is left as it was; retrying is up to
/// the caller.
pub trait SegmentationOracle: Send + Sync {
    fn segment(&self, image: &RgbaImage) -> crate::error::Result<ConfidenceMap>;
}

/// Reads a pre-computed confidence map from a grayscale image file.
pub struct MaskFileOracle {
    path: PathBuf,
}

impl MaskFileOracle {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SegmentationOracle for MaskFileOracle {
    fn segment(&self, _image: &RgbaImage) -> crate::error::Result<ConfidenceMap> {
        let gray = image::open(&self.path)
            .map_err(|e| {
                SheetError::segmentation(format!(
                    "Failed to read mask {}: {e}",
                    self.path.display()
                ))
            })?
            .to_luma8();
        Ok(ConfidenceMap::from_luma(&gray))
    }
}

/// Reports the same confidence for every pixel.
pub struct UniformOracle(pub f32);

impl SegmentationOracle for UniformOracle {
    fn segment(&self, image: &RgbaImage) -> crate::error::Result<ConfidenceMap> {
        Ok(ConfidenceMap::filled(image.width(), image.height(), self.0))
    }
}

/// Ask the oracle for a confidence map and cut the foreground out with it.
pub fn remove_background(
    image: &RgbaImage,
    oracle: &dyn SegmentationOracle,
    threshold: f32,
) -> crate::error::Result<RgbaImage> {
    let confidence = oracle.segment(image)?;
    apply_foreground_mask(image, &confidence, threshold)
}
