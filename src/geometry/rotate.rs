use image::RgbaImage;
use image::imageops;

use crate::error::SheetError;

/// Rotate an image clockwise by a multiple of 90 degrees.
///
/// Angles are normalized modulo 360, so `-90` and `270` are equivalent.
/// Quarter turns swap width and height. Any other angle fails with
/// [`SheetError::InvalidAngle`].
pub fn rotate(image: &RgbaImage, angle_degrees: i32) -> crate::error::Result<RgbaImage> {
    match angle_degrees.rem_euclid(360) {
        0 => Ok(image.clone()),
        90 => Ok(imageops::rotate90(image)),
        180 => Ok(imageops::rotate180(image)),
        270 => Ok(imageops::rotate270(image)),
        _ => Err(SheetError::InvalidAngle(angle_degrees)),
    }
}
