// SHA-256 of a finished canvas, used to report and compare outputs.

use image::RgbaImage;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 over the canvas dimensions and raw RGBA bytes.
///
/// Two canvases share a digest only when they are pixel-identical.
pub fn canvas_digest(canvas: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canvas.width().to_le_bytes());
    hasher.update(canvas.height().to_le_bytes());
    hasher.update(canvas.as_raw());
    hex::encode(hasher.finalize())
}
