use crate::error::SheetError;

/// Smallest edge a scaled collage image may have, in pixels.
pub const MIN_SCALED_EDGE: f32 = 100.0;

/// Largest edge a scaled collage image may have, in pixels.
pub const MAX_SCALED_EDGE: f32 = 2000.0;

/// Default cap on the sum of all scale factors in one collage.
pub const DEFAULT_MAX_TOTAL_SCALE: f32 = 7.0;

/// Allowed slider range for one collage image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl ScaleRange {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Upper bound on a single scale factor given how many images share the
/// canvas.
pub fn crowding_cap(image_count: usize) -> f32 {
    match image_count {
        0 | 1 => 2.0,
        2 => 1.5,
        3 | 4 => 1.2,
        _ => 1.0,
    }
}

/// Compute the scale range for one image of a collage.
///
/// The minimum keeps both scaled edges at or above 100px. The maximum keeps
/// both edges at or below 2000px and under the crowding cap. When the image
/// is so lopsided that the minimum exceeds the maximum, the range collapses
/// onto the minimum.
pub fn scale_range(image_count: usize, image_width: u32, image_height: u32) -> ScaleRange {
    let width = image_width.max(1) as f32;
    let height = image_height.max(1) as f32;

    let min = (MIN_SCALED_EDGE / width).max(MIN_SCALED_EDGE / height);
    let max = (MAX_SCALED_EDGE / width)
        .min(MAX_SCALED_EDGE / height)
        .min(crowding_cap(image_count));

    ScaleRange {
        min,
        max: max.max(min),
    }
}

/// Set one scale factor and rebalance the others against `max_total`.
///
/// When the new sum exceeds `max_total`, the excess is split evenly across
/// every other index and subtracted once, flooring each at zero. The pass is
/// not repeated, so the result can still exceed `max_total` when other
/// factors hit the floor.
///
/// Every existing factor and `new_value` must be a non-negative number.
pub fn normalize_scales(
    scales: &[f32],
    changed_index: usize,
    new_value: f32,
    max_total: f32,
) -> crate::error::Result<Vec<f32>> {
    if changed_index >= scales.len() {
        return Err(SheetError::invalid_scale(format!(
            "index {} out of range for {} scale factors",
            changed_index,
            scales.len()
        )));
    }
    if let Some(bad) = scales
        .iter()
        .chain(std::iter::once(&new_value))
        .find(|v| !v.is_finite() || **v < 0.0)
    {
        return Err(SheetError::invalid_scale(format!(
            "scale factor must be a non-negative number, got {bad}"
        )));
    }

    let mut updated = scales.to_vec();
    updated[changed_index] = new_value;

    let total: f32 = updated.iter().sum();
    if total > max_total && updated.len() > 1 {
        let share = (total - max_total) / (updated.len() - 1) as f32;
        for (i, value) in updated.iter_mut().enumerate() {
            if i != changed_index {
                *value = (*value - share).max(0.0);
            }
        }
    }

    Ok(updated)
}
