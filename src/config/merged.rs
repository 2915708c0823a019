use image::Rgba;

use super::job::SheetJob;
use super::settings::Settings;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub mask_threshold: f32,
    pub remove_background: bool,
    pub border_width: Option<u32>,
    pub border_color: Rgba<u8>,
    pub max_total_scale: f32,
    pub jpeg_quality: u8,
    pub auto_crop: bool,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &SheetJob) -> Self {
        let border = job.border.unwrap_or(false);
        MergedConfig {
            mask_threshold: job.mask_threshold.unwrap_or(settings.mask_threshold),
            remove_background: job.remove_background.unwrap_or(false),
            border_width: border.then_some(settings.border_width),
            border_color: Rgba(settings.border_color),
            max_total_scale: settings.max_total_scale,
            jpeg_quality: settings.jpeg_quality,
            auto_crop: job.auto_crop.unwrap_or(settings.auto_crop),
        }
    }
}
