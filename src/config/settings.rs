use std::path::Path;

use serde::Deserialize;

use crate::compositor::mask::DEFAULT_MASK_THRESHOLD;
use crate::geometry::scale::DEFAULT_MAX_TOTAL_SCALE;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mask_threshold: f32,
    pub border_width: u32,
    pub border_color: [u8; 4],
    pub max_total_scale: f32,
    pub jpeg_quality: u8,
    pub auto_crop: bool,
    pub parallel_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            border_width: 8,
            border_color: [0, 0, 0, 255],
            max_total_scale: DEFAULT_MAX_TOTAL_SCALE,
            jpeg_quality: 100,
            auto_crop: true,
            parallel_workers: 0,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml).map_err(|e| {
            crate::error::SheetError::config(format!("Failed to parse settings YAML: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.mask_threshold) {
            return Err(crate::error::SheetError::config(format!(
                "mask_threshold must be within 0.0-1.0, got {}",
                self.mask_threshold
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(crate::error::SheetError::config(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if !self.max_total_scale.is_finite() || self.max_total_scale <= 0.0 {
            return Err(crate::error::SheetError::config(format!(
                "max_total_scale must be positive, got {}",
                self.max_total_scale
            )));
        }
        Ok(())
    }
}
