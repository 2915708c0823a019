// ジョブ単位: 入力デコード -> シート合成 -> 出力エンコード

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::info;

use crate::config::merged::MergedConfig;
use crate::digest::canvas_digest;
use crate::error::SheetError;
use crate::layout::RecipeKind;
use crate::pipeline::sheet_builder::{SheetInput, build_sheet};
use crate::segmentation::MaskFileOracle;

/// One input with paths already resolved against the job file directory.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub mask: Option<PathBuf>,
}

/// Configuration for a single sheet.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub recipe: RecipeKind,
    pub inputs: Vec<ResolvedInput>,
    pub output_path: PathBuf,
    pub scales: Vec<f32>,
    pub merged: MergedConfig,
}

/// Result of processing a single sheet.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub digest: String,
}

fn load_input(input: &ResolvedInput) -> crate::error::Result<SheetInput> {
    let image = image::open(&input.path)
        .map_err(|e| SheetError::image(format!("Failed to decode {}: {e}", input.path.display())))?
        .to_rgba8();
    let sheet_input = SheetInput::new(image);
    Ok(match &input.mask {
        Some(mask) => sheet_input.with_oracle(Box::new(MaskFileOracle::new(mask))),
        None => sheet_input,
    })
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Write a finished canvas. JPEG drops alpha and honors `jpeg_quality`;
/// any other extension is encoded by the `image` crate's format guess.
pub fn write_canvas(canvas: &RgbaImage, path: &Path, jpeg_quality: u8) -> crate::error::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    if is_jpeg(path) {
        let rgb = image::DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
        let mut writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
        rgb.write_with_encoder(encoder)?;
    } else {
        canvas.save(path)?;
    }
    Ok(())
}

/// Run a single sheet job: decode inputs, build the sheet, write it out.
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let inputs = config
        .inputs
        .iter()
        .map(load_input)
        .collect::<crate::error::Result<Vec<_>>>()?;

    let canvas = build_sheet(config.recipe, &inputs, &config.scales, &config.merged)?;
    write_canvas(&canvas, &config.output_path, config.merged.jpeg_quality)?;

    let digest = canvas_digest(&canvas);
    info!(
        recipe = %config.recipe,
        output = %config.output_path.display(),
        %digest,
        "sheet written"
    );

    Ok(JobResult {
        output_path: config.output_path.clone(),
        width: canvas.width(),
        height: canvas.height(),
        digest,
    })
}
