//! Download naming, saving, and the side-by-side comparison image.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::error::StudioError;
use crate::lifecycle::GenerationResult;
use crate::params::mime_extension;

/// Prefix shared by every file the studio writes.
const FILE_PREFIX: &str = "vogue-ai";

/// Largest comparison canvas, in pixels, that will be allocated.
const MAX_COMPARE_PIXELS: u64 = 64 * 1024 * 1024;

/// Filename for a downloaded result, derived only from its timestamp and type.
#[must_use]
pub fn download_filename(timestamp: i64, mime: &str) -> String {
    format!("{FILE_PREFIX}-{timestamp}.{}", mime_extension(mime))
}

/// Filename for the side-by-side comparison of a result.
#[must_use]
pub fn compare_filename(timestamp: i64) -> String {
    format!("{FILE_PREFIX}-{timestamp}-compare.png")
}

/// Write the generated image into `dir` under its download filename.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_download(result: &GenerationResult, dir: &Path) -> Result<PathBuf, StudioError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_filename(result.timestamp, &result.generated.mime_type));
    std::fs::write(&path, &result.generated.data)?;
    tracing::debug!(path = %path.display(), bytes = result.generated.data.len(), "saved download");
    Ok(path)
}

/// Write the original and generated images next to each other as one PNG.
///
/// Both are scaled to the generated image's height.
///
/// # Errors
///
/// Returns an error if either image cannot be decoded or the file cannot be written.
pub fn save_side_by_side(result: &GenerationResult, dir: &Path) -> Result<PathBuf, StudioError> {
    let original = decode(&result.original.data, "original")?;
    let generated = decode(&result.generated.data, "generated")?;
    let canvas = side_by_side(&original, &generated)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(compare_filename(result.timestamp));
    canvas
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to save comparison: {e}")))?;
    tracing::debug!(path = %path.display(), "saved comparison");
    Ok(path)
}

fn decode(data: &[u8], which: &str) -> Result<DynamicImage, StudioError> {
    image::load_from_memory(data)
        .map_err(|e| StudioError::ImageConversion(format!("Failed to decode {which} image: {e}")))
}

fn side_by_side(left: &DynamicImage, right: &DynamicImage) -> Result<RgbaImage, StudioError> {
    let height = right.height().max(1);
    let left_width = scaled_width(left, height);
    let total_width = left_width + u64::from(right.width());
    if total_width.saturating_mul(u64::from(height)) > MAX_COMPARE_PIXELS {
        return Err(StudioError::ImageConversion(format!(
            "Comparison image would be {total_width}x{height}, too large to build"
        )));
    }
    let left_width = u32::try_from(left_width)
        .map_err(|_| StudioError::ImageConversion("Original image is too wide".into()))?;
    let total_width = u32::try_from(total_width)
        .map_err(|_| StudioError::ImageConversion("Comparison image is too wide".into()))?;

    let left = if left.height() == height {
        left.to_rgba8()
    } else {
        left.resize_exact(left_width, height, FilterType::Triangle).to_rgba8()
    };
    let right = right.to_rgba8();

    let mut canvas = RgbaImage::new(total_width, height);
    image::imageops::replace(&mut canvas, &left, 0, 0);
    image::imageops::replace(&mut canvas, &right, i64::from(left.width()), 0);
    Ok(canvas)
}

/// Width of `img` once scaled to `height`, keeping its aspect ratio.
fn scaled_width(img: &DynamicImage, height: u32) -> u64 {
    if img.height() == height {
        return u64::from(img.width());
    }
    (u64::from(img.width()) * u64::from(height) / u64::from(img.height().max(1))).max(1)
}
