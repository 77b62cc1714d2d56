use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder, webp::WebPEncoder},
};

use crate::{
    foundation::error::{StitchError, StitchResult},
    raster::Raster,
};

/// Encoding the stitched raster is written in. Passed through a stitch untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    Png,
    /// JPEG; alpha is dropped and `quality` applies.
    Jpeg,
    /// Lossless WebP with alpha.
    WebP,
}

impl OutputFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Guess from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

/// Encode `raster` into `w`. `quality` (1..=100) is used by JPEG only.
pub fn encode_to_writer<W: Write>(
    raster: &Raster,
    format: OutputFormat,
    quality: u8,
    w: W,
) -> StitchResult<()> {
    let (width, height) = (raster.width(), raster.height());
    match format {
        OutputFormat::Png => PngEncoder::new(w)
            .write_image(raster.pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
            .context("encode png")?,
        OutputFormat::Jpeg => {
            if !(1..=100).contains(&quality) {
                return Err(StitchError::validation(format!(
                    "jpeg quality must be in 1..=100, got {quality}"
                )));
            }
            let rgb = image::DynamicImage::ImageRgba8(raster.pixels.clone()).to_rgb8();
            JpegEncoder::new_with_quality(w, quality)
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .context("encode jpeg")?
        }
        OutputFormat::WebP => WebPEncoder::new_lossless(w)
            .write_image(raster.pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
            .context("encode webp")?,
    }
    Ok(())
}

/// Encode `raster` into a new file at `path`, creating parent directories.
pub fn write_to_path(
    raster: &Raster,
    format: OutputFormat,
    quality: u8,
    path: &Path,
) -> StitchResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    encode_to_writer(raster, format, quality, &mut w)?;
    w.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}
