use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{ImageReader, imageops::FilterType};

use crate::{
    foundation::error::{StitchError, StitchResult},
    raster::Raster,
    source::{DecodeMode, DecodeRequest, ImageSource, SourceDescriptor},
};

/// Extensions picked up by [`FileSource::from_dir`].
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Limits applied while reading files.
#[derive(Clone, Copy, Debug)]
pub struct FileSourceOpts {
    /// Reject images whose header reports more pixels than this.
    pub max_decoded_pixels: u64,
    /// Filter used when a downsample factor > 1 is requested.
    pub downsample_filter: FilterType,
}

impl Default for FileSourceOpts {
    fn default() -> Self {
        Self {
            max_decoded_pixels: 100_000_000,
            downsample_filter: FilterType::Triangle,
        }
    }
}

/// Source over image files on disk.
///
/// Bounds come from the file header; pixels are decoded only when taken.
#[derive(Clone, Debug)]
pub struct FileSource {
    paths: Vec<PathBuf>,
    opts: FileSourceOpts,
    position: usize,
    request: DecodeRequest,
}

impl FileSource {
    /// Create a source over `paths`, yielded in the given order.
    pub fn new(paths: Vec<PathBuf>, opts: FileSourceOpts) -> Self {
        Self {
            paths,
            opts,
            position: 0,
            request: DecodeRequest::default(),
        }
    }

    /// Every image file directly inside `dir`, sorted by file name.
    pub fn from_dir(dir: &Path, opts: FileSourceOpts) -> StitchResult<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read image directory '{}'", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("list image directory '{}'", dir.display()))?
                .path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self::new(paths, opts))
    }

    /// Paths in sequence order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn current_path(&self) -> StitchResult<&Path> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.paths.get(i))
            .map(PathBuf::as_path)
            .ok_or_else(|| StitchError::decode("no current image; call next_descriptor first"))
    }

    fn check_pixel_limit(&self, path: &Path, width: u32, height: u32) -> StitchResult<()> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.opts.max_decoded_pixels {
            return Err(StitchError::resource(format!(
                "'{}' has {pixels} pixels (limit {})",
                path.display(),
                self.opts.max_decoded_pixels
            )));
        }
        Ok(())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl ImageSource for FileSource {
    fn reset(&mut self) {
        self.position = 0;
        self.request = DecodeRequest::default();
    }

    fn next_descriptor(&mut self) -> StitchResult<Option<SourceDescriptor>> {
        let Some(path) = self.paths.get(self.position) else {
            return Ok(None);
        };

        let (width, height) = ImageReader::open(path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("guess format of '{}'", path.display()))?
            .into_dimensions()
            .with_context(|| format!("read dimensions of '{}'", path.display()))?;
        self.check_pixel_limit(path, width, height)?;

        let desc = SourceDescriptor {
            index: self.position,
            width,
            height,
        };
        self.position += 1;
        self.request = DecodeRequest::default();
        Ok(Some(desc))
    }

    fn request_decode(&mut self, request: DecodeRequest) -> StitchResult<()> {
        self.current_path()?;
        self.request = request;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(position = self.position))]
    fn take_raster(&mut self) -> StitchResult<Raster> {
        if self.request.mode != DecodeMode::Pixels {
            return Err(StitchError::decode(
                "pixels requested while decode mode is bounds-only",
            ));
        }
        let path = self.current_path()?;

        let decoded = ImageReader::open(path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("guess format of '{}'", path.display()))?
            .decode()
            .map_err(|e| StitchError::decode(format!("'{}': {e}", path.display())))?;

        let f = self.request.downsample.max(1);
        let decoded = if f > 1 {
            let w = (decoded.width() / f).max(1);
            let h = (decoded.height() / f).max(1);
            tracing::debug!(factor = f, w, h, "downsampling on decode");
            decoded.resize_exact(w, h, self.opts.downsample_filter)
        } else {
            decoded
        };

        Ok(Raster::new(decoded.to_rgba8()))
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/file.rs"]
mod tests;
