//! Lazy, resettable image sources.
//!
//! A source is a cursor: [`ImageSource::next_descriptor`] advances and reports bounds, the
//! consumer then states how it wants the pixels ([`ImageSource::request_decode`]) and borrows
//! them through a [`RasterLease`], which hands the raster back on drop.

mod file;
mod memory;

pub use file::{FileSource, FileSourceOpts};
pub use memory::MemorySource;

use std::ops::{Deref, DerefMut};

use crate::{foundation::error::StitchResult, raster::Raster};

/// Bounds of the image at the source's current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// 0-based position in the sequence.
    pub index: usize,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

/// What the consumer wants materialized for the current position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Bounds only; taking a raster in this mode is an error.
    #[default]
    BoundsOnly,
    /// Real pixels.
    Pixels,
}

/// Decode instructions for the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeRequest {
    /// Bounds or pixels.
    pub mode: DecodeMode,
    /// Integer reduction factor, `>= 1`. A hint: sources may decode at full size.
    pub downsample: u32,
}

impl Default for DecodeRequest {
    fn default() -> Self {
        Self {
            mode: DecodeMode::BoundsOnly,
            downsample: 1,
        }
    }
}

impl DecodeRequest {
    /// Request real pixels reduced by `downsample` (clamped to at least 1).
    pub fn pixels(downsample: u32) -> Self {
        Self {
            mode: DecodeMode::Pixels,
            downsample: downsample.max(1),
        }
    }
}

/// Ordered, resettable sequence of source images.
///
/// Implementations must be `Send`: the stitch loop runs on a blocking worker.
pub trait ImageSource: Send {
    /// Rewind to before the first image and clear any decode request. Idempotent.
    fn reset(&mut self);

    /// Advance to the next image and report its bounds, or `None` at the end.
    fn next_descriptor(&mut self) -> StitchResult<Option<SourceDescriptor>>;

    /// Set decode instructions for the current position.
    fn request_decode(&mut self, request: DecodeRequest) -> StitchResult<()>;

    /// Materialize pixels for the current position, honoring the decode request.
    fn take_raster(&mut self) -> StitchResult<Raster>;

    /// Return a raster obtained from [`ImageSource::take_raster`].
    fn release(&mut self, raster: Raster) {
        drop(raster);
    }

    /// Number of descriptors yielded since the last reset.
    fn position(&self) -> usize;
}

/// Scoped ownership of the current raster; released back to its source on drop.
pub struct RasterLease<'a> {
    source: &'a mut dyn ImageSource,
    raster: Raster,
}

impl<'a> RasterLease<'a> {
    /// Take the current raster from `source`.
    pub fn acquire(source: &'a mut dyn ImageSource) -> StitchResult<Self> {
        let raster = source.take_raster()?;
        Ok(Self { source, raster })
    }
}

impl Deref for RasterLease<'_> {
    type Target = Raster;

    fn deref(&self) -> &Raster {
        &self.raster
    }
}

impl DerefMut for RasterLease<'_> {
    fn deref_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }
}

impl Drop for RasterLease<'_> {
    fn drop(&mut self) {
        let raster = std::mem::take(&mut self.raster);
        self.source.release(raster);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/lease.rs"]
mod tests;
