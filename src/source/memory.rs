use image::imageops::FilterType;

use crate::{
    foundation::error::{StitchError, StitchResult},
    raster::Raster,
    source::{DecodeMode, DecodeRequest, ImageSource, SourceDescriptor},
};

/// Source over rasters that are already in memory.
///
/// `take_raster` hands out a copy (reduced when a downsample factor is requested), so the
/// stored rasters survive any number of passes.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    images: Vec<Raster>,
    position: usize,
    request: DecodeRequest,
    outstanding: usize,
    peak_outstanding: usize,
}

impl MemorySource {
    /// Create a source yielding `images` in order.
    pub fn new(images: Vec<Raster>) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    /// Number of images in the sequence.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Most rasters that were taken and not yet released at the same time.
    pub fn peak_outstanding(&self) -> usize {
        self.peak_outstanding
    }

    /// Rasters currently taken and not released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    fn current(&self) -> StitchResult<&Raster> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.images.get(i))
            .ok_or_else(|| StitchError::decode("no current image; call next_descriptor first"))
    }
}

impl ImageSource for MemorySource {
    fn reset(&mut self) {
        self.position = 0;
        self.request = DecodeRequest::default();
    }

    fn next_descriptor(&mut self) -> StitchResult<Option<SourceDescriptor>> {
        let Some(img) = self.images.get(self.position) else {
            return Ok(None);
        };
        let desc = SourceDescriptor {
            index: self.position,
            width: img.width(),
            height: img.height(),
        };
        self.position += 1;
        self.request = DecodeRequest::default();
        Ok(Some(desc))
    }

    fn request_decode(&mut self, request: DecodeRequest) -> StitchResult<()> {
        self.current()?;
        self.request = request;
        Ok(())
    }

    fn take_raster(&mut self) -> StitchResult<Raster> {
        if self.request.mode != DecodeMode::Pixels {
            return Err(StitchError::decode(
                "pixels requested while decode mode is bounds-only",
            ));
        }
        let src = self.current()?;
        let f = self.request.downsample.max(1);
        let raster = if f == 1 {
            src.clone()
        } else {
            let w = (src.width() / f).max(1);
            let h = (src.height() / f).max(1);
            Raster::with_density(
                image::imageops::resize(&src.pixels, w, h, FilterType::Triangle),
                src.density,
            )
        };

        self.outstanding += 1;
        self.peak_outstanding = self.peak_outstanding.max(self.outstanding);
        Ok(raster)
    }

    fn release(&mut self, raster: Raster) {
        self.outstanding = self.outstanding.saturating_sub(1);
        drop(raster);
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/memory.rs"]
mod tests;
