//! Canvas allocation and drawing primitives.

mod cpu;

pub use cpu::{CpuSurface, CpuSurfaceProvider};

use image::imageops::FilterType;

use crate::{
    foundation::{
        core::{ArgbColor, CanvasSize, DestRect},
        error::StitchResult,
    },
    raster::Raster,
};

/// Resampling filter used when an image is drawn into a rectangle of a different size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour, no smoothing.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic.
    CatmullRom,
    /// Windowed sinc, sharpest.
    Lanczos3,
}

impl ResampleFilter {
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Paint options for [`Surface::draw_image_into`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawOptions {
    /// Filter applied while resampling into the destination rectangle.
    pub filter: ResampleFilter,
    /// Alpha-composite over existing pixels; when `false` source pixels replace the destination.
    pub blend: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::CatmullRom,
            blend: true,
        }
    }
}

/// A mutable canvas.
pub trait Surface: Send {
    /// Canvas size.
    fn size(&self) -> CanvasSize;

    /// Overwrite every pixel with `color`.
    fn fill(&mut self, color: ArgbColor);

    /// Resample `image` to exactly `rect` and draw it there. Parts outside the canvas are clipped.
    fn draw_image_into(
        &mut self,
        image: &Raster,
        rect: DestRect,
        opts: &DrawOptions,
    ) -> StitchResult<()>;

    /// Finish drawing and hand back the pixels.
    fn into_raster(self: Box<Self>) -> Raster;
}

/// Allocates empty, fully transparent surfaces.
pub trait SurfaceProvider: Send + Sync {
    /// Allocate a `size` canvas.
    fn create_surface(&self, size: CanvasSize) -> StitchResult<Box<dyn Surface>>;
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
