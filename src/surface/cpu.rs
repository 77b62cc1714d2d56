use image::{Rgba, RgbaImage, imageops};

use crate::{
    foundation::{
        core::{ArgbColor, CanvasSize, DestRect},
        error::{StitchError, StitchResult},
    },
    raster::{Density, Raster},
    surface::{DrawOptions, Surface, SurfaceProvider},
};

/// Allocates [`CpuSurface`]s, refusing canvases above a byte budget.
#[derive(Clone, Copy, Debug)]
pub struct CpuSurfaceProvider {
    max_canvas_bytes: usize,
}

impl CpuSurfaceProvider {
    /// Default budget: 1 GiB of RGBA8.
    pub const DEFAULT_MAX_CANVAS_BYTES: usize = 1 << 30;

    /// Provider with a custom byte budget.
    pub fn with_max_canvas_bytes(max_canvas_bytes: usize) -> Self {
        Self { max_canvas_bytes }
    }
}

impl Default for CpuSurfaceProvider {
    fn default() -> Self {
        Self::with_max_canvas_bytes(Self::DEFAULT_MAX_CANVAS_BYTES)
    }
}

impl SurfaceProvider for CpuSurfaceProvider {
    fn create_surface(&self, size: CanvasSize) -> StitchResult<Box<dyn Surface>> {
        let bytes = size.rgba8_len()?;
        if bytes > self.max_canvas_bytes {
            return Err(StitchError::resource(format!(
                "canvas {}x{} needs {bytes} bytes (limit {})",
                size.width, size.height, self.max_canvas_bytes
            )));
        }
        Ok(Box::new(CpuSurface::new(size)))
    }
}

/// Straight-alpha RGBA8 canvas backed by an [`RgbaImage`].
#[derive(Clone, Debug)]
pub struct CpuSurface {
    pixels: RgbaImage,
}

impl CpuSurface {
    /// Transparent canvas of `size`.
    pub fn new(size: CanvasSize) -> Self {
        Self {
            pixels: RgbaImage::new(size.width, size.height),
        }
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    fn fill(&mut self, color: ArgbColor) {
        let px = Rgba(color.to_rgba8());
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    fn draw_image_into(
        &mut self,
        image: &Raster,
        rect: DestRect,
        opts: &DrawOptions,
    ) -> StitchResult<()> {
        if image.density != Density::Unscaled {
            return Err(StitchError::draw(format!(
                "raster density {:?} must be normalized before drawing",
                image.density
            )));
        }
        if rect.is_empty() {
            return Ok(());
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(StitchError::draw("cannot draw an empty raster"));
        }

        let (w, h) = (rect.width(), rect.height());
        let resized;
        let src = if (image.width(), image.height()) == (w, h) {
            &image.pixels
        } else {
            resized = imageops::resize(&image.pixels, w, h, opts.filter.to_image_filter());
            &resized
        };

        let (x, y) = (i64::from(rect.left), i64::from(rect.top));
        if opts.blend {
            imageops::overlay(&mut self.pixels, src, x, y);
        } else {
            imageops::replace(&mut self.pixels, src, x, y);
        }
        Ok(())
    }

    fn into_raster(self: Box<Self>) -> Raster {
        Raster::new(self.pixels)
    }
}
