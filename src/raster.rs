use image::RgbaImage;

/// Density tag carried by a decoded image.
///
/// Drawing primitives must never apply a secondary density scale, so rasters are normalized to
/// [`Density::Unscaled`] before they reach a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Density {
    /// Pixels map 1:1 onto the destination.
    #[default]
    Unscaled,
    /// Pixels were authored for the given dots-per-inch.
    Dpi(u32),
}

/// A straight-alpha RGBA8 pixel buffer plus its density tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Raster {
    /// Pixels, row-major.
    pub pixels: RgbaImage,
    /// Density metadata.
    pub density: Density,
}

impl Raster {
    /// Wrap pixels with no density scaling.
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            density: Density::Unscaled,
        }
    }

    /// Wrap pixels tagged with a density.
    pub fn with_density(pixels: RgbaImage, density: Density) -> Self {
        Self { pixels, density }
    }

    /// Solid-color raster, handy for fixtures.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Drop the density tag.
    pub fn normalize_density(&mut self) {
        self.density = Density::Unscaled;
    }

    /// RGBA8 pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }
}
