use crate::foundation::error::{StitchError, StitchResult};

/// Direction along which source images are concatenated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left to right; the perpendicular extent is the canvas height.
    Horizontal,
    /// Top to bottom; the perpendicular extent is the canvas width.
    Vertical,
}

impl Axis {
    /// Map the stored `stack_horizontally` preference onto an axis.
    pub fn from_stack_horizontally(stack_horizontally: bool) -> Self {
        if stack_horizontally {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Split `(width, height)` into `(along, across)` for this axis.
    pub fn split(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Horizontal => (width, height),
            Self::Vertical => (height, width),
        }
    }

    /// Inverse of [`Axis::split`].
    pub fn join(self, along: u32, across: u32) -> (u32, u32) {
        match self {
            Self::Horizontal => (along, across),
            Self::Vertical => (across, along),
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a validated, non-empty canvas size.
    pub fn new(width: u32, height: u32) -> StitchResult<Self> {
        if width == 0 || height == 0 {
            return Err(StitchError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Extent perpendicular to `axis`.
    pub fn across(self, axis: Axis) -> u32 {
        axis.split(self.width, self.height).1
    }

    /// Number of RGBA8 bytes needed to back this canvas.
    pub fn rgba8_len(self) -> StitchResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                StitchError::resource(format!(
                    "canvas {}x{} overflows addressable memory",
                    self.width, self.height
                ))
            })
    }
}

/// Axis-aligned destination rectangle, half-open: `[left, right) x [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DestRect {
    /// Inclusive left edge.
    pub left: u32,
    /// Inclusive top edge.
    pub top: u32,
    /// Exclusive right edge.
    pub right: u32,
    /// Exclusive bottom edge.
    pub bottom: u32,
}

impl DestRect {
    /// Construct from edges. `right >= left` and `bottom >= top` must hold.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> StitchResult<Self> {
        if right < left || bottom < top {
            return Err(StitchError::validation(format!(
                "inverted rectangle ({left},{top},{right},{bottom})"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Build a rectangle from a stitching-axis span and a perpendicular span starting at 0.
    pub fn from_spans(axis: Axis, along_start: u32, along_end: u32, across: u32) -> Self {
        match axis {
            Axis::Horizontal => Self {
                left: along_start,
                top: 0,
                right: along_end,
                bottom: across,
            },
            Axis::Vertical => Self {
                left: 0,
                top: along_start,
                right: across,
                bottom: along_end,
            },
        }
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.bottom - self.top
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Start edge along `axis`.
    pub fn start(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Exclusive end edge along `axis`.
    pub fn end(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Extent perpendicular to `axis`.
    pub fn across(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.height(),
            Axis::Vertical => self.width(),
        }
    }

    /// `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }
}

/// 32-bit ARGB color as stored in preferences (`0xAARRGGBB`).
///
/// Alpha `0` is the transparent sentinel: no background fill is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ArgbColor(pub u32);

impl ArgbColor {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Build from separate channels.
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }

    /// Alpha channel.
    pub fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Straight-alpha RGBA8 bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        let [a, r, g, b] = self.0.to_be_bytes();
        [r, g, b, a]
    }

    /// Parse `AARRGGBB` or `RRGGBB` hex, with an optional leading `#` or `0x`.
    pub fn parse_hex(s: &str) -> StitchResult<Self> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        let v = u32::from_str_radix(digits, 16)
            .map_err(|e| StitchError::config(format!("invalid color '{s}': {e}")))?;
        match digits.len() {
            8 => Ok(Self(v)),
            6 => Ok(Self(0xFF00_0000 | v)),
            _ => Err(StitchError::config(format!(
                "color '{s}' must have 6 or 8 hex digits"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
