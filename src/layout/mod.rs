//! Placement arithmetic for stitching.
//!
//! A [`LayoutEngine`] walks images in order and hands out one [`Placement`] per image. The
//! engine only sees bounds; it never touches pixels.

mod policy;

pub use policy::{ScalePriority, ScaledExtent};

use crate::foundation::{
    core::{Axis, CanvasSize, DestRect},
    error::{StitchError, StitchResult},
    math::{downsample_factor, scale_extent},
};

/// Where and how large a single source image lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Destination rectangle on the canvas.
    pub rect: DestRect,
    /// Scaled extents after the priority policy was applied.
    pub scaled: ScaledExtent,
    /// Decode hint for the source (`>= 1`).
    pub downsample: u32,
}

/// Stateful per-call layout cursor.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    axis: Axis,
    scale: f64,
    target: u32,
    spacing: u32,
    priority: ScalePriority,
    cursor: u32,
}

impl LayoutEngine {
    /// Create an engine for `axis` whose perpendicular extent is fixed to `target`.
    ///
    /// `spacing` is already in pixels (density and zoom applied).
    pub fn new(
        axis: Axis,
        scale: f64,
        target: u32,
        spacing: u32,
        priority: ScalePriority,
    ) -> StitchResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(StitchError::validation(format!(
                "selected scale must be finite and > 0, got {scale}"
            )));
        }
        if target == 0 {
            return Err(StitchError::validation(
                "perpendicular target extent must be > 0",
            ));
        }
        Ok(Self {
            axis,
            scale,
            target,
            spacing,
            priority,
            cursor: 0,
        })
    }

    /// Engine whose target is the perpendicular extent of `canvas`.
    pub fn for_canvas(
        axis: Axis,
        scale: f64,
        canvas: CanvasSize,
        spacing: u32,
        priority: ScalePriority,
    ) -> StitchResult<Self> {
        Self::new(axis, scale, canvas.across(axis), spacing, priority)
    }

    /// Stitching axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Offset where the next image starts.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Place the next image of intrinsic size `width x height` and advance the cursor.
    pub fn place(&mut self, width: u32, height: u32) -> StitchResult<Placement> {
        if width == 0 || height == 0 {
            return Err(StitchError::validation(format!(
                "source image has zero extent ({width}x{height})"
            )));
        }

        let (along, across) = self.axis.split(width, height);
        let ratio = f64::from(along) / f64::from(across);

        let naive = ScaledExtent {
            along: scale_extent(along, self.scale)?,
            across: scale_extent(across, self.scale)?,
        };
        let scaled = policy::fit(self.priority, naive, self.target, ratio)?;

        let start = self.cursor;
        let end = start.checked_add(scaled.along).ok_or_else(|| {
            StitchError::resource(format!(
                "layout overflow: cursor {start} + extent {}",
                scaled.along
            ))
        })?;
        let rect = DestRect::from_spans(self.axis, start, end, self.target);

        // Saturates; an overflowing cursor only fails on the next `place`.
        self.cursor = end.saturating_add(self.spacing);

        Ok(Placement {
            rect,
            scaled,
            downsample: downsample_factor(across, self.target),
        })
    }
}

/// Compute the canvas a caller has to allocate for `dims` laid out along `axis`.
///
/// The along extent is the end of the last placement (no trailing spacing); the perpendicular
/// extent is `target`. An empty input yields an error since a canvas cannot be empty.
pub fn measure(
    axis: Axis,
    scale: f64,
    target: u32,
    spacing: u32,
    priority: ScalePriority,
    dims: impl IntoIterator<Item = (u32, u32)>,
) -> StitchResult<CanvasSize> {
    let mut engine = LayoutEngine::new(axis, scale, target, spacing, priority)?;
    let mut along = None;
    for (w, h) in dims {
        along = Some(engine.place(w, h)?.rect.end(axis));
    }
    let along =
        along.ok_or_else(|| StitchError::validation("cannot measure an empty image sequence"))?;
    let (width, height) = axis.join(along, target);
    CanvasSize::new(width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
