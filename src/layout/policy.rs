use crate::foundation::{error::StitchResult, math::round_to_u32};

/// How an image's perpendicular extent is reconciled with the fixed canvas extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePriority {
    /// Upscale images that fall short so the perpendicular axis is always covered.
    FillUp,
    /// Downscale images that overshoot so the perpendicular axis is never exceeded.
    FillDown,
}

impl ScalePriority {
    /// Map the stored boolean preference (`true` = fill up).
    pub fn from_flag(scale_priority: bool) -> Self {
        if scale_priority {
            Self::FillUp
        } else {
            Self::FillDown
        }
    }

    /// Whether the naive perpendicular extent must be forced to `target`.
    pub fn needs_fit(self, across: u32, target: u32) -> bool {
        match self {
            Self::FillUp => across < target,
            Self::FillDown => across > target,
        }
    }
}

/// Scaled extents of one image, split by axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaledExtent {
    /// Extent along the stitching axis.
    pub along: u32,
    /// Extent perpendicular to the stitching axis.
    pub across: u32,
}

/// Apply `priority` to a naive scaled extent.
///
/// `ratio` is `along / across` of the intrinsic image. When a fit is needed the perpendicular
/// extent becomes `target` and the along extent is recomputed from the ratio.
pub(crate) fn fit(
    priority: ScalePriority,
    naive: ScaledExtent,
    target: u32,
    ratio: f64,
) -> StitchResult<ScaledExtent> {
    if !priority.needs_fit(naive.across, target) {
        return Ok(naive);
    }
    Ok(ScaledExtent {
        along: round_to_u32(f64::from(target) * ratio)?,
        across: target,
    })
}
