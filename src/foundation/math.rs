use crate::foundation::error::{StitchError, StitchResult};

/// Scale an integer extent by `factor`, rounding half away from zero (`f64::round`).
pub(crate) fn scale_extent(extent: u32, factor: f64) -> StitchResult<u32> {
    round_to_u32(f64::from(extent) * factor)
}

/// Round a non-negative finite value to the nearest `u32`, half away from zero.
pub(crate) fn round_to_u32(v: f64) -> StitchResult<u32> {
    if !v.is_finite() || v < 0.0 {
        return Err(StitchError::resource(format!(
            "scaled extent {v} is not a finite non-negative number"
        )));
    }
    let r = v.round();
    if r > f64::from(u32::MAX) {
        return Err(StitchError::resource(format!(
            "scaled extent {r} exceeds u32 range"
        )));
    }
    Ok(r as u32)
}

/// Integer downsample hint: how many source pixels map onto one destination pixel.
///
/// Never below 1; a zero target yields 1.
pub(crate) fn downsample_factor(intrinsic: u32, target: u32) -> u32 {
    if target == 0 {
        return 1;
    }
    (intrinsic / target).max(1)
}

/// Device-independent units to pixels, multiplied by the user zoom.
pub(crate) fn dp_to_px(dp: u32, density: f64, scale: f64) -> StitchResult<u32> {
    round_to_u32(f64::from(dp) * density * scale)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
