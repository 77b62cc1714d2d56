use super::*;

#[test]
fn scale_extent_rounds_half_away_from_zero() {
    assert_eq!(scale_extent(100, 1.0).unwrap(), 100);
    assert_eq!(scale_extent(5, 0.5).unwrap(), 3); // 2.5 -> 3
    assert_eq!(scale_extent(3, 0.5).unwrap(), 2); // 1.5 -> 2
    assert_eq!(scale_extent(7, 0.3).unwrap(), 2); // 2.1 -> 2
    assert_eq!(scale_extent(0, 3.0).unwrap(), 0);
}

#[test]
fn round_to_u32_rejects_non_finite_and_negative() {
    assert!(round_to_u32(f64::NAN).is_err());
    assert!(round_to_u32(f64::INFINITY).is_err());
    assert!(round_to_u32(-1.0).is_err());
    assert!(round_to_u32(f64::from(u32::MAX) * 2.0).is_err());
}

#[test]
fn downsample_factor_is_at_least_one() {
    assert_eq!(downsample_factor(1000, 50), 20);
    assert_eq!(downsample_factor(1000, 300), 3);
    assert_eq!(downsample_factor(50, 50), 1);
    assert_eq!(downsample_factor(40, 80), 1);
    assert_eq!(downsample_factor(40, 0), 1);
}

#[test]
fn dp_to_px_applies_density_and_zoom() {
    assert_eq!(dp_to_px(10, 1.0, 1.0).unwrap(), 10);
    assert_eq!(dp_to_px(10, 2.0, 1.0).unwrap(), 20);
    assert_eq!(dp_to_px(10, 2.0, 0.5).unwrap(), 10);
    assert_eq!(dp_to_px(3, 1.5, 1.0).unwrap(), 5); // 4.5 -> 5
    assert_eq!(dp_to_px(0, 3.0, 2.0).unwrap(), 0);
}
