use super::*;

fn engine(axis: Axis, target: u32, spacing: u32, priority: ScalePriority) -> LayoutEngine {
    LayoutEngine::new(axis, 1.0, target, spacing, priority).unwrap()
}

#[test]
fn horizontal_fill_down_two_images() {
    let mut e = engine(Axis::Horizontal, 50, 10, ScalePriority::FillDown);

    let a = e.place(100, 50).unwrap();
    assert_eq!(a.rect, DestRect::new(0, 0, 100, 50).unwrap());
    assert_eq!(e.cursor(), 110);

    let b = e.place(80, 50).unwrap();
    assert_eq!(b.rect, DestRect::new(110, 0, 190, 50).unwrap());
    assert_eq!(e.cursor(), 200);
}

#[test]
fn vertical_fill_up_recomputes_height_from_ratio() {
    let mut e = engine(Axis::Vertical, 80, 0, ScalePriority::FillUp);
    let p = e.place(40, 100).unwrap();
    assert_eq!(p.scaled, ScaledExtent { along: 200, across: 80 });
    assert_eq!(p.rect, DestRect::new(0, 0, 80, 200).unwrap());
}

#[test]
fn fill_down_shrinks_oversized_images() {
    let mut e = engine(Axis::Horizontal, 50, 0, ScalePriority::FillDown);
    let p = e.place(300, 100).unwrap();
    assert_eq!(p.scaled, ScaledExtent { along: 150, across: 50 });
    assert_eq!(p.rect, DestRect::new(0, 0, 150, 50).unwrap());
}

#[test]
fn fill_down_keeps_smaller_images_but_spans_full_target() {
    let mut e = engine(Axis::Horizontal, 50, 0, ScalePriority::FillDown);
    let p = e.place(60, 20).unwrap();
    assert_eq!(p.scaled, ScaledExtent { along: 60, across: 20 });
    // The perpendicular span is always the canvas extent, never the naive scaled size.
    assert_eq!(p.rect, DestRect::new(0, 0, 60, 50).unwrap());
}

#[test]
fn fill_up_keeps_larger_images() {
    let mut e = engine(Axis::Vertical, 80, 0, ScalePriority::FillUp);
    let p = e.place(120, 60).unwrap();
    assert_eq!(p.scaled, ScaledExtent { along: 60, across: 120 });
    assert_eq!(p.rect, DestRect::new(0, 0, 80, 60).unwrap());
}

#[test]
fn selected_scale_applies_before_policy() {
    let mut e = LayoutEngine::new(Axis::Horizontal, 0.5, 50, 4, ScalePriority::FillDown).unwrap();
    let p = e.place(101, 60).unwrap();
    // 101 * 0.5 = 50.5 rounds away from zero.
    assert_eq!(p.scaled, ScaledExtent { along: 51, across: 30 });
    assert_eq!(e.cursor(), 55);
}

#[test]
fn downsample_hint_tracks_perpendicular_reduction() {
    let mut e = engine(Axis::Horizontal, 50, 0, ScalePriority::FillDown);
    assert_eq!(e.place(1000, 500).unwrap().downsample, 10);
    assert_eq!(e.place(100, 40).unwrap().downsample, 1);
}

#[test]
fn zero_sized_image_is_rejected() {
    let mut e = engine(Axis::Horizontal, 50, 0, ScalePriority::FillDown);
    assert!(matches!(e.place(0, 10), Err(StitchError::Validation(_))));
    assert!(matches!(e.place(10, 0), Err(StitchError::Validation(_))));
    assert_eq!(e.cursor(), 0);
}

#[test]
fn invalid_engine_parameters_are_rejected() {
    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(LayoutEngine::new(Axis::Horizontal, scale, 10, 0, ScalePriority::FillUp).is_err());
    }
    assert!(LayoutEngine::new(Axis::Horizontal, 1.0, 0, 0, ScalePriority::FillUp).is_err());
}

#[test]
fn cursor_overflow_is_a_resource_error() {
    let mut e = engine(Axis::Horizontal, 1, u32::MAX, ScalePriority::FillDown);
    e.place(1, 1).unwrap();
    assert!(matches!(e.place(1, 1), Err(StitchError::Resource(_))));
}

#[test]
fn for_canvas_uses_perpendicular_extent() {
    let canvas = CanvasSize::new(300, 50).unwrap();
    let mut e =
        LayoutEngine::for_canvas(Axis::Horizontal, 1.0, canvas, 0, ScalePriority::FillUp)
            .unwrap();
    assert_eq!(e.axis(), Axis::Horizontal);
    assert_eq!(e.place(10, 10).unwrap().rect.bottom, 50);
}

#[test]
fn measure_sums_extents_without_trailing_spacing() {
    let size = measure(
        Axis::Horizontal,
        1.0,
        50,
        10,
        ScalePriority::FillDown,
        [(100, 50), (80, 50)],
    )
    .unwrap();
    assert_eq!(size, CanvasSize::new(190, 50).unwrap());

    let size = measure(Axis::Vertical, 1.0, 80, 0, ScalePriority::FillUp, [(40, 100)]).unwrap();
    assert_eq!(size, CanvasSize::new(80, 200).unwrap());
}

#[test]
fn measure_rejects_empty_sequence() {
    assert!(
        measure(
            Axis::Vertical,
            1.0,
            80,
            0,
            ScalePriority::FillUp,
            std::iter::empty::<(u32, u32)>(),
        )
        .is_err()
    );
}

#[test]
fn priority_from_flag() {
    assert_eq!(ScalePriority::from_flag(true), ScalePriority::FillUp);
    assert_eq!(ScalePriority::from_flag(false), ScalePriority::FillDown);
    assert!(ScalePriority::FillUp.needs_fit(10, 20));
    assert!(!ScalePriority::FillUp.needs_fit(20, 20));
    assert!(ScalePriority::FillDown.needs_fit(30, 20));
    assert!(!ScalePriority::FillDown.needs_fit(20, 20));
}
