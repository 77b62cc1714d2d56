use super::*;

#[test]
fn axis_split_and_join_are_inverse() {
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let (along, across) = axis.split(30, 70);
        assert_eq!(axis.join(along, across), (30, 70));
    }
    assert_eq!(Axis::Horizontal.split(30, 70), (30, 70));
    assert_eq!(Axis::Vertical.split(30, 70), (70, 30));
}

#[test]
fn axis_from_preference_flag() {
    assert_eq!(Axis::from_stack_horizontally(true), Axis::Horizontal);
    assert_eq!(Axis::from_stack_horizontally(false), Axis::Vertical);
}

#[test]
fn canvas_size_rejects_empty() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    let c = CanvasSize::new(10, 20).unwrap();
    assert_eq!(c.across(Axis::Horizontal), 20);
    assert_eq!(c.across(Axis::Vertical), 10);
    assert_eq!(c.rgba8_len().unwrap(), 800);
}

#[test]
fn dest_rect_spans_follow_axis() {
    let h = DestRect::from_spans(Axis::Horizontal, 110, 190, 50);
    assert_eq!(h, DestRect::new(110, 0, 190, 50).unwrap());
    assert_eq!(h.start(Axis::Horizontal), 110);
    assert_eq!(h.end(Axis::Horizontal), 190);
    assert_eq!(h.across(Axis::Horizontal), 50);

    let v = DestRect::from_spans(Axis::Vertical, 0, 200, 80);
    assert_eq!(v, DestRect::new(0, 0, 80, 200).unwrap());
    assert_eq!(v.end(Axis::Vertical), 200);
    assert_eq!(v.across(Axis::Vertical), 80);
}

#[test]
fn dest_rect_rejects_inverted_edges() {
    assert!(DestRect::new(10, 0, 5, 10).is_err());
    assert!(DestRect::new(0, 10, 5, 5).is_err());
    assert!(DestRect::new(3, 3, 3, 9).unwrap().is_empty());
}

#[test]
fn dest_rect_contains_is_half_open() {
    let r = DestRect::new(2, 2, 4, 4).unwrap();
    assert!(r.contains(2, 2));
    assert!(r.contains(3, 3));
    assert!(!r.contains(4, 3));
    assert!(!r.contains(3, 4));
}

#[test]
fn argb_channels_and_sentinel() {
    let c = ArgbColor::from_argb(0x80, 0x11, 0x22, 0x33);
    assert_eq!(c.0, 0x8011_2233);
    assert_eq!(c.alpha(), 0x80);
    assert_eq!(c.to_rgba8(), [0x11, 0x22, 0x33, 0x80]);
    assert!(!c.is_transparent());
    assert!(ArgbColor::TRANSPARENT.is_transparent());
    assert!(ArgbColor(0x00FF_FFFF).is_transparent());
}

#[test]
fn argb_parse_hex_forms() {
    assert_eq!(ArgbColor::parse_hex("#FF0000FF").unwrap().0, 0xFF00_00FF);
    assert_eq!(ArgbColor::parse_hex("0x00000000").unwrap(), ArgbColor::TRANSPARENT);
    assert_eq!(ArgbColor::parse_hex("00ff00").unwrap().0, 0xFF00_FF00);
    assert!(ArgbColor::parse_hex("#fff").is_err());
    assert!(ArgbColor::parse_hex("zzzzzz").is_err());
}
