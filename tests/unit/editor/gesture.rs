use super::*;

fn bounds() -> CanvasBounds {
    CanvasBounds::new(10.0, 20.0, 400.0, 200.0).unwrap()
}

#[test]
fn bounds_reject_degenerate_sizes() {
    assert!(CanvasBounds::sized(0.0, 100.0).is_err());
    assert!(CanvasBounds::sized(100.0, f64::NAN).is_err());
    assert!(CanvasBounds::new(f64::INFINITY, 0.0, 10.0, 10.0).is_err());
    assert!(CanvasBounds::sized(1.0, 1.0).is_ok());
}

#[test]
fn drag_converts_pixels_to_percent_and_clamps() {
    let b = bounds();
    let start = Point::new(100.0, 100.0);
    let (x, y) = drag_position(&b, (50.0, 50.0), start, Point::new(140.0, 80.0));
    assert!((x - 60.0).abs() < 1e-9);
    assert!((y - 40.0).abs() < 1e-9);

    // Raw x would be 50 - 65 = -15.
    let (x, _) = drag_position(&b, (50.0, 50.0), start, Point::new(-160.0, 100.0));
    assert_eq!(x, 0.0);
    // Raw x would be 50 + 80 = 130.
    let (x, _) = drag_position(&b, (50.0, 50.0), start, Point::new(420.0, 100.0));
    assert_eq!(x, 100.0);
}

#[test]
fn rotation_zero_is_straight_up() {
    let c = Point::new(0.0, 0.0);
    assert!(rotation_towards(c, Point::new(0.0, -10.0)).abs() < 1e-9);
    assert!((rotation_towards(c, Point::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
    assert!((rotation_towards(c, Point::new(0.0, 10.0)) - 180.0).abs() < 1e-9);
    assert!((rotation_towards(c, Point::new(-10.0, 0.0)) + 90.0).abs() < 1e-9);
    assert!((rotation_towards(c, Point::new(-10.0, -10.0)) + 45.0).abs() < 1e-9);
}

#[test]
fn resize_uses_signed_distance() {
    let b = bounds();
    let start = Point::new(200.0, 100.0);
    // 3-4-5 triangle: 50px of travel on a 400px wide canvas is 12.5%.
    let grown = resize_scale(&b, 20.0, start, Point::new(230.0, 140.0));
    assert!((grown - 32.5).abs() < 1e-9);
    let shrunk = resize_scale(&b, 20.0, start, Point::new(170.0, 60.0));
    assert!((shrunk - 7.5).abs() < 1e-9);
    // Right but up still counts as growth.
    let mixed = resize_scale(&b, 20.0, start, Point::new(230.0, 60.0));
    assert!((mixed - 32.5).abs() < 1e-9);

    assert_eq!(resize_scale(&b, 20.0, start, Point::new(-2000.0, 100.0)), SCALE_MIN);
    assert_eq!(resize_scale(&b, 150.0, start, Point::new(2000.0, 100.0)), SCALE_MAX);
}

#[test]
fn gesture_state_reports_target() {
    assert!(!GestureState::Idle.is_active());
    let g = GestureState::Rotating { id: ElementId(4) };
    assert!(g.is_active());
    assert_eq!(g.target(), Some(ElementId(4)));
}
