use super::*;
use crate::foundation::core::Point;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn contain_preserves_aspect_and_centers() {
    let fit = PathFit::contain(24.0, 24.0, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
    assert!(close(fit.scale, 100.0 / 24.0));
    let a = fit.affine();
    let tl = a * Point::new(0.0, 0.0);
    let br = a * Point::new(24.0, 24.0);
    assert!(close(tl.x, 50.0) && close(tl.y, 0.0));
    assert!(close(br.x, 150.0) && close(br.y, 100.0));
    assert!(close(br.x - tl.x, br.y - tl.y));
}

#[test]
fn contain_respects_inset_box() {
    let fit = PathFit::contain(10.0, 20.0, Rect::new(5.0, 5.0, 95.0, 95.0)).unwrap();
    let a = fit.affine();
    let tl = a * Point::new(0.0, 0.0);
    let br = a * Point::new(10.0, 20.0);
    assert!(close(tl.y, 5.0) && close(br.y, 95.0));
    assert!(close(tl.x + br.x, 100.0));
}

#[test]
fn contain_rejects_empty_inputs() {
    assert!(PathFit::contain(0.0, 10.0, Rect::new(0.0, 0.0, 10.0, 10.0)).is_none());
    assert!(PathFit::contain(10.0, 10.0, Rect::new(5.0, 5.0, 5.0, 20.0)).is_none());
}

#[test]
fn cover_fills_the_box() {
    let a = cover(400, 100, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    let tl = a * Point::new(0.0, 0.0);
    let br = a * Point::new(400.0, 100.0);
    assert!(close(tl.y, 0.0) && close(br.y, 100.0));
    assert!(close(tl.x, -150.0) && close(br.x, 250.0));
    assert!(cover(0, 10, Rect::new(0.0, 0.0, 1.0, 1.0)).is_none());
}

#[test]
fn stretch_maps_corners_exactly() {
    let a = stretch(10, 20, Rect::new(2.0, 3.0, 52.0, 13.0)).unwrap();
    let br = a * Point::new(10.0, 20.0);
    assert!(close(br.x, 52.0) && close(br.y, 13.0));
}
