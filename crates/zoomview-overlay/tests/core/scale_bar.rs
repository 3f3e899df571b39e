use std::f64::consts::FRAC_PI_2;

use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba};
use zoomview_overlay::{
    add_prefix, DisplayList, DrawCommand, Orientation, OverlayArtwork, ScaleBar,
    DEFAULT_SCALE_BAR_TEXT,
};

const EPS: f64 = 1e-9;

fn zoom2(p: Point2D) -> Point2D {
    Point2D::new(p.x * 2.0, p.y * 2.0)
}

#[test]
fn test_defaults() {
    let h = ScaleBar::horizontal(1.0, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    assert_eq!(h.orientation, Orientation::Horizontal);
    assert_eq!(h.location, Point2D::new(30.0, -40.0));
    assert_eq!((h.min_width_px, h.max_width_px, h.tick_height_px), (100.0, 200.0, 20.0));

    let v = ScaleBar::vertical(1.0, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    assert_eq!(v.orientation, Orientation::Vertical);
    assert_eq!(v.location, Point2D::new(-30.0, -30.0));
}

#[test]
fn test_size_picks_closest_nice_number() {
    let bar = ScaleBar::horizontal(0.5, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    // 4 screen px per unit: candidates 40..200 px, 160 px is closest to 150.
    let (number, width) = bar.size(&zoom2);
    assert!((number - 40.0).abs() < EPS, "number {}", number);
    assert!((width - 160.0).abs() < EPS, "width {}", width);
}

#[test]
fn test_vertical_size_measures_y_axis() {
    let stretch = |p: Point2D| Point2D::new(p.x * 2.0, p.y * 4.0);
    let h = ScaleBar::horizontal(0.5, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let v = ScaleBar::vertical(0.5, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);

    let (hn, hw) = h.size(&stretch);
    assert!((hn - 40.0).abs() < EPS);
    assert!((hw - 160.0).abs() < EPS);

    // 8 px per unit vertically: 20 units span 160 px.
    let (vn, vw) = v.size(&stretch);
    assert!((vn - 20.0).abs() < EPS, "number {}", vn);
    assert!((vw - 160.0).abs() < EPS, "width {}", vw);
}

#[test]
fn test_add_prefix() {
    let (v, p) = add_prefix(2500.0);
    assert!((v - 2.5).abs() < EPS);
    assert_eq!(p, "k");

    let (v, p) = add_prefix(0.0005);
    assert!((v - 500.0).abs() < 1e-6);
    assert_eq!(p, "µ");

    assert_eq!(add_prefix(40.0), (40.0, ""));
    // Outside the table the raw value comes back.
    assert_eq!(add_prefix(5e13), (5e13, ""));
    assert_eq!(add_prefix(0.0), (0.0, ""));
}

#[test]
fn test_label() {
    let identity = |p: Point2D| p;
    let bar = ScaleBar::horizontal(2e-3, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let (number, _) = bar.size(&identity);
    assert_eq!(bar.label(number), "300 mm");

    let custom = ScaleBar::horizontal(1.0, "{value}{prefix}s", Rgba::WHITE);
    assert_eq!(custom.label(0.002), "2ms");
}

#[test]
fn test_paint_horizontal_anchors_bottom_left() {
    let bar = ScaleBar::horizontal(0.5, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let mut list = DisplayList::new(400.0, 300.0);
    bar.paint(&mut list, &zoom2);

    let lines: Vec<_> = list.lines().collect();
    assert_eq!(lines.len(), 3);
    let (from, to, width) = lines[0];
    assert!(from.distance_to(&Point2D::new(30.0, 260.0)) < EPS);
    assert!(to.distance_to(&Point2D::new(190.0, 260.0)) < EPS);
    assert_eq!(width, 2.0);
    assert!(lines[1].0.distance_to(&Point2D::new(30.0, 250.0)) < EPS);
    assert!(lines[1].1.distance_to(&Point2D::new(30.0, 270.0)) < EPS);

    match list.commands().last() {
        Some(DrawCommand::Text { anchor, text, style }) => {
            assert_eq!(text, "40 m");
            assert!(anchor.distance_to(&Point2D::new(110.0, 262.0)) < EPS);
            assert_eq!(style.rotation, 0.0);
        }
        other => panic!("expected label, got {:?}", other),
    }
}

#[test]
fn test_paint_vertical_anchors_bottom_right() {
    let bar = ScaleBar::vertical(0.5, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let mut list = DisplayList::new(400.0, 300.0);
    bar.paint(&mut list, &zoom2);

    let (from, to, _) = list.lines().next().expect("bar line");
    assert!(from.distance_to(&Point2D::new(370.0, 110.0)) < EPS);
    assert!(to.distance_to(&Point2D::new(370.0, 270.0)) < EPS);

    match list.commands().last() {
        Some(DrawCommand::Text { anchor, style, .. }) => {
            assert!(anchor.distance_to(&Point2D::new(372.0, 190.0)) < EPS);
            assert!((style.rotation + FRAC_PI_2).abs() < EPS);
        }
        other => panic!("expected label, got {:?}", other),
    }
}

#[test]
fn test_paint_skips_degenerate_transform() {
    let bar = ScaleBar::horizontal(1.0, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let collapse = |_: Point2D| Point2D::ZERO;
    let mut list = DisplayList::new(400.0, 300.0);
    bar.paint(&mut list, &collapse);
    assert!(list.is_empty());
}

#[test]
fn test_has_no_handles() {
    let mut bar = ScaleBar::horizontal(1.0, DEFAULT_SCALE_BAR_TEXT, Rgba::WHITE);
    let identity = |p: Point2D| p;
    assert!(bar.find_handle(Point2D::new(30.0, 30.0), &identity).is_none());
    assert_eq!(bar.cursor(0), CursorHint::Default);
    let before = bar.clone();
    bar.move_handle(0, Point2D::new(1.0, 1.0), Modifiers::NONE);
    assert_eq!(bar, before);
}
