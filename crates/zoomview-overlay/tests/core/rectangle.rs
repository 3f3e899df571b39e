use std::f64::consts::{FRAC_PI_2, PI};

use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba, Status};
use zoomview_overlay::{
    DisplayList, HandleIndex, OverlayArtwork, RectGeometry, RectangleArtwork, RectangleSnapshot,
};

const EPS: f64 = 1e-9;

fn identity(p: Point2D) -> Point2D {
    p
}

/// Center (100, 100), 200 x 100, unrotated.
fn sample() -> RectangleArtwork {
    RectangleArtwork::new(0.0, 50.0, 200.0, 100.0, 0.0, Rgba::RED)
}

fn assert_point_near(actual: Point2D, expected: Point2D, eps: f64) {
    assert!(
        actual.distance_to(&expected) < eps,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_initial_layout() {
    let rect = sample();
    assert_point_near(rect.center(), Point2D::new(100.0, 100.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::TopLeft), Point2D::new(0.0, 50.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::Top), Point2D::new(100.0, 50.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::Right), Point2D::new(200.0, 100.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::BottomLeft), Point2D::new(0.0, 150.0), EPS);
    assert_eq!(rect.rect(), (0.0, 50.0, 200.0, 100.0));
}

#[test]
fn test_drag_right_handle_anchors_left_edge() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::Right.index(), Point2D::new(250.0, 100.0), Modifiers::NONE);

    // Fixed handle is the left one at (0, 100): center.x = 0 + 250 / 2.
    assert!((rect.width() - 250.0).abs() < EPS, "width {}", rect.width());
    assert!((rect.height() - 100.0).abs() < EPS);
    assert_point_near(rect.center(), Point2D::new(125.0, 100.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::Left), Point2D::new(0.0, 100.0), EPS);
}

#[test]
fn test_drag_is_idempotent() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(320.0, 210.0), Modifiers::NONE);
    let once = rect.geometry();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(320.0, 210.0), Modifiers::NONE);
    let twice = rect.geometry();

    assert_point_near(once.center, twice.center, 1e-9);
    assert!((once.width - twice.width).abs() < 1e-9);
    assert!((once.height - twice.height).abs() < 1e-9);
}

#[test]
fn test_symmetric_drag_is_idempotent() {
    let mut rect = sample();
    rect.set_rotation(0.25);
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(260.0, 190.0), Modifiers::CTRL);
    let once = rect.geometry();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(260.0, 190.0), Modifiers::CTRL);
    let twice = rect.geometry();

    assert_point_near(once.center, Point2D::new(100.0, 100.0), EPS);
    assert_point_near(twice.center, once.center, EPS);
    assert!((once.width - twice.width).abs() < 1e-9, "{} vs {}", once.width, twice.width);
    assert!((once.height - twice.height).abs() < 1e-9, "{} vs {}", once.height, twice.height);

    // The dragged corner lands where it was released.
    assert_point_near(
        rect.handle_location(HandleIndex::BottomRight),
        Point2D::new(260.0, 190.0),
        1e-9,
    );
}

#[test]
fn test_corner_drag_in_pivot_mode() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(300.0, 200.0), Modifiers::NONE);

    assert!((rect.width() - 300.0).abs() < EPS);
    assert!((rect.height() - 150.0).abs() < EPS);
    assert_point_near(rect.center(), Point2D::new(150.0, 125.0), EPS);
    assert_point_near(rect.handle_location(HandleIndex::TopLeft), Point2D::new(0.0, 50.0), EPS);
}

#[test]
fn test_corner_drag_symmetric_keeps_center() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(250.0, 175.0), Modifiers::CTRL);

    assert!((rect.width() - 300.0).abs() < 1e-6, "width {}", rect.width());
    assert!((rect.height() - 150.0).abs() < 1e-6, "height {}", rect.height());
    assert_point_near(rect.center(), Point2D::new(100.0, 100.0), EPS);
}

#[test]
fn test_corner_drag_with_shift_locks_aspect() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::BottomRight.index(), Point2D::new(300.0, 150.0), Modifiers::SHIFT);

    assert!((rect.width() - 300.0).abs() < EPS);
    assert!((rect.height() - 300.0).abs() < EPS);
    assert_point_near(rect.center(), Point2D::new(150.0, 200.0), EPS);
}

#[test]
fn test_side_drag_keeps_orthogonal_dimension() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::Top.index(), Point2D::new(140.0, 10.0), Modifiers::NONE);
    assert_eq!(rect.width(), 200.0);
    assert!((rect.height() - 140.0).abs() < EPS);

    rect.move_handle(HandleIndex::Left.index(), Point2D::new(-20.0, 0.0), Modifiers::CTRL);
    assert!((rect.height() - 140.0).abs() < EPS);
}

#[test]
fn test_center_drag_translates() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::Center.index(), Point2D::new(300.0, 320.0), Modifiers::SHIFT);
    assert_point_near(rect.center(), Point2D::new(300.0, 320.0), EPS);
    assert_eq!((rect.width(), rect.height(), rect.rotation()), (200.0, 100.0, 0.0));
    assert_point_near(rect.handle_location(HandleIndex::TopLeft), Point2D::new(200.0, 270.0), EPS);
}

#[test]
fn test_rotate_handle_sets_angle() {
    let mut rect = sample();
    rect.move_handle(HandleIndex::Rotate.index(), Point2D::new(100.0, 180.0), Modifiers::NONE);

    assert!((rect.rotation() - FRAC_PI_2).abs() < EPS);
    // Right edge midpoint now sits below the center.
    assert_point_near(rect.handle_location(HandleIndex::Right), Point2D::new(100.0, 200.0), 1e-6);
    assert_eq!((rect.width(), rect.height()), (200.0, 100.0));
}

#[test]
fn test_angle_wraparound() {
    let mut a = sample();
    let mut b = sample();
    a.set_rotation(0.4);
    b.set_rotation(0.4 + 2.0 * PI);

    for (pa, pb) in a.handle_locations().iter().zip(b.handle_locations().iter()) {
        assert_point_near(*pa, *pb, 1e-9);
    }

    // The rotate handle lands on both sides of the atan2 branch cut.
    let mut above = sample();
    let mut below = sample();
    above.move_handle(HandleIndex::Rotate.index(), Point2D::new(0.0, 100.0 + 1e-9), Modifiers::NONE);
    below.move_handle(HandleIndex::Rotate.index(), Point2D::new(0.0, 100.0 - 1e-9), Modifiers::NONE);
    assert!((above.rotation() - PI).abs() < 1e-6);
    assert!((below.rotation() + PI).abs() < 1e-6);
    for (pa, pb) in above.handle_locations().iter().zip(below.handle_locations().iter()) {
        assert_point_near(*pa, *pb, 1e-6);
    }
}

#[test]
fn test_square_setter_forces_equal_sides() {
    let mut rect = sample();
    rect.set_square(true);
    assert_eq!(rect.height(), rect.width());
    assert_point_near(rect.handle_location(HandleIndex::BottomRight), Point2D::new(200.0, 200.0), EPS);

    rect.set_height(80.0);
    assert_eq!((rect.width(), rect.height()), (80.0, 80.0));

    // Aspect stays locked during independent-axis drags.
    rect.move_handle(HandleIndex::Right.index(), Point2D::new(200.0, 100.0), Modifiers::NONE);
    assert!((rect.width() - rect.height()).abs() < EPS);

    rect.set_square(false);
    rect.set_width(30.0);
    assert_eq!(rect.width(), 30.0);
    assert!((rect.height() - 140.0).abs() < EPS);
}

#[test]
fn test_invalid_moves_are_ignored() {
    let mut rect = sample();
    let before = rect.geometry();
    rect.move_handle(10, Point2D::new(1.0, 1.0), Modifiers::NONE);
    rect.move_handle(3, Point2D::new(f64::NAN, 1.0), Modifiers::NONE);
    rect.move_handle(3, Point2D::new(f64::INFINITY, 1.0), Modifiers::NONE);
    assert_eq!(rect.geometry(), before);
}

#[test]
fn test_find_handle_only_center_visible() {
    let mut rect = sample();
    rect.set_allow_resize(false);
    rect.set_show_rotate_handle(false);

    let hit = rect.find_handle(Point2D::new(104.0, 97.0), &identity);
    let hit = hit.expect("center handle should be hit");
    assert_eq!(hit.index, HandleIndex::Center.index());
    assert_point_near(hit.click_offset, Point2D::new(-4.0, 3.0), EPS);

    assert!(rect.find_handle(Point2D::new(0.0, 50.0), &identity).is_none());
    assert!(rect.find_handle(Point2D::new(200.0, 100.0), &identity).is_none());
    assert!(rect.find_handle(Point2D::new(250.0, 100.0), &identity).is_none());
}

#[test]
fn test_find_handle_checks_rotate_first() {
    let mut rect = sample();
    rect.set_rotation_handle_length(4.0);
    // (203, 100) is inside both the right handle and the rotate handle.
    let hit = rect.find_handle(Point2D::new(203.0, 100.0), &identity);
    assert_eq!(hit.map(|h| h.index), Some(HandleIndex::Rotate.index()));

    rect.set_show_rotate_handle(false);
    let hit = rect.find_handle(Point2D::new(203.0, 100.0), &identity);
    assert_eq!(hit.map(|h| h.index), Some(HandleIndex::Right.index()));
}

#[test]
fn test_rotate_handle_screen_position() {
    let rect = sample();
    let zoom = |p: Point2D| Point2D::new(p.x * 2.0, p.y * 2.0);
    let p = rect.rotate_handle_screen_position(&zoom);
    // Right handle at (400, 200) on screen, extended 50 px outward.
    assert_point_near(p.expect("rotate position"), Point2D::new(450.0, 200.0), EPS);

    let flat = RectangleArtwork::new(10.0, 10.0, 0.0, 20.0, 0.0, Rgba::RED);
    assert!(flat.rotate_handle_screen_position(&identity).is_none());
}

#[test]
fn test_cursor_hints() {
    let rect = sample();
    assert_eq!(rect.cursor(0), CursorHint::ResizeNwse);
    assert_eq!(rect.cursor(2), CursorHint::ResizeNesw);
    assert_eq!(rect.cursor(1), CursorHint::ResizeNs);
    assert_eq!(rect.cursor(7), CursorHint::ResizeEw);
    assert_eq!(rect.cursor(8), CursorHint::Move);
    assert_eq!(rect.cursor(9), CursorHint::Rotate);
    assert_eq!(rect.cursor(42), CursorHint::Default);
}

#[test]
fn test_paint_outline_and_handles() {
    let mut rect = sample();
    let mut list = DisplayList::new(400.0, 400.0);
    rect.paint(&mut list, &identity);

    // Four outline edges plus the rotate connector.
    let lines: Vec<_> = list.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|(_, _, w)| *w == 1.0));
    assert_eq!(list.squares().count(), 10);

    list.clear();
    rect.set_status(Status::ALL);
    rect.paint(&mut list, &identity);
    assert!(list.lines().all(|(_, _, w)| w == 3.0));

    list.clear();
    rect.set_status(Status::VISIBLE);
    rect.paint(&mut list, &identity);
    assert_eq!(list.lines().count(), 4);
    assert_eq!(list.squares().count(), 0);
}

#[test]
fn test_paint_caption() {
    let mut rect = sample();
    rect.set_caption(Some("ROI 1".to_string()));
    let mut list = DisplayList::new(400.0, 400.0);
    rect.paint(&mut list, &identity);
    assert_eq!(list.texts().collect::<Vec<_>>(), vec!["ROI 1"]);
}

#[test]
fn test_paint_degenerate_rectangle_skips_rotate_handle() {
    let rect = RectangleArtwork::new(10.0, 10.0, 0.0, 0.0, 0.0, Rgba::RED);
    let mut list = DisplayList::new(100.0, 100.0);
    rect.paint(&mut list, &identity);
    assert_eq!(list.squares().count(), 9);
    assert_eq!(list.lines().count(), 4);
}

#[test]
fn test_creator_builds_zero_size_rectangle() {
    let mut create = RectangleArtwork::creator();
    let (overlay, handle) = create(Point2D::new(40.0, 60.0)).expect("creator returns artwork");
    assert_eq!(handle, HandleIndex::BottomRight.index());

    let rect = overlay.as_rectangle().expect("rectangle");
    assert_eq!(rect.color(), Rgba::RED);
    assert_eq!((rect.width(), rect.height()), (0.0, 0.0));
    assert_eq!(rect.center(), Point2D::new(40.0, 60.0));
}

#[test]
fn test_snapshot_round_trip() {
    let mut rect = sample();
    rect.set_rotation(0.3);
    rect.set_caption(Some("area".to_string()));
    rect.set_show_side_handles(false);
    rect.set_handle_size(9.0);

    let json = serde_json::to_string(&rect.snapshot()).expect("serialize");
    let snapshot: RectangleSnapshot = serde_json::from_str(&json).expect("deserialize");
    let restored = RectangleArtwork::from_snapshot(&snapshot);

    assert_eq!(restored.handle_locations(), rect.handle_locations());
    assert_eq!(restored.caption(), Some("area"));
    assert!(!restored.show_side_handles());
    assert!(!restored.handle(HandleIndex::Top).visible);
    assert_eq!(restored.handle_size(), 9.0);
}

#[test]
fn test_set_geometry_normalises_sizes() {
    let mut rect = sample();
    rect.set_geometry(RectGeometry::new(Point2D::new(5.0, 5.0), -10.0, -4.0, 0.0));
    assert_eq!((rect.width(), rect.height()), (10.0, 4.0));

    rect.set_geometry(RectGeometry::new(Point2D::new(f64::NAN, 5.0), 1.0, 1.0, 0.0));
    assert_eq!(rect.center(), Point2D::new(5.0, 5.0));
}

#[test]
fn test_from_geometry_normalises_input() {
    let rect = RectangleArtwork::from_geometry(
        RectGeometry::new(Point2D::new(3.0, 4.0), -10.0, -6.0, 0.0),
        Rgba::RED,
    );
    assert_eq!((rect.width(), rect.height()), (10.0, 6.0));
    assert_point_near(rect.handle_location(HandleIndex::TopLeft), Point2D::new(-2.0, 1.0), EPS);

    let rect = RectangleArtwork::from_geometry(
        RectGeometry::new(Point2D::ZERO, -10.0, f64::NAN, 0.0),
        Rgba::RED,
    );
    assert!(rect.geometry().is_finite());
    assert!(rect.width() >= 0.0 && rect.height() >= 0.0);
    assert!(rect.handle_locations().iter().all(|p| p.is_finite()));
}

#[test]
fn test_snapshot_with_square_flag_equalises_sides() {
    let mut rect = sample();
    rect.set_square(true);
    let mut snapshot = rect.snapshot();
    snapshot.geometry.height = 40.0;

    let restored = RectangleArtwork::from_snapshot(&snapshot);
    assert!(restored.square());
    assert_eq!(restored.width(), restored.height());
    assert_eq!(restored.width(), 200.0);
}

#[test]
fn test_rotate_handle_on_center_keeps_angle() {
    let mut rect = RectangleArtwork::new(10.0, 10.0, 0.0, 20.0, 0.5, Rgba::RED);
    let rotate = rect.handle_location(HandleIndex::Rotate);
    assert_eq!(rotate, rect.center());

    rect.move_handle(HandleIndex::Rotate.index(), rotate, Modifiers::NONE);
    assert_eq!(rect.rotation(), 0.5);
}

#[test]
fn test_color_propagates_to_handles() {
    let mut rect = sample();
    rect.set_color(Rgba::YELLOW);
    assert!(HandleIndex::ALL
        .iter()
        .all(|h| rect.handle(*h).color == Rgba::YELLOW));
}
