use zoomview_core::{CursorHint, Modifiers, Point2D, Rgba};
use zoomview_overlay::{DisplayList, OverlayArtwork, VCursorArtwork, VCURSOR_HANDLE};

fn identity(p: Point2D) -> Point2D {
    p
}

#[test]
fn test_hit_tolerance_is_strict() {
    let cursor = VCursorArtwork::new(50.0);
    assert_eq!(cursor.color, Rgba::YELLOW);

    let hit = cursor
        .find_handle(Point2D::new(59.0, 3.0), &identity)
        .expect("within tolerance");
    assert_eq!(hit.index, VCURSOR_HANDLE);
    assert_eq!(hit.click_offset, Point2D::new(-9.0, -3.0));

    assert!(cursor.find_handle(Point2D::new(60.0, 0.0), &identity).is_none());
    assert!(cursor.find_handle(Point2D::new(40.0, 0.0), &identity).is_none());
}

#[test]
fn test_move_and_cursor() {
    let mut cursor = VCursorArtwork::new(50.0);
    cursor.move_handle(VCURSOR_HANDLE, Point2D::new(42.0, 7.0), Modifiers::NONE);
    assert_eq!(cursor.position, 42.0);

    cursor.move_handle(0, Point2D::new(1.0, 7.0), Modifiers::NONE);
    cursor.move_handle(VCURSOR_HANDLE, Point2D::new(f64::NAN, 7.0), Modifiers::NONE);
    assert_eq!(cursor.position, 42.0);

    assert_eq!(cursor.cursor(VCURSOR_HANDLE), CursorHint::ResizeEw);
    assert_eq!(cursor.cursor(5), CursorHint::Default);
}

#[test]
fn test_paint_spans_clip_height() {
    let cursor = VCursorArtwork::new(42.0);
    let zoom = |p: Point2D| Point2D::new(p.x * 2.0, p.y * 2.0);
    let mut list = DisplayList::new(100.0, 80.0);
    cursor.paint(&mut list, &zoom);
    assert_eq!(
        list.lines().collect::<Vec<_>>(),
        vec![(Point2D::new(84.0, 0.0), Point2D::new(84.0, 80.0), 1.0)]
    );
}
