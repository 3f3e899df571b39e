use zoomview_core::{Point2D, Transform, ViewportError};
use zoomview_overlay::Viewport;

const EPS: f64 = 1e-9;

fn viewport_1to1() -> Viewport {
    let mut vp = Viewport::new(400.0, 300.0);
    vp.set_image_size(1000.0, 1000.0);
    vp.zoom_1to1();
    vp
}

#[test]
fn test_fit_uses_min_ratio_in_square_mode() {
    let mut vp = Viewport::new(400.0, 300.0);
    vp.set_image_size(800.0, 400.0);
    assert!(vp.is_fit());
    assert_eq!(vp.display_scale(), Ok(0.5));
}

#[test]
fn test_anisotropic_fit_and_uniform_query() {
    let mut vp = Viewport::new(400.0, 300.0);
    vp.set_image_size(800.0, 400.0);
    vp.set_square(false);
    assert_eq!(vp.display_scale_anisotropic(), (0.5, 0.75));
    assert_eq!(
        vp.display_scale(),
        Err(ViewportError::NotUniformScale {
            scale_x: 0.5,
            scale_y: 0.75
        })
    );
}

#[test]
fn test_scale_validation() {
    let mut vp = viewport_1to1();
    assert_eq!(
        vp.set_display_scale(-1.0),
        Err(ViewportError::InvalidScale { value: -1.0 })
    );
    assert!(vp.set_display_scale(f64::NAN).is_err());
    assert_eq!(vp.display_scale(), Ok(1.0));

    // Uniform mode ignores the vertical component.
    vp.set_display_scale_anisotropic(2.0, 3.0).expect("valid scale");
    assert_eq!(vp.display_scale_anisotropic(), (2.0, 2.0));

    vp.set_scale_limits(0.5, 4.0).expect("valid limits");
    vp.set_display_scale(10.0).expect("valid scale");
    assert_eq!(vp.display_scale(), Ok(4.0));
    assert!(vp.set_scale_limits(2.0, 1.0).is_err());
}

#[test]
fn test_mapping_round_trip() {
    let mut vp = viewport_1to1();
    vp.set_display_scale(2.5).expect("valid scale");
    vp.set_scroll(Point2D::new(-120.0, -80.0));

    let abs = Point2D::new(77.0, 31.5);
    let scr = vp.abs_to_scr(abs);
    assert!((scr.x - (77.0 * 2.5 - 120.0)).abs() < EPS);
    assert!(vp.scr_to_abs(scr).distance_to(&abs) < EPS);
    assert_eq!(vp.apply(abs), scr);
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut vp = viewport_1to1();
    let screen = Point2D::new(200.0, 150.0);
    let before = vp.scr_to_abs(screen);

    vp.zoom_at(screen, 1);
    assert!((vp.display_scale().unwrap_or_default() - 1.1).abs() < EPS);
    assert!(vp.scr_to_abs(screen).distance_to(&before) < 1e-9);

    vp.zoom_at(screen, 2);
    vp.zoom_at(screen, -2);
    assert!((vp.display_scale().unwrap_or_default() - 1.1).abs() < EPS);
    assert!(vp.scr_to_abs(screen).distance_to(&before) < 1e-9);
    assert!(!vp.is_fit());
}

#[test]
fn test_zoom_to_window() {
    let mut vp = viewport_1to1();
    vp.zoom_to_window(Point2D::new(300.0, 200.0), Point2D::new(100.0, 100.0))
        .expect("non-empty window");
    assert_eq!(vp.display_scale(), Ok(2.0));
    assert!(vp.abs_to_scr(Point2D::new(100.0, 100.0)).distance_to(&Point2D::ZERO) < EPS);

    assert_eq!(
        vp.zoom_to_window(Point2D::new(5.0, 5.0), Point2D::new(5.0, 50.0)),
        Err(ViewportError::EmptyZoomWindow)
    );
}

#[test]
fn test_scroll_is_clamped() {
    let mut vp = viewport_1to1();
    vp.pan_by(Point2D::new(-5000.0, -5000.0));
    assert_eq!(vp.scroll(), Point2D::new(-600.0, -700.0));
    vp.pan_by(Point2D::new(10000.0, 10.0));
    assert_eq!(vp.scroll(), Point2D::new(0.0, -690.0));
}

#[test]
fn test_contains_abs() {
    let vp = viewport_1to1();
    assert!(vp.contains_abs(Point2D::new(0.0, 0.0)));
    assert!(vp.contains_abs(Point2D::new(999.5, 10.0)));
    assert!(!vp.contains_abs(Point2D::new(1000.0, 10.0)));
    assert!(!vp.contains_abs(Point2D::new(-0.1, 10.0)));
}

#[test]
fn test_fit_toggle() {
    let mut vp = viewport_1to1();
    assert!(!vp.is_fit());
    vp.set_fit(true);
    assert_eq!(vp.display_scale(), Ok(0.3));
    vp.zoom_in();
    assert!(!vp.is_fit());
}
