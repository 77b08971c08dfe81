use super::*;

#[test]
fn four_viewport_region_spans_three_viewports_of_scroll() {
    let r = ScrollRegion::default();
    assert_eq!(r.height_px(900.0), 3600.0);
    assert_eq!(r.scroll_span_px(900.0), 2700.0);
    assert_eq!(r.progress(0.0, 900.0), 0.0);
    assert_eq!(r.progress(1350.0, 900.0), 0.5);
    assert_eq!(r.progress(2700.0, 900.0), 1.0);
}

#[test]
fn progress_is_clamped_outside_region() {
    let r = ScrollRegion::default();
    assert_eq!(r.progress(-400.0, 900.0), 0.0);
    assert_eq!(r.progress(1.0e9, 900.0), 1.0);
    assert_eq!(r.progress(f64::NAN, 900.0), 0.0);
}

#[test]
fn single_viewport_region_jumps() {
    let r = ScrollRegion {
        height_viewports: 1.0,
    };
    assert_eq!(r.progress(0.0, 700.0), 0.0);
    assert_eq!(r.progress(1.0, 700.0), 1.0);
}

#[test]
fn offset_inverts_progress() {
    let r = ScrollRegion::default();
    for p in [0.0, 0.25, 0.8, 1.0] {
        assert!((r.progress(r.offset_for(p, 1000.0), 1000.0) - p).abs() < 1e-12);
    }
}

#[test]
fn validate_rejects_short_regions() {
    assert!(ScrollRegion::default().validate().is_ok());
    assert!(ScrollRegion { height_viewports: 0.5 }.validate().is_err());
    assert!(
        ScrollRegion {
            height_viewports: f64::NAN
        }
        .validate()
        .is_err()
    );
}
