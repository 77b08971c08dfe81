use super::*;

fn opaque(r: u8, g: u8, b: u8) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(r, g, b, 255)
}

#[test]
fn resize_reports_changes_and_zeroes() {
    let mut s = CanvasSurface::new(Viewport::new(2, 2)).unwrap();
    s.clear(opaque(9, 9, 9));
    assert!(!s.resize(Viewport::new(2, 2)).unwrap());
    assert_eq!(s.data()[0], 9);

    assert!(s.resize(Viewport::new(3, 1)).unwrap());
    assert_eq!((s.width(), s.height()), (3, 1));
    assert_eq!(s.data(), &[0u8; 12]);
}

#[test]
fn clear_fills_every_pixel() {
    let mut s = CanvasSurface::new(Viewport::new(3, 2)).unwrap();
    s.clear(opaque(1, 2, 3));
    for px in s.data().chunks_exact(4) {
        assert_eq!(px, &[1, 2, 3, 255]);
    }
}

#[test]
fn blit_places_pixels_at_offset() {
    let mut s = CanvasSurface::new(Viewport::new(4, 3)).unwrap();
    let src = [10u8, 20, 30, 255, 40, 50, 60, 255];
    s.blit_premul(
        &src,
        PixelRect {
            x: 1,
            y: 2,
            width: 2,
            height: 1,
        },
    )
    .unwrap();

    let stride = 4 * 4;
    assert_eq!(&s.data()[2 * stride + 4..2 * stride + 12], &src);
    assert_eq!(&s.data()[..4], &[0, 0, 0, 0]);
}

#[test]
fn blit_rejects_mismatched_or_out_of_bounds_input() {
    let mut s = CanvasSurface::new(Viewport::new(2, 2)).unwrap();
    let rect = PixelRect {
        x: 1,
        y: 1,
        width: 2,
        height: 1,
    };
    assert!(s.blit_premul(&[0u8; 8], rect).is_err());
    assert!(
        s.blit_premul(
            &[0u8; 4],
            PixelRect {
                x: 0,
                y: 0,
                width: 2,
                height: 1
            }
        )
        .is_err()
    );
    let empty = PixelRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };
    assert!(s.blit_premul(&[], empty).is_ok());
}

#[test]
fn fingerprint_tracks_pixels_and_size() {
    let mut a = CanvasSurface::new(Viewport::new(2, 2)).unwrap();
    let b = CanvasSurface::new(Viewport::new(2, 2)).unwrap();
    let c = CanvasSurface::new(Viewport::new(4, 1)).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());

    a.clear(opaque(1, 1, 1));
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn xrgb_export_composites_over_backdrop() {
    let mut s = CanvasSurface::new(Viewport::new(2, 1)).unwrap();
    s.blit_premul(
        &[255, 0, 0, 255],
        PixelRect {
            x: 1,
            y: 0,
            width: 1,
            height: 1,
        },
    )
    .unwrap();
    let mut out = Vec::new();
    s.to_xrgb_u32([5, 5, 5], &mut out);
    assert_eq!(out, vec![0x0005_0505, 0x00ff_0000]);
}

#[test]
fn rgba_export_unpremultiplies() {
    let mut s = CanvasSurface::new(Viewport::new(1, 1)).unwrap();
    s.clear(Rgba8Premul::from_straight_rgba(200, 100, 0, 128));
    let img = s.to_rgba_image().unwrap();
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 200).abs() <= 1);
    assert!((i32::from(px[1]) - 100).abs() <= 1);
}
