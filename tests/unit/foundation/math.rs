use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 128), 64);
    assert_eq!(mul_div255_u16(200, 127), 100);
}

#[test]
fn src_over_opaque_replaces_and_transparent_keeps() {
    let mut dst = [10u8, 20, 30, 255];
    src_over_premul(&mut dst, &[1, 2, 3, 255]);
    assert_eq!(dst, [1, 2, 3, 255]);

    src_over_premul(&mut dst, &[0, 0, 0, 0]);
    assert_eq!(dst, [1, 2, 3, 255]);
}

#[test]
fn src_over_half_alpha_blends() {
    let mut dst = [0u8, 0, 200, 255];
    src_over_premul(&mut dst, &[100, 0, 0, 128]);
    assert_eq!(dst[0], 100);
    assert_eq!(u16::from(dst[2]), mul_div255_u16(200, 127));
    assert_eq!(dst[3], 255);
}

#[test]
fn interpolate_clamps_into_domain() {
    assert_eq!(interpolate_clamped(0.4, (0.0, 0.8), (0.0, 63.0)), 31.5);
    assert_eq!(interpolate_clamped(1.0, (0.0, 0.8), (0.0, 63.0)), 63.0);
    assert_eq!(interpolate_clamped(-3.0, (0.0, 0.8), (0.0, 63.0)), 0.0);
    assert_eq!(interpolate_clamped(f64::NAN, (0.0, 0.8), (0.0, 63.0)), 0.0);
    assert_eq!(interpolate_clamped(0.5, (1.0, 1.0), (7.0, 9.0)), 7.0);
}
