pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Source-over for one premultiplied RGBA8 pixel.
pub(crate) fn src_over_premul(dst: &mut [u8], src: &[u8]) {
    let sa = u16::from(src[3]);
    if sa == 255 {
        dst[..4].copy_from_slice(&src[..4]);
        return;
    }
    if sa == 0 {
        return;
    }
    let inv = 255 - sa;
    for c in 0..4 {
        let blended = u16::from(src[c]) + mul_div255_u16(u16::from(dst[c]), inv);
        dst[c] = blended.min(255) as u8;
    }
}

/// Linear map of `value` from `domain` onto `range`, clamping `value` into `domain` first.
///
/// A degenerate domain maps everything to `range.0`.
pub(crate) fn interpolate_clamped(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let span = d1 - d0;
    if !span.is_finite() || span.abs() <= f64::EPSILON {
        return range.0;
    }
    let v = if value.is_nan() { d0 } else { value };
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let t = (v.clamp(lo, hi) - d0) / span;
    range.0 + t * (range.1 - range.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
