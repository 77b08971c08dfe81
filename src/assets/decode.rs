use std::sync::Arc;

use anyhow::Context;

use crate::{assets::sequence::FrameAsset, foundation::error::FramescrubResult};

/// Decode encoded image bytes into a straight-alpha RGBA8 frame.
pub fn decode_image(bytes: &[u8]) -> FramescrubResult<FrameAsset> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(FrameAsset::from_rgba(Arc::new(dyn_img.to_rgba8())))
}

/// Convert straight-alpha RGBA8 bytes to premultiplied alpha in place.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Inverse of [`premultiply_rgba8_in_place`], used when exporting surfaces.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 || a == 0 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
