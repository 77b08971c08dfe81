use anyhow::Context;
use xxhash_rust::xxh3::Xxh3;

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::{
        core::{Rgba8Premul, Viewport},
        error::{FramescrubError, FramescrubResult},
        math::src_over_premul,
    },
    render::fit::PixelRect,
};

const FINGERPRINT_SEED: u64 = 0x6a09_e667_f3bc_c908;

/// A viewport-sized premultiplied RGBA8 pixel buffer that frames are painted into.
#[derive(Clone, Debug, Default)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CanvasSurface {
    pub fn new(viewport: Viewport) -> FramescrubResult<Self> {
        let mut s = Self::default();
        s.resize(viewport)?;
        Ok(s)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Match `viewport`. Any resize discards the previous contents.
    pub fn resize(&mut self, viewport: Viewport) -> FramescrubResult<bool> {
        if viewport == self.viewport() {
            return Ok(false);
        }
        let len = viewport.checked_byte_len()?;
        self.width = viewport.width;
        self.height = viewport.height;
        self.data.clear();
        self.data.resize(len, 0);
        Ok(true)
    }

    pub fn clear(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Source-over blit of a premultiplied `src` image, exactly `dst.width × dst.height`
    /// pixels, into `dst`.
    pub fn blit_premul(&mut self, src: &[u8], dst: PixelRect) -> FramescrubResult<()> {
        if dst.is_empty() {
            return Ok(());
        }
        let expected = (dst.width as usize) * (dst.height as usize) * 4;
        if src.len() != expected {
            return Err(FramescrubError::render(format!(
                "blit source has {} bytes, expected {expected} for {}x{}",
                src.len(),
                dst.width,
                dst.height
            )));
        }
        if dst.x.saturating_add(dst.width) > self.width
            || dst.y.saturating_add(dst.height) > self.height
        {
            return Err(FramescrubError::render(format!(
                "blit rect {dst:?} exceeds surface {}x{}",
                self.width, self.height
            )));
        }

        let stride = self.width as usize * 4;
        let row_bytes = dst.width as usize * 4;
        for (row, src_row) in src.chunks_exact(row_bytes).enumerate() {
            let start = (dst.y as usize + row) * stride + dst.x as usize * 4;
            let dst_row = &mut self.data[start..start + row_bytes];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                src_over_premul(d, s);
            }
        }
        Ok(())
    }

    /// Stable hash of size and pixels; equal fingerprints mean identical output.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Xxh3::with_seed(FINGERPRINT_SEED);
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        h.update(&self.data);
        h.digest()
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> FramescrubResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| FramescrubError::render("surface buffer does not match its size"))
    }

    /// `0x00RRGGBB` pixels composited over an opaque `backdrop`, as window systems expect.
    pub fn to_xrgb_u32(&self, backdrop: [u8; 3], out: &mut Vec<u32>) {
        out.clear();
        out.reserve(self.data.len() / 4);
        for px in self.data.chunks_exact(4) {
            let mut d = [backdrop[0], backdrop[1], backdrop[2], 255];
            src_over_premul(&mut d, px);
            out.push((u32::from(d[0]) << 16) | (u32::from(d[1]) << 8) | u32::from(d[2]));
        }
    }

    pub fn save_png(&self, path: &std::path::Path) -> FramescrubResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
