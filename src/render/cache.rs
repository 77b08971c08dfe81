use image::imageops::{self, FilterType};

use crate::{
    assets::{decode::premultiply_rgba8_in_place, sequence::FrameAsset},
    foundation::core::FrameIndex,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScaledKey {
    index: FrameIndex,
    width: u32,
    height: u32,
}

/// Holds the most recently scaled frame so repeat paints at the same frame and size are a blit.
///
/// A hit needs the same index, size and decoded pixels, so one cache may be shared across
/// frame sets without serving pixels from the wrong set.
#[derive(Clone, Debug, Default)]
pub struct ScaledFrameCache {
    key: Option<ScaledKey>,
    source: Option<FrameAsset>,
    premul: Vec<u8>,
    scale_count: u64,
}

impl ScaledFrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a frame was actually resampled.
    pub fn scale_count(&self) -> u64 {
        self.scale_count
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.source = None;
        self.premul.clear();
    }

    /// Premultiplied pixels of `frame` resampled to `width × height`.
    pub fn scaled(
        &mut self,
        index: FrameIndex,
        frame: &FrameAsset,
        width: u32,
        height: u32,
    ) -> &[u8] {
        let key = ScaledKey {
            index,
            width,
            height,
        };
        let same_source = self
            .source
            .as_ref()
            .is_some_and(|cached| cached.shares_pixels(frame));
        if self.key != Some(key) || !same_source {
            let src = frame.pixels();
            let mut raw = if (src.width(), src.height()) == (width, height) {
                src.as_raw().clone()
            } else {
                imageops::resize(src, width, height, FilterType::Triangle).into_raw()
            };
            premultiply_rgba8_in_place(&mut raw);
            self.premul = raw;
            self.key = Some(key);
            self.source = Some(frame.clone());
            self.scale_count += 1;
        }
        &self.premul
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
