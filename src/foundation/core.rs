use crate::foundation::error::{FramescrubError, FramescrubResult};

pub use kurbo::{Rect, Size};

/// Zero-based position inside a loaded frame set.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// Clamp into `[0, len - 1]`. An empty set clamps to `0`.
    pub fn clamp_to_len(self, len: usize) -> Self {
        Self(self.0.min(len.saturating_sub(1)))
    }

    /// The 1-based sequence number used by asset file names.
    pub fn sequence_number(self) -> usize {
        self.0 + 1
    }
}

/// Window/viewport dimensions in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Pixel count, rejecting sizes whose RGBA8 buffer would not fit in memory.
    pub fn checked_byte_len(self) -> FramescrubResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                FramescrubError::validation(format!(
                    "viewport {}x{} is too large",
                    self.width, self.height
                ))
            })
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn from_straight_array(rgba: [u8; 4]) -> Self {
        Self::from_straight_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
