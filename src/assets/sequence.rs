use std::{sync::Arc, time::Duration};

use crate::foundation::{
    core::FrameIndex,
    error::{FramescrubError, FramescrubResult},
};

/// File naming template for a numbered frame sequence.
///
/// Frame `i` (1-based) lives at `<prefix><i zero-padded to pad_width>.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceSpec {
    pub prefix: String,
    pub extension: String,
    pub count: usize,
    pub pad_width: usize,
}

impl Default for SequenceSpec {
    fn default() -> Self {
        Self {
            prefix: "controllerframes/ezgif-frame-".to_string(),
            extension: "jpg".to_string(),
            count: 64,
            pad_width: 3,
        }
    }
}

impl SequenceSpec {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>, count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
            count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FramescrubResult<()> {
        if self.count == 0 {
            return Err(FramescrubError::validation(
                "sequence count must be >= 1",
            ));
        }
        if self.pad_width == 0 {
            return Err(FramescrubError::validation(
                "sequence pad_width must be >= 1",
            ));
        }
        if self.prefix.is_empty() && self.extension.is_empty() {
            return Err(FramescrubError::validation(
                "sequence needs a prefix or an extension",
            ));
        }
        Ok(())
    }

    /// File name for the 1-based `sequence_number`.
    pub fn file_name(&self, sequence_number: usize) -> String {
        let mut name = format!(
            "{}{:0width$}",
            self.prefix,
            sequence_number,
            width = self.pad_width
        );
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        name
    }

    pub fn path_for(&self, index: FrameIndex) -> String {
        self.file_name(index.sequence_number())
    }

    /// Exactly `count` paths, in frame order.
    pub fn paths(&self) -> impl ExactSizeIterator<Item = String> + '_ {
        (0..self.count).map(|i| self.path_for(FrameIndex(i)))
    }
}

/// One decoded frame: straight-alpha RGBA8 plus its intrinsic size.
///
/// A 0×0 asset is the sentinel that stands in for a frame that failed to load.
#[derive(Clone, Debug)]
pub struct FrameAsset {
    pixels: Arc<image::RgbaImage>,
}

impl FrameAsset {
    pub fn from_rgba(pixels: Arc<image::RgbaImage>) -> Self {
        Self { pixels }
    }

    pub fn sentinel() -> Self {
        Self {
            pixels: Arc::new(image::RgbaImage::new(0, 0)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_sentinel(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Whether both handles point at the same decoded image.
    pub(crate) fn shares_pixels(&self, other: &FrameAsset) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Ordered, gap-free frames indexed `0..N`.
#[derive(Clone, Debug, Default)]
pub struct FrameSet {
    frames: Vec<FrameAsset>,
}

impl FrameSet {
    pub fn new(frames: Vec<FrameAsset>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: FrameIndex) -> Option<&FrameAsset> {
        self.frames.get(index.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameAsset> {
        self.frames.iter()
    }

    pub fn sentinel_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_sentinel()).count()
    }
}

/// Why a single frame was replaced by a sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub index: FrameIndex,
    pub path: String,
    pub reason: String,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame {} ('{}'): {}",
            self.index.sequence_number(),
            self.path,
            self.reason
        )
    }
}

/// Batch-level diagnostics for one load cycle.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    pub requested: usize,
    pub failures: Vec<LoadError>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.requested.saturating_sub(self.failures.len())
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output of a settled load: always `requested` frames long.
#[derive(Clone, Debug)]
pub struct LoadedFrames {
    pub frames: FrameSet,
    pub report: LoadReport,
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sequence.rs"]
mod tests;
