use crate::foundation::error::{FramescrubError, FramescrubResult};

/// A tall scroll region the player is pinned inside, measured in viewport heights.
///
/// Progress is 0 when the region's top meets the viewport's top and 1 when the region's
/// bottom meets the viewport's bottom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollRegion {
    pub height_viewports: f64,
}

impl Default for ScrollRegion {
    fn default() -> Self {
        Self {
            height_viewports: 4.0,
        }
    }
}

impl ScrollRegion {
    pub fn validate(&self) -> FramescrubResult<()> {
        if !self.height_viewports.is_finite() || self.height_viewports < 1.0 {
            return Err(FramescrubError::validation(format!(
                "scroll region height must be >= 1 viewport (got {})",
                self.height_viewports
            )));
        }
        Ok(())
    }

    pub fn height_px(&self, viewport_height: f64) -> f64 {
        self.height_viewports * viewport_height
    }

    /// Distance the page scrolls while the region is pinned.
    pub fn scroll_span_px(&self, viewport_height: f64) -> f64 {
        (self.height_px(viewport_height) - viewport_height).max(0.0)
    }

    /// Normalized progress for `scrolled_px` (distance the region's top has moved above the
    /// viewport's top). Always in `[0, 1]`.
    pub fn progress(&self, scrolled_px: f64, viewport_height: f64) -> f64 {
        if scrolled_px.is_nan() {
            return 0.0;
        }
        let span = self.scroll_span_px(viewport_height);
        if span <= 0.0 {
            return if scrolled_px > 0.0 { 1.0 } else { 0.0 };
        }
        (scrolled_px / span).clamp(0.0, 1.0)
    }

    /// Inverse of [`ScrollRegion::progress`] for progress in `[0, 1]`.
    pub fn offset_for(&self, progress: f64, viewport_height: f64) -> f64 {
        progress.clamp(0.0, 1.0) * self.scroll_span_px(viewport_height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/scroll/region.rs"]
mod tests;
