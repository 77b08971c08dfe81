use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    animation::{progress::ProgressMap, spring::SpringConfig},
    assets::sequence::SequenceSpec,
    foundation::{
        core::Rgba8Premul,
        error::{FramescrubError, FramescrubResult},
    },
    scroll::ScrollRegion,
};

/// Everything that shapes a [`crate::FrameSequencePlayer`], loadable from JSON.
///
/// Missing fields take their defaults, which reproduce the 64-frame controller sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub sequence: SequenceSpec,
    /// Progress at which the last frame is reached; later progress holds it.
    pub hold_fraction: f64,
    pub spring: SpringConfig,
    pub scroll_region: ScrollRegion,
    /// Straight-alpha RGBA8 the surface is cleared to before each paint. `None` is transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Smallest change of the smoothed index that triggers a repaint.
    pub change_epsilon: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sequence: SequenceSpec::default(),
            hold_fraction: ProgressMap::DEFAULT_HOLD_FRACTION,
            spring: SpringConfig::default(),
            scroll_region: ScrollRegion::default(),
            clear_rgba: None,
            change_epsilon: 1e-3,
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(s: &str) -> FramescrubResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FramescrubError::serde(format!("parse player config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> FramescrubResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open player config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            FramescrubError::serde(format!("parse player config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> FramescrubResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FramescrubError::serde(format!("serialize player config: {e}")))
    }

    pub fn validate(&self) -> FramescrubResult<()> {
        self.sequence.validate()?;
        self.spring.validate()?;
        self.scroll_region.validate()?;
        if !(self.hold_fraction > 0.0 && self.hold_fraction <= 1.0) {
            return Err(FramescrubError::validation(format!(
                "hold_fraction must be in (0, 1] (got {})",
                self.hold_fraction
            )));
        }
        if !self.change_epsilon.is_finite() || self.change_epsilon < 0.0 {
            return Err(FramescrubError::validation(format!(
                "change_epsilon must be finite and >= 0 (got {})",
                self.change_epsilon
            )));
        }
        Ok(())
    }

    pub fn progress_map(&self) -> ProgressMap {
        ProgressMap::new(self.sequence.count, self.hold_fraction)
    }

    pub fn clear_color(&self) -> Rgba8Premul {
        self.clear_rgba
            .map(Rgba8Premul::from_straight_array)
            .unwrap_or_else(Rgba8Premul::transparent)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/player.rs"]
mod tests;
