use crate::foundation::{core::FrameIndex, math::interpolate_clamped};

/// Maps normalized scroll progress onto a frame sequence.
///
/// Progress in `[0, hold_fraction]` sweeps linearly across every frame; anything past
/// `hold_fraction` holds the last frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressMap {
    frame_count: usize,
    hold_fraction: f64,
}

impl ProgressMap {
    /// Progress at which the sequence reaches its last frame unless configured otherwise.
    pub const DEFAULT_HOLD_FRACTION: f64 = 0.8;

    pub fn new(frame_count: usize, hold_fraction: f64) -> Self {
        Self {
            frame_count,
            hold_fraction,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn hold_fraction(&self) -> f64 {
        self.hold_fraction
    }

    fn last_index(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Un-floored index for `progress`; always within `[0, N-1]`.
    pub fn continuous_for(&self, progress: f64) -> f64 {
        interpolate_clamped(
            progress,
            (0.0, self.hold_fraction),
            (0.0, self.last_index() as f64),
        )
    }

    /// Discrete frame for `progress`. Total over every input, NaN included.
    pub fn index_for(&self, progress: f64) -> FrameIndex {
        self.index_for_continuous(self.continuous_for(progress))
    }

    /// See [`frame_index_for`].
    pub fn index_for_continuous(&self, value: f64) -> FrameIndex {
        frame_index_for(value, self.frame_count)
    }
}

/// `clamp(floor(value), 0, frame_count - 1)`; tolerates spring overshoot and non-finite input.
pub fn frame_index_for(value: f64, frame_count: usize) -> FrameIndex {
    if value.is_nan() || value <= 0.0 {
        return FrameIndex(0);
    }
    // Float-to-int casts saturate, so infinities land on the last frame.
    FrameIndex(value.floor() as usize).clamp_to_len(frame_count)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;
