//! Damped spring follower used to smooth the scroll-driven frame index.
//!
//! The follower is a plain `{position, velocity, target}` state advanced by a fixed-substep
//! semi-implicit Euler integration of `m·a = -k·(x - target) - c·v`. It has no notion of frames
//! or scrolling; [`crate::FrameSequencePlayer`] feeds it targets and reads positions back.

use crate::foundation::error::{FramescrubError, FramescrubResult};

/// Spring constants and rest thresholds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance to target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
    /// Upper bound on one integration substep, in seconds.
    pub max_substep_secs: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.5,
            rest_speed: 2.0,
            max_substep_secs: 1.0 / 240.0,
        }
    }
}

impl SpringConfig {
    pub fn validate(&self) -> FramescrubResult<()> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
            ("max_substep_secs", self.max_substep_secs),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(FramescrubError::validation(format!(
                    "spring {name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`; `>= 1` means no overshoot.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Result of one [`Spring::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTick {
    pub position: f64,
    /// Absolute position change produced by this step.
    pub delta: f64,
    pub settled: bool,
}

#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    settled: bool,
}

impl Spring {
    /// Largest wall-clock gap integrated in a single step; longer stalls are truncated.
    const MAX_STEP_SECS: f64 = 1.0;
    /// Integration substeps per step; a tiny `max_substep_secs` widens substeps past it.
    const MAX_SUBSTEPS: u32 = 1024;

    /// A spring at rest at `position`.
    pub fn new(config: SpringConfig, position: f64) -> Self {
        Self {
            config,
            position,
            velocity: 0.0,
            target: position,
            settled: true,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Retarget the follower. Velocity is kept so motion stays continuous.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() || target == self.target {
            return;
        }
        self.target = target;
        self.settled = false;
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> SpringTick {
        let before = self.position;
        if self.settled {
            return SpringTick {
                position: before,
                delta: 0.0,
                settled: true,
            };
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, Self::MAX_STEP_SECS)
        } else {
            0.0
        };
        let substeps = ((dt / self.config.max_substep_secs).ceil().max(1.0) as u32)
            .min(Self::MAX_SUBSTEPS);
        let h = dt / f64::from(substeps);

        let SpringConfig {
            stiffness: k,
            damping: c,
            mass: m,
            ..
        } = self.config;
        for _ in 0..substeps {
            let accel = (-k * (self.position - self.target) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }

        if (self.position - self.target).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }

        SpringTick {
            position: self.position,
            delta: (self.position - before).abs(),
            settled: self.settled,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
