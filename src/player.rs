//! The scroll-synchronized frame-sequence player.
//!
//! A [`FrameSequencePlayer`] owns one loaded [`FrameSet`], a spring that follows the frame the
//! scroll position asks for, and the [`CanvasSurface`] it paints into. It is driven from a single
//! event loop: the host feeds scroll progress, viewport sizes and animation ticks, and reads the
//! surface back after each paint.

use std::sync::Arc;

use crate::{
    animation::{progress::ProgressMap, spring::Spring},
    assets::{
        loader::{FrameSource, LoadPoll, LoadTask, load_frames},
        sequence::{FrameSet, LoadReport, LoadedFrames},
    },
    config::PlayerConfig,
    foundation::{
        core::{FrameIndex, Viewport},
        error::{FramescrubError, FramescrubResult},
    },
    render::{
        cache::ScaledFrameCache,
        paint::{RenderOutcome, SkipReason, paint_frame},
        surface::CanvasSurface,
    },
};

/// Lifecycle of a player. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// Frames are not all settled yet; paints are no-ops.
    Loading,
    /// Every frame settled (possibly as a sentinel); ticks and resizes paint.
    Ready,
    /// Torn down; late load results are discarded and every operation is a no-op.
    Disposed,
}

/// Plays one frame sequence in step with scroll progress and paints it into a [`CanvasSurface`].
#[derive(Debug)]
pub struct FrameSequencePlayer {
    config: PlayerConfig,
    map: ProgressMap,
    state: PlayerState,
    frames: FrameSet,
    report: Option<LoadReport>,
    load: Option<LoadTask>,
    spring: Spring,
    target: FrameIndex,
    viewport: Viewport,
    surface: Option<CanvasSurface>,
    cache: ScaledFrameCache,
    last_painted: Option<f64>,
    paint_count: u64,
}

impl FrameSequencePlayer {
    pub fn new(config: PlayerConfig, viewport: Viewport) -> FramescrubResult<Self> {
        config.validate()?;
        let map = config.progress_map();
        let spring = Spring::new(config.spring, 0.0);
        Ok(Self {
            config,
            map,
            state: PlayerState::Loading,
            frames: FrameSet::default(),
            report: None,
            load: None,
            spring,
            target: FrameIndex(0),
            viewport,
            surface: Some(CanvasSurface::default()),
            cache: ScaledFrameCache::new(),
            last_painted: None,
            paint_count: 0,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PlayerState::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.state == PlayerState::Ready
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn load_report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    /// The surface as of the most recent paint. `None` once disposed.
    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frame the current scroll progress maps to.
    pub fn target_index(&self) -> FrameIndex {
        self.target
    }

    /// Continuous, spring-smoothed index; may sit between frames while animating.
    pub fn smoothed_index(&self) -> f64 {
        self.spring.position()
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }

    pub fn paint_count(&self) -> u64 {
        self.paint_count
    }

    /// Start loading the configured sequence from `source` on a worker thread.
    ///
    /// Progress is picked up by [`Self::poll_load`] or [`Self::tick`].
    pub fn begin_load(&mut self, source: Arc<dyn FrameSource>) -> FramescrubResult<()> {
        self.ensure_loadable()?;
        if self.load.is_some() {
            return Err(FramescrubError::validation("a frame load is already running"));
        }
        self.load = Some(LoadTask::spawn(self.config.sequence.clone(), source)?);
        tracing::debug!(count = self.config.sequence.count, "frame load started");
        Ok(())
    }

    /// Load the configured sequence on the calling thread (decodes still fan out) and become ready.
    pub fn load_blocking(&mut self, source: &dyn FrameSource) -> FramescrubResult<RenderOutcome> {
        self.ensure_loadable()?;
        if let Some(mut task) = self.load.take() {
            task.cancel();
        }
        let loaded = load_frames(&self.config.sequence, source);
        self.adopt(loaded)
    }

    /// Adopt a finished background load, if any. Returns the first paint when it happens.
    pub fn poll_load(&mut self) -> FramescrubResult<Option<RenderOutcome>> {
        if self.state != PlayerState::Loading {
            return Ok(None);
        }
        let Some(task) = self.load.as_mut() else {
            return Ok(None);
        };
        match task.poll() {
            LoadPoll::Pending => Ok(None),
            LoadPoll::Ready(loaded) => {
                self.load = None;
                self.adopt(loaded).map(Some)
            }
            LoadPoll::Abandoned => {
                self.load = None;
                Err(FramescrubError::asset("frame load ended without a result"))
            }
        }
    }

    /// Feed normalized scroll progress. Only retargets the spring; painting happens on ticks.
    pub fn set_progress(&mut self, progress: f64) {
        if self.state == PlayerState::Disposed {
            return;
        }
        self.target = self.map.index_for(progress);
        self.spring.set_target(self.target.0 as f64);
    }

    /// Advance the spring by `dt` seconds and repaint if the smoothed index moved noticeably.
    ///
    /// While loading this also polls the background load.
    pub fn tick(&mut self, dt: f64) -> FramescrubResult<Option<RenderOutcome>> {
        if self.state == PlayerState::Disposed {
            return Ok(None);
        }
        let first_paint = self.poll_load()?;

        let step = self.spring.step(dt);
        if self.state != PlayerState::Ready {
            return Ok(None);
        }

        let moved = match self.last_painted {
            None => true,
            Some(prev) => {
                let diff = (step.position - prev).abs();
                diff > self.config.change_epsilon || (step.settled && diff > 0.0)
            }
        };
        if moved {
            return self.render(step.position).map(Some);
        }
        Ok(first_paint)
    }

    /// Paint the frame at `continuous_index` into a surface sized to the current viewport.
    pub fn render(&mut self, continuous_index: f64) -> FramescrubResult<RenderOutcome> {
        if self.state == PlayerState::Disposed {
            return Ok(RenderOutcome::Skipped(SkipReason::MissingSurface));
        }
        let outcome = paint_frame(
            self.surface.as_mut(),
            &mut self.cache,
            &self.frames,
            continuous_index,
            self.viewport,
            self.config.clear_color(),
        )?;
        if outcome.is_painted() {
            self.last_painted = Some(continuous_index);
            self.paint_count += 1;
        }
        Ok(outcome)
    }

    /// Record a new viewport size and repaint at the current smoothed index.
    ///
    /// The spring is not touched, so an in-flight animation continues from where it was.
    pub fn on_resize(&mut self, viewport: Viewport) -> FramescrubResult<RenderOutcome> {
        if self.state == PlayerState::Disposed {
            return Ok(RenderOutcome::Skipped(SkipReason::MissingSurface));
        }
        if viewport != self.viewport {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "viewport resized"
            );
        }
        self.viewport = viewport;
        self.render(self.spring.position())
    }

    /// Tear down: cancel any in-flight load and release frames and surface.
    pub fn dispose(&mut self) {
        if self.state == PlayerState::Disposed {
            return;
        }
        if let Some(mut task) = self.load.take() {
            task.cancel();
        }
        self.frames = FrameSet::default();
        self.surface = None;
        self.cache.invalidate();
        self.state = PlayerState::Disposed;
        tracing::debug!("player disposed");
    }

    fn ensure_loadable(&self) -> FramescrubResult<()> {
        match self.state {
            PlayerState::Loading => Ok(()),
            PlayerState::Ready => Err(FramescrubError::validation("frames are already loaded")),
            PlayerState::Disposed => Err(FramescrubError::validation("player is disposed")),
        }
    }

    fn adopt(&mut self, loaded: LoadedFrames) -> FramescrubResult<RenderOutcome> {
        let LoadedFrames { frames, report } = loaded;
        if frames.len() != self.config.sequence.count {
            return Err(FramescrubError::asset(format!(
                "loaded {} frames, expected {}",
                frames.len(),
                self.config.sequence.count
            )));
        }
        self.frames = frames;
        self.report = Some(report);
        self.state = PlayerState::Ready;
        tracing::debug!(frames = self.frames.len(), "player ready");
        self.render(self.spring.position())
    }
}

#[cfg(test)]
#[path = "../tests/unit/player/player.rs"]
mod tests;
