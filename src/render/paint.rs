use crate::{
    animation::progress::frame_index_for,
    assets::sequence::FrameSet,
    foundation::{
        core::{FrameIndex, Rgba8Premul, Size, Viewport},
        error::FramescrubResult,
    },
    render::{
        cache::ScaledFrameCache,
        fit::{FitRect, contain_fit},
        surface::CanvasSurface,
    },
};

/// Why a paint request left the surface untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No frames loaded yet (or the player was disposed).
    EmptyFrameSet,
    /// No surface to draw into, or the viewport has no area.
    MissingSurface,
}

/// What a single paint did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The surface was resized, cleared and `frame_index` drawn at `fit`.
    ///
    /// `fit` is `None` when the frame is a sentinel; the surface is then left cleared.
    Painted {
        frame_index: FrameIndex,
        fit: Option<FitRect>,
    },
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_painted(&self) -> bool {
        matches!(self, Self::Painted { .. })
    }
}

/// Resize `surface` to `viewport`, clear it and draw the frame at `continuous_index`
/// aspect-fit and centered.
pub fn paint_frame(
    surface: Option<&mut CanvasSurface>,
    cache: &mut ScaledFrameCache,
    frames: &FrameSet,
    continuous_index: f64,
    viewport: Viewport,
    clear: Rgba8Premul,
) -> FramescrubResult<RenderOutcome> {
    if frames.is_empty() {
        return Ok(RenderOutcome::Skipped(SkipReason::EmptyFrameSet));
    }
    let Some(surface) = surface else {
        return Ok(RenderOutcome::Skipped(SkipReason::MissingSurface));
    };
    if viewport.is_empty() {
        return Ok(RenderOutcome::Skipped(SkipReason::MissingSurface));
    }

    surface.resize(viewport)?;
    surface.clear(clear);

    let frame_index = frame_index_for(continuous_index, frames.len());
    let Some(frame) = frames.get(frame_index) else {
        return Ok(RenderOutcome::Skipped(SkipReason::EmptyFrameSet));
    };

    let fit = contain_fit(
        Size::new(f64::from(frame.width()), f64::from(frame.height())),
        viewport.size(),
    );
    if let Some(fit) = fit {
        let dst = fit.snap(viewport.width, viewport.height);
        if !dst.is_empty() {
            let pixels = cache.scaled(frame_index, frame, dst.width, dst.height);
            surface.blit_premul(pixels, dst)?;
        }
    }

    tracing::trace!(
        frame = frame_index.0,
        width = viewport.width,
        height = viewport.height,
        "painted frame"
    );
    Ok(RenderOutcome::Painted { frame_index, fit })
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
