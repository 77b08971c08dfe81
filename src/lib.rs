//! framescrub plays a numbered image sequence in step with scroll position.
//!
//! Scroll progress through a tall region picks a frame, a damped spring smooths the motion
//! between frames, and the chosen frame is painted aspect-fit ("contain") and centered into a
//! viewport-sized premultiplied RGBA8 surface.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `SequenceSpec + FrameSource -> FrameSet`, every frame decoded concurrently;
//!    failed frames become blank sentinels instead of failing the batch.
//! 2. **Map**: `scroll progress -> target frame` through [`ProgressMap`]; the sequence finishes
//!    at `hold_fraction` and holds its last frame after that.
//! 3. **Smooth**: a [`Spring`] follows the target frame on its own tick schedule.
//! 4. **Paint**: [`FrameSequencePlayer::render`] resizes, clears and draws into a
//!    [`CanvasSurface`].
//!
//! All of this runs on one event loop; only frame decoding fans out to worker threads.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod foundation;
mod player;
mod render;
mod scroll;

/// Interactive preview window.
#[cfg(feature = "viewer")]
pub mod viewer;

pub use animation::progress::{ProgressMap, frame_index_for};
pub use animation::spring::{Spring, SpringConfig, SpringTick};
pub use assets::decode::decode_image;
pub use assets::loader::{
    FrameSource, FsFrameSource, LoadPoll, LoadTask, MemoryFrameSource, load_frames,
    load_frames_cancellable, normalize_rel_path,
};
pub use assets::sequence::{
    FrameAsset, FrameSet, LoadError, LoadReport, LoadedFrames, SequenceSpec,
};
pub use config::PlayerConfig;
pub use foundation::core::{FrameIndex, Rect, Rgba8Premul, Size, Viewport};
pub use foundation::error::{FramescrubError, FramescrubResult};
pub use player::{FrameSequencePlayer, PlayerState};
pub use render::cache::ScaledFrameCache;
pub use render::fit::{FitRect, PixelRect, contain_fit};
pub use render::paint::{RenderOutcome, SkipReason, paint_frame};
pub use render::surface::CanvasSurface;
pub use scroll::ScrollRegion;
