//! Interactive window for previewing a sequence (feature `viewer`).
//!
//! The window stands in for the host page: the mouse wheel and navigation keys scroll a
//! virtual region, window resizes feed [`FrameSequencePlayer::on_resize`], and every loop
//! iteration ticks the player once.

use std::{sync::Arc, time::Instant};

use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

use crate::{
    assets::loader::FrameSource,
    foundation::{
        core::Viewport,
        error::{FramescrubError, FramescrubResult},
    },
    player::FrameSequencePlayer,
};

/// Page colour behind the transparent surface.
pub const PAGE_BACKDROP: [u8; 3] = [0x05, 0x05, 0x05];

/// Pixels scrolled per wheel unit.
const WHEEL_PX: f64 = 40.0;
/// Pixels scrolled per arrow key press.
const ARROW_PX: f64 = 60.0;

pub struct ViewerWindow {
    window: Window,
    title: String,
    buffer: Vec<u32>,
}

impl ViewerWindow {
    pub fn new(title: &str, viewport: Viewport) -> FramescrubResult<Self> {
        let opts = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::UpperLeft,
            ..WindowOptions::default()
        };
        let mut window = Window::new(
            title,
            viewport.width.max(1) as usize,
            viewport.height.max(1) as usize,
            opts,
        )
        .map_err(|e| FramescrubError::render(format!("open window: {e}")))?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            title: title.to_string(),
            buffer: Vec::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.window.get_size();
        Viewport::new(
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(h).unwrap_or(u32::MAX),
        )
    }

    /// Scroll distance requested since the last call, in pixels (positive scrolls down).
    pub fn scroll_delta(&self, viewport: Viewport) -> f64 {
        let mut delta = 0.0;
        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            delta -= f64::from(dy) * WHEEL_PX;
        }
        let page = f64::from(viewport.height);
        let keys = [
            (Key::Down, ARROW_PX),
            (Key::Up, -ARROW_PX),
            (Key::PageDown, page),
            (Key::Space, page),
            (Key::PageUp, -page),
        ];
        for (key, amount) in keys {
            if self.window.is_key_pressed(key, KeyRepeat::Yes) {
                delta += amount;
            }
        }
        if self.window.is_key_pressed(Key::Home, KeyRepeat::No) {
            delta = f64::NEG_INFINITY;
        }
        if self.window.is_key_pressed(Key::End, KeyRepeat::No) {
            delta = f64::INFINITY;
        }
        delta
    }

    /// Show the player's surface, or a bare backdrop while frames are loading.
    pub fn present(&mut self, player: &FrameSequencePlayer) -> FramescrubResult<()> {
        let (w, h) = match player.surface() {
            Some(surface) if player.is_ready() && !surface.viewport().is_empty() => {
                surface.to_xrgb_u32(PAGE_BACKDROP, &mut self.buffer);
                (surface.width() as usize, surface.height() as usize)
            }
            _ => {
                let vp = self.viewport();
                let (w, h) = (vp.width.max(1) as usize, vp.height.max(1) as usize);
                let [r, g, b] = PAGE_BACKDROP;
                let px = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
                self.buffer.clear();
                self.buffer.resize(w * h, px);
                (w, h)
            }
        };
        self.window
            .update_with_buffer(&self.buffer, w, h)
            .map_err(|e| FramescrubError::render(format!("update window: {e}")))
    }

    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.window.set_title(&format!("{} (loading...)", self.title));
        } else {
            self.window.set_title(&self.title);
        }
    }
}

/// Run an interactive preview until the window is closed or Escape is pressed.
pub fn run_viewer(
    mut player: FrameSequencePlayer,
    source: Arc<dyn FrameSource>,
    title: &str,
) -> FramescrubResult<()> {
    let mut window = ViewerWindow::new(title, player.viewport())?;
    let region = player.config().scroll_region;
    player.begin_load(source)?;
    window.set_loading(true);

    let mut scrolled_px = 0.0_f64;
    let mut last = Instant::now();
    while window.is_open() {
        let now = Instant::now();
        let dt = (now - last).as_secs_f64();
        last = now;

        let vp = window.viewport();
        if vp != player.viewport() {
            player.on_resize(vp)?;
        }

        let height = f64::from(vp.height);
        let span = region.scroll_span_px(height);
        scrolled_px = (scrolled_px + window.scroll_delta(vp)).clamp(0.0, span);
        player.set_progress(region.progress(scrolled_px, height));

        let was_loading = player.is_loading();
        player.tick(dt)?;
        if was_loading && player.is_ready() {
            window.set_loading(false);
            if let Some(report) = player.load_report() {
                tracing::info!(
                    loaded = report.loaded(),
                    failed = report.failures.len(),
                    "viewer ready"
                );
            }
        }

        window.present(&player)?;
    }

    player.dispose();
    Ok(())
}
