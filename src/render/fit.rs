use crate::foundation::core::{Rect, Size};

/// Placement of an image scaled to fit ("contain") inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    /// Uniform scale applied to both axes.
    pub ratio: f64,
    /// Destination rectangle in canvas coordinates.
    pub rect: Rect,
}

/// Integer destination bounds after snapping a [`FitRect`] to the pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Largest uniform scale of `image` that fits inside `canvas`, centered.
///
/// Returns `None` when either size has no area.
pub fn contain_fit(image: Size, canvas: Size) -> Option<FitRect> {
    if !(image.width > 0.0 && image.height > 0.0 && canvas.width > 0.0 && canvas.height > 0.0) {
        return None;
    }
    let h_ratio = canvas.width / image.width;
    let v_ratio = canvas.height / image.height;
    let ratio = h_ratio.min(v_ratio);

    let drawn_w = image.width * ratio;
    let drawn_h = image.height * ratio;
    let x0 = (canvas.width - drawn_w) / 2.0;
    let y0 = (canvas.height - drawn_h) / 2.0;

    Some(FitRect {
        ratio,
        rect: Rect::new(x0, y0, x0 + drawn_w, y0 + drawn_h),
    })
}

impl FitRect {
    /// Snap edges to the nearest pixel, clipped to `canvas`.
    pub fn snap(&self, canvas_width: u32, canvas_height: u32) -> PixelRect {
        fn edge(v: f64, max: u32) -> u32 {
            v.round().clamp(0.0, f64::from(max)) as u32
        }
        let x0 = edge(self.rect.x0, canvas_width);
        let y0 = edge(self.rect.y0, canvas_height);
        let x1 = edge(self.rect.x1, canvas_width);
        let y1 = edge(self.rect.y1, canvas_height);
        PixelRect {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
