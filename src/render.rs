//! Painting a frame set into a viewport-sized RGBA surface.

pub mod cache;
pub mod fit;
pub mod paint;
pub mod surface;
