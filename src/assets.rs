//! Frame sequence naming, decoding and loading.

pub mod decode;
pub mod loader;
pub mod sequence;
