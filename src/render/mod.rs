//! Rasterization.
//!
//! Decoration (grid, axes, panels) uses Wu lines and coverage-weighted
//! rectangles; point glyphs use a signed-distance rasterizer.
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod marker;
mod primitives;

pub use marker::{draw_glyph, draw_marker, Glyph};
pub use primitives::{blend_rect, draw_line_aa, draw_rect, draw_straight_line};
