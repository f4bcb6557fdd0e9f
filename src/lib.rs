//! # phyllo-viz
//!
//! Golden-angle phyllotaxis patterns, drawn with a small Grammar of
//! Graphics point layer.
//!
//! Points are generated by an angle progression (`t = k * angle`) and
//! plotted as scatter markers whose color, size, opacity and shape can be
//! fixed or mapped from the generated columns. Chart decoration is
//! controlled by a theme and can be removed piece by piece until only the
//! flower remains.
//!
//! ## Quick Start
//!
//! ```rust
//! use phyllo_viz::prelude::*;
//!
//! let frame = Spiral::golden(300).to_frame()?;
//! let plot = GGPlot::new()
//!     .data(frame)
//!     .aes(Aes::new().x("px").y("py").size("t"))
//!     .geom(Geom::point().shape(PointShape::Triangle))
//!     .coord(Coord::equal())
//!     .theme(Theme::void())
//!     .dimensions(400, 400)
//!     .build()?;
//!
//! let fb = plot.to_framebuffer()?;
//! assert_eq!(fb.width(), 400);
//! # Ok::<(), phyllo_viz::Error>(())
//! ```
//!
//! ## Outputs
//!
//! - PNG through the framebuffer rasterizer
//! - SVG with text, or a PNG embedded in SVG
//! - Terminal previews (ASCII, half-block, true color)
//!
//! ## References
//!
//! - Vogel, H. (1979). "A better way to construct the sunflower head."
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types, names and hex parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Golden-angle point generation.
pub mod phyllotaxis;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Grammar of Graphics implementation.
pub mod grammar;

/// Walkthrough presets.
pub mod presets;

/// YAML flower descriptions.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization of decoration and markers.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for phyllo-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use phyllo_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::FlowerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::grammar::{Aes, BuiltGGPlot, Coord, DataFrame, GGPlot, Geom, PointShape, Theme};
    pub use crate::output::{PngEncoder, SvgEncoder, TerminalEncoder, TerminalMode};
    pub use crate::phyllotaxis::{circle, RadialMode, Spiral, GOLDEN_ANGLE};
    pub use crate::presets::Preset;
    pub use crate::scale::{ColorScale, LinearScale, Palette, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
