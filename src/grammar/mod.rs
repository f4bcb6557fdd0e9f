//! Grammar of Graphics implementation.
//!
//! Provides a declarative point-plot specification based on Wilkinson's
//! Grammar of Graphics [Wilkinson 2005], with the defaults of ggplot2.
//!
//! # Components
//!
//! - **Data**: a column-oriented [`DataFrame`]
//! - **Aesthetics**: mappings from columns to position, color, size and alpha
//! - **Geometries**: point layers with R's shape codes
//! - **Coordinates**: Cartesian, optionally with a locked aspect ratio
//! - **Themes**: every non-data element, switchable one at a time
//!
//! A built plot resolves to a [`Scene`], which both the raster and the SVG
//! backends paint from.
//!
//! # Example
//!
//! ```rust
//! use phyllo_viz::grammar::*;
//!
//! let plot = GGPlot::new()
//!     .data_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
//!     .geom(Geom::point())
//!     .aes(Aes::new().color_value(phyllo_viz::color::Rgba::BLUE))
//!     .build()
//!     .unwrap();
//! assert_eq!(plot.scene().unwrap().markers.len(), 3);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod coord;
mod data;
mod geom;
mod ggplot;
mod scene;
mod theme;
mod vector;

pub use aes::Aes;
pub use coord::Coord;
pub use data::{DataFrame, DataValue, Row};
pub use geom::{Geom, PointShape, DEFAULT_STROKE};
pub use ggplot::{BuiltGGPlot, GGPlot, Layer, DEFAULT_DPI};
pub use scene::{
    expand_range, marker_size_px, stroke_to_px, Legend, LegendKey, Marker, Scene, TextMetrics,
    DEFAULT_POINT_SIZE, EXPANSION, PT_PER_MM, STROKE_PER_MM,
};
pub use theme::Theme;
