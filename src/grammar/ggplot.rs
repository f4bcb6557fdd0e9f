//! Main GGPlot builder and renderer.
//!
//! Combines all Grammar of Graphics components into a complete visualization.

use std::path::Path;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{PngEncoder, SvgEncoder};
use crate::render::{blend_rect, draw_marker, draw_straight_line};
use crate::scale::Palette;

use super::aes::Aes;
use super::coord::Coord;
use super::data::DataFrame;
use super::geom::Geom;
use super::scene::Scene;
use super::theme::Theme;
use super::vector;

/// Default output resolution.
pub const DEFAULT_DPI: f32 = 96.0;

/// A layer in the plot.
#[derive(Debug, Clone)]
pub struct Layer {
    /// The geometry.
    pub geom: Geom,
    /// Layer-specific data (if different from plot data).
    pub data: Option<DataFrame>,
    /// Layer-specific aesthetics.
    pub aes: Aes,
}

impl Layer {
    /// Create a new layer from a geometry.
    #[must_use]
    pub fn new(geom: Geom) -> Self {
        Self { aes: geom.aes.clone().unwrap_or_default(), geom, data: None }
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = Some(data);
        self
    }

    /// Set layer aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }
}

/// Grammar of Graphics plot builder.
#[derive(Debug, Clone)]
pub struct GGPlot {
    data: DataFrame,
    aes: Aes,
    layers: Vec<Layer>,
    coord: Coord,
    theme: Theme,
    palette: Palette,
    width: u32,
    height: u32,
    dpi: f32,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
}

impl Default for GGPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl GGPlot {
    /// Create a new plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DataFrame::new(),
            aes: Aes::new(),
            layers: Vec::new(),
            coord: Coord::cartesian(),
            theme: Theme::grey(),
            palette: Palette::Gradient,
            width: 800,
            height: 600,
            dpi: DEFAULT_DPI,
            title: None,
            xlab: None,
            ylab: None,
        }
    }

    /// Set the data.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = data;
        self
    }

    /// Convenience: set x and y data directly and map them.
    #[must_use]
    pub fn data_xy(mut self, x: &[f32], y: &[f32]) -> Self {
        self.data = DataFrame::from_xy(x, y);
        self.aes = self.aes.x("x").y("y");
        self
    }

    /// Set global aesthetics, keeping any earlier mapping the new one leaves unset.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = self.aes.merge(&aes);
        self
    }

    /// Add a geometry layer.
    #[must_use]
    pub fn geom(mut self, geom: Geom) -> Self {
        self.layers.push(Layer::new(geom));
        self
    }

    /// Add a layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set coordinate system.
    #[must_use]
    pub fn coord(mut self, coord: Coord) -> Self {
        self.coord = coord;
        self
    }

    /// Set theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the palette for a mapped color.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the resolution used to convert millimetres and points to pixels.
    #[must_use]
    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set x-axis label.
    #[must_use]
    pub fn xlab(mut self, label: impl Into<String>) -> Self {
        self.xlab = Some(label.into());
        self
    }

    /// Set y-axis label.
    #[must_use]
    pub fn ylab(mut self, label: impl Into<String>) -> Self {
        self.ylab = Some(label.into());
        self
    }

    /// Build the plot.
    ///
    /// # Errors
    ///
    /// - [`Error::Rendering`] without layers, or when a layer has no x or y mapping
    /// - [`Error::UnknownColumn`] when a mapping names a missing column
    /// - [`Error::InvalidStyle`] for alpha outside 0-1, or a negative or non-finite size or stroke
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::InvalidParameter`] for a non-positive dpi or aspect ratio
    pub fn build(self) -> Result<BuiltGGPlot> {
        if self.layers.is_empty() {
            return Err(Error::Rendering("No geometry layers specified".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(Error::InvalidParameter { name: "dpi", reason: format!("{} is not positive", self.dpi) });
        }
        if let Some(ratio) = self.coord.aspect_ratio() {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(Error::InvalidParameter {
                    name: "ratio",
                    reason: format!("{ratio} is not a positive aspect ratio"),
                });
            }
        }

        for layer in &self.layers {
            let data = layer.data.as_ref().unwrap_or(&self.data);
            let aes = self.aes.merge(&layer.aes);
            if aes.x.is_none() || aes.y.is_none() {
                return Err(Error::Rendering("point layers need both x and y mapped".into()));
            }
            if let Some(missing) = aes.mapped_columns().find(|c| !data.has_column(c)) {
                return Err(Error::UnknownColumn(missing.to_string()));
            }
            validate_style(&aes, &layer.geom)?;
        }

        tracing::debug!(layers = self.layers.len(), rows = self.data.nrow(), "built plot");

        Ok(BuiltGGPlot {
            data: self.data,
            aes: self.aes,
            layers: self.layers,
            coord: self.coord,
            theme: self.theme,
            palette: self.palette,
            width: self.width,
            height: self.height,
            dpi: self.dpi,
            title: self.title,
            xlab: self.xlab,
            ylab: self.ylab,
        })
    }
}

fn validate_style(aes: &Aes, geom: &Geom) -> Result<()> {
    if let Some(alpha) = aes.alpha_value {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::InvalidStyle { aesthetic: "alpha", value: alpha, reason: "must be within 0-1" });
        }
    }
    let non_negative = |aesthetic: &'static str, value: f32| {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidStyle { aesthetic, value, reason: "must be finite and non-negative" })
        }
    };
    if let Some(size) = aes.size_value {
        non_negative("size", size)?;
    }
    non_negative("stroke", aes.stroke_value.unwrap_or(geom.stroke))
}

/// A built GGPlot ready for rendering.
#[derive(Debug, Clone)]
pub struct BuiltGGPlot {
    pub(crate) data: DataFrame,
    pub(crate) aes: Aes,
    pub(crate) layers: Vec<Layer>,
    pub(crate) coord: Coord,
    pub(crate) theme: Theme,
    pub(crate) palette: Palette,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) dpi: f32,
    pub(crate) title: Option<String>,
    pub(crate) xlab: Option<String>,
    pub(crate) ylab: Option<String>,
}

impl BuiltGGPlot {
    /// Resolve scales, layout and markers.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyData`] when no row has finite x and y.
    pub fn scene(&self) -> Result<Scene> {
        Scene::resolve(self)
    }

    /// Render to framebuffer.
    ///
    /// The raster backend draws no text; tick labels and titles are only
    /// present in SVG output.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be resolved.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let scene = self.scene()?;
        paint_raster(&scene)
    }

    /// Render to a vector SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be resolved.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let scene = self.scene()?;
        Ok(vector::paint(&scene))
    }

    /// Render and write to `path`, choosing PNG or SVG from its extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for other extensions, plus any
    /// rendering or I/O error.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => PngEncoder::write_to_file(&self.to_framebuffer()?, path),
            Some("svg") => self.to_svg()?.write_to_file(path),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Paint a scene onto a new framebuffer.
fn paint_raster(scene: &Scene) -> Result<Framebuffer> {
    let mut fb = Framebuffer::new(scene.width, scene.height)?;
    let theme = &scene.theme;
    let panel = scene.panel;

    fb.clear(theme.background);
    blend_rect(&mut fb, panel, theme.panel_background);

    if theme.show_grid {
        if theme.show_minor_grid {
            let minor = theme.minor_grid_color();
            draw_grid(&mut fb, scene, &scene.x_minor, &scene.y_minor, theme.grid_width / 2.0, minor);
        }
        draw_grid(&mut fb, scene, &scene.x_breaks, &scene.y_breaks, theme.grid_width, theme.grid_color);
    }

    for marker in &scene.markers {
        draw_marker(&mut fb, marker, panel);
    }

    if theme.show_axis {
        let bottom_left = Point::new(panel.x, panel.bottom());
        draw_straight_line(&mut fb, bottom_left, Point::new(panel.right(), panel.bottom()), theme.axis_width, theme.axis_color);
        draw_straight_line(&mut fb, Point::new(panel.x, panel.y), bottom_left, theme.axis_width, theme.axis_color);
    }

    if theme.show_ticks {
        let len = scene.text.tick_length;
        for &b in &scene.x_breaks {
            let x = scene.x_px(b);
            draw_straight_line(&mut fb, Point::new(x, panel.bottom()), Point::new(x, panel.bottom() + len), theme.axis_width, theme.axis_color);
        }
        for &b in &scene.y_breaks {
            let y = scene.y_px(b);
            draw_straight_line(&mut fb, Point::new(panel.x - len, y), Point::new(panel.x, y), theme.axis_width, theme.axis_color);
        }
    }

    if theme.show_panel_border {
        let w = theme.axis_width;
        let edges = [
            Rect::new(panel.x, panel.y, panel.width, w),
            Rect::new(panel.x, panel.bottom() - w, panel.width, w),
            Rect::new(panel.x, panel.y + w, w, panel.height - 2.0 * w),
            Rect::new(panel.right() - w, panel.y + w, w, panel.height - 2.0 * w),
        ];
        for edge in edges {
            blend_rect(&mut fb, edge, theme.border_color);
        }
    }

    let canvas = Rect::new(0.0, 0.0, scene.width as f32, scene.height as f32);
    for key in scene.legends.iter().flat_map(|l| &l.keys) {
        blend_rect(&mut fb, key.key, theme.panel_background);
        draw_marker(&mut fb, &key.marker, canvas);
    }

    Ok(fb)
}

fn draw_grid(fb: &mut Framebuffer, scene: &Scene, xs: &[f32], ys: &[f32], width: f32, color: Rgba) {
    let panel = scene.panel;
    for &v in xs {
        let x = scene.x_px(v);
        draw_straight_line(fb, Point::new(x, panel.y), Point::new(x, panel.bottom()), width, color);
    }
    for &v in ys {
        let y = scene.y_px(v);
        draw_straight_line(fb, Point::new(panel.x, y), Point::new(panel.right(), y), width, color);
    }
}
