//! Flower description files.
//!
//! A flower is described in YAML with four optional sections. Precedence
//! when combining sources is CLI > file > preset > defaults.
//!
//! ```yaml
//! version: 1
//! pattern:
//!   points: 500
//!   radial: linear
//! style:
//!   color: darkgreen
//!   size: 8
//!   alpha: 0.5
//! theme:
//!   base: grey
//!   blank: true
//! output:
//!   width: 800
//!   height: 800
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::grammar::{Aes, Coord, DataFrame, GGPlot, Geom, PointShape, Theme, DEFAULT_DPI};
use crate::phyllotaxis::{self, RadialMode, Spiral, GOLDEN_ANGLE};
use crate::scale::Palette;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::path::Path;

/// How the points are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Angle progression (see [`Spiral`]).
    #[default]
    Spiral,
    /// Evenly spaced points on the unit circle.
    Circle,
}

/// Point sequence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    /// Spiral or circle.
    #[serde(default)]
    pub layout: Layout,

    /// Number of points.
    #[serde(default = "default_points")]
    pub points: usize,

    /// Angle step in radians. Defaults to the golden angle.
    #[serde(default)]
    pub angle: Option<f64>,

    /// Angle step in degrees, used when `angle` is unset.
    #[serde(default)]
    pub angle_degrees: Option<f64>,

    /// Index of the first point.
    #[serde(default = "default_start")]
    pub start: usize,

    /// Radius growth.
    #[serde(default)]
    pub radial: RadialMode,

    /// Rotation of the whole pattern in radians.
    #[serde(default)]
    pub rotation: f64,
}

fn default_points() -> usize {
    500
}
fn default_start() -> usize {
    1
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            points: default_points(),
            angle: None,
            angle_degrees: None,
            start: default_start(),
            radial: RadialMode::default(),
            rotation: 0.0,
        }
    }
}

impl PatternConfig {
    /// Angle step in radians after resolving `angle` / `angle_degrees`.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.angle
            .or_else(|| self.angle_degrees.map(f64::to_radians))
            .unwrap_or(GOLDEN_ANGLE)
    }

    /// The spiral this pattern describes.
    #[must_use]
    pub fn spiral(&self) -> Spiral {
        Spiral::new()
            .points(self.points)
            .angle(self.step())
            .start(self.start)
            .radial(self.radial)
            .rotation(self.rotation)
    }

    /// Generate the points.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyData`] for zero points, [`Error::InvalidParameter`] for
    /// a non-finite angle.
    pub fn frame(&self) -> Result<DataFrame> {
        match self.layout {
            Layout::Spiral => self.spiral().to_frame(),
            Layout::Circle => phyllotaxis::circle(self.points),
        }
    }
}

/// A point shape written as an R code (`17`) or a name (`triangle`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeValue {
    /// R `pch` code.
    Code(u8),
    /// Shape name.
    Name(String),
}

impl ShapeValue {
    /// Resolve to a shape.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for unknown codes and names.
    pub fn resolve(&self) -> Result<PointShape> {
        match self {
            Self::Code(code) => PointShape::from_code(*code),
            Self::Name(name) => name.parse(),
        }
    }
}

impl From<PointShape> for ShapeValue {
    fn from(shape: PointShape) -> Self {
        Self::Code(shape.code())
    }
}

/// Marker styling. Fixed values apply unless the matching `*_by` column is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Fixed color (name or hex).
    #[serde(default)]
    pub color: Option<String>,
    /// Fixed size in mm.
    #[serde(default)]
    pub size: Option<f32>,
    /// Fixed opacity, 0-1.
    #[serde(default)]
    pub alpha: Option<f32>,
    /// Shape code or name.
    #[serde(default)]
    pub shape: Option<ShapeValue>,
    /// Outline width in mm.
    #[serde(default)]
    pub stroke: Option<f32>,
    /// Column mapped to color.
    #[serde(default)]
    pub color_by: Option<String>,
    /// Column mapped to size.
    #[serde(default)]
    pub size_by: Option<String>,
    /// Column mapped to opacity.
    #[serde(default)]
    pub alpha_by: Option<String>,
    /// Palette for `color_by`.
    #[serde(default)]
    pub palette: Palette,
}

/// Theme selection and overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Preset theme name.
    #[serde(default = "default_theme")]
    pub base: String,
    /// Strip grid, axes, ticks and axis text.
    #[serde(default)]
    pub blank: bool,
    /// Outer background color.
    #[serde(default)]
    pub background: Option<String>,
    /// Panel background color.
    #[serde(default)]
    pub panel_background: Option<String>,
    /// Show legends for mapped aesthetics.
    #[serde(default = "default_true")]
    pub legend: bool,
    /// Plot title.
    #[serde(default)]
    pub title: Option<String>,
}

fn default_theme() -> String {
    "grey".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            base: default_theme(),
            blank: false,
            background: None,
            panel_background: None,
            legend: default_true(),
            title: None,
        }
    }
}

impl ThemeConfig {
    /// Build the theme.
    ///
    /// # Errors
    ///
    /// Unknown theme names and unparseable colors.
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = Theme::from_name(&self.base)?;
        if self.blank {
            theme = theme.blank();
        }
        if let Some(color) = &self.background {
            theme = theme.background(color.parse()?);
        }
        if let Some(color) = &self.panel_background {
            theme = theme.panel_background(color.parse()?);
        }
        Ok(theme.legend(self.legend))
    }
}

/// Image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Width in pixels.
    #[serde(default = "default_size")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_size")]
    pub height: u32,
    /// Resolution.
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    /// Lock one x unit to one y unit.
    #[serde(default = "default_true")]
    pub equal_aspect: bool,
}

fn default_size() -> u32 {
    800
}
fn default_dpi() -> f32 {
    DEFAULT_DPI
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { width: default_size(), height: default_size(), dpi: default_dpi(), equal_aspect: default_true() }
    }
}

/// A complete flower description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowerConfig {
    /// Format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Points.
    #[serde(default)]
    pub pattern: PatternConfig,
    /// Markers.
    #[serde(default)]
    pub style: StyleConfig,
    /// Decoration.
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Image.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for FlowerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            pattern: PatternConfig::default(),
            style: StyleConfig::default(),
            theme: ThemeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn parse_error(e: &serde_yaml_ng::Error) -> Error {
    let line = e.location().map_or(0, |l| l.line());
    Error::ConfigParse { line, message: e.to_string() }
}

/// A layer that sets one of `angle` / `angle_degrees` replaces the other.
fn clear_other_angle(top: &mut Value) {
    let Some(pattern) = top.get_mut("pattern").and_then(Value::as_mapping_mut) else {
        return;
    };
    for (set, other) in [("angle", "angle_degrees"), ("angle_degrees", "angle")] {
        if pattern.contains_key(set) && !pattern.contains_key(other) {
            pattern.insert(Value::from(other), Value::Null);
        }
    }
}

/// Overlay `top` onto `base`, recursing into mappings.
fn merge_values(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base), Value::Mapping(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

impl FlowerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from YAML.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] with the offending line.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| parse_error(&e))
    }

    /// Parses YAML on top of `base`: fields the document sets win, the
    /// rest keep `base`'s values.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] for malformed YAML or invalid fields.
    pub fn parse_over(base: &Self, yaml: &str) -> Result<Self> {
        let top: Value = serde_yaml_ng::from_str(yaml).map_err(|e| parse_error(&e))?;
        if top.is_null() {
            return Ok(base.clone());
        }
        let mut top = top;
        clear_other_angle(&mut top);
        let mut merged = serde_yaml_ng::to_value(base)?;
        merge_values(&mut merged, top);
        serde_yaml_ng::from_value(merged).map_err(|e| parse_error(&e))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] when the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_over(&Self::default(), path)
    }

    /// Loads a configuration file on top of `base`.
    ///
    /// # Errors
    ///
    /// Same as [`FlowerConfig::load`].
    pub fn load_over(base: &Self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;
        let config = Self::parse_over(base, &content)?;
        tracing::debug!(path = %path.display(), "loaded flower config");
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigSerialize`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Turn the description into a plot builder.
    ///
    /// Points are mapped as `x = px` and `y = py`; generated columns `i`,
    /// `t`, `r`, `x` and `y` are available to the `*_by` mappings.
    ///
    /// # Errors
    ///
    /// Invalid pattern parameters, colors, shapes or theme names. Style
    /// ranges are checked later by [`GGPlot::build`].
    pub fn to_plot(&self) -> Result<GGPlot> {
        let style = &self.style;
        let frame = self.pattern.frame()?;

        let mut aes = Aes::new().x("px").y("py");
        if let Some(column) = &style.color_by {
            aes = aes.color(column);
        }
        if let Some(column) = &style.size_by {
            aes = aes.size(column);
        }
        if let Some(column) = &style.alpha_by {
            aes = aes.alpha(column);
        }
        if let Some(color) = &style.color {
            aes = aes.color_value(color.parse::<Rgba>()?);
        }
        if let Some(size) = style.size {
            aes = aes.size_value(size);
        }
        if let Some(alpha) = style.alpha {
            aes = aes.alpha_value(alpha);
        }
        if let Some(stroke) = style.stroke {
            aes = aes.stroke_value(stroke);
        }

        let mut geom = Geom::point();
        if let Some(shape) = &style.shape {
            geom = geom.shape(shape.resolve()?);
        }

        let coord = if self.output.equal_aspect { Coord::equal() } else { Coord::cartesian() };

        let mut plot = GGPlot::new()
            .data(frame)
            .aes(aes)
            .geom(geom)
            .coord(coord)
            .theme(self.theme.theme()?)
            .palette(style.palette)
            .dimensions(self.output.width, self.output.height)
            .dpi(self.output.dpi);
        if let Some(title) = &self.theme.title {
            plot = plot.title(title.clone());
        }
        Ok(plot)
    }
}
