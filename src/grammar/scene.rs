//! Backend-neutral plot description.
//!
//! A [`Scene`] is a built plot with every decision made: panel placement,
//! axis breaks, one [`Marker`] per drawable point and the legend layout. The
//! raster and SVG renderers both paint from it, so they agree on geometry.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::scale::{self, AlphaScale, ColorScale, LinearScale, Scale, SizeScale};

use super::aes::Aes;
use super::geom::PointShape;
use super::ggplot::BuiltGGPlot;
use super::theme::Theme;

/// Points per millimetre, ggplot's `.pt`.
pub const PT_PER_MM: f32 = 72.27 / 25.4;

/// ggplot's default point size in mm.
pub const DEFAULT_POINT_SIZE: f32 = 1.5;

/// Fraction of the data range added on each side of a position scale.
pub const EXPANSION: f32 = 0.05;

/// Aim for this many major breaks per axis.
const AXIS_BREAKS: usize = 5;

/// Aim for this many keys per legend.
const LEGEND_BREAKS: usize = 4;

/// Stroke units per millimetre, ggplot's `.stroke`.
pub const STROKE_PER_MM: f32 = 96.0 / 25.4;

/// Nominal marker size in pixels, as ggplot computes a point's font size:
/// `size * .pt + stroke * .stroke / 2` points.
#[must_use]
pub fn marker_size_px(size_mm: f32, stroke_mm: f32, dpi: f32) -> f32 {
    (size_mm * PT_PER_MM + stroke_mm * STROKE_PER_MM / 2.0) * dpi / 72.0
}

/// Outline width in pixels for a stroke in mm.
#[must_use]
pub fn stroke_to_px(stroke_mm: f32, dpi: f32) -> f32 {
    stroke_mm * STROKE_PER_MM / 2.0 * dpi / 96.0
}

/// Widen a range by [`EXPANSION`] on each side; a zero-width range becomes
/// one unit wide.
#[must_use]
pub fn expand_range(extent: (f32, f32)) -> (f32, f32) {
    let (lo, hi) = extent;
    let span = hi - lo;
    if span.abs() < f32::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * EXPANSION, hi + span * EXPANSION)
}

/// A resolved, positioned marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Centre in pixels.
    pub center: Point,
    /// Nominal size in pixels. Shapes are drawn relative to it the way R's
    /// graphics engine draws point glyphs (a circle's radius is 0.375 of it).
    pub size: f32,
    /// Outline width in pixels.
    pub stroke: f32,
    /// Shape.
    pub shape: PointShape,
    /// Color with the resolved opacity folded into its alpha.
    pub color: Rgba,
}

/// One legend key: a sample marker and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendKey {
    /// Break value as text.
    pub label: String,
    /// Key background box.
    pub key: Rect,
    /// Sample marker centred in the key.
    pub marker: Marker,
    /// Baseline-left position of the label.
    pub label_at: Point,
}

/// A legend for one mapped column.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Column name.
    pub title: String,
    /// Baseline-left position of the title.
    pub title_at: Point,
    /// Keys from smallest to largest value.
    pub keys: Vec<LegendKey>,
}

/// Text sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Tick label size.
    pub tick: f32,
    /// Axis title and legend title size.
    pub label: f32,
    /// Plot title size.
    pub title: f32,
    /// Tick mark length.
    pub tick_length: f32,
}

impl TextMetrics {
    fn new(base_pt: f32, dpi: f32) -> Self {
        let base = base_pt * dpi / 72.0;
        Self {
            tick: base * 0.8,
            label: base,
            title: base * 1.2,
            tick_length: 2.75 * dpi / 72.0,
        }
    }

    /// Rough advance width of `text` at size `px`.
    #[must_use]
    pub fn text_width(text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * 0.6
    }
}

/// Fully resolved plot, ready for a renderer.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Theme in effect.
    pub theme: Theme,
    /// Panel rectangle.
    pub panel: Rect,
    /// Data x to pixel x.
    pub x_scale: LinearScale,
    /// Data y to pixel y (inverted).
    pub y_scale: LinearScale,
    /// Major x breaks in data units.
    pub x_breaks: Vec<f32>,
    /// Major y breaks in data units.
    pub y_breaks: Vec<f32>,
    /// Minor x breaks in data units.
    pub x_minor: Vec<f32>,
    /// Minor y breaks in data units.
    pub y_minor: Vec<f32>,
    /// Markers in drawing order.
    pub markers: Vec<Marker>,
    /// Legends, top to bottom.
    pub legends: Vec<Legend>,
    /// Plot title.
    pub title: Option<String>,
    /// X axis title.
    pub x_title: Option<String>,
    /// Y axis title.
    pub y_title: Option<String>,
    /// Text sizes.
    pub text: TextMetrics,
    /// Rows skipped for missing or non-finite values.
    pub dropped: usize,
}

/// One layer's columns, pulled out of its data frame.
struct LayerValues {
    aes: Aes,
    shape: PointShape,
    stroke: f32,
    x: Vec<f32>,
    y: Vec<f32>,
    color: Option<Vec<f32>>,
    size: Option<Vec<f32>>,
    alpha: Option<Vec<f32>>,
}

impl LayerValues {
    fn row_is_complete(&self, i: usize) -> bool {
        let finite = |col: &Option<Vec<f32>>| col.as_ref().map_or(true, |c| c[i].is_finite());
        self.x[i].is_finite()
            && self.y[i].is_finite()
            && finite(&self.color)
            && finite(&self.size)
            && finite(&self.alpha)
    }

    fn base_color(&self) -> Rgba {
        self.aes.color_value.unwrap_or(Rgba::BLACK)
    }

    fn base_size(&self) -> f32 {
        self.aes.size_value.unwrap_or(DEFAULT_POINT_SIZE)
    }

    fn base_alpha(&self) -> f32 {
        self.aes.alpha_value.unwrap_or(1.0)
    }
}

/// Scales trained on every layer that maps the aesthetic.
#[derive(Default)]
struct MappedScales {
    color: Option<(String, ColorScale)>,
    size: Option<(String, SizeScale)>,
    alpha: Option<(String, AlphaScale)>,
}

fn union(a: Option<(f32, f32)>, b: Option<(f32, f32)>) -> Option<(f32, f32)> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.max(b.1))),
        (a, b) => a.or(b),
    }
}

/// Train one aesthetic across layers: the first mapped column names it.
fn train<F>(layers: &[LayerValues], pick: F) -> Option<(String, (f32, f32))>
where
    F: Fn(&LayerValues) -> (Option<&String>, Option<&Vec<f32>>),
{
    let mut name = None;
    let mut extent = None;
    for layer in layers {
        if let (Some(column), Some(values)) = pick(layer) {
            name.get_or_insert_with(|| column.clone());
            extent = union(extent, scale::finite_extent(values));
        }
    }
    Some((name?, extent?))
}

/// Major breaks of `limits` that fall inside `domain`, and the minor breaks
/// halfway between them.
fn axis_breaks(limits: (f32, f32), domain: (f32, f32)) -> (Vec<f32>, Vec<f32>) {
    let inside = |v: &f32| *v >= domain.0 && *v <= domain.1;
    let major: Vec<f32> = scale::breaks(limits, AXIS_BREAKS).into_iter().filter(inside).collect();

    let mut minor = Vec::new();
    if let &[first, second, ..] = major.as_slice() {
        let half = (second - first) / 2.0;
        minor.push(first - half);
        minor.extend(major.iter().map(|b| b + half));
    }
    minor.retain(inside);
    (major, minor)
}

impl Scene {
    /// Resolve a built plot.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyData`] when no row has finite x and y,
    /// [`Error::ScaleDomain`] when a position scale cannot be constructed.
    pub(crate) fn resolve(plot: &BuiltGGPlot) -> Result<Self> {
        let layers = collect_layers(plot);

        let complete = |each: fn(&LayerValues, usize) -> f32| -> Vec<f32> {
            layers
                .iter()
                .flat_map(|l| (0..l.x.len()).filter(move |&i| l.row_is_complete(i)).map(move |i| each(l, i)))
                .collect()
        };
        let xs = complete(|l, i| l.x[i]);
        let ys = complete(|l, i| l.y[i]);

        let (user_x, user_y) = plot.coord.limits();
        let x_limits = user_x.or_else(|| scale::finite_extent(&xs)).ok_or(Error::EmptyData)?;
        let y_limits = user_y.or_else(|| scale::finite_extent(&ys)).ok_or(Error::EmptyData)?;
        let x_domain = expand_range(x_limits);
        let y_domain = expand_range(y_limits);
        let (x_breaks, x_minor) = axis_breaks(x_limits, x_domain);
        let (y_breaks, y_minor) = axis_breaks(y_limits, y_domain);

        let mapped = MappedScales {
            color: train(&layers, |l| (l.aes.color.as_ref(), l.color.as_ref()))
                .map(|(name, d)| (name, plot.palette.scale(d))),
            size: train(&layers, |l| (l.aes.size.as_ref(), l.size.as_ref()))
                .map(|(name, d)| (name, SizeScale::area(d, SizeScale::DEFAULT_RANGE))),
            alpha: train(&layers, |l| (l.aes.alpha.as_ref(), l.alpha.as_ref()))
                .map(|(name, d)| (name, AlphaScale::new(d, AlphaScale::DEFAULT_RANGE))),
        };

        let dpi = plot.dpi;
        let theme = &plot.theme;
        let text = TextMetrics::new(theme.base_size, dpi);
        let first_aes = layers.first().map(|l| &l.aes);
        let x_title = plot.xlab.clone().or_else(|| first_aes.and_then(|a| a.x.clone()));
        let y_title = plot.ylab.clone().or_else(|| first_aes.and_then(|a| a.y.clone()));

        let legend_specs = if theme.show_legend { legend_specs(&layers, &mapped) } else { Vec::new() };

        let panel = layout_panel(plot, &text, &y_breaks, !legend_specs.is_empty());
        let panel = match plot.coord.aspect_ratio() {
            Some(ratio) => {
                let x_span = x_domain.1 - x_domain.0;
                let y_span = y_domain.1 - y_domain.0;
                panel.fit_aspect(x_span / (y_span * ratio))
            }
            None => panel,
        };

        let x_scale = LinearScale::new(x_domain, (panel.x, panel.right()))?;
        let y_scale = LinearScale::new(y_domain, (panel.bottom(), panel.y))?;

        let mut markers = Vec::with_capacity(xs.len());
        let mut dropped = 0;
        for layer in &layers {
            for i in 0..layer.x.len() {
                if !layer.row_is_complete(i) {
                    dropped += 1;
                    continue;
                }
                let value = |col: &Option<Vec<f32>>| col.as_ref().map(|c| c[i]);
                let color = match (&mapped.color, value(&layer.color)) {
                    (Some((_, s)), Some(v)) => s.scale(v),
                    _ => layer.base_color(),
                };
                let size = match (&mapped.size, value(&layer.size)) {
                    (Some((_, s)), Some(v)) => s.scale(v),
                    _ => layer.base_size(),
                };
                let alpha = match (&mapped.alpha, value(&layer.alpha)) {
                    (Some((_, s)), Some(v)) => s.scale(v),
                    _ => layer.base_alpha(),
                };
                markers.push(Marker {
                    center: Point::new(x_scale.scale(layer.x[i]), y_scale.scale(layer.y[i])),
                    size: marker_size_px(size, layer.stroke, dpi),
                    stroke: stroke_to_px(layer.stroke, dpi),
                    shape: layer.shape,
                    color: color.fade(alpha),
                });
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "removed rows with missing or non-finite values");
        }

        let legends = place_legends(legend_specs, plot, panel, &text);

        tracing::debug!(
            markers = markers.len(),
            legends = legends.len(),
            panel_width = panel.width,
            panel_height = panel.height,
            "resolved scene"
        );

        Ok(Self {
            width: plot.width,
            height: plot.height,
            theme: theme.clone(),
            panel,
            x_scale,
            y_scale,
            x_breaks,
            y_breaks,
            x_minor,
            y_minor,
            markers,
            legends,
            title: plot.title.clone(),
            x_title,
            y_title,
            text,
            dropped,
        })
    }

    /// Pixel x of a data x.
    #[must_use]
    pub fn x_px(&self, x: f32) -> f32 {
        self.x_scale.scale(x)
    }

    /// Pixel y of a data y.
    #[must_use]
    pub fn y_px(&self, y: f32) -> f32 {
        self.y_scale.scale(y)
    }
}

fn collect_layers(plot: &BuiltGGPlot) -> Vec<LayerValues> {
    plot.layers
        .iter()
        .map(|layer| {
            let data = layer.data.as_ref().unwrap_or(&plot.data);
            let aes = plot.aes.merge(&layer.aes);
            let column = |name: &Option<String>| name.as_deref().and_then(|n| data.values_f32(n));
            let n = data.nrow();
            let mut x = column(&aes.x).unwrap_or_default();
            let mut y = column(&aes.y).unwrap_or_default();
            x.resize(n, f32::NAN);
            y.resize(n, f32::NAN);
            let pad = |col: Option<Vec<f32>>| {
                col.map(|mut c| {
                    c.resize(n, f32::NAN);
                    c
                })
            };
            LayerValues {
                shape: layer.geom.shape,
                stroke: aes.stroke_value.unwrap_or(layer.geom.stroke),
                color: pad(column(&aes.color)),
                size: pad(column(&aes.size)),
                alpha: pad(column(&aes.alpha)),
                x,
                y,
                aes,
            }
        })
        .collect()
}

/// Panel rectangle after margins, axis decoration, title and legend.
fn layout_panel(plot: &BuiltGGPlot, text: &TextMetrics, y_breaks: &[f32], legend: bool) -> Rect {
    let theme = &plot.theme;
    let margin = theme.margin as f32;

    let mut top = margin;
    if plot.title.is_some() {
        top += text.title * 1.5;
    }

    let mut bottom = margin;
    let mut left = margin;
    if theme.show_ticks {
        bottom += text.tick_length;
        left += text.tick_length;
    }
    if theme.show_axis_text {
        bottom += text.tick * 1.4;
        let widest = y_breaks
            .iter()
            .map(|b| TextMetrics::text_width(&scale::format_break(*b), text.tick))
            .fold(0.0, f32::max);
        left += widest + text.tick * 0.4;
    }
    if theme.show_axis_title {
        bottom += text.label * 1.5;
        left += text.label * 1.5;
    }

    let mut right = margin;
    if legend {
        right += theme.legend_width as f32;
    }

    let width = (plot.width as f32 - left - right).max(1.0);
    let height = (plot.height as f32 - top - bottom).max(1.0);
    Rect::new(left, top, width, height)
}

/// A legend before placement.
struct LegendSpec {
    title: String,
    /// (label, color with opacity, size in mm) per break.
    entries: Vec<(String, Rgba, f32)>,
    shape: PointShape,
    stroke: f32,
}

fn legend_specs(layers: &[LayerValues], mapped: &MappedScales) -> Vec<LegendSpec> {
    let Some(template) = layers.first() else {
        return Vec::new();
    };

    // One legend per column; aesthetics sharing a column share a legend.
    let mut columns: Vec<(&str, (f32, f32))> = Vec::new();
    let named = [
        mapped.color.as_ref().map(|(n, s)| (n.as_str(), s.domain())),
        mapped.size.as_ref().map(|(n, s)| (n.as_str(), s.domain())),
        mapped.alpha.as_ref().map(|(n, s)| (n.as_str(), s.domain())),
    ];
    for (name, domain) in named.into_iter().flatten() {
        if !columns.iter().any(|(n, _)| *n == name) {
            columns.push((name, domain));
        }
    }

    columns
        .into_iter()
        .map(|(name, domain)| {
            let entries = scale::breaks(domain, LEGEND_BREAKS)
                .into_iter()
                .filter(|v| *v >= domain.0 && *v <= domain.1)
                .map(|v| {
                    let color = match &mapped.color {
                        Some((n, s)) if n == name => s.scale(v),
                        _ => template.base_color(),
                    };
                    let size = match &mapped.size {
                        Some((n, s)) if n == name => s.scale(v),
                        _ => template.base_size(),
                    };
                    let alpha = match &mapped.alpha {
                        Some((n, s)) if n == name => s.scale(v),
                        _ => template.base_alpha(),
                    };
                    (scale::format_break(v), color.fade(alpha), size)
                })
                .collect();
            LegendSpec {
                title: name.to_string(),
                entries,
                shape: template.shape,
                stroke: template.stroke,
            }
        })
        .collect()
}

/// Stack legends in the right-hand strip, vertically centred on the panel.
fn place_legends(specs: Vec<LegendSpec>, plot: &BuiltGGPlot, panel: Rect, text: &TextMetrics) -> Vec<Legend> {
    let dpi = plot.dpi;
    let min_key = 17.28 * dpi / 72.0;
    let gap = text.label * 0.8;
    let x = plot.width as f32 - plot.theme.margin as f32 - plot.theme.legend_width as f32 + gap;

    let key_size = |size_mm: f32| (marker_size_px(size_mm, 0.0, dpi) * 0.75 + 4.0).max(min_key);
    let block_height: f32 = specs
        .iter()
        .map(|s| text.label * 1.5 + s.entries.iter().map(|e| key_size(e.2)).sum::<f32>() + gap)
        .sum();

    let mut y = (panel.center().y - block_height / 2.0).max(plot.theme.margin as f32);
    specs
        .into_iter()
        .map(|spec| {
            let title_at = Point::new(x, y + text.label);
            y += text.label * 1.5;
            let keys = spec
                .entries
                .into_iter()
                .map(|(label, color, size_mm)| {
                    let side = key_size(size_mm);
                    let key = Rect::new(x, y, side, side);
                    let marker = Marker {
                        center: key.center(),
                        size: marker_size_px(size_mm, spec.stroke, dpi),
                        stroke: stroke_to_px(spec.stroke, dpi),
                        shape: spec.shape,
                        color,
                    };
                    let label_at = Point::new(key.right() + 5.0, key.center().y + text.tick * 0.35);
                    y += side;
                    LegendKey { label, key, marker, label_at }
                })
                .collect();
            y += gap;
            Legend { title: spec.title, title_at, keys }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_marker_size_px() {
        // 1 mm is 72.27 / 25.4 points; at 96 dpi a point is 4/3 px.
        assert_relative_eq!(marker_size_px(1.0, 0.0, 96.0), 72.27 / 25.4 * 96.0 / 72.0, epsilon = 1e-4);
        assert_relative_eq!(marker_size_px(8.0, 0.0, 72.0), 8.0 * PT_PER_MM, epsilon = 1e-4);
        // The stroke adds half its width in .stroke units.
        let with_stroke = marker_size_px(1.5, 0.5, 72.0);
        assert_relative_eq!(with_stroke, 1.5 * PT_PER_MM + 0.25 * STROKE_PER_MM, epsilon = 1e-4);
    }

    #[test]
    fn test_stroke_to_px() {
        // ggplot's default 0.5 mm stroke is just under one pixel at 96 dpi.
        assert_relative_eq!(stroke_to_px(0.5, 96.0), 0.25 * STROKE_PER_MM, epsilon = 1e-5);
    }

    #[test]
    fn test_expand_range() {
        let (lo, hi) = expand_range((0.0, 10.0));
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);

        let (lo, hi) = expand_range((3.0, 3.0));
        assert_relative_eq!(lo, 2.5);
        assert_relative_eq!(hi, 3.5);
    }

    #[test]
    fn test_axis_breaks_and_minor() {
        let (major, minor) = axis_breaks((0.0, 10.0), expand_range((0.0, 10.0)));
        assert_eq!(major, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(minor, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    }
}
