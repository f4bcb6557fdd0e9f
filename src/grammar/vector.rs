//! SVG painter for a resolved [`Scene`].

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::output::{Paint, SvgElement, SvgEncoder, TextAnchor};
use crate::render::Glyph;
use crate::scale;

use super::scene::{Marker, Scene, TextMetrics};

const PANEL_CLIP: &str = "panel";

/// Vector elements for one marker, in absolute coordinates.
pub(crate) fn marker_element(marker: &Marker) -> SvgElement {
    let c = marker.center;
    let at = |p: &Point| Point::new(c.x + p.x, c.y + p.y);
    match Glyph::new(marker.shape, marker.size, marker.stroke) {
        Glyph::Disc { radius } => SvgElement::Circle { center: c, r: radius, paint: Paint::fill(marker.color) },
        Glyph::Ring { radius, width } => {
            SvgElement::Circle { center: c, r: radius, paint: Paint::stroke(marker.color, width) }
        }
        Glyph::Polygon { points, filled, width } => SvgElement::Polygon {
            points: points.iter().map(at).collect(),
            paint: if filled { Paint::fill(marker.color) } else { Paint::stroke(marker.color, width) },
        },
        Glyph::Segments { segments, width } => {
            let d = segments
                .iter()
                .map(|(a, b)| {
                    let (a, b) = (at(a), at(b));
                    format!("M {:.2} {:.2} L {:.2} {:.2}", a.x, a.y, b.x, b.y)
                })
                .collect::<Vec<_>>()
                .join(" ");
            SvgElement::Path { d, paint: Paint::stroke(marker.color, width) }
        }
    }
}

/// Paint a scene as SVG, text included.
pub(crate) fn paint(scene: &Scene) -> SvgEncoder {
    let theme = &scene.theme;
    let panel = scene.panel;
    let text = &scene.text;

    let mut svg = SvgEncoder::new(scene.width, scene.height)
        .background(Some(theme.background))
        .clip_path(PANEL_CLIP, panel)
        .rect(panel, Paint::fill(theme.panel_background));

    if theme.show_grid {
        if theme.show_minor_grid {
            svg = grid(svg, scene, &scene.x_minor, &scene.y_minor, theme.grid_width / 2.0, theme.minor_grid_color());
        }
        svg = grid(svg, scene, &scene.x_breaks, &scene.y_breaks, theme.grid_width, theme.grid_color);
    }

    svg = svg.group(Some(PANEL_CLIP), scene.markers.iter().map(marker_element).collect());

    if theme.show_axis {
        let bottom_left = Point::new(panel.x, panel.bottom());
        svg = svg
            .line(bottom_left, Point::new(panel.right(), panel.bottom()), theme.axis_color, theme.axis_width)
            .line(Point::new(panel.x, panel.y), bottom_left, theme.axis_color, theme.axis_width);
    }

    let tick_len = if theme.show_ticks { text.tick_length } else { 0.0 };
    if theme.show_ticks {
        for &b in &scene.x_breaks {
            let x = scene.x_px(b);
            svg = svg.line(Point::new(x, panel.bottom()), Point::new(x, panel.bottom() + tick_len), theme.axis_color, theme.axis_width);
        }
        for &b in &scene.y_breaks {
            let y = scene.y_px(b);
            svg = svg.line(Point::new(panel.x - tick_len, y), Point::new(panel.x, y), theme.axis_color, theme.axis_width);
        }
    }

    let mut widest = 0.0f32;
    if theme.show_axis_text {
        for &b in &scene.x_breaks {
            let at = Point::new(scene.x_px(b), panel.bottom() + tick_len + text.tick * 1.1);
            svg = svg.text(at, &scale::format_break(b), text.tick, theme.text_color, TextAnchor::Middle);
        }
        for &b in &scene.y_breaks {
            let label = scale::format_break(b);
            widest = widest.max(TextMetrics::text_width(&label, text.tick));
            let at = Point::new(panel.x - tick_len - text.tick * 0.3, scene.y_px(b) + text.tick * 0.35);
            svg = svg.text(at, &label, text.tick, theme.text_color, TextAnchor::End);
        }
    }

    if theme.show_axis_title {
        let axis_text = if theme.show_axis_text { text.tick * 1.4 } else { 0.0 };
        if let Some(title) = &scene.x_title {
            let at = Point::new(panel.center().x, panel.bottom() + tick_len + axis_text + text.label * 1.1);
            svg = svg.text(at, title, text.label, theme.text_color, TextAnchor::Middle);
        }
        if let Some(title) = &scene.y_title {
            let gap = if theme.show_axis_text { widest + text.tick * 0.4 } else { 0.0 };
            let at = Point::new(panel.x - tick_len - gap - text.label * 0.4, panel.center().y);
            svg = svg.text_rotated(at, title, text.label, theme.text_color, TextAnchor::Middle, -90.0);
        }
    }

    if let Some(title) = &scene.title {
        let at = Point::new(panel.x, theme.margin as f32 + text.title * 1.1);
        svg = svg.text(at, title, text.title, theme.text_color, TextAnchor::Start);
    }

    if theme.show_panel_border {
        let w = theme.axis_width;
        let inset = Rect::new(panel.x + w / 2.0, panel.y + w / 2.0, panel.width - w, panel.height - w);
        svg = svg.rect(inset, Paint::stroke(theme.border_color, w));
    }

    for legend in &scene.legends {
        svg = svg.text(legend.title_at, &legend.title, text.label, theme.text_color, TextAnchor::Start);
        for key in &legend.keys {
            svg = svg
                .rect(key.key, Paint::fill(theme.panel_background))
                .element(marker_element(&key.marker))
                .text(key.label_at, &key.label, text.tick, theme.text_color, TextAnchor::Start);
        }
    }

    svg
}

fn grid(mut svg: SvgEncoder, scene: &Scene, xs: &[f32], ys: &[f32], width: f32, color: Rgba) -> SvgEncoder {
    let panel = scene.panel;
    for &v in xs {
        let x = scene.x_px(v);
        svg = svg.line(Point::new(x, panel.y), Point::new(x, panel.bottom()), color, width);
    }
    for &v in ys {
        let y = scene.y_px(v);
        svg = svg.line(Point::new(panel.x, y), Point::new(panel.right(), y), color, width);
    }
    svg
}
