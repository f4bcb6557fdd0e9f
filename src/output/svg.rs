//! SVG output encoder.
//!
//! Supports vector output built from elements, and raster output that
//! embeds a framebuffer as a base64 PNG. Colors are written as hex with a
//! separate `*-opacity` attribute, which every SVG 1.1 viewer understands.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Fill and stroke of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    /// Fill color, `None` for no fill.
    pub fill: Option<Rgba>,
    /// Stroke color, `None` for no stroke.
    pub stroke: Option<Rgba>,
    /// Stroke width in pixels.
    pub stroke_width: f32,
}

impl Paint {
    /// Solid fill, no stroke.
    #[must_use]
    pub fn fill(color: Rgba) -> Self {
        Self { fill: Some(color), stroke: None, stroke_width: 0.0 }
    }

    /// Stroke only.
    #[must_use]
    pub fn stroke(color: Rgba, width: f32) -> Self {
        Self { fill: None, stroke: Some(color), stroke_width: width }
    }
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centred on the position.
    Middle,
    /// Text ends at the position.
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// An SVG element.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    /// Rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
        /// Paint.
        paint: Paint,
    },
    /// Circle.
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        r: f32,
        /// Paint.
        paint: Paint,
    },
    /// Straight line.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Color.
        stroke: Rgba,
        /// Width.
        width: f32,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices.
        points: Vec<Point>,
        /// Paint.
        paint: Paint,
    },
    /// Path data with round line caps.
    Path {
        /// SVG path data.
        d: String,
        /// Paint.
        paint: Paint,
    },
    /// Text, optionally rotated about its anchor.
    Text {
        /// Anchor position (baseline).
        at: Point,
        /// Content, escaped on render.
        text: String,
        /// Font size in pixels.
        size: f32,
        /// Color.
        fill: Rgba,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Rotation in degrees.
        rotate: f32,
    },
    /// Embedded raster image (data URI).
    Image {
        /// Bounds.
        rect: Rect,
        /// `data:` URI.
        data: String,
    },
    /// Group of elements, optionally clipped.
    Group {
        /// Id of a clip path registered with [`SvgEncoder::clip_path`].
        clip: Option<String>,
        /// Children.
        children: Vec<SvgElement>,
    },
}

/// SVG encoder for framebuffer and vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent).
    background: Option<Rgba>,
    clips: Vec<(String, Rect)>,
    elements: Vec<SvgElement>,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            clips: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Create from a framebuffer (embeds as raster image).
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        let png_bytes = super::PngEncoder::to_bytes(fb)?;
        let data = format!("data:image/png;base64,{}", STANDARD.encode(&png_bytes));

        let mut encoder = Self::new(fb.width(), fb.height()).background(None);
        encoder.elements.push(SvgElement::Image {
            rect: Rect::new(0.0, 0.0, fb.width() as f32, fb.height() as f32),
            data,
        });
        Ok(encoder)
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Register a rectangular clip path under `id`.
    #[must_use]
    pub fn clip_path(mut self, id: &str, rect: Rect) -> Self {
        self.clips.push((id.to_string(), rect));
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(self, rect: Rect, paint: Paint) -> Self {
        self.element(SvgElement::Rect { rect, paint })
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(self, center: Point, r: f32, paint: Paint) -> Self {
        self.element(SvgElement::Circle { center, r, paint })
    }

    /// Add a line.
    #[must_use]
    pub fn line(self, from: Point, to: Point, stroke: Rgba, width: f32) -> Self {
        self.element(SvgElement::Line { from, to, stroke, width })
    }

    /// Add a closed polygon.
    #[must_use]
    pub fn polygon(self, points: &[Point], paint: Paint) -> Self {
        self.element(SvgElement::Polygon { points: points.to_vec(), paint })
    }

    /// Add an SVG path.
    #[must_use]
    pub fn path(self, d: &str, paint: Paint) -> Self {
        self.element(SvgElement::Path { d: d.to_string(), paint })
    }

    /// Add text.
    #[must_use]
    pub fn text(self, at: Point, text: &str, size: f32, fill: Rgba, anchor: TextAnchor) -> Self {
        self.text_rotated(at, text, size, fill, anchor, 0.0)
    }

    /// Add text rotated by `degrees` about its anchor.
    #[must_use]
    pub fn text_rotated(
        self,
        at: Point,
        text: &str,
        size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        degrees: f32,
    ) -> Self {
        self.element(SvgElement::Text { at, text: text.to_string(), size, fill, anchor, rotate: degrees })
    }

    /// Add a group of elements, clipped to a registered clip path.
    #[must_use]
    pub fn group(self, clip: Option<&str>, children: Vec<SvgElement>) -> Self {
        self.element(SvgElement::Group { clip: clip.map(str::to_string), children })
    }

    /// Add a raw element.
    #[must_use]
    pub fn element(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Number of top-level elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when nothing but the background would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if !self.clips.is_empty() {
            svg.push_str("  <defs>\n");
            for (id, r) in &self.clips {
                let _ = writeln!(
                    svg,
                    r#"    <clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    escape(id),
                    num(r.x),
                    num(r.y),
                    num(r.width),
                    num(r.height)
                );
            }
            svg.push_str("  </defs>\n");
        }

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%"{}/>"#, color_attr("fill", bg));
        }

        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        tracing::info!(path = %path.display(), width = self.width, height = self.height, "wrote svg");
        Ok(())
    }
}

/// Shortest decimal for a coordinate, at most two places.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// ` name="#rrggbb"` plus ` name-opacity` when translucent.
fn color_attr(name: &str, color: Rgba) -> String {
    let hex = Rgba::rgb(color.r, color.g, color.b).to_hex();
    if color.a == 255 {
        format!(r#" {name}="{hex}""#)
    } else {
        format!(r#" {name}="{hex}" {name}-opacity="{:.3}""#, f32::from(color.a) / 255.0)
    }
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = match paint.fill {
        Some(fill) => color_attr("fill", fill),
        None => r#" fill="none""#.to_string(),
    };
    if let Some(stroke) = paint.stroke {
        attrs.push_str(&color_attr("stroke", stroke));
        let _ = write!(attrs, r#" stroke-width="{}""#, num(paint.stroke_width));
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_element(svg: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = match element {
        SvgElement::Rect { rect, paint } => writeln!(
            svg,
            r#"{indent}<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            paint_attrs(paint)
        ),
        SvgElement::Circle { center, r, paint } => writeln!(
            svg,
            r#"{indent}<circle cx="{}" cy="{}" r="{}"{}/>"#,
            num(center.x),
            num(center.y),
            num(*r),
            paint_attrs(paint)
        ),
        SvgElement::Line { from, to, stroke, width } => writeln!(
            svg,
            r#"{indent}<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}"/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            color_attr("stroke", *stroke),
            num(*width)
        ),
        SvgElement::Polygon { points, paint } => {
            let pts: Vec<String> = points.iter().map(|p| format!("{},{}", num(p.x), num(p.y))).collect();
            writeln!(svg, r#"{indent}<polygon points="{}"{}/>"#, pts.join(" "), paint_attrs(paint))
        }
        SvgElement::Path { d, paint } => writeln!(
            svg,
            r#"{indent}<path d="{}"{} stroke-linecap="round"/>"#,
            escape(d),
            paint_attrs(paint)
        ),
        SvgElement::Text { at, text, size, fill, anchor, rotate } => {
            let transform = if rotate.abs() > f32::EPSILON {
                format!(r#" transform="rotate({} {} {})""#, num(*rotate), num(at.x), num(at.y))
            } else {
                String::new()
            };
            writeln!(
                svg,
                r#"{indent}<text x="{}" y="{}" font-size="{}"{} text-anchor="{}" font-family="sans-serif"{transform}>{}</text>"#,
                num(at.x),
                num(at.y),
                num(*size),
                color_attr("fill", *fill),
                anchor.as_str(),
                escape(text)
            )
        }
        SvgElement::Image { rect, data } => writeln!(
            svg,
            r#"{indent}<image x="{}" y="{}" width="{}" height="{}" xlink:href="{data}"/>"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height)
        ),
        SvgElement::Group { clip, children } => {
            match clip {
                Some(id) => {
                    let _ = writeln!(svg, r#"{indent}<g clip-path="url(#{})">"#, escape(id));
                }
                None => {
                    let _ = writeln!(svg, "{indent}<g>");
                }
            }
            for child in children {
                write_element(svg, child, depth + 1);
            }
            writeln!(svg, "{indent}</g>")
        }
    };
}
