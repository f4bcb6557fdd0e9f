//! Point glyph geometry and its anti-aliased rasterizer.
//!
//! Glyph proportions follow R's graphics engine: everything is laid out
//! relative to `RADIUS = 0.375 * size`, with the square, triangle and diamond
//! scaled to match the circle's area.
//!
//! Rasterization evaluates a signed distance per pixel centre and converts it
//! to coverage. A marker touches each pixel once, so overlapping strokes of
//! an asterisk are not blended twice.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::grammar::{Marker, PointShape};

/// Radius factor applied to the nominal size.
const RADIUS_FACTOR: f32 = 0.375;
/// Half-side of a square over the radius, `sqrt(pi / 4)`.
const SQRC: f32 = 0.886_226_9;
/// Half-diagonal of a diamond over the radius, `sqrt(pi / 4) * sqrt(2)`.
const DMDC: f32 = 1.253_314_1;
/// Circumradius of a triangle over the radius, `sqrt(4 pi / (3 sqrt 3))`.
const TRC0: f32 = 1.555_120_3;
/// Thinnest outline drawn, in pixels.
const MIN_LINE_WIDTH: f32 = 1.0;

/// A glyph in coordinates relative to the marker centre (y grows down).
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    /// Filled circle.
    Disc {
        /// Radius in pixels.
        radius: f32,
    },
    /// Circle outline centred on `radius`.
    Ring {
        /// Radius in pixels.
        radius: f32,
        /// Line width in pixels.
        width: f32,
    },
    /// Convex polygon, filled or outlined.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
        /// Fill instead of outline.
        filled: bool,
        /// Outline width in pixels (ignored when filled).
        width: f32,
    },
    /// Line segments with round ends.
    Segments {
        /// (start, end) pairs.
        segments: Vec<(Point, Point)>,
        /// Line width in pixels.
        width: f32,
    },
}

impl Glyph {
    /// Glyph for a shape of nominal `size` and outline `stroke`, in pixels.
    #[must_use]
    pub fn new(shape: PointShape, size: f32, stroke: f32) -> Self {
        let r = RADIUS_FACTOR * size;
        let width = stroke.max(MIN_LINE_WIDTH);

        let square = |half: f32| {
            vec![
                Point::new(-half, -half),
                Point::new(half, -half),
                Point::new(half, half),
                Point::new(-half, half),
            ]
        };
        let triangle = || {
            let rt = TRC0 * r;
            let xc = rt * 3f32.sqrt() / 2.0;
            vec![Point::new(0.0, -rt), Point::new(xc, rt / 2.0), Point::new(-xc, rt / 2.0)]
        };
        let diamond = |half: f32| {
            vec![
                Point::new(0.0, -half),
                Point::new(half, 0.0),
                Point::new(0.0, half),
                Point::new(-half, 0.0),
            ]
        };
        let plus = |arm: f32| {
            vec![
                (Point::new(-arm, 0.0), Point::new(arm, 0.0)),
                (Point::new(0.0, -arm), Point::new(0.0, arm)),
            ]
        };
        let cross = |arm: f32| {
            vec![
                (Point::new(-arm, -arm), Point::new(arm, arm)),
                (Point::new(-arm, arm), Point::new(arm, -arm)),
            ]
        };

        match shape {
            PointShape::OpenSquare => Self::Polygon { points: square(r * SQRC), filled: false, width },
            PointShape::OpenCircle => Self::Ring { radius: r, width },
            PointShape::OpenTriangle => Self::Polygon { points: triangle(), filled: false, width },
            PointShape::Plus => Self::Segments { segments: plus(r * std::f32::consts::SQRT_2), width },
            PointShape::Cross => Self::Segments { segments: cross(r), width },
            PointShape::OpenDiamond => Self::Polygon { points: diamond(r * DMDC), filled: false, width },
            PointShape::Asterisk => {
                let mut segments = cross(r);
                segments.extend(plus(r * std::f32::consts::SQRT_2));
                Self::Segments { segments, width }
            }
            PointShape::Square => Self::Polygon { points: square(r * SQRC), filled: true, width },
            // Code 19 carries a border of the stroke width.
            PointShape::Circle => Self::Disc { radius: r + stroke / 2.0 },
            PointShape::Triangle => Self::Polygon { points: triangle(), filled: true, width },
            PointShape::Diamond => Self::Polygon { points: diamond(r), filled: true, width },
        }
    }

    /// Furthest distance from the centre any covered pixel can be.
    #[must_use]
    pub fn reach(&self) -> f32 {
        let far = |p: &Point| p.distance(Point::ORIGIN);
        match self {
            Self::Disc { radius } => *radius,
            Self::Ring { radius, width } => radius + width / 2.0,
            Self::Polygon { points, width, .. } => points.iter().map(far).fold(0.0, f32::max) + width / 2.0,
            Self::Segments { segments, width } => {
                segments.iter().map(|(a, b)| far(a).max(far(b))).fold(0.0, f32::max) + width / 2.0
            }
        }
    }

    /// Signed distance from `p` to the glyph edge, negative inside.
    #[must_use]
    pub fn distance(&self, p: Point) -> f32 {
        match self {
            Self::Disc { radius } => p.distance(Point::ORIGIN) - radius,
            Self::Ring { radius, width } => (p.distance(Point::ORIGIN) - radius).abs() - width / 2.0,
            Self::Polygon { points, filled: true, .. } => polygon_distance(points, p),
            Self::Polygon { points, filled: false, width } => {
                edges(points).map(|(a, b)| segment_distance(p, a, b)).fold(f32::INFINITY, f32::min)
                    - width / 2.0
            }
            Self::Segments { segments, width } => {
                segments.iter().map(|&(a, b)| segment_distance(p, a, b)).fold(f32::INFINITY, f32::min)
                    - width / 2.0
            }
        }
    }

    /// Fraction of the pixel centred on `p` the glyph covers.
    #[must_use]
    pub fn coverage(&self, p: Point) -> f32 {
        (0.5 - self.distance(p)).clamp(0.0, 1.0)
    }
}

fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points.iter().copied().zip(points.iter().copied().cycle().skip(1))
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 { (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0) } else { 0.0 };
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

/// Signed distance to a convex polygon containing the origin: the largest
/// distance past any edge line. Exact inside and along edges.
fn polygon_distance(points: &[Point], p: Point) -> f32 {
    edges(points)
        .filter_map(|(a, b)| {
            let (ex, ey) = (b.x - a.x, b.y - a.y);
            let len = ex.hypot(ey);
            if len == 0.0 {
                return None;
            }
            let (mut nx, mut ny) = (ey / len, -ex / len);
            // Point the normal away from the centre.
            if nx * a.x + ny * a.y < 0.0 {
                nx = -nx;
                ny = -ny;
            }
            Some((p.x - a.x) * nx + (p.y - a.y) * ny)
        })
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Rasterize `marker` into `fb`, touching only pixels inside `clip`.
pub fn draw_marker(fb: &mut Framebuffer, marker: &Marker, clip: Rect) {
    if marker.color.a == 0 || marker.size <= 0.0 {
        return;
    }
    let glyph = Glyph::new(marker.shape, marker.size, marker.stroke);
    draw_glyph(fb, &glyph, marker.center, marker.color, clip);
}

/// Rasterize a glyph centred on `center`.
pub fn draw_glyph(fb: &mut Framebuffer, glyph: &Glyph, center: Point, color: Rgba, clip: Rect) {
    let reach = glyph.reach() + 1.0;
    let x0 = (center.x - reach).max(clip.x).max(0.0).floor() as i32;
    let y0 = (center.y - reach).max(clip.y).max(0.0).floor() as i32;
    let x1 = (center.x + reach).min(clip.right()).min(fb.width() as f32).ceil() as i32;
    let y1 = (center.y + reach).min(clip.bottom()).min(fb.height() as f32).ceil() as i32;

    for py in y0..y1 {
        for px in x0..x1 {
            let local = Point::new(px as f32 + 0.5 - center.x, py as f32 + 0.5 - center.y);
            let coverage = glyph.coverage(local);
            if coverage > 0.0 {
                fb.blend_coverage(px, py, color, coverage);
            }
        }
    }
}
