//! Primitive rendering functions for plot decoration.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are lit per step along the major axis, weighted by the
/// fractional distance from the ideal line.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
    let (mut a, mut b) = if steep {
        (Point::new(from.y, from.x), Point::new(to.y, to.x))
    } else {
        (from, to)
    };
    if a.x > b.x {
        std::mem::swap(&mut a, &mut b);
    }

    let dx = b.x - a.x;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (b.y - a.y) / dx };

    // Swap back to screen axes for steep lines.
    let mut plot = |major: i32, minor: i32, intensity: f32| {
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        fb.blend_coverage(x, y, color, intensity);
    };

    let mut endpoint = |p: Point, gap: f32| -> (i32, f32) {
        let xend = p.x.round();
        let yend = p.y + gradient * (xend - p.x);
        let ipart = yend.floor() as i32;
        plot(xend as i32, ipart, rfpart(yend) * gap);
        plot(xend as i32, ipart + 1, fpart(yend) * gap);
        (xend as i32, yend)
    };

    let (start, y_start) = endpoint(a, rfpart(a.x + 0.5));
    let (end, _) = endpoint(b, fpart(b.x + 0.5));

    let mut intery = y_start + gradient;
    for major in (start + 1)..end {
        let ipart = intery.floor() as i32;
        plot(major, ipart, rfpart(intery));
        plot(major, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Draw an axis-aligned line `width` pixels thick, blended, with
/// anti-aliased edges across its thickness.
pub fn draw_straight_line(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    let half = width.max(0.0) / 2.0;
    let rect = if (from.y - to.y).abs() < f32::EPSILON {
        Rect::new(from.x.min(to.x), from.y - half, (to.x - from.x).abs(), width)
    } else if (from.x - to.x).abs() < f32::EPSILON {
        Rect::new(from.x - half, from.y.min(to.y), width, (to.y - from.y).abs())
    } else {
        draw_line_aa(fb, from, to, color);
        return;
    };
    blend_rect(fb, rect, color);
}

/// Fraction of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// One minus the fraction.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle, overwriting pixels.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let (x, width) = clip_span(x, width);
    let (y, height) = clip_span(y, height);
    fb.fill_rect(x, y, width, height, color);
}

/// Shift a span starting left of zero so it starts at zero.
fn clip_span(start: i32, len: u32) -> (u32, u32) {
    if start >= 0 {
        (start as u32, len)
    } else {
        (0, len.saturating_sub(start.unsigned_abs()))
    }
}

/// Blend a rectangle with fractional edges.
pub fn blend_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let x0 = rect.x.floor().max(0.0) as i32;
    let y0 = rect.y.floor().max(0.0) as i32;
    let x1 = rect.right().ceil().min(fb.width() as f32) as i32;
    let y1 = rect.bottom().ceil().min(fb.height() as f32) as i32;

    // Overlap of [lo, hi] with the unit pixel starting at `p`.
    let overlap = |p: i32, lo: f32, hi: f32| (hi.min(p as f32 + 1.0) - lo.max(p as f32)).clamp(0.0, 1.0);

    for py in y0..y1 {
        let cy = overlap(py, rect.y, rect.bottom());
        for px in x0..x1 {
            let coverage = cy * overlap(px, rect.x, rect.right());
            fb.blend_coverage(px, py, color, coverage);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
