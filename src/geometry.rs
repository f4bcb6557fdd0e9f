//! Geometric primitives shared by layout and rendering.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` radians, measured like the flower
    /// patterns: x = r·sin(θ), y = r·cos(θ).
    #[must_use]
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(radius * sin, radius * cos)
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Largest rectangle of aspect `width / height == aspect` centred inside.
    #[must_use]
    pub fn fit_aspect(&self, aspect: f32) -> Self {
        if aspect <= 0.0 || !aspect.is_finite() || self.height <= 0.0 {
            return *self;
        }
        let (w, h) = if self.width / self.height > aspect {
            (self.height * aspect, self.height)
        } else {
            (self.width, self.width / aspect)
        };
        let c = self.center();
        Self::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_from_polar_orientation() {
        // Angle zero points "up" the y axis.
        let p = Point::from_polar(2.0, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);

        let q = Point::from_polar(1.0, std::f32::consts::FRAC_PI_2);
        assert!((q.x - 1.0).abs() < 1e-6);
        assert!(q.y.abs() < 1e-6);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_fit_aspect_square_in_wide() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0).fit_aspect(1.0);
        assert!((r.width - 100.0).abs() < 1e-4);
        assert!((r.height - 100.0).abs() < 1e-4);
        assert!((r.x - 50.0).abs() < 1e-4);
        assert!(r.y.abs() < 1e-4);
    }

    #[test]
    fn test_fit_aspect_ignores_bad_ratio() {
        let r = Rect::new(1.0, 2.0, 30.0, 40.0);
        assert_eq!(r.fit_aspect(0.0), r);
        assert_eq!(r.fit_aspect(f32::NAN), r);
    }
}
