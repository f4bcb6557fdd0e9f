//! Golden-angle point sequences.
//!
//! Point `k` of a spiral sits at angle `t_k = (start + k) * angle + rotation`
//! with unit direction `(sin t, cos t)`. Spacing successive points by the
//! golden angle packs them the way sunflower seeds are packed; the radial
//! mode decides how far from the centre each point lands.
//!
//! # References
//!
//! - Vogel, H. (1979). "A better way to construct the sunflower head."
//!   *Mathematical Biosciences*, 44(3-4), 179-189.

use crate::error::{Error, Result};
use crate::grammar::DataFrame;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// The golden angle, π(3 − √5) radians (about 137.508°).
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653_3;

/// How a point's distance from the centre grows along the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialMode {
    /// Every point on the unit circle.
    Unit,
    /// Radius equals the angle `t`, an Archimedean spread.
    #[default]
    Linear,
    /// Radius is `sqrt(index)`: Vogel's model, an evenly filled disc.
    Sqrt,
}

impl RadialMode {
    fn radius(self, index: usize, t: f64) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Linear => t,
            Self::Sqrt => (index as f64).sqrt(),
        }
    }
}

impl FromStr for RadialMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unit" | "circle" => Ok(Self::Unit),
            "linear" | "t" => Ok(Self::Linear),
            "sqrt" | "vogel" => Ok(Self::Sqrt),
            other => Err(Error::InvalidParameter {
                name: "radial",
                reason: format!("unknown radial mode `{other}` (expected unit, linear or sqrt)"),
            }),
        }
    }
}

impl fmt::Display for RadialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unit => "unit",
            Self::Linear => "linear",
            Self::Sqrt => "sqrt",
        })
    }
}

/// One generated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralPoint {
    /// Sequence index (`start + k`).
    pub index: usize,
    /// Angle in radians.
    pub t: f64,
    /// `sin(t)`.
    pub x: f64,
    /// `cos(t)`.
    pub y: f64,
    /// Distance from the centre.
    pub radius: f64,
    /// `radius * x`.
    pub px: f64,
    /// `radius * y`.
    pub py: f64,
}

/// Builder for an angle-progression point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    points: usize,
    angle: f64,
    start: usize,
    radial: RadialMode,
    rotation: f64,
}

impl Default for Spiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Spiral {
    /// 500 golden-angle points starting at index 1, linear radius.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: 500,
            angle: GOLDEN_ANGLE,
            start: 1,
            radial: RadialMode::Linear,
            rotation: 0.0,
        }
    }

    /// `points` golden-angle points with the default layout.
    #[must_use]
    pub fn golden(points: usize) -> Self {
        Self::new().points(points)
    }

    /// Number of points.
    #[must_use]
    pub fn points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Angular step in radians.
    #[must_use]
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Angular step in degrees.
    #[must_use]
    pub fn angle_degrees(self, degrees: f64) -> Self {
        self.angle(degrees.to_radians())
    }

    /// Index of the first point.
    #[must_use]
    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Radial growth mode.
    #[must_use]
    pub fn radial(mut self, radial: RadialMode) -> Self {
        self.radial = radial;
        self
    }

    /// Offset added to every angle, in radians.
    #[must_use]
    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Configured angular step in radians.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.angle
    }

    fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(Error::EmptyData);
        }
        if !self.angle.is_finite() {
            return Err(Error::InvalidParameter {
                name: "angle",
                reason: format!("must be finite, got {}", self.angle),
            });
        }
        if !self.rotation.is_finite() {
            return Err(Error::InvalidParameter {
                name: "rotation",
                reason: format!("must be finite, got {}", self.rotation),
            });
        }
        if self.start.checked_add(self.points - 1).is_none() {
            return Err(Error::InvalidParameter {
                name: "start",
                reason: format!("{} + {} points overflows the index", self.start, self.points),
            });
        }
        Ok(())
    }

    /// Generate the points in sequence order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyData`] for zero points, [`Error::InvalidParameter`] for
    /// a non-finite angle or rotation, or a start index too large for the
    /// point count.
    pub fn generate(&self) -> Result<Vec<SpiralPoint>> {
        self.validate()?;

        let points: Vec<SpiralPoint> = (0..self.points)
            .map(|k| {
                let index = self.start + k;
                let t = index as f64 * self.angle + self.rotation;
                let radius = self.radial.radius(index, t);
                point(index, t, radius)
            })
            .collect();

        tracing::debug!(
            points = self.points,
            angle = self.angle,
            radial = %self.radial,
            "generated spiral"
        );
        Ok(points)
    }

    /// Generate the points as a data frame with columns
    /// `i, t, x, y, r, px, py`.
    ///
    /// # Errors
    ///
    /// Same as [`Spiral::generate`].
    pub fn to_frame(&self) -> Result<DataFrame> {
        Ok(points_to_frame(&self.generate()?))
    }
}

fn point(index: usize, t: f64, radius: f64) -> SpiralPoint {
    let (x, y) = t.sin_cos();
    SpiralPoint { index, t, x, y, radius, px: radius * x, py: radius * y }
}

/// `points` angles evenly spaced over `[0, 2π]`, endpoints included, on the
/// unit circle.
///
/// # Errors
///
/// [`Error::EmptyData`] for zero points.
pub fn circle(points: usize) -> Result<DataFrame> {
    if points == 0 {
        return Err(Error::EmptyData);
    }

    let step = if points > 1 { TAU / (points - 1) as f64 } else { 0.0 };
    let pts: Vec<SpiralPoint> = (0..points).map(|k| point(k, k as f64 * step, 1.0)).collect();
    Ok(points_to_frame(&pts))
}

fn points_to_frame(points: &[SpiralPoint]) -> DataFrame {
    let column = |f: fn(&SpiralPoint) -> f64| -> Vec<f32> {
        points.iter().map(|p| f(p) as f32).collect()
    };

    let mut df = DataFrame::new();
    df.add_column_f32("i", &column(|p| p.index as f64));
    df.add_column_f32("t", &column(|p| p.t));
    df.add_column_f32("x", &column(|p| p.x));
    df.add_column_f32("y", &column(|p| p.y));
    df.add_column_f32("r", &column(|p| p.radius));
    df.add_column_f32("px", &column(|p| p.px));
    df.add_column_f32("py", &column(|p| p.py));
    df
}

/// Smallest angular gap (radians, in `[0, π]`) between two directions.
#[must_use]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_golden_angle_constant() {
        assert_relative_eq!(GOLDEN_ANGLE, PI * (3.0 - 5f64.sqrt()), epsilon = 1e-15);
        assert_relative_eq!(GOLDEN_ANGLE.to_degrees(), 137.507_764, epsilon = 1e-5);
    }

    #[test]
    fn test_default_sequence_starts_at_one() {
        let pts = Spiral::golden(3).generate().unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0].index, 1);
        assert_relative_eq!(pts[0].t, GOLDEN_ANGLE);
        assert_relative_eq!(pts[2].t, 3.0 * GOLDEN_ANGLE);
    }

    #[test]
    fn test_linear_radius_scales_by_t() {
        let p = Spiral::golden(10).generate().unwrap()[9];
        assert_relative_eq!(p.radius, p.t);
        assert_relative_eq!(p.px, p.t * p.t.sin());
        assert_relative_eq!(p.py, p.t * p.t.cos());
    }

    #[test]
    fn test_unit_mode_stays_on_circle() {
        for p in Spiral::golden(50).radial(RadialMode::Unit).generate().unwrap() {
            assert_relative_eq!(p.px.hypot(p.py), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sqrt_mode_fills_disc() {
        let pts = Spiral::golden(100).start(0).radial(RadialMode::Sqrt).generate().unwrap();
        assert_relative_eq!(pts[0].radius, 0.0);
        assert_relative_eq!(pts[99].radius, 99f64.sqrt());
    }

    #[test]
    fn test_custom_angle_and_rotation() {
        let pts = Spiral::new().points(2).angle(2.0).rotation(0.5).generate().unwrap();
        assert_relative_eq!(pts[0].t, 2.5);
        assert_relative_eq!(pts[1].t, 4.5);

        let deg = Spiral::new().angle_degrees(13.0);
        assert_relative_eq!(deg.step(), 13.0 * PI / 180.0);
    }

    #[test]
    fn test_zero_points_is_empty_data() {
        assert!(matches!(Spiral::golden(0).generate(), Err(Error::EmptyData)));
        assert!(matches!(circle(0), Err(Error::EmptyData)));
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let err = Spiral::new().angle(f64::NAN).generate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "angle", .. }));
        let err = Spiral::new().rotation(f64::INFINITY).generate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "rotation", .. }));
    }

    #[test]
    fn test_circle_endpoints_included() {
        let df = circle(50).unwrap();
        let t = df.get_f32("t").unwrap();
        assert_eq!(t.len(), 50);
        assert_relative_eq!(t[0], 0.0);
        assert_relative_eq!(t[49], std::f32::consts::TAU, epsilon = 1e-5);

        let single = circle(1).unwrap();
        assert_eq!(single.get_f32("t").unwrap(), vec![0.0]);
    }

    #[test]
    fn test_frame_columns_in_order() {
        let df = Spiral::golden(5).to_frame().unwrap();
        assert_eq!(df.columns(), vec!["i", "t", "x", "y", "r", "px", "py"]);
        assert_eq!(df.nrow(), 5);
    }

    #[test]
    fn test_radial_mode_parse_and_display() {
        assert_eq!("SQRT".parse::<RadialMode>().unwrap(), RadialMode::Sqrt);
        assert_eq!("unit".parse::<RadialMode>().unwrap().to_string(), "unit");
        assert!("spiral".parse::<RadialMode>().is_err());
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert_relative_eq!(angular_distance(0.1, TAU - 0.1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(angular_distance(0.0, PI), PI);
    }

    #[test]
    fn test_golden_neighbours_wider_than_second_neighbours() {
        let points = Spiral::golden(300).generate().unwrap();
        for w in points.windows(3) {
            let near = angular_distance(w[0].t, w[1].t);
            let far = angular_distance(w[0].t, w[2].t);
            assert!(near > far, "{} vs {} at {}", near, far, w[0].index);
        }
    }

    #[test]
    fn test_start_overflow_rejected() {
        let err = Spiral::golden(2).start(usize::MAX).generate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "start", .. }));

        // The last index may sit exactly at the limit.
        let pts = Spiral::golden(1).start(usize::MAX).generate().unwrap();
        assert_eq!(pts[0].index, usize::MAX);
    }
}
