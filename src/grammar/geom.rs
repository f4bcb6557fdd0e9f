//! Point geometry.
//!
//! Shapes follow ggplot's numeric point codes so a flower can be described
//! as `shape = 17` just like in R.

use super::aes::Aes;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Marker shapes, by ggplot point code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointShape {
    /// 0: open square.
    OpenSquare,
    /// 1: open circle.
    OpenCircle,
    /// 2: open triangle, point up.
    OpenTriangle,
    /// 3: plus sign.
    Plus,
    /// 4: diagonal cross.
    Cross,
    /// 5: open diamond.
    OpenDiamond,
    /// 8: asterisk (plus and cross overlaid).
    Asterisk,
    /// 15: filled square.
    Square,
    /// 16, 19 and 20: filled circle.
    #[default]
    Circle,
    /// 17: filled triangle.
    Triangle,
    /// 18: filled diamond.
    Diamond,
}

impl PointShape {
    /// Every supported shape, in code order.
    pub const ALL: [PointShape; 11] = [
        Self::OpenSquare,
        Self::OpenCircle,
        Self::OpenTriangle,
        Self::Plus,
        Self::Cross,
        Self::OpenDiamond,
        Self::Asterisk,
        Self::Square,
        Self::Circle,
        Self::Triangle,
        Self::Diamond,
    ];

    /// Shape for a ggplot point code.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for codes with no supported shape.
    pub fn from_code(code: u8) -> Result<Self> {
        Ok(match code {
            0 => Self::OpenSquare,
            1 => Self::OpenCircle,
            2 => Self::OpenTriangle,
            3 => Self::Plus,
            4 => Self::Cross,
            5 => Self::OpenDiamond,
            8 => Self::Asterisk,
            15 => Self::Square,
            16 | 19 | 20 => Self::Circle,
            17 => Self::Triangle,
            18 => Self::Diamond,
            other => return Err(Error::InvalidShape(format!("unsupported point code {other}"))),
        })
    }

    /// Canonical ggplot code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::OpenSquare => 0,
            Self::OpenCircle => 1,
            Self::OpenTriangle => 2,
            Self::Plus => 3,
            Self::Cross => 4,
            Self::OpenDiamond => 5,
            Self::Asterisk => 8,
            Self::Square => 15,
            Self::Circle => 19,
            Self::Triangle => 17,
            Self::Diamond => 18,
        }
    }

    /// Filled (solid) as opposed to outlined or stroked.
    #[must_use]
    pub fn is_filled(self) -> bool {
        matches!(self, Self::Square | Self::Circle | Self::Triangle | Self::Diamond)
    }

    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenSquare => "open-square",
            Self::OpenCircle => "open-circle",
            Self::OpenTriangle => "open-triangle",
            Self::Plus => "plus",
            Self::Cross => "cross",
            Self::OpenDiamond => "open-diamond",
            Self::Asterisk => "asterisk",
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
        }
    }
}

impl FromStr for PointShape {
    type Err = Error;

    /// Accepts a point code (`"17"`) or a name (`"triangle"`, `"open_circle"`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        let key = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| Error::InvalidShape(format!("unknown shape `{s}`")))
    }
}

impl fmt::Display for PointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default outline width in mm, as ggplot's `geom_point`.
pub const DEFAULT_STROKE: f32 = 0.5;

/// A point geometry layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Geom {
    /// Marker shape.
    pub shape: PointShape,
    /// Outline width in mm.
    pub stroke: f32,
    /// Layer-specific aesthetics.
    pub aes: Option<Aes>,
}

impl Geom {
    /// Create a point geometry.
    #[must_use]
    pub fn point() -> Self {
        Self {
            shape: PointShape::Circle,
            stroke: DEFAULT_STROKE,
            aes: None,
        }
    }

    /// Set the point shape.
    #[must_use]
    pub fn shape(mut self, shape: PointShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the point shape from a ggplot code.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for unsupported codes.
    pub fn shape_code(self, code: u8) -> Result<Self> {
        Ok(self.shape(PointShape::from_code(code)?))
    }

    /// Set the outline width in mm.
    #[must_use]
    pub fn stroke(mut self, stroke: f32) -> Self {
        self.stroke = stroke;
        self
    }

    /// Add layer-specific aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = Some(aes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geom_point_defaults() {
        let g = Geom::point();
        assert_eq!(g.shape, PointShape::Circle);
        assert!((g.stroke - 0.5).abs() < f32::EPSILON);
        assert!(g.aes.is_none());
    }

    #[test]
    fn test_shape_code_dandelion_and_sunflower() {
        assert_eq!(Geom::point().shape_code(8).unwrap().shape, PointShape::Asterisk);
        assert_eq!(Geom::point().shape_code(17).unwrap().shape, PointShape::Triangle);
        assert_eq!(Geom::point().shape_code(1).unwrap().shape, PointShape::OpenCircle);
    }

    #[test]
    fn test_filled_circle_aliases() {
        for code in [16, 19, 20] {
            assert_eq!(PointShape::from_code(code).unwrap(), PointShape::Circle);
        }
    }

    #[test]
    fn test_unsupported_code_rejected() {
        for code in [6, 7, 9, 14, 21, 25, 255] {
            assert!(matches!(PointShape::from_code(code), Err(Error::InvalidShape(_))));
        }
    }

    #[test]
    fn test_code_round_trips_through_from_code() {
        for shape in PointShape::ALL {
            assert_eq!(PointShape::from_code(shape.code()).unwrap(), shape);
        }
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("17".parse::<PointShape>().unwrap(), PointShape::Triangle);
        assert_eq!("Open-Circle".parse::<PointShape>().unwrap(), PointShape::OpenCircle);
        assert!("hexagon".parse::<PointShape>().is_err());
        assert!("7".parse::<PointShape>().is_err());
    }

    #[test]
    fn test_is_filled() {
        assert!(PointShape::Triangle.is_filled());
        assert!(!PointShape::OpenCircle.is_filled());
        assert!(!PointShape::Asterisk.is_filled());
    }

    #[test]
    fn test_geom_with_aes() {
        let g = Geom::point().aes(Aes::new().size("t")).stroke(1.0);
        assert_eq!(g.aes.and_then(|a| a.size).as_deref(), Some("t"));
        assert!((g.stroke - 1.0).abs() < f32::EPSILON);
    }
}
