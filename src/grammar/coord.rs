//! Coordinate systems.
//!
//! Both variants are Cartesian. `Fixed` additionally locks the ratio between
//! one y data unit and one x data unit on screen, so a golden-angle flower
//! stays round whatever the image size.

/// Coordinate system type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// Cartesian coordinates.
    Cartesian {
        /// X axis limits.
        xlim: Option<(f32, f32)>,
        /// Y axis limits.
        ylim: Option<(f32, f32)>,
    },
    /// Cartesian coordinates with a fixed aspect ratio.
    Fixed {
        /// Screen length of one y unit divided by that of one x unit.
        ratio: f32,
        /// X axis limits.
        xlim: Option<(f32, f32)>,
        /// Y axis limits.
        ylim: Option<(f32, f32)>,
    },
}

impl Default for Coord {
    fn default() -> Self {
        Coord::cartesian()
    }
}

impl Coord {
    /// Create a Cartesian coordinate system.
    #[must_use]
    pub fn cartesian() -> Self {
        Coord::Cartesian { xlim: None, ylim: None }
    }

    /// Create a fixed aspect ratio coordinate system.
    #[must_use]
    pub fn fixed(ratio: f32) -> Self {
        Coord::Fixed { ratio, xlim: None, ylim: None }
    }

    /// Fixed aspect ratio of 1.
    #[must_use]
    pub fn equal() -> Self {
        Coord::fixed(1.0)
    }

    /// Set x-axis limits.
    #[must_use]
    pub fn xlim(mut self, min: f32, max: f32) -> Self {
        match &mut self {
            Coord::Cartesian { xlim, .. } | Coord::Fixed { xlim, .. } => *xlim = Some((min, max)),
        }
        self
    }

    /// Set y-axis limits.
    #[must_use]
    pub fn ylim(mut self, min: f32, max: f32) -> Self {
        match &mut self {
            Coord::Cartesian { ylim, .. } | Coord::Fixed { ylim, .. } => *ylim = Some((min, max)),
        }
        self
    }

    /// User-set (x, y) limits.
    #[must_use]
    pub fn limits(&self) -> (Option<(f32, f32)>, Option<(f32, f32)>) {
        match *self {
            Coord::Cartesian { xlim, ylim } | Coord::Fixed { xlim, ylim, .. } => (xlim, ylim),
        }
    }

    /// Locked y/x unit ratio, if any.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        match *self {
            Coord::Cartesian { .. } => None,
            Coord::Fixed { ratio, .. } => Some(ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_cartesian() {
        let c = Coord::cartesian().xlim(0.0, 10.0).ylim(-5.0, 5.0);
        assert_eq!(c.limits(), (Some((0.0, 10.0)), Some((-5.0, 5.0))));
        assert_eq!(c.aspect_ratio(), None);
    }

    #[test]
    fn test_coord_fixed_keeps_limits() {
        let c = Coord::fixed(1.5).xlim(-1.0, 1.0);
        assert_eq!(c.aspect_ratio(), Some(1.5));
        assert_eq!(c.limits(), (Some((-1.0, 1.0)), None));
    }

    #[test]
    fn test_coord_equal() {
        assert_eq!(Coord::equal(), Coord::fixed(1.0));
    }

    #[test]
    fn test_coord_default() {
        assert_eq!(Coord::default(), Coord::Cartesian { xlim: None, ylim: None });
    }
}
