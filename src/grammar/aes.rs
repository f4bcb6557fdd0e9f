//! Aesthetic mappings.
//!
//! An [`Aes`] maps data columns to marker properties, or pins a property to
//! a fixed value. Sizes are in millimetres, the way ggplot states them.

use crate::color::Rgba;

/// Aesthetic mapping specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aes {
    /// X position column.
    pub x: Option<String>,
    /// Y position column.
    pub y: Option<String>,
    /// Color column (continuous gradient).
    pub color: Option<String>,
    /// Size column (area scale).
    pub size: Option<String>,
    /// Alpha column (linear scale).
    pub alpha: Option<String>,

    /// Fixed color.
    pub color_value: Option<Rgba>,
    /// Fixed size in mm.
    pub size_value: Option<f32>,
    /// Fixed opacity. Checked against 0.0-1.0 when the plot is built.
    pub alpha_value: Option<f32>,
    /// Fixed outline width in mm for open shapes.
    pub stroke_value: Option<f32>,
}

impl Aes {
    /// Create a new aesthetic mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.y = Some(column.to_string());
        self
    }

    /// Map color to a column.
    #[must_use]
    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    /// Map size to a column.
    #[must_use]
    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    /// Map alpha/opacity to a column.
    #[must_use]
    pub fn alpha(mut self, column: &str) -> Self {
        self.alpha = Some(column.to_string());
        self
    }

    /// Set a fixed color value.
    #[must_use]
    pub fn color_value(mut self, color: Rgba) -> Self {
        self.color_value = Some(color);
        self
    }

    /// Set a fixed size in mm.
    #[must_use]
    pub fn size_value(mut self, size: f32) -> Self {
        self.size_value = Some(size);
        self
    }

    /// Set a fixed alpha value.
    #[must_use]
    pub fn alpha_value(mut self, alpha: f32) -> Self {
        self.alpha_value = Some(alpha);
        self
    }

    /// Set a fixed stroke width in mm.
    #[must_use]
    pub fn stroke_value(mut self, stroke: f32) -> Self {
        self.stroke_value = Some(stroke);
        self
    }

    /// Merge another Aes, with other taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        Aes {
            x: other.x.clone().or_else(|| self.x.clone()),
            y: other.y.clone().or_else(|| self.y.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            alpha: other.alpha.clone().or_else(|| self.alpha.clone()),
            color_value: other.color_value.or(self.color_value),
            size_value: other.size_value.or(self.size_value),
            alpha_value: other.alpha_value.or(self.alpha_value),
            stroke_value: other.stroke_value.or(self.stroke_value),
        }
    }

    /// Every column name this mapping refers to.
    pub fn mapped_columns(&self) -> impl Iterator<Item = &str> {
        [&self.x, &self.y, &self.color, &self.size, &self.alpha]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_builder() {
        let aes = Aes::new().x("px").y("py").color("t").size_value(5.0);

        assert_eq!(aes.x.as_deref(), Some("px"));
        assert_eq!(aes.y.as_deref(), Some("py"));
        assert_eq!(aes.color.as_deref(), Some("t"));
        assert_eq!(aes.size_value, Some(5.0));
    }

    #[test]
    fn test_aes_merge() {
        let base = Aes::new().x("x").y("y").color_value(Rgba::RED);
        let layer = Aes::new().y("y2").size_value(3.0).stroke_value(0.2);

        let merged = base.merge(&layer);
        assert_eq!(merged.x.as_deref(), Some("x"));
        assert_eq!(merged.y.as_deref(), Some("y2"));
        assert_eq!(merged.color_value, Some(Rgba::RED));
        assert_eq!(merged.size_value, Some(3.0));
        assert_eq!(merged.stroke_value, Some(0.2));
    }

    #[test]
    fn test_alpha_value_is_not_clamped() {
        // Out-of-range opacity is a build error, so keep it intact here.
        assert_eq!(Aes::new().alpha_value(1.5).alpha_value, Some(1.5));
        assert_eq!(Aes::new().alpha_value(-0.5).alpha_value, Some(-0.5));
    }

    #[test]
    fn test_mapped_columns() {
        let aes = Aes::new().x("px").y("py").size("t").color_value(Rgba::BLACK);
        let cols: Vec<&str> = aes.mapped_columns().collect();
        assert_eq!(cols, vec!["px", "py", "t"]);
        assert_eq!(Aes::default().mapped_columns().count(), 0);
    }
}
