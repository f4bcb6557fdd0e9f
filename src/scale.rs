//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color, size,
//! alpha). Defaults mirror ggplot2's continuous scales.

use crate::color::Rgba;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Map `value` from `domain` onto 0.0-1.0 (clamped).
///
/// A zero-width domain maps everything to the midpoint.
#[must_use]
pub fn rescale(value: f32, domain: (f32, f32)) -> f32 {
    let span = domain.1 - domain.0;
    if span.abs() < f32::EPSILON {
        return 0.5;
    }
    ((value - domain.0) / span).clamp(0.0, 1.0)
}

/// Extent of the finite values in `data`, or `None` when there are none.
#[must_use]
pub fn finite_extent(data: &[f32]) -> Option<(f32, f32)> {
    data.iter().copied().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Size scale that maps values to marker *area*, like `scale_size()`.
///
/// The output is a size in millimetres: `range.0 + (range.1 - range.0) * sqrt(t)`.
#[derive(Debug, Clone, Copy)]
pub struct SizeScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl SizeScale {
    /// ggplot2's default size range, in millimetres.
    pub const DEFAULT_RANGE: (f32, f32) = (1.0, 6.0);

    /// Create an area scale over `domain`.
    #[must_use]
    pub fn area(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }
}

impl Scale<f32, f32> for SizeScale {
    fn scale(&self, value: f32) -> f32 {
        let t = rescale(value, (self.domain_min, self.domain_max));
        self.range_min + (self.range_max - self.range_min) * t.sqrt()
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Linear opacity scale, like `scale_alpha()`.
#[derive(Debug, Clone, Copy)]
pub struct AlphaScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl AlphaScale {
    /// ggplot2's default alpha range.
    pub const DEFAULT_RANGE: (f32, f32) = (0.1, 1.0);

    /// Create an opacity scale over `domain`.
    #[must_use]
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0.clamp(0.0, 1.0),
            range_max: range.1.clamp(0.0, 1.0),
        }
    }
}

impl Scale<f32, f32> for AlphaScale {
    fn scale(&self, value: f32) -> f32 {
        let t = rescale(value, (self.domain_min, self.domain_max));
        self.range_min + (self.range_max - self.range_min) * t
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// ggplot2's default continuous gradient (`#132B43` to `#56B1F7`).
    #[must_use]
    pub fn gradient(domain: (f32, f32)) -> Self {
        Self {
            colors: vec![Rgba::rgb(0x13, 0x2B, 0x43), Rgba::rgb(0x56, 0xB1, 0xF7)],
            domain_min: domain.0,
            domain_max: domain.1,
        }
    }

    /// Viridis color scale (perceptually uniform).
    #[must_use]
    pub fn viridis(domain: (f32, f32)) -> Self {
        Self {
            colors: vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain_min: domain.0,
            domain_max: domain.1,
        }
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = rescale(value, (self.domain_min, self.domain_max));

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

/// Continuous color palette for a mapped color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// ggplot2's dark-to-light blue gradient.
    #[default]
    Gradient,
    /// Viridis.
    Viridis,
}

impl Palette {
    /// Color scale over `domain`.
    #[must_use]
    pub fn scale(self, domain: (f32, f32)) -> ColorScale {
        match self {
            Self::Gradient => ColorScale::gradient(domain),
            Self::Viridis => ColorScale::viridis(domain),
        }
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gradient" | "blues" => Ok(Self::Gradient),
            "viridis" => Ok(Self::Viridis),
            other => Err(Error::InvalidParameter {
                name: "palette",
                reason: format!("unknown palette `{other}` (expected gradient or viridis)"),
            }),
        }
    }
}

/// "Nice" break positions covering `(min, max)`, roughly `target` of them.
///
/// Steps are 1, 2, 2.5 or 5 times a power of ten. Only breaks inside the
/// extent are returned.
#[must_use]
pub fn breaks(extent: (f32, f32), target: usize) -> Vec<f32> {
    let (lo, hi) = if extent.0 <= extent.1 { extent } else { (extent.1, extent.0) };
    let span = hi - lo;
    if !span.is_finite() || span <= f32::EPSILON || target == 0 {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }

    let raw = span / target as f32;
    let exponent = raw.log10().floor() as i32;
    // Dividing by an exact power of ten keeps steps like 0.5 exact.
    let with_exponent = |m: f32| {
        if exponent >= 0 {
            m * 10f32.powi(exponent)
        } else {
            m / 10f32.powi(-exponent)
        }
    };
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(with_exponent)
        .find(|s| span / s <= target as f32 + 0.5)
        .unwrap_or_else(|| with_exponent(10.0));

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f32 * step;
            // Snap values like 1e-8 to zero.
            if v.abs() < step * 1e-6 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Shortest label for a break value (no trailing zeros).
#[must_use]
pub fn format_break(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(50.0), 0.5, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(100.0), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(10.0), 0.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(2.5), 75.0, epsilon = 1e-5);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_rescale_degenerate() {
        assert_relative_eq!(rescale(3.0, (3.0, 3.0)), 0.5, epsilon = 1e-5);
        assert_relative_eq!(rescale(-1.0, (0.0, 2.0)), 0.0, epsilon = 1e-5);
        assert_relative_eq!(rescale(3.0, (0.0, 2.0)), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_size_scale_is_area_proportional() {
        let scale = SizeScale::area((0.0, 100.0), SizeScale::DEFAULT_RANGE);
        assert_relative_eq!(scale.scale(0.0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(100.0), 6.0, epsilon = 1e-5);
        // A quarter of the way in data is half of the way in radius.
        assert_relative_eq!(scale.scale(25.0), 3.5, epsilon = 1e-5);
    }

    #[test]
    fn test_alpha_scale_linear() {
        let scale = AlphaScale::new((0.0, 10.0), AlphaScale::DEFAULT_RANGE);
        assert_relative_eq!(scale.scale(0.0), 0.1, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(10.0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(5.0), 0.55, epsilon = 1e-5);
    }

    #[test]
    fn test_gradient_endpoints() {
        let scale = ColorScale::gradient((0.0, 1.0));
        assert_eq!(scale.scale(0.0), Rgba::rgb(0x13, 0x2B, 0x43));
        assert_eq!(scale.scale(1.0), Rgba::rgb(0x56, 0xB1, 0xF7));
        assert_eq!(scale.scale(7.0), Rgba::rgb(0x56, 0xB1, 0xF7));
    }

    #[test]
    fn test_color_scale_single_color() {
        let scale = ColorScale::new(vec![Rgba::RED], (0.0, 1.0)).unwrap();
        assert_eq!(scale.scale(0.5), Rgba::RED);
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_palette_from_str() {
        assert_eq!("viridis".parse::<Palette>().unwrap(), Palette::Viridis);
        assert_eq!(Palette::default().scale((0.0, 1.0)).scale(0.0), Rgba::rgb(0x13, 0x2B, 0x43));
        assert!("rainbow".parse::<Palette>().is_err());
    }

    #[test]
    fn test_viridis_range() {
        let (start, end) = ColorScale::viridis((0.0, 1.0)).range();
        assert_eq!(start, Rgba::rgb(68, 1, 84));
        assert_eq!(end, Rgba::rgb(253, 231, 37));
    }

    #[test]
    fn test_breaks_nice_steps() {
        assert_eq!(breaks((0.0, 10.0), 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(breaks((-1.0, 1.0), 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        let b = breaks((-480.0, 510.0), 5);
        assert!(b.contains(&0.0));
        assert!(b.iter().all(|v| *v >= -480.0 && *v <= 510.0));
        assert!(b.len() >= 4 && b.len() <= 7);
    }

    #[test]
    fn test_breaks_degenerate() {
        assert_eq!(breaks((2.0, 2.0), 5), vec![2.0]);
        assert!(breaks((f32::NAN, f32::NAN), 5).is_empty());
    }

    #[test]
    fn test_format_break() {
        assert_eq!(format_break(2.0), "2");
        assert_eq!(format_break(0.5), "0.5");
        assert_eq!(format_break(-0.0), "0");
        assert_eq!(format_break(-250.0), "-250");
    }

    #[test]
    fn test_finite_extent() {
        assert_eq!(finite_extent(&[3.0, f32::INFINITY, -1.0]), Some((-1.0, 3.0)));
        assert_eq!(finite_extent(&[]), None);
    }
}
