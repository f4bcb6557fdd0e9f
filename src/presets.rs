//! Named flowers, from a plain circle to the finished print.
//!
//! Each preset is a stage of the same walkthrough: lay points on a circle,
//! switch to the golden angle, strip the chart decoration, then restyle the
//! markers until the spiral reads as a flower.

use crate::config::{FlowerConfig, Layout, ShapeValue};
use crate::error::{Error, Result};
use crate::grammar::GGPlot;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// A walkthrough stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 50 points evenly around the unit circle.
    Circle,
    /// 500 golden-angle points on the default grey theme.
    Golden,
    /// The golden spiral with all decoration removed.
    Minimal,
    /// Large translucent dark green markers.
    Makeup,
    /// Size follows the angle, black asterisks.
    Dandelion,
    /// Yellow triangles on dark magenta.
    Sunflower,
    /// The sunflower style with an angle step of 2 radians.
    Angle2,
    /// 2000 huge open circles at a 13° step.
    Final,
}

impl Preset {
    /// Every preset in walkthrough order.
    #[must_use]
    pub const fn all() -> [Preset; 8] {
        [
            Preset::Circle,
            Preset::Golden,
            Preset::Minimal,
            Preset::Makeup,
            Preset::Dandelion,
            Preset::Sunflower,
            Preset::Angle2,
            Preset::Final,
        ]
    }

    /// Name as accepted by `from_str`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Preset::Circle => "circle",
            Preset::Golden => "golden",
            Preset::Minimal => "minimal",
            Preset::Makeup => "makeup",
            Preset::Dandelion => "dandelion",
            Preset::Sunflower => "sunflower",
            Preset::Angle2 => "angle2",
            Preset::Final => "final",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Preset::Circle => "50 points evenly spaced on a circle",
            Preset::Golden => "500 points spaced by the golden angle",
            Preset::Minimal => "golden spiral without axes, grid or background",
            Preset::Makeup => "size 8, alpha 0.5, dark green",
            Preset::Dandelion => "size mapped to the angle, black asterisks",
            Preset::Sunflower => "yellow triangles on dark magenta",
            Preset::Angle2 => "1000 points at a 2 radian step, sunflower style",
            Preset::Final => "2000 open circles at 13 degrees, magenta4 on white",
        }
    }

    /// The flower description for this stage.
    #[must_use]
    pub fn config(self) -> FlowerConfig {
        let mut config = FlowerConfig::default();
        match self {
            Preset::Circle => {
                config.pattern.layout = Layout::Circle;
                config.pattern.points = 50;
            }
            Preset::Golden => {}
            Preset::Minimal => strip(&mut config),
            Preset::Makeup => {
                strip(&mut config);
                config.style.size = Some(8.0);
                config.style.alpha = Some(0.5);
                config.style.color = Some("darkgreen".into());
            }
            Preset::Dandelion => {
                strip(&mut config);
                config.style.size_by = Some("t".into());
                config.style.alpha = Some(0.5);
                config.style.color = Some("black".into());
                config.style.shape = Some(ShapeValue::Code(8));
                config.theme.legend = false;
            }
            Preset::Sunflower => sunflower(&mut config),
            Preset::Angle2 => {
                sunflower(&mut config);
                config.pattern.points = 1000;
                config.pattern.angle = Some(2.0);
            }
            Preset::Final => {
                strip(&mut config);
                config.pattern.points = 2000;
                config.pattern.angle = Some(13.0 * PI / 180.0);
                config.style.size = Some(80.0);
                config.style.alpha = Some(0.1);
                config.style.shape = Some(ShapeValue::Code(1));
                config.style.color = Some("magenta4".into());
                config.theme.legend = false;
            }
        }
        config
    }

    /// Plot builder for this stage.
    ///
    /// # Errors
    ///
    /// Only if the preset's own description is invalid.
    pub fn plot(self) -> Result<GGPlot> {
        self.config().to_plot()
    }
}

/// Blank theme on a white panel.
fn strip(config: &mut FlowerConfig) {
    config.theme.blank = true;
    config.theme.panel_background = Some("white".into());
}

fn sunflower(config: &mut FlowerConfig) {
    strip(config);
    config.style.size_by = Some("t".into());
    config.style.alpha = Some(0.5);
    config.style.color = Some("yellow".into());
    config.style.shape = Some(ShapeValue::Code(17));
    config.theme.panel_background = Some("darkmagenta".into());
    config.theme.legend = false;
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Preset::all()
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::grammar::PointShape;
    use crate::phyllotaxis::GOLDEN_ANGLE;

    #[test]
    fn test_preset_names_roundtrip() {
        for preset in Preset::all() {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
            assert!(!preset.description().is_empty());
        }
        assert_eq!("Angle-2".parse::<Preset>().unwrap(), Preset::Angle2);
        assert!(matches!("tulip".parse::<Preset>(), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn test_every_preset_builds() {
        for preset in Preset::all() {
            let plot = preset.plot().unwrap().dimensions(120, 120).build().unwrap();
            let scene = plot.scene().unwrap();
            assert_eq!(scene.markers.len(), preset.config().pattern.points, "{preset}");
        }
    }

    #[test]
    fn test_golden_keeps_decoration() {
        let config = Preset::Golden.config();
        assert_eq!(config.pattern.step(), GOLDEN_ANGLE);
        let theme = config.theme.theme().unwrap();
        assert!(theme.show_grid && theme.show_axis_text);
    }

    #[test]
    fn test_minimal_is_bare() {
        let theme = Preset::Minimal.config().theme.theme().unwrap();
        assert!(!theme.has_axis_decoration());
        assert_eq!(theme.panel_background, Rgba::WHITE);
    }

    #[test]
    fn test_sunflower_style() {
        let plot = Preset::Sunflower.plot().unwrap().dimensions(200, 200).build().unwrap();
        let scene = plot.scene().unwrap();
        assert!(scene.legends.is_empty());
        assert_eq!(scene.theme.panel_background, Rgba::rgb(0x8B, 0x00, 0x8B));
        assert!(scene.markers.iter().all(|m| m.shape == PointShape::Triangle));
        // Size grows with t.
        assert!(scene.markers.last().unwrap().size > scene.markers[0].size);
    }

    #[test]
    fn test_final_step() {
        let config = Preset::Final.config();
        assert!((config.pattern.step().to_degrees() - 13.0).abs() < 1e-9);
        assert_eq!(config.style.shape.unwrap().resolve().unwrap(), PointShape::OpenCircle);
    }
}
