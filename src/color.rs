//! Color types, named colours and hex parsing.
//!
//! Colour names follow the R/X11 palette (`darkgreen`, `magenta4`, `grey40`),
//! since that is the vocabulary ggplot-style styling is usually written in.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Multiply the existing alpha by `opacity` (0.0-1.0).
    #[must_use]
    pub fn fade(self, opacity: f32) -> Self {
        let a = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(hex.to_string()))?;
        let invalid = || Error::InvalidColor(hex.to_string());
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        if !digits.is_ascii() {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let nibble = |i: usize| byte(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?)),
            8 => Ok(Self::new(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Look up an R/X11 colour name (case-insensitive, spaces ignored).
    ///
    /// `grey0`..`grey100` and `gray0`..`gray100` are computed.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if let Some(level) = key
            .strip_prefix("grey")
            .or_else(|| key.strip_prefix("gray"))
            .filter(|rest| !rest.is_empty())
        {
            let n: u32 = level.parse().ok().filter(|n| *n <= 100)?;
            let v = ((n * 255) as f32 / 100.0).round() as u8;
            return Some(Self::rgb(v, v, v));
        }

        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|&(_, rgb)| Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Relative luminance (ITU-R BT.709), 0.0-255.0.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// R/X11 colour table, `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x00_0000),
    ("white", 0xFF_FFFF),
    ("red", 0xFF_0000),
    ("red4", 0x8B_0000),
    ("darkred", 0x8B_0000),
    ("green", 0x00_FF00),
    ("green4", 0x00_8B00),
    ("darkgreen", 0x00_6400),
    ("forestgreen", 0x22_8B22),
    ("seagreen", 0x2E_8B57),
    ("olivedrab", 0x6B_8E23),
    ("blue", 0x00_00FF),
    ("blue4", 0x00_008B),
    ("darkblue", 0x00_008B),
    ("navy", 0x00_0080),
    ("steelblue", 0x46_82B4),
    ("skyblue", 0x87_CEEB),
    ("dodgerblue", 0x1E_90FF),
    ("cyan", 0x00_FFFF),
    ("darkcyan", 0x00_8B8B),
    ("turquoise", 0x40_E0D0),
    ("magenta", 0xFF_00FF),
    ("magenta4", 0x8B_008B),
    ("darkmagenta", 0x8B_008B),
    ("purple", 0xA0_20F0),
    ("orchid", 0xDA_70D6),
    ("violet", 0xEE_82EE),
    ("pink", 0xFF_C0CB),
    ("hotpink", 0xFF_69B4),
    ("deeppink", 0xFF_1493),
    ("yellow", 0xFF_FF00),
    ("yellow4", 0x8B_8B00),
    ("gold", 0xFF_D700),
    ("goldenrod", 0xDA_A520),
    ("orange", 0xFF_A500),
    ("darkorange", 0xFF_8C00),
    ("tomato", 0xFF_6347),
    ("coral", 0xFF_7F50),
    ("salmon", 0xFA_8072),
    ("brown", 0xA5_2A2A),
    ("chocolate", 0xD2_691E),
    ("tan", 0xD2_B48C),
    ("beige", 0xF5_F5DC),
    ("ivory", 0xFF_FFF0),
    ("khaki", 0xF0_E68C),
    ("lavender", 0xE6_E6FA),
    ("grey", 0xBE_BEBE),
    ("gray", 0xBE_BEBE),
    ("darkgrey", 0xA9_A9A9),
    ("darkgray", 0xA9_A9A9),
    ("lightgrey", 0xD3_D3D3),
    ("lightgray", 0xD3_D3D3),
    ("dimgrey", 0x69_6969),
    ("dimgray", 0x69_6969),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_boundaries() {
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 0.0), Rgba::BLACK);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 1.0), Rgba::WHITE);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, -0.5), Rgba::BLACK);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 1.5), Rgba::WHITE);
    }

    #[test]
    fn test_fade() {
        assert_eq!(Rgba::RED.fade(0.5).a, 128);
        assert_eq!(Rgba::RED.fade(1.0).a, 255);
        assert_eq!(Rgba::RED.fade(0.0).a, 0);
        assert_eq!(Rgba::RED.with_alpha(100).fade(0.5).a, 50);
    }

    #[test]
    fn test_walkthrough_colour_names() {
        assert_eq!(Rgba::from_name("darkgreen"), Some(Rgba::rgb(0, 100, 0)));
        assert_eq!(Rgba::from_name("magenta4"), Some(Rgba::rgb(139, 0, 139)));
        assert_eq!(Rgba::from_name("darkmagenta"), Some(Rgba::rgb(139, 0, 139)));
        assert_eq!(Rgba::from_name("yellow"), Some(Rgba::YELLOW));
        assert_eq!(Rgba::from_name("black"), Some(Rgba::BLACK));
    }

    #[test]
    fn test_name_lookup_is_case_and_space_insensitive() {
        assert_eq!(Rgba::from_name("Dark Green"), Rgba::from_name("darkgreen"));
        assert_eq!(Rgba::from_name("STEELBLUE"), Some(Rgba::rgb(70, 130, 180)));
    }

    #[test]
    fn test_grey_levels() {
        assert_eq!(Rgba::from_name("grey0"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_name("gray100"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_name("grey20"), Some(Rgba::rgb(51, 51, 51)));
        assert_eq!(Rgba::from_name("grey101"), None);
        assert_eq!(Rgba::from_name("greyish"), None);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#ff0000").unwrap(), Rgba::RED);
        assert_eq!(Rgba::from_hex("#0f0").unwrap(), Rgba::GREEN);
        assert_eq!(Rgba::from_hex("#00000080").unwrap(), Rgba::new(0, 0, 0, 128));
        assert!(Rgba::from_hex("ff0000").is_err());
        assert!(Rgba::from_hex("#ff00").is_err());
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn test_from_str_dispatch() {
        assert_eq!("#132B43".parse::<Rgba>().unwrap(), Rgba::rgb(0x13, 0x2B, 0x43));
        assert_eq!(" magenta4 ".parse::<Rgba>().unwrap(), Rgba::rgb(139, 0, 139));
        assert!(matches!("blurple".parse::<Rgba>(), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgba::rgb(0, 100, 0).to_string(), "#006400");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#01020304");
        let back: Rgba = Rgba::new(1, 2, 3, 4).to_hex().parse().unwrap();
        assert_eq!(back, Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_luminance() {
        assert!(Rgba::BLACK.luminance().abs() < f32::EPSILON);
        assert!((Rgba::WHITE.luminance() - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_rgba_default() {
        assert_eq!(Rgba::default(), Rgba::TRANSPARENT);
    }
}
