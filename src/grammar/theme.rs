//! Theme system.
//!
//! Controls the non-data appearance of a plot. Every decoration has its own
//! switch so a flower can be stripped down one element at a time.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Theme specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background color.
    pub background: Rgba,
    /// Panel background color.
    pub panel_background: Rgba,
    /// Major grid line color. Minor lines use a lighter blend of it.
    pub grid_color: Rgba,
    /// Axis line and tick color.
    pub axis_color: Rgba,
    /// Text color.
    pub text_color: Rgba,
    /// Panel border color.
    pub border_color: Rgba,
    /// Show grid lines.
    pub show_grid: bool,
    /// Show minor grid lines (only when the grid is shown).
    pub show_minor_grid: bool,
    /// Show axis lines.
    pub show_axis: bool,
    /// Show tick marks.
    pub show_ticks: bool,
    /// Show tick labels.
    pub show_axis_text: bool,
    /// Show axis titles.
    pub show_axis_title: bool,
    /// Show panel border.
    pub show_panel_border: bool,
    /// Show the legend for mapped aesthetics.
    pub show_legend: bool,
    /// Grid line width in pixels.
    pub grid_width: f32,
    /// Axis line width in pixels.
    pub axis_width: f32,
    /// Margin around the plot in pixels.
    pub margin: u32,
    /// Width reserved for the legend in pixels.
    pub legend_width: u32,
    /// Base font size in points.
    pub base_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Preset names accepted by [`Theme::from_name`].
    pub const NAMES: [&'static str; 6] = ["grey", "minimal", "bw", "classic", "dark", "void"];

    /// Grey theme (ggplot2 default): grey panel, white grid, ticks and no
    /// axis lines.
    #[must_use]
    pub fn grey() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::rgb(235, 235, 235),
            grid_color: Rgba::WHITE,
            axis_color: Rgba::rgb(51, 51, 51),
            text_color: Rgba::rgb(77, 77, 77),
            border_color: Rgba::rgb(51, 51, 51),
            show_grid: true,
            show_minor_grid: true,
            show_axis: false,
            show_ticks: true,
            show_axis_text: true,
            show_axis_title: true,
            show_panel_border: false,
            show_legend: true,
            grid_width: 1.0,
            axis_width: 1.0,
            margin: 40,
            legend_width: 90,
            base_size: 11.0,
        }
    }

    /// Minimal theme with white background and no ticks.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(235, 235, 235),
            show_ticks: false,
            ..Self::grey()
        }
    }

    /// Black and white theme.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(235, 235, 235),
            show_panel_border: true,
            ..Self::grey()
        }
    }

    /// Classic theme: axis lines, no grid.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            axis_color: Rgba::BLACK,
            show_grid: false,
            show_axis: true,
            ..Self::grey()
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 30),
            panel_background: Rgba::rgb(40, 40, 40),
            grid_color: Rgba::rgb(60, 60, 60),
            axis_color: Rgba::rgb(180, 180, 180),
            text_color: Rgba::rgb(220, 220, 220),
            border_color: Rgba::rgb(180, 180, 180),
            ..Self::grey()
        }
    }

    /// Void theme (nothing but data).
    #[must_use]
    pub fn void() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            margin: 10,
            ..Self::grey().blank()
        }
    }

    /// Theme preset by name.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "grey" | "gray" => Ok(Self::grey()),
            "minimal" => Ok(Self::minimal()),
            "bw" => Ok(Self::bw()),
            "classic" => Ok(Self::classic()),
            "dark" => Ok(Self::dark()),
            "void" => Ok(Self::void()),
            other => Err(Error::InvalidParameter {
                name: "theme",
                reason: format!("unknown theme `{other}` (expected one of {})", Self::NAMES.join(", ")),
            }),
        }
    }

    /// Strip grid, axis lines, ticks, tick labels and axis titles.
    #[must_use]
    pub fn blank(self) -> Self {
        self.grid(false).axis(false).ticks(false).axis_text(false).axis_title(false)
    }

    /// Set background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set panel background color.
    #[must_use]
    pub fn panel_background(mut self, color: Rgba) -> Self {
        self.panel_background = color;
        self
    }

    /// Set grid color.
    #[must_use]
    pub fn grid_color(mut self, color: Rgba) -> Self {
        self.grid_color = color;
        self
    }

    /// Set margin.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Enable or disable minor grid lines.
    #[must_use]
    pub fn minor_grid(mut self, show: bool) -> Self {
        self.show_minor_grid = show;
        self
    }

    /// Enable or disable axis lines.
    #[must_use]
    pub fn axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }

    /// Enable or disable tick marks.
    #[must_use]
    pub fn ticks(mut self, show: bool) -> Self {
        self.show_ticks = show;
        self
    }

    /// Enable or disable tick labels.
    #[must_use]
    pub fn axis_text(mut self, show: bool) -> Self {
        self.show_axis_text = show;
        self
    }

    /// Enable or disable axis titles.
    #[must_use]
    pub fn axis_title(mut self, show: bool) -> Self {
        self.show_axis_title = show;
        self
    }

    /// Enable or disable the panel border.
    #[must_use]
    pub fn panel_border(mut self, show: bool) -> Self {
        self.show_panel_border = show;
        self
    }

    /// Enable or disable the legend.
    #[must_use]
    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Set the base font size in points.
    #[must_use]
    pub fn base_size(mut self, size: f32) -> Self {
        self.base_size = size;
        self
    }

    /// Minor grid color: the major color halfway towards the panel.
    #[must_use]
    pub fn minor_grid_color(&self) -> Rgba {
        self.panel_background.lerp(self.grid_color, 0.5)
    }

    /// True if any axis decoration (lines, ticks, text or titles) is drawn.
    #[must_use]
    pub fn has_axis_decoration(&self) -> bool {
        self.show_axis || self.show_ticks || self.show_axis_text || self.show_axis_title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_grey_matches_ggplot_default() {
        let t = Theme::grey();
        assert!(t.show_grid);
        assert!(t.show_ticks);
        assert!(!t.show_axis);
        assert_eq!(t.panel_background, Rgba::rgb(235, 235, 235));
        assert_eq!(t.grid_color, Rgba::WHITE);
    }

    #[test]
    fn test_blank_strips_decoration() {
        let t = Theme::grey().blank();
        assert!(!t.show_grid);
        assert!(!t.has_axis_decoration());
        // Panel and legend survive.
        assert_eq!(t.panel_background, Rgba::rgb(235, 235, 235));
        assert!(t.show_legend);
    }

    #[test]
    fn test_theme_customization() {
        let t = Theme::minimal()
            .background(Rgba::rgb(250, 250, 250))
            .margin(50)
            .grid(false)
            .legend(false);

        assert_eq!(t.margin, 50);
        assert!(!t.show_grid);
        assert!(!t.show_legend);
        assert_eq!(t.background, Rgba::rgb(250, 250, 250));
    }

    #[test]
    fn test_theme_presets() {
        assert!(Theme::bw().show_panel_border);
        assert!(!Theme::classic().show_grid);
        assert!(Theme::classic().show_axis);
        assert!(!Theme::minimal().show_ticks);
        assert_eq!(Theme::dark().background.r, 30);

        let void = Theme::void();
        assert!(!void.show_grid);
        assert!(!void.has_axis_decoration());
        assert_eq!(void.margin, 10);
    }

    #[test]
    fn test_from_name() {
        for name in Theme::NAMES {
            assert!(Theme::from_name(name).is_ok(), "{name}");
        }
        assert_eq!(Theme::from_name("GRAY").unwrap(), Theme::grey());
        assert!(Theme::from_name("solarized").is_err());
    }

    #[test]
    fn test_minor_grid_color_between_panel_and_grid() {
        let c = Theme::grey().minor_grid_color();
        assert!(c.r > 235 && c.r < 255);
    }
}
