//! Terminal preview encoder.
//!
//! Renders a framebuffer as text so a flower can be inspected without
//! leaving the shell. Each character cell averages the block of pixels it
//! covers, so small markers still register at low resolutions.
//!
//! - ASCII: grayscale ramp ` .:-=+*#%@`
//! - Half-block: `▀` with 24-bit foreground and background colors
//! - True color: one colored space per cell

use crate::error::Error;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::str::FromStr;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters.
    Ascii,
    /// Unicode half blocks, two pixel rows per line.
    #[default]
    HalfBlock,
    /// ANSI 24-bit background color per cell.
    TrueColor,
}

impl FromStr for TerminalMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "half-block" | "halfblock" | "unicode" => Ok(Self::HalfBlock),
            "truecolor" | "true-color" | "ansi" => Ok(Self::TrueColor),
            other => Err(Error::InvalidParameter {
                name: "preview",
                reason: format!("unknown terminal mode '{other}' (expected ascii, half-block or truecolor)"),
            }),
        }
    }
}

/// Terminal encoder configuration.
#[derive(Debug, Clone, Default)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
}

impl TerminalEncoder {
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
    const DEFAULT_WIDTH: u32 = 80;

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Target width in characters. Height follows from the image aspect.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.max(1));
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::HalfBlock => self.render_half_block(fb),
            TerminalMode::TrueColor => self.render_true_color(fb),
        }
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let grid = self.grid(fb, 2.0);
        let mut output = String::with_capacity((grid.cols + 1) as usize * grid.rows as usize);

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let (r, g, b) = self.average(fb, &grid, col, row);
                let luma = (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) / 255.0;
                let last = Self::ASCII_RAMP.len() - 1;
                let idx = ((luma * last as f32).round() as usize).min(last);
                output.push(Self::ASCII_RAMP[idx]);
            }
            output.push('\n');
        }
        output
    }

    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let mut grid = self.grid(fb, 1.0);
        // Two sample rows per printed line.
        grid.rows = (grid.rows + 1) & !1;
        grid.cell_h = fb.height() as f32 / grid.rows as f32;

        let mut output = String::with_capacity((grid.cols * 40 + 8) as usize * (grid.rows / 2) as usize);
        for row in (0..grid.rows).step_by(2) {
            for col in 0..grid.cols {
                let top = self.average(fb, &grid, col, row);
                let bottom = self.average(fb, &grid, col, row + 1);
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.0, top.1, top.2, bottom.0, bottom.1, bottom.2
                );
            }
            output.push_str("\x1b[0m\n");
        }
        output
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let grid = self.grid(fb, 2.0);
        let mut output = String::with_capacity((grid.cols * 20 + 8) as usize * grid.rows as usize);

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let (r, g, b) = self.average(fb, &grid, col, row);
                let _ = write!(output, "\x1b[48;2;{r};{g};{b}m ");
            }
            output.push_str("\x1b[0m\n");
        }
        output
    }

    /// Cell grid preserving aspect ratio. `char_aspect` is cell height
    /// over cell width in pixels.
    fn grid(&self, fb: &Framebuffer, char_aspect: f32) -> CellGrid {
        let cols = self.width.unwrap_or(Self::DEFAULT_WIDTH).min(fb.width()).max(1);
        let aspect = fb.height() as f32 / fb.width() as f32;
        let rows = ((cols as f32 * aspect / char_aspect).round() as u32).clamp(1, fb.height());
        CellGrid {
            cols,
            rows,
            cell_w: fb.width() as f32 / cols as f32,
            cell_h: fb.height() as f32 / rows as f32,
        }
    }

    /// Mean color of the pixels under a cell.
    fn average(&self, fb: &Framebuffer, grid: &CellGrid, col: u32, row: u32) -> (u8, u8, u8) {
        let x0 = (col as f32 * grid.cell_w) as u32;
        let y0 = (row as f32 * grid.cell_h) as u32;
        let x1 = (((col + 1) as f32 * grid.cell_w).ceil() as u32).clamp(x0 + 1, fb.width());
        let y1 = (((row + 1) as f32 * grid.cell_h).ceil() as u32).clamp(y0 + 1, fb.height());

        let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(p) = fb.get_pixel(x, y) {
                    r += u32::from(p.r);
                    g += u32::from(p.g);
                    b += u32::from(p.b);
                    n += 1;
                }
            }
        }
        if n == 0 {
            return (0, 0, 0);
        }
        let mean = |sum: u32| ((sum + n / 2) / n) as u8;
        (mean(r), mean(g), mean(b))
    }
}

#[derive(Debug, Clone, Copy)]
struct CellGrid {
    cols: u32,
    rows: u32,
    cell_w: f32,
    cell_h: f32,
}
