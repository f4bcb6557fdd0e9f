//! phyllo: render golden-angle flowers from the command line.
//!
//! ```text
//! phyllo --preset sunflower -o sunflower.png
//! phyllo --points 2000 --angle-degrees 13 --shape 1 --format terminal
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use phyllo_viz::config::{FlowerConfig, ShapeValue};
use phyllo_viz::framebuffer::Framebuffer;
use phyllo_viz::output::{PngEncoder, SvgEncoder, TerminalEncoder, TerminalMode};
use phyllo_viz::phyllotaxis::RadialMode;
use phyllo_viz::presets::Preset;
use phyllo_viz::scale::Palette;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Raster PNG
    Png,
    /// Vector SVG with text
    Svg,
    /// PNG embedded in an SVG document
    SvgRaster,
    /// Preview on stdout
    Terminal,
}

/// phyllo: golden-angle flowers rendered as ggplot-style scatter plots
#[derive(Parser, Debug)]
#[command(name = "phyllo")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render phyllotaxis flowers to PNG, SVG or the terminal", long_about = None)]
struct Cli {
    /// Start from a walkthrough preset
    #[arg(short, long)]
    preset: Option<String>,

    /// Flower description file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of points
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Angle step in radians
    #[arg(long, conflicts_with = "angle_degrees")]
    angle: Option<f64>,

    /// Angle step in degrees
    #[arg(long)]
    angle_degrees: Option<f64>,

    /// Radius growth: unit, linear or sqrt
    #[arg(long)]
    radial: Option<String>,

    /// Marker color (R name or hex)
    #[arg(long)]
    color: Option<String>,

    /// Marker size in mm
    #[arg(long)]
    size: Option<f32>,

    /// Marker opacity, 0-1
    #[arg(long)]
    alpha: Option<f32>,

    /// Marker shape (R code or name)
    #[arg(long)]
    shape: Option<String>,

    /// Map marker size to a column (i, t, r, x, y)
    #[arg(long)]
    size_by: Option<String>,

    /// Map marker color to a column
    #[arg(long)]
    color_by: Option<String>,

    /// Palette for --color-by: gradient or viridis
    #[arg(long)]
    palette: Option<String>,

    /// Theme: grey, minimal, bw, classic, dark, void
    #[arg(long)]
    theme: Option<String>,

    /// Remove grid, axes and labels
    #[arg(long)]
    blank: bool,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Output format (defaults to the output file's extension, else png)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Terminal preview mode: ascii, half-block or truecolor
    #[arg(long, default_value = "half-block")]
    preview: String,

    /// Terminal preview width in characters
    #[arg(long, default_value = "80")]
    columns: u32,

    /// Output file
    #[arg(short, long, default_value = "flower.png")]
    output: PathBuf,

    /// Print the resolved flower description as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// List presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phyllo").join("flower.yaml")).filter(|p| p.exists())
}

/// Preset, then file, then flags.
fn resolve_config(cli: &Cli) -> Result<FlowerConfig> {
    let mut config = match &cli.preset {
        Some(name) => name.parse::<Preset>()?.config(),
        None => FlowerConfig::default(),
    };

    if let Some(path) = cli.config.clone().or_else(default_config_path) {
        config = FlowerConfig::load_over(&config, &path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    let pattern = &mut config.pattern;
    if let Some(points) = cli.points {
        pattern.points = points;
    }
    if let Some(angle) = cli.angle {
        pattern.angle = Some(angle);
    }
    if let Some(degrees) = cli.angle_degrees {
        pattern.angle = None;
        pattern.angle_degrees = Some(degrees);
    }
    if let Some(radial) = &cli.radial {
        pattern.radial = radial.parse::<RadialMode>()?;
    }

    let style = &mut config.style;
    if let Some(color) = &cli.color {
        style.color = Some(color.clone());
    }
    if let Some(size) = cli.size {
        style.size = Some(size);
    }
    if let Some(alpha) = cli.alpha {
        style.alpha = Some(alpha);
    }
    if let Some(shape) = &cli.shape {
        style.shape = Some(ShapeValue::Name(shape.clone()));
    }
    if let Some(column) = &cli.size_by {
        style.size_by = Some(column.clone());
    }
    if let Some(column) = &cli.color_by {
        style.color_by = Some(column.clone());
    }
    if let Some(palette) = &cli.palette {
        style.palette = palette.parse::<Palette>()?;
    }

    if let Some(theme) = &cli.theme {
        config.theme.base = theme.clone();
    }
    if cli.blank {
        config.theme.blank = true;
    }
    if let Some(width) = cli.width {
        config.output.width = width;
    }
    if let Some(height) = cli.height {
        config.output.height = height;
    }
    Ok(config)
}

fn format_for(cli: &Cli) -> Result<Format> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    match cli.output.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") | None => Ok(Format::Png),
        Some("svg") => Ok(Format::Svg),
        Some(other) => bail!("cannot infer an output format from `.{other}`; pass --format"),
    }
}

fn list_presets() {
    for preset in Preset::all() {
        println!("{:<10} {}", preset.name(), preset.description());
    }
}

fn render(cli: &Cli, config: &FlowerConfig, format: Format, output: &Path) -> Result<()> {
    let plot = config.to_plot()?.build().context("invalid flower")?;

    match format {
        Format::Png => {
            let fb = plot.to_framebuffer()?;
            PngEncoder::write_to_file(&fb, output).with_context(|| format!("failed to write {}", output.display()))?;
        }
        Format::Svg => {
            plot.to_svg()?.write_to_file(output).with_context(|| format!("failed to write {}", output.display()))?;
        }
        Format::SvgRaster => {
            let fb = plot.to_framebuffer()?;
            SvgEncoder::from_framebuffer(&fb)?
                .write_to_file(output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Format::Terminal => {
            let mode = cli.preview.parse::<TerminalMode>()?;
            let fb = plot.to_framebuffer()?;
            print!("{}", TerminalEncoder::new().mode(mode).width(cli.columns).render(&fb));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.list_presets {
        list_presets();
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    if cli.dump_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let format = format_for(&cli)?;
    tracing::debug!(?format, points = config.pattern.points, backend = ?Framebuffer::backend(), "rendering flower");
    render(&cli, &config, format, &cli.output)
}
