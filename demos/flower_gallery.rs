//! Render every walkthrough preset to PNG and SVG.
//!
//! Run: cargo run --example flower_gallery [out-dir]

use std::path::PathBuf;

use phyllo_viz::prelude::*;

fn main() -> Result<()> {
    let out = std::env::args().nth(1).map_or_else(|| PathBuf::from("gallery"), PathBuf::from);
    std::fs::create_dir_all(&out)?;

    for preset in Preset::all() {
        let plot = preset.plot()?.build()?;
        plot.save(out.join(format!("{preset}.png")))?;
        plot.save(out.join(format!("{preset}.svg")))?;
        println!("{:<10} {}", preset.name(), preset.description());
    }

    // The finished print, previewed in the terminal.
    let fb = Preset::Final.plot()?.dimensions(400, 400).build()?.to_framebuffer()?;
    print!("{}", TerminalEncoder::new().width(60).render(&fb));

    println!("wrote {} presets to {}", Preset::all().len(), out.display());
    Ok(())
}
