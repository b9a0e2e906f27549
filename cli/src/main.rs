//! Command-line front end: builds or loads a grid, paints it, and prints it as
//! HTML or text.

#![warn(rust_2018_idioms)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;

use ndblocks_core::prelude::*;

mod args;

use args::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    simple_logger::init_with_level(args.log_level()).context("Unable to initialize logger")?;
    info!("Starting ndblocks v{} ...", env!("CARGO_PKG_VERSION"));

    let grid = build_grid(&args)?;
    let output = export_grid_to_string(&grid, args.format);
    match &args.out {
        Some(path) => {
            info!("Writing {} output to {}", args.format, path.display());
            fs::write(path, output)
                .with_context(|| format!("Unable to write {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(output.as_bytes())?;
            if args.format == Format::Html {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn build_grid(args: &Args) -> Result<Grid> {
    let mut grid = match &args.load {
        Some(path) => {
            info!("Loading grid from {}", path.display());
            if args.has_new_grid_options() {
                warn!("Grid options are ignored when loading a grid");
            }
            let text = fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path.display()))?;
            let mut grid = Grid::from_text(&text)
                .with_context(|| format!("Unable to load grid from {}", path.display()))?;
            if args.no_lines {
                grid.set_lines_on(false);
            }
            grid
        }
        None => Grid::from_config(&args.config()).context("Invalid grid options")?,
    };
    debug!("Grid: {}x{}", grid.width(), grid.height());

    for (sel, color) in &args.paints {
        debug!("Painting [{}] {}", sel, color);
        grid.set(sel.clone(), *color)
            .with_context(|| format!("Unable to paint [{}]", sel))?;
    }
    for (name, value) in &args.sets {
        debug!("Setting {} = {}", name, value);
        grid.set_attr(name, value.clone())
            .with_context(|| format!("Unable to set {}", name))?;
    }
    Ok(grid)
}
