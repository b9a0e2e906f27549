//! Command-line arguments.

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::str::FromStr;

use ndblocks_core::config::DEFAULT_BLOCK_SIZE;
use ndblocks_core::prelude::*;

/// Builds a grid of colored blocks, paints parts of it, and prints it.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ndblocks", version, about, long_about = None)]
pub struct Args {
    /// Number of columns
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub width: usize,
    /// Number of rows
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub height: usize,
    /// Initial color, such as "teal" or "1 2 3"
    #[arg(long, value_name = "COLOR", default_value = "black", value_parser = Rgb::from_str)]
    pub fill: Rgb,
    /// Block size in pixels
    #[arg(long = "size", value_name = "N", default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,
    /// Do not draw lines between blocks; also applies to loaded grids
    #[arg(long)]
    pub no_lines: bool,

    /// Load a grid saved in the text format instead of building one
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,
    /// Paint a selection, such as "1:3, -1=red"
    #[arg(long = "paint", value_name = "SEL=COLOR", value_parser = parse_paint)]
    pub paints: Vec<(Selection, Rgb)>,
    /// Set a grid attribute, such as "block_size=10"
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_set)]
    pub sets: Vec<(String, AttrValue)>,

    /// Output format: html or text
    #[arg(long, default_value = "html", value_parser = Format::from_str)]
    pub format: Format,
    /// Write to FILE instead of standard output
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Log more; repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns the options for building a new grid.
    pub fn config(&self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            fill: self.fill,
            block_size: self.block_size,
            lines_on: !self.no_lines,
        }
    }

    /// Returns whether any option that only applies to a new grid differs
    /// from its default.
    pub fn has_new_grid_options(&self) -> bool {
        let config = GridConfig {
            lines_on: true,
            ..self.config()
        };
        config != GridConfig::default()
    }

    /// Returns the most verbose level to log at.
    pub fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Warn,
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

fn parse_paint(s: &str) -> Result<(Selection, Rgb)> {
    let (sel, color) = split_assignment(s)?;
    let sel = sel
        .parse::<Selection>()
        .with_context(|| format!("Bad selection in {:?}", s))?;
    let color = color
        .parse::<Rgb>()
        .with_context(|| format!("Bad color in {:?}", s))?;
    Ok((sel, color))
}

fn parse_set(s: &str) -> Result<(String, AttrValue)> {
    let (name, value) = split_assignment(s)?;
    Ok((name.trim().to_owned(), AttrValue::parse_loose(value.trim())))
}

/// Splits `"lhs=rhs"` at the first `=`.
fn split_assignment(s: &str) -> Result<(&str, &str)> {
    s.find('=')
        .map(|i| (&s[..i], &s[i + 1..]))
        .ok_or_else(|| anyhow!("Expected NAME=VALUE; got {:?}", s))
}
