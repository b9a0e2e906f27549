//! Plain text format for grids.
//!
//! ```text
//! # width height
//! 2 1
//! # block size
//! 20
//! # initial color
//! 0 0 0
//! # row column red green blue
//! 0 0 1 2 3
//! 0 1 4 5 6
//! ```
//!
//! Rows and columns are positions within the grid being written, so the text
//! of a sub-grid describes a grid of its own. Blocks that are not listed keep
//! the initial color when loading.

use log::warn;
use std::convert::TryFrom;
use std::io;

use super::{parse_ints, DataLines, LINE_SEP};
use crate::color::Rgb;
use crate::errors::{BlocksError, BlocksResult};
use crate::grid::Grid;

impl Grid {
    /// Writes the grid in the plain text format.
    pub fn write_text(&self, w: &mut impl io::Write) -> io::Result<()> {
        write!(w, "# width height{}", LINE_SEP)?;
        write!(w, "{} {}{}", self.width(), self.height(), LINE_SEP)?;
        write!(w, "# block size{}", LINE_SEP)?;
        write!(w, "{}{}", self.block_size(), LINE_SEP)?;
        write!(w, "# initial color{}", LINE_SEP)?;
        let (r, g, b) = self.fill().to_tuple();
        write!(w, "{} {} {}{}", r, g, b, LINE_SEP)?;
        write!(w, "# row column red green blue{}", LINE_SEP)?;
        for (pos, block) in self.blocks().iter_enumerated() {
            let (r, g, b) = block.rgb().to_tuple();
            write!(
                w,
                "{} {} {} {} {}{}",
                pos[0], pos[1], r, g, b, LINE_SEP,
            )?;
        }
        Ok(())
    }
    /// Returns the grid in the plain text format.
    pub fn to_text(&self) -> String {
        let mut buf = vec![];
        self.write_text(&mut buf)
            .expect("Writing to a Vec<u8> cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Loads a grid from the plain text format. Lines are on in the loaded
    /// grid.
    pub fn from_text(s: &str) -> BlocksResult<Self> {
        let mut lines = DataLines::new(s);

        let (line, size_str) = lines.expect("width and height")?;
        let size: Vec<usize> = parse_ints(line, size_str, Some(2))?;
        let (width, height) = (size[0], size[1]);

        let (line, block_size_str) = lines.expect("block size")?;
        let block_size = parse_ints(line, block_size_str, Some(1))?[0];
        if block_size == 0 {
            return Err(BlocksError::parse(line, BlocksError::ZeroBlockSize));
        }

        let (line, fill_str) = lines.expect("initial color")?;
        let fill = parse_color(line, &parse_ints(line, fill_str, Some(3))?)?;

        let grid = Self::with_options(width, height, fill, block_size, true)?;

        for (line, s) in lines {
            let cell: Vec<i64> = parse_ints(line, s, Some(5))?;
            let rgb = parse_color(line, &cell[2..])?;
            let (row, col) = (cell[0], cell[1]);
            let in_bounds = 0 <= row
                && row < height as i64
                && 0 <= col
                && col < width as i64;
            if !in_bounds {
                warn!(
                    "Block ({}, {}) at line {} is outside {}x{} grid",
                    row, col, line, width, height,
                );
                return Err(BlocksError::parse(
                    line,
                    format!("Block ({}, {}) is outside the grid", row, col),
                ));
            }
            grid.set((row as isize, col as isize), rgb)
                .map_err(|e| BlocksError::parse(line, e))?;
        }
        Ok(grid)
    }
}

fn parse_color(line: usize, channels: &[i64]) -> BlocksResult<Rgb> {
    Rgb::try_from(channels).map_err(|e| BlocksError::parse(line, e))
}
