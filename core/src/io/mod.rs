//! Formats for exporting/importing arrays and grids.
//!
//! Both plain text formats are line based. Each section is a `#` comment
//! header followed by data lines. Loaders ignore blank lines and comments, so
//! the headers are informative only.

use std::fmt;
use std::str::FromStr;

mod array;
mod grid;

use crate::errors::{BlocksError, BlocksResult};
use crate::grid::Grid;

/// Line terminator used by the plain text formats and by `Display`
/// implementations.
#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
/// Line terminator used by the plain text formats and by `Display`
/// implementations.
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

/// Format that a grid can be exported to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Format {
    /// Self-contained HTML table.
    Html,
    /// Plain text listing every block's color.
    Text,
}
impl Default for Format {
    fn default() -> Self {
        Self::Html
    }
}
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Html => write!(f, "HTML"),
            Format::Text => write!(f, "text"),
        }
    }
}
impl FromStr for Format {
    type Err = BlocksError;

    fn from_str(s: &str) -> BlocksResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(BlocksError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Exports a grid to a string using a particular format.
pub fn export_grid_to_string(grid: &Grid, format: Format) -> String {
    match format {
        Format::Html => grid.to_html(),
        Format::Text => grid.to_text(),
    }
}

/// Iterator over the data lines of a plain text document, paired with their
/// 1-based line numbers. Blank lines and `#` comments are skipped.
#[derive(Debug, Clone)]
struct DataLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}
impl<'a> DataLines<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            lines: s.lines().enumerate(),
            last_line: 0,
        }
    }

    /// Returns the next data line, or an error describing what was expected
    /// if there are no more.
    fn expect(&mut self, what: &str) -> BlocksResult<(usize, &'a str)> {
        let last_line = self.last_line;
        self.next()
            .ok_or_else(|| BlocksError::parse(last_line + 1, format!("Expected {}", what)))
    }
}
impl<'a> Iterator for DataLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (i, line) in &mut self.lines {
            self.last_line = i + 1;
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('#') {
                return Some((i + 1, line));
            }
        }
        None
    }
}

/// Parses whitespace-separated integers from a data line. If `count` is
/// given, exactly that many are required.
fn parse_ints<T: FromStr>(line: usize, s: &str, count: Option<usize>) -> BlocksResult<Vec<T>> {
    let ints = s
        .split_whitespace()
        .map(|word| {
            word.parse()
                .map_err(|_| BlocksError::parse(line, format!("Invalid integer {:?}", word)))
        })
        .collect::<BlocksResult<Vec<T>>>()?;
    match count {
        Some(n) if ints.len() != n => Err(BlocksError::parse(
            line,
            format!("Expected {} integers; got {}", n, ints.len()),
        )),
        _ => Ok(ints),
    }
}
