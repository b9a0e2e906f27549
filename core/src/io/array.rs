//! Plain text format for N-dimensional arrays.
//!
//! ```text
//! # shape (..., height, width)
//! 2 3
//! # row-major
//! True
//! # index data
//! 0 0
//! 0 1
//! ...
//! ```
//!
//! There is one index line per item, giving the item's coordinate in the
//! storage it belongs to. For a view, these are coordinates in the parent.

use itertools::Itertools;
use log::warn;
use std::collections::HashSet;
use std::io;

use super::{parse_ints, DataLines, LINE_SEP};
use crate::errors::{BlocksError, BlocksResult};
use crate::item::Item;
use crate::ndarray::{NdArray, Positions};

impl<T> NdArray<T> {
    /// Writes the array in the plain text format: its dimensions, its axis
    /// order, and the storage coordinate of every item.
    pub fn write_text(&self, w: &mut impl io::Write) -> io::Result<()> {
        write!(w, "# shape (..., height, width){}", LINE_SEP)?;
        write!(w, "{}{}", self.dims().iter().join(" "), LINE_SEP)?;
        write!(w, "# row-major{}", LINE_SEP)?;
        let flag = if self.row_major() { "True" } else { "False" };
        write!(w, "{}{}", flag, LINE_SEP)?;
        write!(w, "# index data{}", LINE_SEP)?;
        for pos in self.positions() {
            let index = self.storage_index(&pos);
            write!(w, "{}{}", index.iter().join(" "), LINE_SEP)?;
        }
        Ok(())
    }
    /// Returns the array in the plain text format.
    pub fn to_text(&self) -> String {
        let mut buf = vec![];
        self.write_text(&mut buf)
            .expect("Writing to a Vec<u8> cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<P: Default> NdArray<Item<P>> {
    /// Loads an array of items with default payloads from the plain text
    /// format.
    ///
    /// The listed coordinates must be those of some array or strided view
    /// with the declared shape: one distinct coordinate per item, all with
    /// the same number of components, stepping evenly along each axis. The
    /// loaded array owns its storage, so like `copy()` each item is placed
    /// at its own position.
    pub fn from_text(s: &str) -> BlocksResult<Self> {
        let mut lines = DataLines::new(s);

        let (line, dims_str) = lines.expect("shape")?;
        let dims: Vec<usize> = parse_ints(line, dims_str, None)?;

        let (line, flag) = lines.expect("row-major flag")?;
        let row_major = match flag {
            "True" | "true" => true,
            "False" | "false" => false,
            _ => {
                return Err(BlocksError::parse(
                    line,
                    format!("Expected True or False; got {:?}", flag),
                ))
            }
        };

        let expected = dims.iter().product::<usize>();
        let mut listed: Vec<(usize, Vec<usize>)> = Vec::with_capacity(expected);
        let mut seen = HashSet::with_capacity(expected);
        for (line, s) in lines {
            if listed.len() == expected {
                warn!("Extra index data at line {}", line);
                return Err(BlocksError::parse(
                    line,
                    format!("Expected {} items", expected),
                ));
            }
            let arity = listed.first().map(|(_, index)| index.len());
            let index: Vec<usize> = parse_ints(line, s, arity)?;
            if !seen.insert(index.clone()) {
                return Err(BlocksError::parse(
                    line,
                    format!("Duplicate index ({})", index.iter().join(", ")),
                ));
            }
            listed.push((line, index));
        }
        if listed.len() != expected {
            return Err(BlocksError::parse(
                s.lines().count() + 1,
                format!("Expected {} items; got {}", expected, listed.len()),
            ));
        }
        check_strided(&dims, &listed)?;

        Ok(Self::with_order(&dims, row_major))
    }
}

/// Checks that the listed coordinates, in row-major order of positions
/// within `dims`, are `base + sum(pos[ax] * step[ax])` for some base
/// coordinate and per-axis steps.
fn check_strided(dims: &[usize], listed: &[(usize, Vec<usize>)]) -> BlocksResult<()> {
    let base = match listed.first() {
        Some((_, index)) => index.iter().map(|&i| i as i64).collect_vec(),
        None => return Ok(()),
    };
    let steps = (0..dims.len())
        .map(|ax| {
            if dims[ax] < 2 {
                return vec![0; base.len()];
            }
            let unit_flat = dims[ax + 1..].iter().product::<usize>();
            let unit = &listed[unit_flat].1;
            unit.iter().zip(&base).map(|(&i, &b)| i as i64 - b).collect()
        })
        .collect_vec();

    for (pos, (line, index)) in Positions::new(dims).zip(listed) {
        let mut expected = base.clone();
        for (&p, step) in pos.iter().zip(&steps) {
            for (e, &s) in expected.iter_mut().zip(step) {
                *e += p as i64 * s;
            }
        }
        let fits = index.iter().zip(&expected).all(|(&i, &e)| i as i64 == e);
        if !fits {
            warn!(
                "Index ({}) at line {} is not part of a {:?} array",
                index.iter().join(", "),
                line,
                dims,
            );
            return Err(BlocksError::parse(
                *line,
                format!(
                    "Index ({}) does not fit the declared shape",
                    index.iter().join(", "),
                ),
            ));
        }
    }
    Ok(())
}
