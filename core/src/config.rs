//! Construction options for grids.

use crate::color::{Rgb, BLACK};

/// Default edge length of a block, in pixels.
pub const DEFAULT_BLOCK_SIZE: usize = 20;

/// Options used to construct a `Grid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Color of every block when the grid is created.
    pub fill: Rgb,
    /// Edge length of each block, in pixels. Must be positive.
    pub block_size: usize,
    /// Whether to draw lines between blocks.
    pub lines_on: bool,
}
impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            fill: BLACK,
            block_size: DEFAULT_BLOCK_SIZE,
            lines_on: true,
        }
    }
}
impl GridConfig {
    /// Returns the default options with the given size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}
