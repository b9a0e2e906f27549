//! 2D grids of colored blocks.

use log::debug;
use std::cell::{Ref, RefMut};
use std::convert::TryFrom;
use std::fmt;

use crate::attrs::{AttrValue, Attributes};
use crate::color::Rgb;
use crate::config::GridConfig;
use crate::errors::{BlocksError, BlocksResult};
use crate::io::LINE_SEP;
use crate::ndarray::{ItemRef, Iter, NdArray, Selected};
use crate::selector::Selection;
use crate::swatch::{Block, Swatch};

/// Result of indexing a grid.
#[derive(Debug)]
pub enum GridSelection {
    /// Both axes were addressed by a single index.
    Block(ItemRef<Block>),
    /// Rectangular part of the grid, sharing storage with it.
    Grid(Grid),
}
impl GridSelection {
    /// Returns the block, if a single block was selected.
    pub fn into_block(self) -> Option<ItemRef<Block>> {
        match self {
            Self::Block(b) => Some(b),
            Self::Grid(_) => None,
        }
    }
    /// Returns the sub-grid, if a range was selected.
    pub fn into_grid(self) -> Option<Grid> {
        match self {
            Self::Block(_) => None,
            Self::Grid(g) => Some(g),
        }
    }
}

/// Row-major 2D array of colored blocks, with a block size and an option to
/// draw lines between blocks.
///
/// Indexing a grid gives either a single block or a sub-grid that shares its
/// blocks with the original grid. Unlike `NdArray`, selecting a single row or
/// column with an integer keeps that axis, so a sub-grid is always 2D.
#[derive(Debug)]
pub struct Grid {
    blocks: NdArray<Block>,
    block_size: usize,
    lines_on: bool,
    fill: Rgb,
}

impl Grid {
    /// Constructs a black grid with the default block size and lines on.
    pub fn new(width: usize, height: usize) -> Self {
        let config = GridConfig::with_size(width, height);
        Self::build(width, height, config.fill, config.block_size, config.lines_on)
    }
    /// Constructs a grid with every block set to `fill`.
    pub fn with_options(
        width: usize,
        height: usize,
        fill: impl Into<Rgb>,
        block_size: usize,
        lines_on: bool,
    ) -> BlocksResult<Self> {
        if block_size == 0 {
            return Err(BlocksError::ZeroBlockSize);
        }
        Ok(Self::build(width, height, fill.into(), block_size, lines_on))
    }
    /// Constructs a grid from a configuration.
    pub fn from_config(config: &GridConfig) -> BlocksResult<Self> {
        Self::with_options(
            config.width,
            config.height,
            config.fill,
            config.block_size,
            config.lines_on,
        )
    }
    fn build(width: usize, height: usize, fill: Rgb, block_size: usize, lines_on: bool) -> Self {
        debug!("Creating {}x{} grid filled with {}", width, height, fill);
        let swatch = Swatch::new(fill, block_size);
        Self {
            blocks: NdArray::from_fn(&[height, width], true, |index| {
                Block::new(index, true, swatch)
            }),
            block_size,
            lines_on,
            fill,
        }
    }

    /// Returns the number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.blocks.width()
    }
    /// Returns the number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.blocks.height()
    }
    /// Returns `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.blocks.shape()
    }
    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    /// Returns whether the grid has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
    /// Returns whether the grid shares its blocks with another grid.
    pub fn is_view(&self) -> bool {
        self.blocks.is_view()
    }
    /// Returns the underlying array of blocks, with dimensions
    /// `[height, width]`.
    pub fn blocks(&self) -> &NdArray<Block> {
        &self.blocks
    }

    /// Returns the edge length of each block, in pixels.
    pub fn block_size(&self) -> usize {
        self.block_size
    }
    /// Sets the edge length of every block in the grid.
    pub fn set_block_size(&mut self, block_size: usize) -> BlocksResult<()> {
        if block_size == 0 {
            return Err(BlocksError::ZeroBlockSize);
        }
        debug!(
            "Resizing {} blocks from {}px to {}px",
            self.len(),
            self.block_size,
            block_size,
        );
        self.block_size = block_size;
        self.blocks.for_each_mut(|b| b.size = block_size);
        Ok(())
    }
    /// Returns whether lines are drawn between blocks.
    pub fn lines_on(&self) -> bool {
        self.lines_on
    }
    /// Sets whether lines are drawn between blocks.
    pub fn set_lines_on(&mut self, lines_on: bool) {
        self.lines_on = lines_on;
    }
    /// Returns the color the grid was filled with when it was created.
    pub fn fill(&self) -> Rgb {
        self.fill
    }

    /// Returns a handle to the block at a row and column. Negative indices
    /// count from the end.
    pub fn block(&self, row: isize, col: isize) -> BlocksResult<ItemRef<Block>> {
        self.blocks.item((row, col))
    }
    /// Borrows a single block.
    pub fn get(&self, sel: impl Into<Selection>) -> BlocksResult<Ref<'_, Block>> {
        self.blocks.get(sel)
    }
    /// Mutably borrows a single block.
    pub fn get_mut(&self, sel: impl Into<Selection>) -> BlocksResult<RefMut<'_, Block>> {
        self.blocks.get_mut(sel)
    }

    /// Indexes the grid by `[row, col]`. Selecting a single block gives that
    /// block; anything else gives a sub-grid view.
    pub fn select(&self, sel: impl Into<Selection>) -> BlocksResult<GridSelection> {
        let sel = sel.into();
        if sel.len() == 2 && sel.is_all_indices() {
            match self.blocks.select(sel)? {
                Selected::Item(b) => Ok(GridSelection::Block(b)),
                Selected::View(_) => unreachable!("all-index selection gave a view"),
            }
        } else {
            self.view(sel).map(GridSelection::Grid)
        }
    }
    /// Returns a sub-grid view, keeping both axes even if one is selected by
    /// a single index.
    pub fn view(&self, sel: impl Into<Selection>) -> BlocksResult<Self> {
        let sel = sel.into();
        if sel.len() > 2 {
            return Err(BlocksError::TooManyIndices {
                ndim: 2,
                got: sel.len(),
            });
        }
        let axes = sel
            .0
            .into_iter()
            .zip(self.blocks.dims())
            .map(|(s, &len)| s.keep_axis(len))
            .collect::<BlocksResult<Vec<_>>>()?;
        Ok(self.with_blocks(self.blocks.view(axes)?))
    }
    fn with_blocks(&self, blocks: NdArray<Block>) -> Self {
        Self {
            blocks,
            block_size: self.block_size,
            lines_on: self.lines_on,
            fill: self.fill,
        }
    }

    /// Sets the color of every selected block. The color is validated before
    /// any block is changed.
    ///
    /// ```
    /// # use ndblocks_core::prelude::*;
    /// let grid = Grid::new(4, 3);
    /// grid.set((1, ..), (255_i64, 0, 0)).unwrap();
    /// grid.set((-1, -1), "teal").unwrap();
    /// assert!(grid.set((0, 0), vec![1_i64, 2, 3, 4]).is_err());
    /// assert_eq!(Rgb::new(255, 0, 0), grid.get((1, 2)).unwrap().rgb());
    /// ```
    pub fn set<C>(&self, sel: impl Into<Selection>, color: C) -> BlocksResult<()>
    where
        Rgb: TryFrom<C>,
        BlocksError: From<<Rgb as TryFrom<C>>::Error>,
    {
        let rgb = Rgb::try_from(color)?;
        match self.select(sel)? {
            GridSelection::Block(b) => b.borrow_mut().set_rgb(rgb),
            GridSelection::Grid(g) => g.blocks.for_each_mut(|b| b.set_rgb(rgb)),
        }
        Ok(())
    }

    /// Returns an iterator over the blocks in row-major order.
    pub fn iter(&self) -> Iter<'_, Block> {
        self.blocks.iter()
    }
    /// Returns an iterator over the rows of the grid, each as a 1D array.
    pub fn rows(&self) -> impl '_ + Iterator<Item = NdArray<Block>> {
        self.blocks.outer_iter()
    }

    /// Returns a grid with its own blocks, with the same colors and settings.
    pub fn copy(&self) -> Self {
        self.with_blocks(self.blocks.copy())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Ref<'a, Block>;
    type IntoIter = Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.shape();
        write!(f, "Grid{}Shape: ({}, {})", LINE_SEP, w, h)
    }
}

impl Attributes for Grid {
    fn get_attr(&self, name: &str) -> BlocksResult<AttrValue> {
        match name {
            "width" => Ok(self.width().into()),
            "height" => Ok(self.height().into()),
            "shape" => {
                let (w, h) = self.shape();
                Ok(format!("({}, {})", w, h).into())
            }
            "block_size" => Ok(self.block_size.into()),
            "lines_on" => Ok(self.lines_on.into()),
            "fill" => Ok(self.fill.to_string().into()),
            _ => Err(BlocksError::UnknownAttribute(name.to_owned())),
        }
    }

    fn set_attr(&mut self, name: &str, value: AttrValue) -> BlocksResult<()> {
        match name {
            "width" | "height" | "shape" | "fill" => {
                Err(BlocksError::ReadOnlyAttribute(name.to_owned()))
            }
            "block_size" => match value.expect_int(name)? {
                n if n > 0 => self.set_block_size(n as usize),
                _ => Err(BlocksError::ZeroBlockSize),
            },
            "lines_on" => {
                self.lines_on = value.expect_bool(name)?;
                Ok(())
            }
            _ => Err(BlocksError::UnknownAttribute(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::errors::ErrorKind;
    use crate::selector::Slice;

    fn basic_grid() -> Grid {
        Grid::with_options(5, 6, (1, 2, 3), 20, true).unwrap()
    }

    #[test]
    fn test_grid_basic_api() {
        let mut g = basic_grid();
        assert_eq!(5, g.width());
        assert_eq!(6, g.height());
        assert_eq!((5, 6), g.shape());
        assert_eq!(20, g.block_size());
        assert!(g.lines_on());
        assert_eq!(&[6, 5], g.blocks().dims());

        for &name in &["width", "height"] {
            let err = g.set_attr(name, AttrValue::Int(20)).unwrap_err();
            assert_eq!(BlocksError::ReadOnlyAttribute(name.to_owned()), err);
        }
        assert_eq!((5, 6), g.shape());
    }

    #[test]
    fn test_grid_init() {
        let g = basic_grid();
        for r in 0..g.height() {
            for c in 0..g.width() {
                let b = g.get((r, c)).unwrap();
                assert_eq!(20, b.size);
                assert_eq!((1, 2, 3), (b.red, b.green, b.blue));
                assert_eq!(Some(r), b.row());
                assert_eq!(Some(c), b.col());
            }
        }
        assert!(Grid::with_options(1, 1, Rgb::default(), 0, true).is_err());
    }

    #[test]
    fn test_grid_change_block_size() {
        let mut g = basic_grid();
        g.set((0, 0), (9_i64, 9, 9)).unwrap();
        g.set_block_size(10).unwrap();
        assert_eq!(10, g.block_size());
        for b in &g {
            assert_eq!(10, b.size);
        }
        assert_eq!(Rgb::new(9, 9, 9), g.get((0, 0)).unwrap().rgb());
        assert_eq!(Rgb::new(1, 2, 3), g.get((0, 1)).unwrap().rgb());

        assert_eq!(Err(BlocksError::ZeroBlockSize), g.set_block_size(0));
        g.set_attr("block_size", AttrValue::Int(7)).unwrap();
        assert!(g.iter().all(|b| b.size == 7));
        assert!(g.set_attr("block_size", AttrValue::Int(-1)).is_err());
        assert_eq!(7, g.block_size());
    }

    #[test]
    fn test_grid_change_lines_on() {
        let mut g = basic_grid();
        assert!(g.lines_on());
        g.set_lines_on(false);
        assert!(!g.lines_on());

        for bad in vec![AttrValue::Int(5), AttrValue::from("asdf")] {
            let err = g.set_attr("lines_on", bad).unwrap_err();
            assert_eq!(ErrorKind::Validation, err.kind());
            assert!(!g.lines_on());
        }
        g.set_attr("lines_on", AttrValue::Bool(true)).unwrap();
        assert_eq!(Ok(AttrValue::Bool(true)), g.get_attr("lines_on"));
    }

    #[test]
    fn test_grid_str() {
        let s = ["Grid", "Shape: (5, 6)"].join(LINE_SEP);
        assert_eq!(s, basic_grid().to_string());
    }

    #[test]
    fn test_grid_bad_colors() {
        let g = basic_grid();
        let err = g.set((0, 0), vec![1_i64, 2, 3, 4]).unwrap_err();
        assert_eq!(BlocksError::BadColorArity(4), err);
        assert_eq!(ErrorKind::Validation, err.kind());
        assert!(g.set((0, 0), (1_i64, 2, 256)).is_err());
        assert!(g.set(.., "not a color").is_err());
        assert!(g.iter().all(|b| b.rgb() == Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_grid_select() {
        let g = basic_grid();

        let b = g.select((1, -1)).unwrap().into_block().unwrap();
        assert_eq!(vec![1, 4], b.storage_index());

        // A single row keeps its axis.
        let row = g.select(2).unwrap().into_grid().unwrap();
        assert_eq!((5, 1), row.shape());
        assert!(row.is_view());
        let col = g.view((.., 3)).unwrap();
        assert_eq!((1, 6), col.shape());

        let sub = g.view((Slice::stepped(.., 2), -2..)).unwrap();
        assert_eq!((2, 3), sub.shape());
        sub.set(.., (0_i64, 0, 0)).unwrap();
        let black = g
            .blocks()
            .iter_enumerated()
            .filter(|(_, b)| b.rgb() == Rgb::default())
            .map(|(pos, _)| pos)
            .collect_vec();
        assert_eq!(
            vec![
                vec![0, 3],
                vec![0, 4],
                vec![2, 3],
                vec![2, 4],
                vec![4, 3],
                vec![4, 4],
            ],
            black,
        );

        assert_eq!(
            Err(BlocksError::TooManyIndices { ndim: 2, got: 3 }),
            g.view((0, 0, 0)).map(|_| ()),
        );
        assert_eq!(ErrorKind::Index, g.view(6).unwrap_err().kind());
    }

    #[test]
    fn test_grid_view_settings() {
        let mut g = basic_grid();
        let mut sub = g.view((1..3, 1..3)).unwrap();
        sub.set_block_size(4).unwrap();
        assert_eq!(4, g.get((1, 1)).unwrap().size);
        assert_eq!(20, g.get((0, 0)).unwrap().size);
        assert_eq!(20, g.block_size());

        g.set_lines_on(false);
        assert!(sub.lines_on());
    }

    #[test]
    fn test_grid_copy() {
        let g = basic_grid();
        let sub = g.view((-2.., -2..)).unwrap();
        let copy = sub.copy();
        assert!(!copy.is_view());
        assert_eq!((2, 2), copy.shape());
        assert_eq!(Some(0), copy.get((0, 0)).unwrap().row());

        copy.set(.., (7_i64, 7, 7)).unwrap();
        assert_eq!(Rgb::new(1, 2, 3), g.get((-1, -1)).unwrap().rgb());
    }
}
