//! Per-axis selectors used to index into arrays and grids.
//!
//! Selectors follow Python's indexing rules: negative integers count from the
//! end of an axis, and slices have an optional start, an optional stop, and a
//! step. Selectors can be built from integers, Rust ranges, tuples of those,
//! the `sel!` macro, or parsed from text such as `"-2:, ::3"`.

use itertools::Itertools;
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};
use std::str::FromStr;

use crate::errors::{BlocksError, BlocksResult};

lazy_static::lazy_static! {
    /// Regex matching a single integer index.
    static ref INDEX_REGEX: regex::Regex = regex::Regex::new(r"^[+-]?\d+$").unwrap();
    /// Regex matching a slice `start:stop:step` with every part optional.
    static ref SLICE_REGEX: regex::Regex =
        regex::Regex::new(r"^([+-]?\d+)?:([+-]?\d+)?(?::([+-]?\d+)?)?$").unwrap();
}

/// Range along one axis with an optional start, optional stop, and a step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Slice {
    /// First index, or the start of the axis if `None`.
    pub start: Option<isize>,
    /// Index to stop before, or the end of the axis if `None`.
    pub stop: Option<isize>,
    /// Distance between selected indices; must be positive.
    pub step: isize,
}
impl Default for Slice {
    fn default() -> Self {
        Self::FULL
    }
}
impl Slice {
    /// Slice selecting an entire axis.
    pub const FULL: Self = Self {
        start: None,
        stop: None,
        step: 1,
    };

    /// Constructs a slice.
    pub fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }
    /// Constructs a slice with the bounds of `range` and the given step.
    pub fn stepped(range: impl Into<Slice>, step: isize) -> Self {
        Self {
            step,
            ..range.into()
        }
    }

    /// Resolves the slice against an axis of length `len`, returning the
    /// first selected index, the step, and the number of selected indices.
    pub fn resolve(&self, len: usize) -> BlocksResult<(usize, usize, usize)> {
        if self.step <= 0 {
            return Err(BlocksError::BadStep(self.step));
        }
        let len = len as isize;
        let clamp = |i: isize| {
            let i = if i < 0 { i + len } else { i };
            i.max(0).min(len)
        };
        let start = self.start.map_or(0, clamp);
        let stop = self.stop.map_or(len, clamp);
        let count = if stop > start {
            (stop - start - 1) / self.step + 1
        } else {
            0
        };
        Ok((start as usize, self.step as usize, count as usize))
    }
}
impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{}", stop)?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}
macro_rules! impl_slice_from_ranges {
    ($($int:ty),*) => {
        $(
            impl From<Range<$int>> for Slice {
                fn from(r: Range<$int>) -> Self {
                    Self::new(Some(r.start as isize), Some(r.end as isize), 1)
                }
            }
            impl From<RangeFrom<$int>> for Slice {
                fn from(r: RangeFrom<$int>) -> Self {
                    Self::new(Some(r.start as isize), None, 1)
                }
            }
            impl From<RangeTo<$int>> for Slice {
                fn from(r: RangeTo<$int>) -> Self {
                    Self::new(None, Some(r.end as isize), 1)
                }
            }
            impl From<RangeInclusive<$int>> for Slice {
                fn from(r: RangeInclusive<$int>) -> Self {
                    let end = *r.end() as isize;
                    // `..=-1` means "through the end of the axis."
                    let stop = if end == -1 { None } else { Some(end + 1) };
                    Self::new(Some(*r.start() as isize), stop, 1)
                }
            }

            impl From<$int> for AxisSel {
                fn from(i: $int) -> Self {
                    Self::Index(i as isize)
                }
            }
            impl From<Range<$int>> for AxisSel {
                fn from(r: Range<$int>) -> Self {
                    Self::Slice(r.into())
                }
            }
            impl From<RangeFrom<$int>> for AxisSel {
                fn from(r: RangeFrom<$int>) -> Self {
                    Self::Slice(r.into())
                }
            }
            impl From<RangeTo<$int>> for AxisSel {
                fn from(r: RangeTo<$int>) -> Self {
                    Self::Slice(r.into())
                }
            }
            impl From<RangeInclusive<$int>> for AxisSel {
                fn from(r: RangeInclusive<$int>) -> Self {
                    Self::Slice(r.into())
                }
            }
        )*
    };
}
impl_slice_from_ranges!(i32, i64, isize, usize);

/// Selector for a single axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AxisSel {
    /// A single position; the axis is dropped from the result.
    Index(isize),
    /// A range of positions; the axis is kept in the result.
    Slice(Slice),
}
impl From<RangeFull> for AxisSel {
    fn from(_: RangeFull) -> Self {
        Self::Slice(Slice::FULL)
    }
}
impl From<Slice> for AxisSel {
    fn from(s: Slice) -> Self {
        Self::Slice(s)
    }
}
impl fmt::Display for AxisSel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Slice(s) => write!(f, "{}", s),
        }
    }
}
impl FromStr for AxisSel {
    type Err = BlocksError;

    fn from_str(s: &str) -> BlocksResult<Self> {
        let s = s.trim();
        let unsupported = || BlocksError::UnsupportedSelector(s.to_owned());
        let parse_int = |m: Option<regex::Match<'_>>| -> BlocksResult<Option<isize>> {
            m.map(|m| m.as_str().parse().map_err(|_| unsupported()))
                .transpose()
        };
        if INDEX_REGEX.is_match(s) {
            s.parse().map(Self::Index).map_err(|_| unsupported())
        } else if let Some(caps) = SLICE_REGEX.captures(s) {
            Ok(Self::Slice(Slice {
                start: parse_int(caps.get(1))?,
                stop: parse_int(caps.get(2))?,
                step: parse_int(caps.get(3))?.unwrap_or(1),
            }))
        } else {
            Err(unsupported())
        }
    }
}

/// Resolved selector for a single axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Resolved {
    /// A single in-bounds position.
    Index(usize),
    /// Positions `start + i * step` for `i` in `0..count`.
    Range {
        start: usize,
        step: usize,
        count: usize,
    },
}
impl AxisSel {
    /// Resolves the selector against an axis of length `len`.
    pub(crate) fn resolve(&self, len: usize) -> BlocksResult<Resolved> {
        match *self {
            Self::Index(index) => {
                let i = if index < 0 { index + len as isize } else { index };
                if 0 <= i && (i as usize) < len {
                    Ok(Resolved::Index(i as usize))
                } else {
                    Err(BlocksError::IndexOutOfBounds { index, len })
                }
            }
            Self::Slice(s) => {
                let (start, step, count) = s.resolve(len)?;
                Ok(Resolved::Range { start, step, count })
            }
        }
    }

    /// Returns the selector with a single index widened to a one-element
    /// slice, so that the axis is kept when selecting from an axis of length
    /// `len`.
    pub(crate) fn keep_axis(self, len: usize) -> BlocksResult<Self> {
        match self.resolve(len)? {
            Resolved::Index(i) => {
                let i = i as isize;
                Ok(Self::Slice(Slice::new(Some(i), Some(i + 1), 1)))
            }
            Resolved::Range { .. } => Ok(self),
        }
    }
}

/// Selectors for the leading axes of an array. Axes beyond the end of the
/// selection are selected entirely.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Selection(pub Vec<AxisSel>);
impl Selection {
    /// Selection of an entire array.
    pub fn all() -> Self {
        Self(vec![])
    }
    /// Returns the per-axis selectors.
    pub fn axes(&self) -> &[AxisSel] {
        &self.0
    }
    /// Returns the number of axes given explicitly.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether no axes are given explicitly.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns whether every selector is a single index.
    pub fn is_all_indices(&self) -> bool {
        self.0.iter().all(|s| matches!(s, AxisSel::Index(_)))
    }
}
impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}
impl FromStr for Selection {
    type Err = BlocksError;

    /// Parses comma-separated selectors, such as `"1:3, -1"`.
    fn from_str(s: &str) -> BlocksResult<Self> {
        if s.trim().is_empty() {
            return Ok(Self::all());
        }
        let parts = s.split(',').collect_vec();
        let last = parts.len() - 1;
        parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| {
                if part.trim().is_empty() && i == last {
                    Err(BlocksError::DanglingSelector)
                } else {
                    part.parse()
                }
            })
            .collect::<BlocksResult<_>>()
            .map(Self)
    }
}

impl From<Vec<AxisSel>> for Selection {
    fn from(axes: Vec<AxisSel>) -> Self {
        Self(axes)
    }
}
impl From<&[AxisSel]> for Selection {
    fn from(axes: &[AxisSel]) -> Self {
        Self(axes.to_vec())
    }
}
impl From<AxisSel> for Selection {
    fn from(s: AxisSel) -> Self {
        Self(vec![s])
    }
}
impl From<Slice> for Selection {
    fn from(s: Slice) -> Self {
        Self(vec![s.into()])
    }
}
impl From<RangeFull> for Selection {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}
macro_rules! impl_selection_from_single {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Selection {
                fn from(s: $t) -> Self {
                    Self(vec![s.into()])
                }
            }
        )*
    };
}
impl_selection_from_single!(i32, i64, isize, usize);
impl_selection_from_single!(Range<i32>, Range<i64>, Range<isize>, Range<usize>);
impl_selection_from_single!(RangeFrom<i32>, RangeFrom<i64>, RangeFrom<isize>, RangeFrom<usize>);
impl_selection_from_single!(RangeTo<i32>, RangeTo<i64>, RangeTo<isize>, RangeTo<usize>);

macro_rules! impl_selection_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<AxisSel>),+> From<($($name,)+)> for Selection {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self(vec![$($name.into()),+])
            }
        }
    };
}
impl_selection_from_tuple!(A);
impl_selection_from_tuple!(A, B);
impl_selection_from_tuple!(A, B, C);
impl_selection_from_tuple!(A, B, C, D);
impl_selection_from_tuple!(A, B, C, D, E);
impl_selection_from_tuple!(A, B, C, D, E, F);

impl From<&[isize]> for Selection {
    fn from(indices: &[isize]) -> Self {
        Self(indices.iter().map(|&i| AxisSel::Index(i)).collect())
    }
}
impl From<&[usize]> for Selection {
    fn from(indices: &[usize]) -> Self {
        Self(indices.iter().map(|&i| AxisSel::from(i)).collect())
    }
}
