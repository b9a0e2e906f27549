//! Single addressable cells.

use itertools::Itertools;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::attrs::{AttrValue, Attributes};
use crate::errors::{BlocksError, BlocksResult};

/// Names of the attributes that are fixed when an item is constructed.
const STRUCTURAL_ATTRS: &[&str] = &["index", "row", "col", "row_major"];

/// Cell with a fixed coordinate and a mutable payload of type `P`.
///
/// The coordinate and axis order never change after construction. The
/// payload is reachable through `Deref`/`DerefMut`, so payload fields can be
/// read and written directly on the item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item<P = ()> {
    index: Box<[usize]>,
    row_major: bool,
    payload: P,
}

impl<P: Default> Default for Item<P> {
    fn default() -> Self {
        Self::unindexed(P::default())
    }
}

impl<P> Deref for Item<P> {
    type Target = P;

    #[inline]
    fn deref(&self) -> &P {
        &self.payload
    }
}
impl<P> DerefMut for Item<P> {
    #[inline]
    fn deref_mut(&mut self) -> &mut P {
        &mut self.payload
    }
}

impl<P> Item<P> {
    /// Creates an item at a coordinate.
    pub fn new(index: &[usize], row_major: bool, payload: P) -> Self {
        Self {
            index: index.into(),
            row_major,
            payload,
        }
    }
    /// Creates a row-major item that has no coordinate yet.
    pub fn unindexed(payload: P) -> Self {
        Self::new(&[], true, payload)
    }

    /// Returns the coordinate of the item within its storage.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }
    /// Returns whether the coordinate is in row-major order `(..., row, col)`
    /// as opposed to column-major order `(col, row, ...)`.
    #[inline]
    pub fn row_major(&self) -> bool {
        self.row_major
    }

    /// Returns the row of the item, if its coordinate has one.
    pub fn row(&self) -> Option<usize> {
        self.row_col().0
    }
    /// Returns the column of the item, if its coordinate has one.
    pub fn col(&self) -> Option<usize> {
        self.row_col().1
    }
    fn row_col(&self) -> (Option<usize>, Option<usize>) {
        let idx = &*self.index;
        match (idx.len(), self.row_major) {
            (0, _) => (None, None),
            (1, true) => (Some(idx[0]), None),
            (1, false) => (None, Some(idx[0])),
            (n, true) => (Some(idx[n - 2]), Some(idx[n - 1])),
            (_, false) => (Some(idx[1]), Some(idx[0])),
        }
    }

    /// Returns the coordinate formatted for display, such as `"5, 6"`, or
    /// `None` if the item has no coordinate.
    pub fn index_string(&self) -> Option<String> {
        if self.index.is_empty() {
            None
        } else {
            Some(self.index.iter().join(", "))
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }
    /// Returns the payload mutably.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }
    /// Replaces the payload, returning the old one.
    pub fn replace_payload(&mut self, payload: P) -> P {
        std::mem::replace(&mut self.payload, payload)
    }
    /// Consumes the item and returns its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Moves the item to a new coordinate. Only storage owners may do this,
    /// when they place an item into fresh storage.
    pub(crate) fn relocate(&mut self, index: &[usize]) {
        self.index = index.into();
    }
}

impl<P: fmt::Display> fmt::Display for Item<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index_string() {
            Some(s) => write!(f, "[{}] {}", s, self.payload),
            None => write!(f, "[] {}", self.payload),
        }
    }
}

impl<P: Attributes> Attributes for Item<P> {
    fn get_attr(&self, name: &str) -> BlocksResult<AttrValue> {
        match name {
            "index" => Ok(AttrValue::Str(self.index_string().unwrap_or_default())),
            "row" => Ok(self.row().into()),
            "col" => Ok(self.col().into()),
            "row_major" => Ok(AttrValue::Bool(self.row_major)),
            _ => self.payload.get_attr(name),
        }
    }

    fn set_attr(&mut self, name: &str, value: AttrValue) -> BlocksResult<()> {
        if STRUCTURAL_ATTRS.contains(&name) {
            return Err(BlocksError::ReadOnlyAttribute(name.to_owned()));
        }
        self.payload.set_attr(name, value)
    }
}
