//! N-dimensional arrays with views that share storage.
//!
//! Every `NdArray` addresses some part of a flat, row-major storage buffer
//! through an `IndexMap`. An array created with a constructor owns its
//! storage; an array created by indexing is a *view* that shares its parent's
//! storage, so writes through the view are visible through the parent and
//! through every other view of the same cells. Use `NdArray::copy()` to get an
//! array with independent storage.

use itertools::Itertools;
use log::{debug, trace};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

mod iter;
#[cfg(test)]
mod tests;

pub use iter::{Iter, Positions};

use crate::errors::{BlocksError, BlocksResult};
use crate::io::LINE_SEP;
use crate::item::Item;
use crate::selector::{AxisSel, Resolved, Selection, Slice};

/// Value that can be stored in an `NdArray`.
pub trait Element: Clone {
    /// Updates the value after it is placed at `index` in new storage, such as
    /// when an array is copied.
    fn relocate(&mut self, _index: &[usize]) {}
}
impl<P: Clone> Element for Item<P> {
    fn relocate(&mut self, index: &[usize]) {
        Item::relocate(self, index)
    }
}
impl<T: Element> Element for Option<T> {
    fn relocate(&mut self, index: &[usize]) {
        if let Some(inner) = self {
            inner.relocate(index);
        }
    }
}
macro_rules! impl_plain_element {
    ($($t:ty),*) => {
        $(impl Element for $t {})*
    };
}
impl_plain_element!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String,
    &'static str
);

/// Flat storage shared by an array and all of its views.
#[derive(Debug)]
struct Storage<T> {
    /// Dimensions of the array that created the storage.
    dims: Box<[usize]>,
    /// Items in row-major order.
    data: RefCell<Vec<T>>,
}

/// Mapping from positions in a view to indices in flat storage.
///
/// The view position `p` maps to `offset + sum(p[ax] * strides[ax])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    offset: usize,
    dims: Vec<usize>,
    strides: Vec<usize>,
}
impl IndexMap {
    /// Returns the mapping for a freshly allocated row-major array.
    pub fn contiguous(dims: &[usize]) -> Self {
        let mut strides = vec![0; dims.len()];
        let mut stride = 1;
        for ax in (0..dims.len()).rev() {
            strides[ax] = stride;
            stride *= dims[ax];
        }
        Self {
            offset: 0,
            dims: dims.to_vec(),
            strides,
        }
    }

    /// Returns the dimensions addressed by the mapping.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the flat storage index of a position.
    ///
    /// # Panics
    ///
    /// This function panics if `pos` is out of bounds.
    pub fn flat(&self, pos: &[usize]) -> usize {
        assert_eq!(self.dims.len(), pos.len(), "Wrong number of axes");
        let mut ret = self.offset;
        for ax in 0..pos.len() {
            assert!(pos[ax] < self.dims[ax], "Position out of bounds");
            ret += pos[ax] * self.strides[ax];
        }
        ret
    }

    /// Composes the mapping with one resolved selector per axis. Axes selected
    /// by a single index are dropped.
    fn select(&self, resolved: &[Resolved]) -> Self {
        let mut offset = self.offset;
        let mut dims = vec![];
        let mut strides = vec![];
        for (r, &stride) in resolved.iter().zip(&self.strides) {
            match *r {
                Resolved::Index(i) => offset += i * stride,
                Resolved::Range { start, step, count } => {
                    if count > 0 {
                        offset += start * stride;
                    }
                    dims.push(count);
                    // The step only matters when there is a second element.
                    strides.push(if count > 1 { stride * step } else { stride });
                }
            }
        }
        Self {
            offset,
            dims,
            strides,
        }
    }
}

/// Result of indexing an array.
#[derive(Debug)]
pub enum Selected<T> {
    /// Every axis was addressed by a single index.
    Item(ItemRef<T>),
    /// At least one axis was addressed by a range, or left unaddressed.
    View(NdArray<T>),
}
impl<T> Selected<T> {
    /// Returns the item, if a single item was selected.
    pub fn into_item(self) -> Option<ItemRef<T>> {
        match self {
            Self::Item(item) => Some(item),
            Self::View(_) => None,
        }
    }
    /// Returns the view, if a range was selected.
    pub fn into_view(self) -> Option<NdArray<T>> {
        match self {
            Self::Item(_) => None,
            Self::View(view) => Some(view),
        }
    }
}

/// Handle to a single slot in shared storage.
#[derive(Debug)]
pub struct ItemRef<T> {
    storage: Rc<Storage<T>>,
    flat: usize,
}
impl<T> ItemRef<T> {
    /// Borrows the item.
    ///
    /// # Panics
    ///
    /// This function panics if the storage is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        Ref::map(self.storage.data.borrow(), |data| &data[self.flat])
    }
    /// Mutably borrows the item.
    ///
    /// # Panics
    ///
    /// This function panics if the storage is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.storage.data.borrow_mut(), |data| &mut data[self.flat])
    }
    /// Returns the coordinate of the slot within its storage.
    pub fn storage_index(&self) -> Vec<usize> {
        unflatten_idx(&self.storage.dims, self.flat)
    }
}
impl<T: Element> ItemRef<T> {
    /// Replaces the value in the slot, returning the old value. The new value
    /// is relocated to the slot's coordinate.
    pub fn replace(&self, mut value: T) -> T {
        value.relocate(&self.storage_index());
        std::mem::replace(&mut *self.borrow_mut(), value)
    }
}

/// N-dimensional array of `T`, possibly a view into another array's storage.
#[derive(Debug)]
pub struct NdArray<T> {
    storage: Rc<Storage<T>>,
    map: IndexMap,
    row_major: bool,
    is_view: bool,
}

impl<P: Default> NdArray<Item<P>> {
    /// Creates a row-major array of items with default payloads, each at its
    /// own coordinate.
    pub fn new(dims: &[usize]) -> Self {
        Self::with_order(dims, true)
    }
    /// Creates an array of items with default payloads, each at its own
    /// coordinate. `row_major` controls how items derive their row and column.
    pub fn with_order(dims: &[usize], row_major: bool) -> Self {
        Self::from_fn(dims, row_major, |index| {
            Item::new(index, row_major, P::default())
        })
    }
}

impl<T> NdArray<T> {
    /// Creates an array by calling `f` with each coordinate in row-major
    /// order.
    pub fn from_fn(dims: &[usize], row_major: bool, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let data = Positions::new(dims).map(|pos| f(&pos)).collect_vec();
        Self::from_flat_data(dims, row_major, data)
    }

    /// Creates an array from items in row-major order.
    ///
    /// # Panics
    ///
    /// This function panics if the length of `data` does not match `dims`.
    pub(crate) fn from_flat_data(dims: &[usize], row_major: bool, data: Vec<T>) -> Self {
        assert_eq!(
            dims.iter().product::<usize>(),
            data.len(),
            "Wrong size for NdArray",
        );
        Self {
            storage: Rc::new(Storage {
                dims: dims.into(),
                data: RefCell::new(data),
            }),
            map: IndexMap::contiguous(dims),
            row_major,
            is_view: false,
        }
    }

    /// Returns the dimensions of the array in storage order
    /// `(..., height, width)` for row-major arrays.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.map.dims()
    }
    /// Returns the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.map.dims.len()
    }
    /// Returns the number of items addressed by the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims().iter().product()
    }
    /// Returns whether the array addresses no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns whether the array is row-major.
    #[inline]
    pub fn row_major(&self) -> bool {
        self.row_major
    }
    /// Returns whether the array shares storage it did not create.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.is_view
    }
    /// Returns whether two arrays share the same storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
    /// Returns the mapping from positions to flat storage indices.
    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    /// Returns the width of the array: the last axis of a row-major array or
    /// the first axis of a column-major array. Missing axes count as 1.
    pub fn width(&self) -> usize {
        let dims = self.dims();
        let ax = if self.row_major {
            dims.len().checked_sub(1)
        } else {
            Some(0)
        };
        ax.and_then(|ax| dims.get(ax)).copied().unwrap_or(1)
    }
    /// Returns the height of the array: the second-to-last axis of a
    /// row-major array or the second axis of a column-major array. Missing
    /// axes count as 1.
    pub fn height(&self) -> usize {
        let dims = self.dims();
        let ax = if self.row_major {
            dims.len().checked_sub(2)
        } else {
            Some(1)
        };
        ax.and_then(|ax| dims.get(ax)).copied().unwrap_or(1)
    }
    /// Returns `(width, height)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn resolve(&self, sel: &Selection) -> BlocksResult<Vec<Resolved>> {
        if sel.len() > self.ndim() {
            return Err(BlocksError::TooManyIndices {
                ndim: self.ndim(),
                got: sel.len(),
            });
        }
        let full = AxisSel::Slice(Slice::FULL);
        self.dims()
            .iter()
            .enumerate()
            .map(|(ax, &len)| sel.axes().get(ax).unwrap_or(&full).resolve(len))
            .collect()
    }

    fn with_map(&self, map: IndexMap) -> Self {
        trace!(
            "Created view {:?} of storage with dims {:?}",
            map,
            self.storage.dims,
        );
        Self {
            storage: Rc::clone(&self.storage),
            map,
            row_major: self.row_major,
            is_view: true,
        }
    }

    /// Indexes the array. If every axis is addressed by a single index, the
    /// result is that item; otherwise it is a view in which axes addressed by
    /// a single index are dropped.
    pub fn select(&self, sel: impl Into<Selection>) -> BlocksResult<Selected<T>> {
        let sel = sel.into();
        let resolved = self.resolve(&sel)?;
        let map = self.map.select(&resolved);
        if sel.len() == self.ndim() && sel.is_all_indices() {
            Ok(Selected::Item(ItemRef {
                storage: Rc::clone(&self.storage),
                flat: map.offset,
            }))
        } else {
            Ok(Selected::View(self.with_map(map)))
        }
    }

    /// Returns a view of the selected region. Unlike `select()`, selecting a
    /// single item gives a zero-dimensional view.
    pub fn view(&self, sel: impl Into<Selection>) -> BlocksResult<Self> {
        let resolved = self.resolve(&sel.into())?;
        Ok(self.with_map(self.map.select(&resolved)))
    }

    /// Returns a handle to a single item.
    pub fn item(&self, sel: impl Into<Selection>) -> BlocksResult<ItemRef<T>> {
        let sel = sel.into();
        let desc = sel.to_string();
        self.select(sel)?
            .into_item()
            .ok_or(BlocksError::NotSingleItem(desc))
    }

    /// Borrows a single item.
    pub fn get(&self, sel: impl Into<Selection>) -> BlocksResult<Ref<'_, T>> {
        let flat = self.item(sel)?.flat;
        Ok(self.borrow_flat(flat))
    }
    /// Mutably borrows a single item.
    ///
    /// # Panics
    ///
    /// This function panics if any item in the storage is currently borrowed.
    pub fn get_mut(&self, sel: impl Into<Selection>) -> BlocksResult<RefMut<'_, T>> {
        let flat = self.item(sel)?.flat;
        Ok(RefMut::map(self.storage.data.borrow_mut(), |data| {
            &mut data[flat]
        }))
    }

    fn borrow_flat(&self, flat: usize) -> Ref<'_, T> {
        Ref::map(self.storage.data.borrow(), |data| &data[flat])
    }

    /// Returns the coordinate within the storage of a position in this array.
    pub fn storage_index(&self, pos: &[usize]) -> Vec<usize> {
        unflatten_idx(&self.storage.dims, self.map.flat(pos))
    }

    /// Returns an iterator over all positions in the array, in row-major
    /// order.
    pub fn positions(&self) -> Positions {
        Positions::new(self.dims())
    }
    /// Returns an iterator over the items in the array, in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
    /// Returns an iterator over the items in the array, each paired with its
    /// position in the array.
    pub fn iter_enumerated(&self) -> impl '_ + Iterator<Item = (Vec<usize>, Ref<'_, T>)> {
        self.positions().zip(self.iter())
    }
    /// Returns an iterator over views along the first axis. For a 2D
    /// row-major array, these are the rows.
    pub fn outer_iter(&self) -> impl '_ + Iterator<Item = NdArray<T>> {
        let count = if self.ndim() == 0 { 0 } else { self.dims()[0] };
        (0..count).map(move |i| {
            let mut resolved = vec![Resolved::Index(i)];
            resolved.extend(self.dims()[1..].iter().map(|&count| Resolved::Range {
                start: 0,
                step: 1,
                count,
            }));
            self.with_map(self.map.select(&resolved))
        })
    }

    /// Calls `f` on every item in the array, in row-major order.
    ///
    /// # Panics
    ///
    /// This function panics if any item in the storage is currently borrowed.
    pub fn for_each_mut(&self, mut f: impl FnMut(&mut T)) {
        let mut data = self.storage.data.borrow_mut();
        for pos in self.positions() {
            f(&mut data[self.map.flat(&pos)]);
        }
    }
}

impl<T: Element> NdArray<T> {
    /// Stores `value` in every selected slot. If the selection addresses a
    /// single item, only that slot is replaced; otherwise `value` is broadcast
    /// to every item in the selected range. Each stored value is relocated to
    /// the coordinate of its slot.
    pub fn assign(&self, sel: impl Into<Selection>, value: T) -> BlocksResult<()> {
        match self.select(sel)? {
            Selected::Item(item) => {
                item.replace(value);
            }
            Selected::View(view) => {
                trace!("Broadcasting to {} items", view.len());
                view.fill(value);
            }
        }
        Ok(())
    }

    /// Stores `value` in every slot of the array, relocated to each slot's
    /// coordinate.
    ///
    /// # Panics
    ///
    /// This function panics if any item in the storage is currently borrowed.
    pub fn fill(&self, value: T) {
        let mut data = self.storage.data.borrow_mut();
        for pos in self.positions() {
            let flat = self.map.flat(&pos);
            let mut v = value.clone();
            v.relocate(&unflatten_idx(&self.storage.dims, flat));
            data[flat] = v;
        }
    }

    /// Returns an array with independent storage holding the same items.
    /// Items are relocated to their positions in the new array.
    pub fn copy(&self) -> Self {
        debug!("Copying {} items with dims {:?}", self.len(), self.dims());
        let data = self
            .iter_enumerated()
            .map(|(pos, item)| {
                let mut item = T::clone(&item);
                item.relocate(&pos);
                item
            })
            .collect_vec();
        Self::from_flat_data(self.dims(), self.row_major, data)
    }
}

impl<T> fmt::Display for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NdArray{}Shape: ({})",
            LINE_SEP,
            self.dims().iter().join(", "),
        )
    }
}

/// Converts a flat index into a row-major coordinate for storage with the
/// given dimensions.
fn unflatten_idx(dims: &[usize], mut idx: usize) -> Vec<usize> {
    let mut ret = vec![0; dims.len()];
    assert!(idx < dims.iter().product::<usize>());
    for ax in (0..dims.len()).rev() {
        ret[ax] = idx % dims[ax];
        idx /= dims[ax];
    }
    ret
}
