//! Iterators over positions and items in an `NdArray`.

use std::cell::Ref;
use std::iter::FusedIterator;

use super::NdArray;

/// Iterator over every position in an array of the given dimensions, in
/// row-major order (last axis fastest).
#[derive(Debug, Clone)]
pub struct Positions {
    dims: Box<[usize]>,
    next: Option<Vec<usize>>,
}
impl Positions {
    /// Creates an iterator over all positions in an array with dimensions
    /// `dims`. If any dimension is zero, there are no positions.
    pub fn new(dims: &[usize]) -> Self {
        let next = if dims.contains(&0) {
            None
        } else {
            Some(vec![0; dims.len()])
        };
        Self {
            dims: dims.into(),
            next,
        }
    }
}
impl Iterator for Positions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let ret = self.next.clone();
        if let Some(next) = &mut self.next {
            for ax in (0..self.dims.len()).rev() {
                // Increment this axis.
                next[ax] += 1;
                // If this axis overflows ...
                if next[ax] >= self.dims[ax] {
                    // ... then reset it and increment the previous axis.
                    next[ax] = 0;
                } else {
                    // If not, then we advanced along this axis with no
                    // overflow.
                    return ret;
                }
            }
            // Overflowed on every axis.
            self.next = None;
        }
        ret
    }
}
impl FusedIterator for Positions {}

/// Iterator over the items addressed by an array or view, in row-major order.
///
/// Each item is borrowed from the shared storage as it is yielded, so the
/// storage must not be mutably borrowed until the yielded references are
/// dropped.
#[derive(Debug)]
pub struct Iter<'a, T> {
    array: &'a NdArray<T>,
    positions: Positions,
}
impl<'a, T> Iter<'a, T> {
    pub(super) fn new(array: &'a NdArray<T>) -> Self {
        let positions = Positions::new(array.dims());
        Self { array, positions }
    }
}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Ref<'a, T>;

    fn next(&mut self) -> Option<Ref<'a, T>> {
        let pos = self.positions.next()?;
        Some(self.array.borrow_flat(self.array.map.flat(&pos)))
    }
}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a NdArray<T> {
    type Item = Ref<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order() {
        let expected = vec![
            vec![0, 0, 0],
            vec![0, 0, 1],
            vec![0, 1, 0],
            vec![0, 1, 1],
            vec![0, 2, 0],
            vec![0, 2, 1],
            vec![1, 0, 0],
            vec![1, 0, 1],
            vec![1, 1, 0],
            vec![1, 1, 1],
            vec![1, 2, 0],
            vec![1, 2, 1],
        ];
        assert_eq!(expected, Positions::new(&[2, 3, 2]).collect::<Vec<_>>());
    }

    #[test]
    fn test_positions_degenerate() {
        assert_eq!(0, Positions::new(&[3, 0, 2]).count());
        // A zero-dimensional array has exactly one position.
        assert_eq!(vec![Vec::<usize>::new()], Positions::new(&[]).collect::<Vec<_>>());

        let mut it = Positions::new(&[1]);
        assert_eq!(Some(vec![0]), it.next());
        assert_eq!(None, it.next());
        assert_eq!(None, it.next());
    }
}
