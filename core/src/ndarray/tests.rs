use proptest::prelude::*;
use std::collections::HashSet;

use super::*;
use crate::errors::ErrorKind;

type Dummy = Item<Option<i32>>;

fn basic_array() -> NdArray<Dummy> {
    NdArray::new(&[6, 5])
}

fn coords<T>(array: &NdArray<Item<T>>) -> Vec<(Option<usize>, Option<usize>)> {
    array.iter().map(|item| (item.row(), item.col())).collect()
}

#[test]
fn test_ndarray_basic_api() {
    let ba = basic_array();
    assert_eq!(5, ba.width());
    assert_eq!(6, ba.height());
    assert_eq!((5, 6), ba.shape());
    assert_eq!(&[6, 5], ba.dims());
    assert_eq!(30, ba.len());
    assert!(ba.row_major());
    assert!(!ba.is_view());
}

#[test]
fn test_ndarray_column_major() {
    let a: NdArray<Item> = NdArray::with_order(&[5, 6], false);
    assert_eq!((5, 6), a.shape());
    let item = a.get((4, 1)).unwrap();
    assert_eq!(&[4, 1], item.index());
    assert_eq!(Some(1), item.row());
    assert_eq!(Some(4), item.col());
    assert!(a.to_text().contains(&format!("# row-major{}False{}", LINE_SEP, LINE_SEP)));
}

#[test]
fn test_ndarray_view_aliases_parent() {
    let ba = basic_array();
    let na = ba.view((..2, ..2)).unwrap();
    assert!(na.is_view());
    assert!(na.shares_storage(&ba));

    **na.get_mut((1, 1)).unwrap() = Some(5);
    assert_eq!(Some(5), **na.get((1, 1)).unwrap());
    assert_eq!(Some(5), **ba.get((1, 1)).unwrap());

    // Sibling views covering the same cell see the write too.
    let other = ba.view((1.., 1..)).unwrap();
    assert_eq!(Some(5), **other.get((0, 0)).unwrap());

    // And writes through the parent show up in the view.
    **ba.get_mut((0, 1)).unwrap() = Some(7);
    assert_eq!(Some(7), **na.get((0, 1)).unwrap());
}

#[test]
fn test_ndarray_nested_views() {
    let ba = basic_array();
    let inner = ba
        .view((1.., 1..))
        .unwrap()
        .view((Slice::stepped(.., 2), -1))
        .unwrap();
    assert_eq!(&[3], inner.dims());
    let rows = inner.iter().map(|item| item.index().to_vec()).collect::<Vec<_>>();
    assert_eq!(vec![vec![1, 4], vec![3, 4], vec![5, 4]], rows);

    inner.assign(1, Item::new(&[9, 9], true, Some(1))).unwrap();
    assert_eq!(Some(1), **ba.get((3, 4)).unwrap());
    assert_eq!(vec![3, 4], inner.item(1).unwrap().storage_index());
    // The stored item takes the coordinate of its slot.
    assert_eq!(&[3, 4], ba.get((3, 4)).unwrap().index());
    assert_eq!(Some(3), ba.get((3, 4)).unwrap().row());
}

#[test]
fn test_ndarray_iter() {
    let ba: NdArray<Item> = NdArray::new(&[2, 2]);
    let expected = vec![
        (Some(0), Some(0)),
        (Some(0), Some(1)),
        (Some(1), Some(0)),
        (Some(1), Some(1)),
    ];
    assert_eq!(expected, coords(&ba));
    // Iteration is restartable.
    assert_eq!(expected, coords(&ba));

    let positions = ba.iter_enumerated().map(|(pos, _)| pos).collect::<Vec<_>>();
    assert_eq!(vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]], positions);
}

#[test]
fn test_ndarray_outer_iter() {
    let ba = basic_array();
    let rows = ba.outer_iter().collect::<Vec<_>>();
    assert_eq!(6, rows.len());
    for (r, row) in rows.iter().enumerate() {
        assert_eq!(&[5], row.dims());
        for (c, item) in row.iter().enumerate() {
            assert_eq!((Some(r), Some(c)), (item.row(), item.col()));
        }
    }
}

#[test]
fn test_ndarray_view_coords() {
    let na = basic_array().view((-2.., -2..)).unwrap();
    let expected = vec![
        (Some(4), Some(3)),
        (Some(4), Some(4)),
        (Some(5), Some(3)),
        (Some(5), Some(4)),
    ];
    assert_eq!(expected, coords(&na));
}

#[test]
fn test_ndarray_copy() {
    let ba = basic_array();
    let na = ba.view((-2.., -2..)).unwrap().copy();
    assert!(!na.is_view());
    assert!(!na.shares_storage(&ba));

    **na.get_mut((1, 1)).unwrap() = Some(5);
    assert_eq!(Some(5), **na.get((1, 1)).unwrap());
    assert_eq!(None, **ba.get((5, 4)).unwrap());

    // Copied items are relocated into the new array.
    let expected = vec![
        (Some(0), Some(0)),
        (Some(0), Some(1)),
        (Some(1), Some(0)),
        (Some(1), Some(1)),
    ];
    assert_eq!(expected, coords(&na));

    // Mutating the source does not affect the copy.
    ba.fill(Item::new(&[], true, Some(3)));
    assert_eq!(Some(5), **na.get((1, 1)).unwrap());
    assert_eq!(None, **na.get((0, 0)).unwrap());
    assert_eq!(Some(3), **ba.get((5, 4)).unwrap());
    assert_eq!(coords(&basic_array()), coords(&ba));
}

#[test]
fn test_ndarray_str() {
    let s = format!("NdArray{}Shape: (6, 5)", LINE_SEP);
    assert_eq!(s, basic_array().to_string());
}

#[test]
fn test_ndarray_bad_index() {
    let ba = basic_array();

    let err = ba.select((1, 2, 3, 4)).unwrap_err();
    assert_eq!(BlocksError::TooManyIndices { ndim: 2, got: 4 }, err);
    assert_eq!(ErrorKind::Index, err.kind());

    let err = "{4: 5}".parse::<Selection>().unwrap_err();
    assert_eq!(ErrorKind::Index, err.kind());

    let err = "1,".parse::<Selection>().unwrap_err();
    assert_eq!(ErrorKind::Type, err.kind());

    let err = ba.select((6, 0)).unwrap_err();
    assert_eq!(BlocksError::IndexOutOfBounds { index: 6, len: 6 }, err);
    assert_eq!(ErrorKind::Index, ba.select((0, -6)).unwrap_err().kind());

    let err = ba.get(1).unwrap_err();
    assert_eq!(ErrorKind::Index, err.kind());

    assert_eq!(
        Err(BlocksError::BadStep(0)),
        ba.view(Slice::stepped(.., 0)).map(|_| ()),
    );
}

#[test]
fn test_ndarray_select() {
    let ba = basic_array();

    // single item
    let item = ba.select((1, 2)).unwrap().into_item().unwrap();
    assert_eq!(Some(1), item.borrow().row());
    assert_eq!(Some(2), item.borrow().col());

    let view_dims = |sel: Selection| ba.select(sel).unwrap().into_view().unwrap().dims().to_vec();

    // single row
    assert_eq!(vec![5], view_dims(2.into()));
    // two rows
    assert_eq!(vec![2, 5], view_dims((1..3).into()));
    // one row via a slice
    assert_eq!(vec![5], view_dims((2, ..).into()));
    // one column
    assert_eq!(vec![6], view_dims((.., 2).into()));
    // 2 x 2 subarray
    assert_eq!(vec![2, 2], view_dims((..2, ..2).into()));
    // strided slicing
    assert_eq!(
        vec![2, 2],
        view_dims((Slice::stepped(.., 3), Slice::stepped(.., 3)).into()),
    );
    // one row / one column with a -1 index
    assert_eq!(vec![5], view_dims((-1, ..).into()));
    assert_eq!(vec![3], view_dims((1..4, -1).into()));

    let last_row = ba.view((-1, ..)).unwrap();
    assert!(last_row.iter().all(|item| item.row() == Some(5)));
    let last_col = ba.view((1..4, -1)).unwrap();
    assert!(last_col.iter().all(|item| item.col() == Some(4)));

    // everything
    assert_eq!(vec![6, 5], view_dims(Selection::all()));
}

#[test]
fn test_ndarray_assign() {
    let fresh = || NdArray::from_fn(&[6, 5], true, |_| String::from("old"));
    let value = String::from("new");
    let count_new = |a: &NdArray<String>| a.iter().filter(|s| **s == "new").count();

    // single item
    let ba = fresh();
    ba.assign((0, 0), value.clone()).unwrap();
    assert_eq!("new", *ba.get((0, 0)).unwrap());
    assert_eq!(1, count_new(&ba));

    let cases: Vec<(Selection, usize)> = vec![
        // single row
        (2.into(), 5),
        // two rows
        ((3..5).into(), 10),
        // one row via a slice
        ((1, ..).into(), 5),
        // one column
        ((.., 4).into(), 6),
        // 2 x 2 subarray
        ((..2, ..2).into(), 4),
        // strided slicing
        ((Slice::stepped(.., 3), Slice::stepped(.., 3)).into(), 4),
    ];
    for (sel, expected) in cases {
        let ba = fresh();
        ba.assign(sel.clone(), value.clone()).unwrap();
        let view = ba.view(sel).unwrap();
        assert!(view.iter().all(|s| *s == "new"));
        assert_eq!(expected, count_new(&ba));
    }

    // Errors leave the array unchanged.
    let ba = fresh();
    assert!(ba.assign((1, 2, 3), value).is_err());
    assert_eq!(0, count_new(&ba));
}

#[test]
fn test_ndarray_to_text() {
    let ba: NdArray<Item> = NdArray::new(&[1, 2]);
    let expected = [
        "# shape (..., height, width)",
        "1 2",
        "# row-major",
        "True",
        "# index data",
        "0 0",
        "0 1",
    ]
    .join(LINE_SEP)
        + LINE_SEP;
    assert_eq!(expected, ba.to_text());

    // Views report storage coordinates.
    let view = basic_array().view((-1, Slice::stepped(.., 2))).unwrap();
    let expected = [
        "# shape (..., height, width)",
        "3",
        "# row-major",
        "True",
        "# index data",
        "5 0",
        "5 2",
        "5 4",
    ]
    .join(LINE_SEP)
        + LINE_SEP;
    assert_eq!(expected, view.to_text());
}

#[test]
fn test_ndarray_huge_step() {
    let ba = basic_array();
    let sel: Selection = "::9223372036854775807".parse().unwrap();
    let view = ba.view(sel).unwrap();
    assert_eq!(&[1, 5], view.dims());
    assert_eq!(&[0, 3], view.get((0, 3)).unwrap().index());

    let sel: Selection = "-2:, 1::9223372036854775807".parse().unwrap();
    let view = ba.view(sel).unwrap();
    assert_eq!(&[2, 1], view.dims());
    assert_eq!(&[5, 1], view.get((1, 0)).unwrap().index());
}

#[test]
fn test_ndarray_higher_dims() {
    let a: NdArray<Item> = NdArray::new(&[2, 3, 4]);
    assert_eq!((4, 3), a.shape());
    assert_eq!(24, a.len());

    let plane = a.view(1).unwrap();
    assert_eq!(&[3, 4], plane.dims());
    assert_eq!(&[1, 2, 3], plane.get((2, 3)).unwrap().index());

    let pillar = a.view((.., 1, -1)).unwrap();
    let indices = pillar.iter().map(|i| i.index().to_vec()).collect::<Vec<_>>();
    assert_eq!(vec![vec![0, 1, 3], vec![1, 1, 3]], indices);

    let item = a.get((-1, -1, -1)).unwrap();
    assert_eq!((Some(2), Some(3)), (item.row(), item.col()));
}

#[test]
fn test_ndarray_empty() {
    let a: NdArray<Item> = NdArray::new(&[0, 3]);
    assert!(a.is_empty());
    assert_eq!(0, a.iter().count());
    assert_eq!(&[0, 2], a.view((.., 1..)).unwrap().dims());
    assert!(a.select((0, 0)).is_err());
}

proptest! {
    /// Tests that a fresh array has one item per coordinate, in row-major
    /// order.
    #[test]
    fn test_ndarray_fresh_items(h in 0..8_usize, w in 0..8_usize) {
        let a: NdArray<Item> = NdArray::new(&[h, w]);
        let indices: Vec<Vec<usize>> = a.iter().map(|item| item.index().to_vec()).collect();
        assert_eq!(h * w, indices.len());
        let unique: HashSet<&Vec<usize>> = indices.iter().collect();
        assert_eq!(h * w, unique.len());
        let mut expected = vec![];
        for r in 0..h {
            for c in 0..w {
                expected.push(vec![r, c]);
            }
        }
        assert_eq!(expected, indices);
    }

    /// Tests that negative indices and slice bounds select the same items as
    /// their positive equivalents.
    #[test]
    fn test_ndarray_negative_equivalence(
        h in 1..8_isize,
        w in 1..8_isize,
        r in 0..8_isize,
        c in 0..8_isize,
    ) {
        let r = r % h;
        let c = c % w;
        let a: NdArray<Item> = NdArray::new(&[h as usize, w as usize]);

        let pos = a.get((r, c)).unwrap().index().to_vec();
        let neg = a.get((r - h, c - w)).unwrap().index().to_vec();
        assert_eq!(pos, neg);

        let pos_view = a.view((r.., c..)).unwrap();
        let neg_view = a.view((r - h.., c - w..)).unwrap();
        assert_eq!(coords(&pos_view), coords(&neg_view));
    }

    /// Tests that writes through a view are visible in the parent, and that
    /// copies do not alias.
    #[test]
    fn test_ndarray_aliasing(
        start in 0..4_isize,
        step in 1..3_isize,
        i in 0..4_usize,
    ) {
        let a: NdArray<Dummy> = NdArray::new(&[6, 6]);
        let view = a.view((Slice::stepped(start.., step), start)).unwrap();
        prop_assume!(i < view.len());
        let copy = view.copy();

        **view.get_mut(i as isize).unwrap() = Some(42);
        let r = start as usize + i * step as usize;
        assert_eq!(Some(42), **a.get((r, start as usize)).unwrap());
        assert_eq!(None, **copy.get(i as isize).unwrap());
    }

    /// Tests that assigning to a range broadcasts to exactly the items in the
    /// range.
    #[test]
    fn test_ndarray_broadcast(
        r0 in -6..6_isize,
        r1 in -6..6_isize,
        step in 1..4_isize,
    ) {
        let a = NdArray::from_fn(&[6, 5], true, |_| 0_u8);
        let sel = (Slice::new(Some(r0), Some(r1), step), ..);
        let expected = a.view(sel).unwrap().len();
        a.assign(sel, 1).unwrap();
        assert_eq!(expected, a.iter().filter(|x| **x == 1).count());
        assert!(a.view(sel).unwrap().iter().all(|x| *x == 1));
    }

    /// Tests that every item keeps the coordinate of its slot after items
    /// are assigned or broadcast into the array.
    #[test]
    fn test_ndarray_assign_keeps_coords(
        r0 in -6..6_isize,
        r1 in -6..6_isize,
        step in 1..4_isize,
        c in -5..5_isize,
        single in any::<bool>(),
    ) {
        let a: NdArray<Dummy> = NdArray::new(&[6, 5]);
        let stray = Item::new(&[9, 9, 9], true, Some(1));
        if single {
            a.assign((r0, c), stray).unwrap();
        } else {
            let sel = Selection::from((Slice::new(Some(r0), Some(r1), step), c..));
            a.assign(sel.clone(), stray.clone()).unwrap();
            if let Ok(last_row) = a.view(sel).unwrap().view(-1) {
                last_row.fill(stray);
            }
        }
        for (pos, item) in a.iter_enumerated() {
            assert_eq!(&pos[..], item.index());
        }
        assert_eq!(coords(&basic_array()), coords(&a));
    }
}
