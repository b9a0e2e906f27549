/// Constructs a `Selection` from per-axis selectors, in the same way that a
/// NumPy array is indexed.
///
/// Each selector may be anything that converts into an `AxisSel`: an integer,
/// a range, or a `Slice`.
///
/// # Examples
///
/// ```
/// # use ndblocks_core::prelude::*;
/// # use ndblocks_core::sel;
/// let a: NdArray<Item> = NdArray::new(&[6, 5]);
/// let view = a.view(sel![-2.., Slice::stepped(.., 2)]).unwrap();
/// assert_eq!(&[2, 3], view.dims());
/// assert_eq!(&[4, 2], view.get(sel![0, 1]).unwrap().index());
/// ```
#[macro_export]
macro_rules! sel {
    () => {
        $crate::selector::Selection::all()
    };
    ($($axis:expr),+ $(,)?) => {
        $crate::selector::Selection::from(vec![
            $($crate::selector::AxisSel::from($axis)),+
        ])
    };
}
