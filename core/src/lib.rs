//! N-dimensional arrays of colored blocks, with views, copies, and NumPy-style
//! slicing, plus 2D grids that render to HTML and plain text.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

#[macro_use]
mod macros;
pub mod attrs;
pub mod color;
pub mod config;
pub mod errors;
pub mod grid;
mod html;
pub mod io;
pub mod item;
pub mod ndarray;
pub mod selector;
pub mod swatch;

pub mod prelude {
    //! Commonly used types.

    pub use crate::attrs::{AttrValue, Attributes};
    pub use crate::color::{Rgb, BLACK, WHITE};
    pub use crate::config::GridConfig;
    pub use crate::errors::{BlocksError, BlocksResult, ErrorKind};
    pub use crate::grid::{Grid, GridSelection};
    pub use crate::io::{export_grid_to_string, Format};
    pub use crate::item::Item;
    pub use crate::ndarray::{Element, ItemRef, NdArray, Selected};
    pub use crate::selector::{AxisSel, Selection, Slice};
    pub use crate::swatch::{Block, Swatch};
}
