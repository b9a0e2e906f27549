//! HTML rendering of blocks and grids.
//!
//! Output is a single self-contained `<table>` fragment with inline styles,
//! suitable for embedding in a notebook-style host.

use itertools::Itertools;
use uuid::Uuid;

use crate::grid::Grid;
use crate::swatch::Block;

/// Width of the gridlines drawn between blocks, in pixels.
const LINE_WIDTH: usize = 1;

const TABLE_STYLE: &str = "table.blockgrid {border: none;} \
                           .blockgrid tr {border: none;} \
                           .blockgrid td {padding: 0px;}";

/// Returns a fresh DOM id for a table, so that the border rule of one table
/// does not apply to another on the same page.
fn fresh_table_id() -> String {
    format!("blocks{}", Uuid::new_v4().simple())
}

/// Wraps table rows in a `<table>`. If `id` is given, the table carries that
/// id and a style rule drawing white lines between its cells.
fn table(id: Option<&str>, rows: &str) -> String {
    match id {
        Some(id) => format!(
            "<style type=\"text/css\">{} #{} td {{border: {}px solid white;}}</style>\
             <table id=\"{}\" class=\"blockgrid\"><tbody>{}</tbody></table>",
            TABLE_STYLE, id, LINE_WIDTH, id, rows,
        ),
        None => format!(
            "<style type=\"text/css\">{}</style>\
             <table class=\"blockgrid\"><tbody>{}</tbody></table>",
            TABLE_STYLE, rows,
        ),
    }
}

fn tr(cells: &str) -> String {
    format!("<tr>{}</tr>", cells)
}

fn td(block: &Block) -> String {
    let index = block.index_string().unwrap_or_default();
    let (r, g, b) = block.rgb().to_tuple();
    format!(
        "<td title=\"Index: [{}]&#10;Color: ({}, {}, {})\" \
         style=\"width: {}px; height: {}px; background-color: {};\"></td>",
        index,
        r,
        g,
        b,
        block.size,
        block.size,
        block.rgb(),
    )
}

impl Block {
    /// Renders the block alone as a one-cell table.
    pub fn to_html(&self) -> String {
        table(None, &tr(&td(self)))
    }
}

impl Grid {
    /// Renders the grid as a table with one row per grid row. If lines are
    /// on, the table gets a unique id so that its border rule applies to it
    /// alone.
    pub fn to_html(&self) -> String {
        let rows = self
            .rows()
            .map(|row| tr(&row.iter().map(|block| td(&block)).join("")))
            .join("");
        if self.lines_on() {
            table(Some(&fresh_table_id()), &rows)
        } else {
            table(None, &rows)
        }
    }
}
