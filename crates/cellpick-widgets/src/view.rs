#![forbid(unsafe_code)]

//! Pure render projection of the selection widget.
//!
//! A [`GridView`] is rebuilt from state on demand and never written back.
//! The text form is a compact grid:
//!
//! ```text
//! .#.
//! +*.
//! ```
//!
//! `.` plain, `#` selected, `+` highlighted, `*` both.

use std::fmt;

use cellpick_core::geometry::Rect;

use crate::grid::{Cell, CellIndex, SelectionGrid};

/// Visual state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVisual {
    pub index: CellIndex,
    pub selected: bool,
    pub highlighted: bool,
}

impl CellVisual {
    fn new(index: CellIndex, cell: Cell) -> Self {
        Self {
            index,
            selected: cell.selected,
            highlighted: cell.highlighted,
        }
    }

    /// Style classes for the cell, base class first.
    #[must_use]
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["cell"];
        if self.selected {
            classes.push("selected");
        }
        if self.highlighted {
            classes.push("highlighted");
        }
        classes
    }

    fn glyph(self) -> char {
        match (self.selected, self.highlighted) {
            (false, false) => '.',
            (true, false) => '#',
            (false, true) => '+',
            (true, true) => '*',
        }
    }
}

/// Everything a renderer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub rows: usize,
    pub cols: usize,
    /// Row-major.
    pub cells: Vec<CellVisual>,
    /// Drag rectangle in surface coordinates, while dragging.
    pub overlay: Option<Rect>,
    pub shape_text: String,
    pub shape_invalid: bool,
    pub command_text: String,
}

impl GridView {
    pub(crate) fn project(grid: &SelectionGrid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: grid
                .iter()
                .map(|(index, cell)| CellVisual::new(index, cell))
                .collect(),
            overlay: None,
            shape_text: String::new(),
            shape_invalid: false,
            command_text: String::new(),
        }
    }

    /// Visual state at `index`.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Option<&CellVisual> {
        if index.row >= self.rows || index.col >= self.cols {
            return None;
        }
        self.cells.get(index.row * self.cols + index.col)
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
