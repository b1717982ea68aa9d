#![forbid(unsafe_code)]

//! Selection grid state.
//!
//! [`SelectionGrid`] is the single source of truth for which cells are
//! selected and which are highlighted by an in-progress drag. Renderers read
//! it; only the drag and click controllers write it.
//!
//! # Invariants
//!
//! 1. The cell vector always holds exactly `rows * cols` entries, row-major.
//! 2. `selected` and `highlighted` are independent flags.
//! 3. After [`SelectionGrid::commit_highlight_to_selection`] or
//!    [`SelectionGrid::clear_highlights`] no cell is highlighted.
//! 4. Every indexed access is bounds-checked; out-of-range indices yield
//!    [`GridError::IndexOutOfRange`] and leave the grid untouched.

use std::fmt;

use bitflags::bitflags;

use crate::shape::GridShape;

bitflags! {
    /// Per-cell state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Part of the user's chosen subset.
        const SELECTED = 0b01;
        /// Intersects the in-progress drag rectangle.
        const HIGHLIGHTED = 0b10;
    }
}

/// Position of a cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    /// Create a cell index.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only snapshot of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub selected: bool,
    pub highlighted: bool,
}

impl From<CellFlags> for Cell {
    fn from(flags: CellFlags) -> Self {
        Self {
            selected: flags.contains(CellFlags::SELECTED),
            highlighted: flags.contains(CellFlags::HIGHLIGHTED),
        }
    }
}

/// Grid access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The index lies outside the current dimensions.
    IndexOutOfRange { index: CellIndex, shape: GridShape },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, shape } => {
                write!(f, "cell {index} is outside grid {shape}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The `rows x cols` matrix of cell flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionGrid {
    shape: GridShape,
    cells: Vec<CellFlags>,
}

impl SelectionGrid {
    /// Create a grid with every cell cleared.
    ///
    /// The caller is responsible for keeping `rows * cols` allocatable; see
    /// [`crate::shape::parse_shape_with_limit`].
    #[must_use]
    pub fn new(shape: GridShape) -> Self {
        let mut grid = Self::default();
        grid.reset(shape);
        grid
    }

    /// Replace the matrix with fresh cells, discarding all prior state.
    ///
    /// A shape whose cell count overflows `usize` resets to the empty grid.
    pub fn reset(&mut self, shape: GridShape) {
        let (shape, len) = match shape.cell_count() {
            Some(len) => (shape, len),
            None => (GridShape::default(), 0),
        };
        self.shape = shape;
        self.cells.clear();
        self.cells.resize(len, CellFlags::empty());
    }

    /// Current dimensions.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when the index addresses a cell of the current grid.
    #[must_use]
    pub const fn contains(&self, index: CellIndex) -> bool {
        index.row < self.shape.rows && index.col < self.shape.cols
    }

    fn offset(&self, index: CellIndex) -> Result<usize, GridError> {
        if self.contains(index) {
            Ok(index.row * self.shape.cols + index.col)
        } else {
            Err(GridError::IndexOutOfRange {
                index,
                shape: self.shape,
            })
        }
    }

    fn index_at(&self, offset: usize) -> CellIndex {
        CellIndex::new(offset / self.shape.cols, offset % self.shape.cols)
    }

    /// Raw flags of a cell.
    pub fn flags(&self, index: CellIndex) -> Result<CellFlags, GridError> {
        self.offset(index).map(|i| self.cells[i])
    }

    /// Snapshot of a cell.
    pub fn cell(&self, index: CellIndex) -> Result<Cell, GridError> {
        self.flags(index).map(Cell::from)
    }

    /// Whether a cell is selected.
    pub fn is_selected(&self, index: CellIndex) -> Result<bool, GridError> {
        self.flags(index).map(|f| f.contains(CellFlags::SELECTED))
    }

    /// Whether a cell is highlighted.
    pub fn is_highlighted(&self, index: CellIndex) -> Result<bool, GridError> {
        self.flags(index).map(|f| f.contains(CellFlags::HIGHLIGHTED))
    }

    /// Flip `selected` on one cell and return the new value.
    pub fn toggle_selected(&mut self, index: CellIndex) -> Result<bool, GridError> {
        let i = self.offset(index)?;
        self.cells[i].toggle(CellFlags::SELECTED);
        Ok(self.cells[i].contains(CellFlags::SELECTED))
    }

    /// Set `highlighted` on one cell.
    pub fn set_highlighted(&mut self, index: CellIndex, value: bool) -> Result<(), GridError> {
        let i = self.offset(index)?;
        self.cells[i].set(CellFlags::HIGHLIGHTED, value);
        Ok(())
    }

    /// Turn every highlighted cell into a selected one and clear all
    /// highlights. Returns the number of cells that were highlighted.
    ///
    /// Applies to the whole grid, so highlight left behind by an aborted
    /// gesture is swept up as well.
    pub fn commit_highlight_to_selection(&mut self) -> usize {
        let mut committed = 0;
        for flags in &mut self.cells {
            if flags.contains(CellFlags::HIGHLIGHTED) {
                flags.remove(CellFlags::HIGHLIGHTED);
                flags.insert(CellFlags::SELECTED);
                committed += 1;
            }
        }
        committed
    }

    /// Clear every highlight without selecting. Returns how many were cleared.
    pub fn clear_highlights(&mut self) -> usize {
        let mut cleared = 0;
        for flags in &mut self.cells {
            if flags.contains(CellFlags::HIGHLIGHTED) {
                flags.remove(CellFlags::HIGHLIGHTED);
                cleared += 1;
            }
        }
        cleared
    }

    /// Deselect every cell.
    pub fn clear_selection(&mut self) {
        for flags in &mut self.cells {
            flags.remove(CellFlags::SELECTED);
        }
    }

    /// Number of selected cells.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.count(CellFlags::SELECTED)
    }

    /// Number of highlighted cells.
    #[must_use]
    pub fn highlighted_count(&self) -> usize {
        self.count(CellFlags::HIGHLIGHTED)
    }

    fn count(&self, flag: CellFlags) -> usize {
        self.cells.iter().filter(|f| f.contains(flag)).count()
    }

    /// All indices in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.cells.len()).map(|i| self.index_at(i))
    }

    /// Indices paired with cell snapshots, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, flags)| (self.index_at(i), Cell::from(*flags)))
    }

    /// Indices of the selected cells, row-major.
    #[must_use]
    pub fn selected_indices(&self) -> Vec<CellIndex> {
        self.iter()
            .filter(|(_, cell)| cell.selected)
            .map(|(index, _)| index)
            .collect()
    }
}
