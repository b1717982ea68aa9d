#![forbid(unsafe_code)]

//! Single-cell click toggling.

use cellpick_core::{debug, error};

use crate::grid::{CellIndex, GridError, SelectionGrid};

/// Default travel, in surface units, below which a press+release is a click.
pub const DEFAULT_CLICK_THRESHOLD: u32 = 3;

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The cell's selection flipped to `selected`.
    Toggled { index: CellIndex, selected: bool },
    /// The click closed a drag gesture and was not applied.
    SuppressedAfterDrag { index: CellIndex, travel: u32 },
    /// The index is not in the grid; nothing changed.
    OutOfRange(GridError),
}

/// Toggles `selected` on clicked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellClickController {
    threshold: u32,
}

impl Default for CellClickController {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_THRESHOLD)
    }
}

impl CellClickController {
    /// Create a controller with the given drag travel threshold.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Travel above which a click is treated as the end of a drag.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True when a gesture with this travel still counts as a click.
    #[must_use]
    pub const fn is_click(&self, travel: u32) -> bool {
        travel <= self.threshold
    }

    /// Handle a click on `index`.
    ///
    /// `drag_travel` is the travel of the gesture that produced the click, or
    /// `None` for a plain click.
    pub fn on_cell_click(
        &self,
        grid: &mut SelectionGrid,
        index: CellIndex,
        drag_travel: Option<u32>,
    ) -> ClickOutcome {
        if let Some(travel) = drag_travel.filter(|&travel| !self.is_click(travel)) {
            debug!(%index, travel, "click suppressed after drag");
            return ClickOutcome::SuppressedAfterDrag { index, travel };
        }
        match grid.toggle_selected(index) {
            Ok(selected) => {
                debug!(%index, selected, "cell toggled");
                ClickOutcome::Toggled { index, selected }
            }
            Err(err) => {
                error!(error = %err, "click outside grid");
                ClickOutcome::OutOfRange(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::GridShape;

    fn grid() -> SelectionGrid {
        SelectionGrid::new(GridShape::new(2, 2))
    }

    #[test]
    fn plain_click_toggles() {
        let mut g = grid();
        let ctl = CellClickController::default();
        let idx = CellIndex::new(1, 0);
        assert_eq!(
            ctl.on_cell_click(&mut g, idx, None),
            ClickOutcome::Toggled {
                index: idx,
                selected: true
            }
        );
        assert_eq!(g.is_selected(idx), Ok(true));
        assert_eq!(
            ctl.on_cell_click(&mut g, idx, None),
            ClickOutcome::Toggled {
                index: idx,
                selected: false
            }
        );
        assert_eq!(g.selected_count(), 0);
    }

    #[test]
    fn travel_at_threshold_is_still_a_click() {
        let mut g = grid();
        let ctl = CellClickController::new(3);
        let idx = CellIndex::new(0, 0);
        assert!(matches!(
            ctl.on_cell_click(&mut g, idx, Some(3)),
            ClickOutcome::Toggled { selected: true, .. }
        ));
    }

    #[test]
    fn click_after_drag_is_suppressed() {
        let mut g = grid();
        let ctl = CellClickController::new(3);
        let idx = CellIndex::new(0, 1);
        assert_eq!(
            ctl.on_cell_click(&mut g, idx, Some(4)),
            ClickOutcome::SuppressedAfterDrag {
                index: idx,
                travel: 4
            }
        );
        assert_eq!(g.selected_count(), 0);
    }

    #[test]
    fn out_of_range_is_contained() {
        let mut g = grid();
        let before = g.clone();
        let ctl = CellClickController::default();
        let outcome = ctl.on_cell_click(&mut g, CellIndex::new(5, 5), None);
        assert!(matches!(
            outcome,
            ClickOutcome::OutOfRange(GridError::IndexOutOfRange { .. })
        ));
        assert_eq!(g, before);
    }

    #[test]
    fn zero_threshold_only_accepts_stationary_clicks() {
        let ctl = CellClickController::new(0);
        assert!(ctl.is_click(0));
        assert!(!ctl.is_click(1));
    }
}
