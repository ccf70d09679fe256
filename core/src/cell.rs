use serde::{Deserialize, Serialize};

/// Player-visible state stored by the engine for every cell.
///
/// Transitions are `Hidden -> Revealed` (final) and `Hidden <-> Flagged`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Full view of a cell, including whether it holds a mine.
///
/// Meant for tests and end-of-game review; renderers should use [`CellView`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub state: CellState,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Redacts the cell for display: mines stay secret until revealed.
    pub const fn view(self) -> CellView {
        match (self.state, self.is_mine) {
            (CellState::Hidden, _) => CellView::Hidden,
            (CellState::Flagged, _) => CellView::Flagged,
            (CellState::Revealed, true) => CellView::Mine,
            (CellState::Revealed, false) => CellView::Revealed(self.adjacent_mines),
        }
    }
}

/// What a presentation layer is allowed to see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
