use alloc::string::{String, ToString};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Presentation-safe copy of a board, taken after a move.
///
/// Unrevealed mines are indistinguishable from unrevealed safe cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub total_mines: CellCount,
    pub remaining_mines: isize,
    pub outcome: GameOutcome,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_engine<G>(engine: &MinefieldEngine<G>) -> Self {
        Self {
            size: engine.size(),
            total_mines: engine.total_mines(),
            remaining_mines: engine.remaining_mines(),
            outcome: engine.outcome(),
            cells: engine.cells().map(|cell| cell.view()),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        GameConfig::new_unchecked(self.size, self.total_mines).validate()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| GameError::Malformed(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|err| GameError::Malformed(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl<G> From<&MinefieldEngine<G>> for BoardSnapshot {
    fn from(engine: &MinefieldEngine<G>) -> Self {
        Self::from_engine(engine)
    }
}
