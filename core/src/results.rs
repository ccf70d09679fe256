use alloc::string::String;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Summary of a finished game for the results screen.
///
/// `elapsed` comes from the caller's timer; the engine does not track time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResults {
    pub player_name: String,
    pub elapsed: Duration,
    pub mines_found: CellCount,
    pub total_mines: CellCount,
    pub won: bool,
}

impl GameResults {
    /// `None` while the game is still in progress.
    ///
    /// A won game counts every mine as found; a lost one counts the mines flagged before the loss.
    pub fn from_engine<G>(
        engine: &MinefieldEngine<G>,
        player_name: impl Into<String>,
        elapsed: Duration,
    ) -> Option<Self> {
        let won = match engine.outcome() {
            GameOutcome::InProgress => return None,
            GameOutcome::Won => true,
            GameOutcome::Lost => false,
        };
        let mines_found = if won {
            engine.total_mines()
        } else {
            engine.correct_flag_count()
        };

        Some(Self {
            player_name: player_name.into(),
            elapsed,
            mines_found,
            total_mines: engine.total_mines(),
            won,
        })
    }
}
