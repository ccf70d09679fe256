use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for new games and resets.
pub trait MinefieldGenerator {
    /// Places `config.mines` mines on a `config.size` board.
    ///
    /// Fails with [`GameError::InvalidConfiguration`] instead of looping when the board cannot hold
    /// the requested mines plus one safe cell.
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}
