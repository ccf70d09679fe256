use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

/// Board simulation for a single game.
///
/// All entry points are total: out-of-range coordinates, moves on cells that cannot change and
/// moves after the game ended are reported as `NoChange` and leave every piece of state untouched.
#[derive(Clone, Debug)]
pub struct MinefieldEngine<G = RandomMinefieldGenerator> {
    generator: G,
    mine_layout: MineLayout,
    board: Array2<CellState>,
    /// Safe cells revealed so far.
    revealed_count: CellCount,
    flagged_count: CellCount,
    /// Flags sitting on mines, frozen once the game ends.
    correct_flags: CellCount,
    remaining_mines: isize,
    outcome: GameOutcome,
    triggered_mine: Option<Coord2>,
}

impl MinefieldEngine<RandomMinefieldGenerator> {
    /// New game with mines placed from an entropy-seeded generator.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::from_entropy())
    }

    /// New game whose layouts, including those of later resets, are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    /// New game on a fixed layout; resets fall back to random placement with the same config.
    pub fn with_layout(mine_layout: MineLayout) -> Self {
        Self::with_layout_and_generator(mine_layout, RandomMinefieldGenerator::from_entropy())
    }
}

impl<G: MinefieldGenerator> MinefieldEngine<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        let mine_layout = generator.generate(config)?;
        Ok(Self::with_layout_and_generator(mine_layout, generator))
    }

    pub fn with_layout_and_generator(mine_layout: MineLayout, generator: G) -> Self {
        let size = mine_layout.size();
        let remaining_mines = mine_layout.mine_count() as isize;
        Self {
            generator,
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            correct_flags: 0,
            remaining_mines,
            outcome: GameOutcome::InProgress,
            triggered_mine: None,
        }
    }

    /// Starts over on the same board size and mine count with a freshly generated layout.
    ///
    /// On error the current game is left as it was.
    pub fn reset(&mut self) -> Result<()> {
        let mine_layout = self.generator.generate(self.config())?;
        log::debug!(
            "Resetting {}x{} board with {} mines",
            self.rows(),
            self.columns(),
            self.total_mines()
        );

        self.mine_layout = mine_layout;
        self.board.fill(CellState::Hidden);
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.correct_flags = 0;
        self.remaining_mines = self.mine_layout.mine_count() as isize;
        self.outcome = GameOutcome::InProgress;
        self.triggered_mine = None;
        Ok(())
    }
}

impl<G> MinefieldEngine<G> {
    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Mines minus flags placed; goes negative when the player over-flags.
    ///
    /// Keeps its last in-game value once the game is lost.
    pub fn remaining_mines(&self) -> isize {
        self.remaining_mines
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn is_won(&self) -> bool {
        self.outcome.is_won()
    }

    pub fn is_lost(&self) -> bool {
        self.outcome.is_lost()
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Flags sitting on mines; keeps its last in-game value once the game is lost.
    pub fn correct_flag_count(&self) -> CellCount {
        self.correct_flags
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout
            .validate_coords(coords)
            .is_some_and(|coords| self.mine_layout.contains_mine(coords))
    }

    pub fn cell_state(&self, coords: Coord2) -> Option<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Some(self.board[coords.to_nd_index()])
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Some(self.cell(coords))
    }

    /// Presentation-safe view of a cell, see [`CellView`].
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.cell_at(coords).map(Cell::view)
    }

    /// Full matrix of cells, mines included.
    pub fn cells(&self) -> Array2<Cell> {
        Array2::from_shape_fn(self.board.dim(), |(row, column)| {
            self.cell((row as Coord, column as Coord))
        })
    }

    fn cell(&self, coords: Coord2) -> Cell {
        Cell {
            is_mine: self.mine_layout[coords],
            state: self.board[coords.to_nd_index()],
            adjacent_mines: self.mine_layout.adjacent_mine_count(coords),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.outcome.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(coords) = self.mine_layout.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };
        if self.board[coords.to_nd_index()] != CellState::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.mine_layout[coords] {
            self.board[coords.to_nd_index()] = CellState::Revealed;
            self.triggered_mine = Some(coords);
            self.reveal_all_mines();
            self.outcome = GameOutcome::Lost;
            log::info!("Mine hit at {:?}, game lost", coords);
            return RevealOutcome::HitMine;
        }

        let opened = self.flood_reveal(coords);
        log::trace!("Revealed {} cells from {:?}", opened, coords);

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.outcome.is_finished() {
            return MarkOutcome::NoChange;
        }
        let Some(coords) = self.mine_layout.validate_coords(coords) else {
            return MarkOutcome::NoChange;
        };

        let on_mine = CellCount::from(self.mine_layout[coords]);
        let cell = &mut self.board[coords.to_nd_index()];
        let outcome = match *cell {
            CellState::Hidden => {
                *cell = CellState::Flagged;
                self.flagged_count += 1;
                self.correct_flags += on_mine;
                self.remaining_mines -= 1;
                MarkOutcome::Flagged
            }
            CellState::Flagged => {
                *cell = CellState::Hidden;
                self.flagged_count -= 1;
                self.correct_flags -= on_mine;
                self.remaining_mines += 1;
                MarkOutcome::Unflagged
            }
            CellState::Revealed => return MarkOutcome::NoChange,
        };

        // flags alone never complete a board
        self.check_win();
        outcome
    }

    /// Reveals `start` and, through zero-count cells, its connected region plus the numbered
    /// border. Flagged cells stop the cascade. Returns how many cells were opened.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.board[coords.to_nd_index()];
            if *cell != CellState::Hidden {
                continue;
            }
            *cell = CellState::Revealed;
            self.revealed_count += 1;
            opened += 1;

            if self.mine_layout.adjacent_mine_count(coords) == 0 {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos.to_nd_index()] == CellState::Hidden),
                );
            }
        }

        opened
    }

    fn reveal_all_mines(&mut self) {
        for coords in self.mine_layout.mine_coords() {
            let cell = &mut self.board[coords.to_nd_index()];
            if cell.is_flagged() {
                self.flagged_count -= 1;
            }
            *cell = CellState::Revealed;
        }
    }

    fn check_win(&mut self) -> bool {
        if self.outcome == GameOutcome::InProgress
            && self.revealed_count == self.mine_layout.safe_cell_count()
        {
            self.outcome = GameOutcome::Won;
            log::info!(
                "All {} safe cells revealed, game won",
                self.mine_layout.safe_cell_count()
            );
        }
        self.outcome.is_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn engine(size: Coord2, mines: &[Coord2]) -> MinefieldEngine {
        MinefieldEngine::with_layout(layout(size, mines))
    }

    fn state(engine: &MinefieldEngine, coords: Coord2) -> CellState {
        engine.cell_state(coords).unwrap()
    }

    #[test]
    fn new_engine_starts_hidden_and_in_progress() {
        let engine = MinefieldEngine::with_seed(GameConfig::new((9, 9), 10).unwrap(), 5).unwrap();

        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert_eq!(engine.remaining_mines(), 10);
        assert_eq!(engine.total_mines(), 10);
        assert_eq!((engine.rows(), engine.columns()), (9, 9));
        assert!(engine.cells().iter().all(|cell| cell.state == CellState::Hidden));
        assert_eq!(engine.cells().iter().filter(|cell| cell.is_mine).count(), 10);
    }

    #[test]
    fn new_engine_rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);

        assert!(matches!(
            MinefieldEngine::new(config),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut engine = engine((2, 2), &[(0, 0)]);

        let outcome = engine.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.outcome(), GameOutcome::Lost);
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert_eq!(engine.cell_view((0, 0)), Some(CellView::Mine));
    }

    #[test]
    fn loss_reveals_every_mine_and_nothing_else() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2), (0, 2)]);
        engine.reveal((1, 1));
        engine.toggle_flag((2, 2));
        engine.toggle_flag((2, 0));

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::HitMine);

        for mine in [(0, 0), (2, 2), (0, 2)] {
            assert_eq!(state(&engine, mine), CellState::Revealed);
        }
        assert_eq!(state(&engine, (1, 1)), CellState::Revealed);
        assert_eq!(state(&engine, (2, 0)), CellState::Flagged);
        assert_eq!(state(&engine, (0, 1)), CellState::Hidden);
        assert_eq!(engine.remaining_mines(), 1);
        assert_eq!(engine.flagged_count(), 1);
        assert_eq!(engine.correct_flag_count(), 1);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut engine = engine((3, 3), &[(2, 2)]);

        let outcome = engine.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.cell_view((0, 0)), Some(CellView::Revealed(0)));
        assert_eq!(engine.cell_view((1, 1)), Some(CellView::Revealed(1)));
        assert_eq!(engine.cell_view((2, 2)), Some(CellView::Hidden));
        assert_eq!(engine.revealed_count(), 8);
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut engine = engine((3, 3), &[(0, 0)]);

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(engine.revealed_count(), 1);
        assert_eq!(state(&engine, (2, 2)), CellState::Hidden);
    }

    #[test]
    fn flag_blocks_cascade() {
        // last column is all mines: columns 0-2 are zeros, column 3 is the numbered border
        let mut engine = engine((3, 5), &[(0, 4), (1, 4), (2, 4)]);
        engine.toggle_flag((1, 1));

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);

        assert_eq!(state(&engine, (1, 1)), CellState::Flagged);
        assert_eq!(state(&engine, (2, 2)), CellState::Revealed);
        assert_eq!(state(&engine, (1, 3)), CellState::Revealed);
        assert_eq!(engine.revealed_count(), 11);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn flagged_safe_cell_blocks_win() {
        let mut engine = engine((2, 1), &[(0, 0)]);

        engine.toggle_flag((1, 0));
        assert_eq!(engine.reveal((1, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);

        engine.toggle_flag((1, 0));
        assert_eq!(engine.reveal((1, 0)), RevealOutcome::Won);
    }

    #[test]
    fn winning_board_transitions_to_won_state() {
        let mut engine = engine((2, 1), &[(0, 0)]);

        assert_eq!(engine.reveal((1, 0)), RevealOutcome::Won);
        assert_eq!(engine.outcome(), GameOutcome::Won);
        assert!(engine.is_finished());
        assert!(engine.is_won());
        assert_eq!(state(&engine, (0, 0)), CellState::Hidden);
    }

    #[test]
    fn toggle_flag_updates_remaining_mines() {
        let mut engine = engine((3, 3), &[(0, 0)]);

        assert_eq!(engine.toggle_flag((0, 0)), MarkOutcome::Flagged);
        assert_eq!(engine.remaining_mines(), 0);
        assert_eq!(engine.toggle_flag((1, 1)), MarkOutcome::Flagged);
        assert_eq!(engine.remaining_mines(), -1);
        assert_eq!(engine.flagged_count(), 2);
        assert_eq!(engine.correct_flag_count(), 1);

        assert_eq!(engine.toggle_flag((1, 1)), MarkOutcome::Unflagged);
        assert_eq!(engine.remaining_mines(), 0);
        assert_eq!(engine.toggle_flag((0, 0)), MarkOutcome::Unflagged);
        assert_eq!(engine.correct_flag_count(), 0);
        assert_eq!(engine.toggle_flag((0, 0)), MarkOutcome::Flagged);
        assert_eq!(state(&engine, (1, 1)), CellState::Hidden);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        engine.reveal((1, 1));

        assert_eq!(engine.toggle_flag((1, 1)), MarkOutcome::NoChange);
        assert_eq!(state(&engine, (1, 1)), CellState::Revealed);
        assert_eq!(engine.remaining_mines(), 1);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn out_of_bounds_moves_are_no_ops() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        let before = engine.cells();

        assert_eq!(engine.reveal((3, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.reveal((0, 3)), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((255, 255)), MarkOutcome::NoChange);

        assert_eq!(engine.cells(), before);
        assert_eq!(engine.remaining_mines(), 1);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert_eq!(engine.cell_at((3, 3)), None);
        assert!(!engine.has_mine_at((9, 9)));
    }

    #[test]
    fn moves_after_game_end_are_no_ops() {
        let mut engine = engine((3, 3), &[(0, 0), (0, 1)]);
        engine.toggle_flag((2, 2));
        engine.reveal((0, 0));
        let before = engine.cells();

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((2, 2)), MarkOutcome::NoChange);
        assert_eq!(engine.toggle_flag((1, 2)), MarkOutcome::NoChange);

        assert_eq!(engine.cells(), before);
        assert_eq!(engine.remaining_mines(), 1);
        assert_eq!(engine.outcome(), GameOutcome::Lost);
    }

    #[test]
    fn reset_restores_fresh_game() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        let mut engine = MinefieldEngine::with_seed(config, 11).unwrap();
        let first_layout = engine.mine_layout().clone();
        let mine = first_layout.mine_coords()[0];
        engine.toggle_flag((8, 8));
        engine.reveal(mine);

        engine.reset().unwrap();

        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert_eq!(engine.remaining_mines(), 10);
        assert_eq!(engine.config(), config);
        assert_eq!(engine.triggered_mine(), None);
        assert_eq!(engine.revealed_count(), 0);
        assert_eq!(engine.flagged_count(), 0);
        assert!(engine.cells().iter().all(|cell| cell.state == CellState::Hidden));
        assert_eq!(engine.mine_layout().mine_count(), 10);
        assert_ne!(engine.mine_layout(), &first_layout);
    }

    #[test]
    fn reset_keeps_dimensions_of_fixed_layout() {
        let mut engine = engine((4, 6), &[(0, 0), (3, 5)]);

        engine.reset().unwrap();

        assert_eq!(engine.size(), (4, 6));
        assert_eq!(engine.total_mines(), 2);
    }

    #[test]
    fn seeded_engines_are_reproducible() {
        let config = GameConfig::new((16, 16), 40).unwrap();
        let mut a = MinefieldEngine::with_seed(config, 99).unwrap();
        let mut b = MinefieldEngine::with_seed(config, 99).unwrap();
        assert_eq!(a.mine_layout(), b.mine_layout());

        a.reset().unwrap();
        b.reset().unwrap();
        assert_eq!(a.mine_layout(), b.mine_layout());
    }
}
