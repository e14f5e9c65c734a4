use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Ready,
    Active,
    Solved,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    Moved,
    Solved,
}

impl SwapOutcome {
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// State before a swap. Boards are shared with the engine until it mutates them.
#[derive(Clone, Debug, PartialEq)]
struct HistoryEntry {
    board: Rc<Board>,
    move_count: u32,
    gems_collected: CellCount,
    state: EngineState,
}

/// A single play-through of one generated puzzle.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEngine {
    seed: String,
    tier: Tier,
    board: Rc<Board>,
    profile: DifficultyProfile,
    history: VecDeque<HistoryEntry>,
    history_capacity: usize,
    move_count: u32,
    state: EngineState,
    connection: Connection,
    gems_collected: CellCount,
    elapsed_secs: u64,
}

impl PlayEngine {
    pub fn new(puzzle: GeneratedPuzzle, config: &EngineConfig) -> Self {
        let tier = puzzle.tier();
        Self::from_parts(puzzle.seed, tier, puzzle.board, puzzle.profile, config)
    }

    /// Generates the requested puzzle and starts playing it.
    pub fn start(request: &PuzzleRequest, config: &EngineConfig) -> Self {
        Self::new(request.generate(config), config)
    }

    pub(crate) fn from_parts(
        seed: String,
        tier: Tier,
        board: Board,
        profile: DifficultyProfile,
        config: &EngineConfig,
    ) -> Self {
        let mut engine = Self {
            seed,
            tier,
            board: Rc::new(board),
            profile,
            history: VecDeque::new(),
            history_capacity: config.history_capacity,
            move_count: 0,
            state: EngineState::Ready,
            connection: Connection::default(),
            gems_collected: 0,
            elapsed_secs: 0,
        };
        if engine.refresh() {
            log::debug!("Puzzle {:?} starts out solved", engine.seed);
            engine.state = EngineState::Solved;
        }
        engine
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_solved()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Connection found after the last swap.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Gems on tiles currently reachable from the start tile.
    pub fn gems_collected(&self) -> CellCount {
        self.gems_collected
    }

    pub fn total_gems(&self) -> CellCount {
        self.profile.total_gems
    }

    pub fn rating(&self) -> StarRating {
        rate(
            self.is_completed(),
            self.move_count,
            &self.profile,
            self.gems_collected,
        )
    }

    pub fn can_swap(&self, a: Coord2, b: Coord2) -> bool {
        !self.state.is_solved()
            && a != b
            && self.board.is_movable(a)
            && self.board.is_movable(b)
    }

    pub fn can_undo(&self) -> bool {
        !self.state.is_solved() && !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Play time is tracked by the caller and only stored for saving.
    pub fn set_elapsed_secs(&mut self, elapsed_secs: u64) {
        self.elapsed_secs = elapsed_secs;
    }

    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<SwapOutcome> {
        let a = self.board.validate_coords(a)?;
        let b = self.board.validate_coords(b)?;
        if a == b {
            return Err(PuzzleError::SelfSwap);
        }
        self.check_not_solved()?;
        if !self.board.is_movable(a) || !self.board.is_movable(b) {
            return Err(PuzzleError::ImmovableTile);
        }

        self.push_history();
        Rc::make_mut(&mut self.board).swap(a, b);
        self.move_count += 1;

        Ok(if self.refresh() {
            log::debug!("Puzzle {:?} solved in {} moves", self.seed, self.move_count);
            self.state = EngineState::Solved;
            SwapOutcome::Solved
        } else {
            self.state = EngineState::Active;
            SwapOutcome::Moved
        })
    }

    /// Reverts the last swap.
    pub fn undo(&mut self) -> Result<()> {
        self.check_not_solved()?;
        let entry = self.history.pop_back().ok_or(PuzzleError::NothingToUndo)?;

        self.board = entry.board;
        self.move_count = entry.move_count;
        self.gems_collected = entry.gems_collected;
        self.state = entry.state;
        self.refresh();
        Ok(())
    }

    fn push_history(&mut self) {
        if self.history_capacity == 0 {
            return;
        }
        if self.history.len() == self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            board: Rc::clone(&self.board),
            move_count: self.move_count,
            gems_collected: self.gems_collected,
            state: self.state,
        });
    }

    /// Re-runs the connectivity check, returning whether start and goal connect.
    fn refresh(&mut self) -> bool {
        self.connection = check_connection(&self.board, self.board.start(), self.board.goal());
        self.gems_collected = gems_reachable(&self.board);
        self.connection.connected
    }

    fn check_not_solved(&self) -> Result<()> {
        if self.state.is_solved() {
            Err(PuzzleError::AlreadySolved)
        } else {
            Ok(())
        }
    }

    pub(crate) fn restore_progress(&mut self, move_count: u32, elapsed_secs: u64) {
        self.move_count = move_count;
        self.elapsed_secs = elapsed_secs;
        if !self.state.is_solved() && move_count > 0 {
            self.state = EngineState::Active;
        }
    }
}
