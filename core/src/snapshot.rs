//! Saved games.
//!
//! A [`SavedGame`] is the JSON document a frontend keeps between sessions. Loading never
//! fails towards the player: a snapshot that cannot be decoded, belongs to another
//! puzzle, or holds a board whose endpoints cannot connect is dropped and the puzzle is
//! generated again from its seed.

use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

pub const SAVE_VERSION: u32 = 1;

const fn save_version() -> u32 {
    SAVE_VERSION
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    #[serde(default = "save_version")]
    pub version: u32,
    pub seed: String,
    pub tier: Tier,
    /// Board as last played, including the start and goal positions.
    pub board: Board,
    #[serde(default)]
    pub move_count: u32,
    #[serde(default)]
    pub elapsed_secs: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub gems_collected: CellCount,
    #[serde(default)]
    pub stars: u8,
    #[serde(default)]
    pub profile: PartialProfile,
}

impl SavedGame {
    pub fn to_json(&self) -> String {
        // plain data with string keys, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decodes and structurally checks a snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let saved: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Saved game could not be decoded: {err}");
            PuzzleError::MalformedSnapshot
        })?;
        saved.validate()?;
        Ok(saved)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version > SAVE_VERSION {
            return Err(PuzzleError::MalformedSnapshot);
        }
        self.board.validate()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Nothing was stored, a new puzzle was generated.
    Fresh,
    Resumed,
    /// The stored game was unusable and has been replaced; the caller should clear it.
    Regenerated,
}

impl ResumeOutcome {
    pub const fn should_clear_saved(self) -> bool {
        matches!(self, Self::Regenerated)
    }
}

impl PlayEngine {
    /// Continues the stored game for `request`, or starts it over when the snapshot is
    /// missing, unreadable, stale or broken.
    pub fn resume(
        saved: Option<&str>,
        request: &PuzzleRequest,
        config: &EngineConfig,
    ) -> (Self, ResumeOutcome) {
        let Some(json) = saved else {
            return (Self::start(request, config), ResumeOutcome::Fresh);
        };

        match SavedGame::from_json(json) {
            Ok(saved) if saved.seed == request.seed => {
                (Self::from_saved_game(saved, config), ResumeOutcome::Resumed)
            }
            Ok(saved) => {
                log::debug!(
                    "Saved game for seed {:?} is stale, wanted {:?}",
                    saved.seed,
                    request.seed
                );
                (Self::start(request, config), ResumeOutcome::Regenerated)
            }
            Err(err) => {
                log::warn!("Discarding saved game for seed {:?}: {err}", request.seed);
                (Self::start(request, config), ResumeOutcome::Regenerated)
            }
        }
    }

    /// Rebuilds a session from a validated snapshot. Undo history is not stored.
    pub fn from_saved_game(saved: SavedGame, config: &EngineConfig) -> Self {
        let profile = DifficultyProfile::resolve(saved.profile, &saved.board, &config.search);
        let mut engine = Self::from_parts(saved.seed, saved.tier, saved.board, profile, config);
        engine.restore_progress(saved.move_count, saved.elapsed_secs);
        if saved.completed != engine.is_completed() {
            log::warn!(
                "Saved completion flag {} disagrees with the board, using the board",
                saved.completed
            );
        }
        engine
    }

    pub fn to_saved_game(&self) -> SavedGame {
        let rating = self.rating();
        SavedGame {
            version: SAVE_VERSION,
            seed: self.seed().into(),
            tier: self.tier(),
            board: self.board().clone(),
            move_count: self.move_count(),
            elapsed_secs: self.elapsed_secs(),
            completed: self.is_completed(),
            gems_collected: self.gems_collected(),
            stars: rating.stars,
            profile: (*self.profile()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn request() -> PuzzleRequest {
        PuzzleRequest::new("SEED_2025-08-11", Tier::Easy)
    }

    fn played() -> PlayEngine {
        let config = EngineConfig::default();
        let mut engine = PlayEngine::start(&request(), &config);
        let movable = engine.board().movable_positions();
        if let [a, b, ..] = movable[..] {
            let _ = engine.swap(a, b);
        }
        engine.set_elapsed_secs(42);
        engine
    }

    #[test]
    fn missing_snapshot_starts_fresh() {
        let (engine, outcome) = PlayEngine::resume(None, &request(), &EngineConfig::default());

        assert_eq!(outcome, ResumeOutcome::Fresh);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.seed(), "SEED_2025-08-11");
    }

    #[test]
    fn saved_game_resumes() {
        let engine = played();
        let json = engine.to_saved_game().to_json();
        let config = EngineConfig::default();

        let (resumed, outcome) = PlayEngine::resume(Some(&json), &request(), &config);

        assert_eq!(outcome, ResumeOutcome::Resumed);
        assert!(!outcome.should_clear_saved());
        assert_eq!(resumed.board(), engine.board());
        assert_eq!(resumed.move_count(), engine.move_count());
        assert_eq!(resumed.elapsed_secs(), 42);
        assert_eq!(resumed.profile(), engine.profile());
        assert_eq!(resumed.is_completed(), engine.is_completed());
    }

    #[test]
    fn garbage_is_regenerated() {
        let (engine, outcome) =
            PlayEngine::resume(Some("{not json"), &request(), &EngineConfig::default());

        assert_eq!(outcome, ResumeOutcome::Regenerated);
        assert!(outcome.should_clear_saved());
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn closed_goal_tile_is_regenerated() {
        let mut saved = played().to_saved_game();
        let goal = saved.board.goal();
        saved.board[goal].edges = Edges::empty();
        assert_eq!(saved.board[goal].kind, TileKind::Path);
        let json = saved.to_json();

        assert_eq!(SavedGame::from_json(&json), Err(PuzzleError::BrokenSnapshot));
        let config = EngineConfig::default();
        let (engine, outcome) = PlayEngine::resume(Some(&json), &request(), &config);

        assert_eq!(outcome, ResumeOutcome::Regenerated);
        assert_eq!(engine.move_count(), 0);
        assert!(engine.board().endpoints_connectable());
    }

    #[test]
    fn other_seed_is_stale() {
        let json = played().to_saved_game().to_json();
        let tomorrow = PuzzleRequest::new("SEED_2025-08-12", Tier::Medium);

        let config = EngineConfig::default();
        let (engine, outcome) = PlayEngine::resume(Some(&json), &tomorrow, &config);

        assert_eq!(outcome, ResumeOutcome::Regenerated);
        assert_eq!(engine.seed(), "SEED_2025-08-12");
    }

    #[test]
    fn missing_profile_is_recomputed() {
        let engine = played();
        let mut value: serde_json::Value =
            serde_json::from_str(&engine.to_saved_game().to_json()).unwrap();
        value.as_object_mut().unwrap().remove("profile");

        let saved = SavedGame::from_json(&value.to_string()).unwrap();
        let resumed = PlayEngine::from_saved_game(saved, &EngineConfig::default());

        assert!(resumed.profile().optimal_to_goal >= 5);
        assert_eq!(resumed.total_gems(), engine.board().total_gems());
    }
}
