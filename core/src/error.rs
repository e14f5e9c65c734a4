use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cannot swap a tile with itself")]
    SelfSwap,
    #[error("Tile cannot be moved")]
    ImmovableTile,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Puzzle already solved, no new moves are accepted")]
    AlreadySolved,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Saved game could not be decoded")]
    MalformedSnapshot,
    #[error("Saved game does not contain a connectable start and goal")]
    BrokenSnapshot,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
