//! The seam between players and the game they play in.
//!
//! A player never mutates a board directly. It reads the position through
//! [`BoardView`] and submits its move through [`Session::place_piece`]; the
//! session owns legality for the live match.

use games_connectn::{Action, BoardView};
use thiserror::Error;

/// Rejected placements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cell {0} is outside the board")]
    OutOfBounds(Action),

    #[error("cell {0} is already occupied")]
    Occupied(Action),

    #[error("cell {action} is not the lowest free cell of column {}", .action.column)]
    Floating { action: Action },

    #[error("the match is already over")]
    Finished,
}

/// A live game a player can read and move in.
pub trait Session: BoardView {
    /// Drop the current mover's piece at `action`.
    fn place_piece(&mut self, action: Action) -> Result<(), SessionError>;
}
