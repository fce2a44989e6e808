//! In-process match between two seats over a single owned board.

use std::time::Duration;

use games_connectn::{Action, BoardView, Cell, Outcome, Player, Snapshot};

use crate::session::{Session, SessionError};

/// Result of one finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// `None` for a draw
    pub winner: Option<Player>,
    /// Pieces placed over the whole match
    pub plies: u32,
    pub elapsed: Duration,
}

/// A game in progress. Player A moves first.
#[derive(Debug, Clone)]
pub struct LocalMatch {
    board: Snapshot,
    target: usize,
    moves: Vec<Action>,
}

impl LocalMatch {
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize, target: usize) -> Self {
        Self {
            board: Snapshot::new(width, height, Player::A),
            target,
            moves: Vec::new(),
        }
    }

    /// Resume from an existing position. The snapshot's mover moves next.
    #[cfg(test)]
    pub fn from_position(board: Snapshot, target: usize) -> Self {
        Self {
            board,
            target,
            moves: Vec::new(),
        }
    }

    /// Player whose piece the next placement drops
    pub fn to_move(&self) -> Player {
        self.board.to_move()
    }

    /// `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        self.board.outcome(self.target)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Placements so far, in order
    pub fn moves(&self) -> &[Action] {
        &self.moves
    }

    pub fn board(&self) -> &Snapshot {
        &self.board
    }
}

impl BoardView for LocalMatch {
    fn width(&self) -> usize {
        self.board.width()
    }

    fn height(&self) -> usize {
        self.board.height()
    }

    fn target(&self) -> usize {
        self.target
    }

    fn occupant(&self, x: usize, y: usize) -> Cell {
        self.board.get(x, y)
    }
}

impl Session for LocalMatch {
    fn place_piece(&mut self, action: Action) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if action.column >= self.board.width() || action.row >= self.board.height() {
            return Err(SessionError::OutOfBounds(action));
        }
        if !self.board.get(action.column, action.row).is_empty() {
            return Err(SessionError::Occupied(action));
        }
        if self.board.lowest_empty_row(action.column) != Some(action.row) {
            return Err(SessionError::Floating { action });
        }

        self.board.apply_mut(action);
        self.moves.push(action);
        Ok(())
    }
}
