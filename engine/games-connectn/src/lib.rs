//! Connect-N board model for the MCTS player.
//!
//! A generalized gravity-drop alignment game: players drop pieces into the
//! columns of a `width x height` grid and the first to line up `target`
//! pieces horizontally, vertically or diagonally wins. Connect Four is the
//! 7x6 board with a target of 4.
//!
//! # Board Layout
//!
//! Cells are addressed as `(x, y)` with `x` the column (0 = left) and `y` the
//! row (0 = bottom). Pieces stack upward from row 0. Storage is row-major:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connectn::{Player, Snapshot};
//!
//! let snapshot = Snapshot::new(7, 6, Player::A);
//! let actions = snapshot.legal_actions();
//! assert_eq!(actions.len(), 7);
//!
//! let next = snapshot.apply(actions[3]);
//! assert_eq!(next.to_move(), Player::B);
//! assert_eq!(next.winner(4), None);
//! ```

use std::fmt;

use thiserror::Error;

/// Connect Four dimensions, used as defaults throughout the workspace.
pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_TARGET: usize = 4;

/// Run directions checked from each occupied cell:
/// horizontal, diagonal, vertical, anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

/// One of the two player identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Cell value written when this player drops a piece
    pub fn to_cell(self) -> Cell {
        match self {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::A => "A",
            Player::B => "B",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occupant of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    /// Player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerA => Some(Player::A),
            Cell::PlayerB => Some(Player::B),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerA => 'A',
            Cell::PlayerB => 'B',
        }
    }
}

/// A legal placement: the chosen column and the row the piece lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub column: usize,
    pub row: usize,
}

impl Action {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// How a finished position ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Read-only view of a live board, as exposed by the game session that owns it.
pub trait BoardView {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Number of aligned pieces required to win
    fn target(&self) -> usize;

    /// Occupant of `(x, y)`. Callers stay within `width x height`.
    fn occupant(&self, x: usize, y: usize) -> Cell;
}

/// Errors produced when parsing a textual board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {0:?} (use '.', 'A' or 'B')")]
    InvalidCell(char),
}

/// A copy of the board plus the player identities used during one search.
///
/// "Me" and "opponent" are fixed when the snapshot is captured; `to_move`
/// toggles between them on every applied action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    width: usize,
    height: usize,
    /// Row-major, row 0 at the bottom
    cells: Vec<Cell>,
    me: Player,
    to_move: Player,
}

impl Snapshot {
    /// Empty board with `me` to move.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize, me: Player) -> Self {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be non-zero, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            me,
            to_move: me,
        }
    }

    /// Copy the current position out of a live board. The searching player
    /// `me` is the one to move.
    pub fn capture<V: BoardView + ?Sized>(view: &V, me: Player) -> Self {
        let mut snapshot = Self::new(view.width(), view.height(), me);
        for y in 0..snapshot.height {
            for x in 0..snapshot.width {
                let idx = snapshot.pos(x, y);
                snapshot.cells[idx] = view.occupant(x, y);
            }
        }
        snapshot
    }

    /// Parse a board drawn top row first, using `.`, `A` and `B`.
    /// Whitespace inside a row is ignored. `me` is the one to move.
    pub fn parse(rows: &[&str], me: Player) -> Result<Self, BoardParseError> {
        let parsed: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '.' => Ok(Cell::Empty),
                        'A' => Ok(Cell::PlayerA),
                        'B' => Ok(Cell::PlayerB),
                        other => Err(BoardParseError::InvalidCell(other)),
                    })
                    .collect()
            })
            .collect::<Result<_, _>>()?;

        let width = parsed.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(BoardParseError::Empty);
        }
        if let Some((row, found)) = parsed
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(BoardParseError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        let height = parsed.len();
        let mut snapshot = Self::new(width, height, me);
        for (i, row) in parsed.into_iter().enumerate() {
            let y = height - 1 - i;
            for (x, cell) in row.into_iter().enumerate() {
                let idx = snapshot.pos(x, y);
                snapshot.cells[idx] = cell;
            }
        }
        Ok(snapshot)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The searching player
    pub fn me(&self) -> Player {
        self.me
    }

    pub fn opponent(&self) -> Player {
        self.me.other()
    }

    /// Player whose piece the next action places
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    fn pos(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Occupant of `(x, y)`.
    ///
    /// # Panics
    /// If the coordinate is off the board.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} board",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[self.pos(x, y)]
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Check if a column has no room left (its top cell is taken)
    pub fn is_column_full(&self, column: usize) -> bool {
        !self.get(column, self.height - 1).is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// Lowest empty row of `column`, or `None` when the column is full.
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        if self.is_column_full(column) {
            return None;
        }
        (0..self.height).find(|&y| self.get(column, y).is_empty())
    }

    /// Legal actions in ascending column order, one per column that still
    /// has room. Empty only when the board is full.
    pub fn legal_actions(&self) -> Vec<Action> {
        (0..self.width)
            .filter_map(|col| self.lowest_empty_row(col).map(|row| Action::new(col, row)))
            .collect()
    }

    /// Derived position: the mover's piece placed at `action`, turn passed.
    pub fn apply(&self, action: Action) -> Snapshot {
        let mut next = self.clone();
        next.apply_mut(action);
        next
    }

    /// In-place variant of [`Snapshot::apply`], used by rollouts that own
    /// their scratch copy.
    ///
    /// # Panics
    /// If the target cell is off the board or already occupied.
    pub fn apply_mut(&mut self, action: Action) {
        assert!(
            self.get(action.column, action.row).is_empty(),
            "cell {} is already occupied",
            action
        );
        let idx = self.pos(action.column, action.row);
        self.cells[idx] = self.to_move.to_cell();
        self.to_move = self.to_move.other();
    }

    /// Winner of the position for runs of length `target`, scanning columns
    /// left to right and rows bottom to top. The first complete run found
    /// decides the result.
    pub fn winner(&self, target: usize) -> Option<Player> {
        for x in 0..self.width {
            for y in 0..self.height {
                let Some(owner) = self.get(x, y).owner() else {
                    continue;
                };
                if DIRECTIONS
                    .iter()
                    .any(|&(dx, dy)| self.run_matches(x, y, dx, dy, target, owner))
                {
                    return Some(owner);
                }
            }
        }
        None
    }

    /// Check the `target`-long run starting at `(x, y)` along `(dx, dy)`.
    /// Any cell off the board or owned by someone else breaks the run.
    fn run_matches(
        &self,
        x: usize,
        y: usize,
        dx: isize,
        dy: isize,
        target: usize,
        owner: Player,
    ) -> bool {
        let cell = owner.to_cell();
        (1..target).all(|i| {
            let cx = x as isize + dx * i as isize;
            let cy = y as isize + dy * i as isize;
            self.in_bounds(cx, cy) && self.get(cx as usize, cy as usize) == cell
        })
    }

    /// Finished position result: a winner, a draw on a full board, or `None`
    /// while play continues.
    pub fn outcome(&self, target: usize) -> Option<Outcome> {
        match self.winner(target) {
            Some(player) => Some(Outcome::Winner(player)),
            None if self.legal_actions().is_empty() => Some(Outcome::Draw),
            None => None,
        }
    }

    pub fn is_terminal(&self, target: usize) -> bool {
        self.outcome(target).is_some()
    }
}

impl fmt::Display for Snapshot {
    /// Top row first, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let row: String = (0..self.width).map(|x| self.get(x, y).symbol()).collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
