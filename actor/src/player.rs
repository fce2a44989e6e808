//! Players that take turns in a [`Session`].

use anyhow::{anyhow, Result};
use games_connectn::{Action, BoardView, Player, Snapshot};
use mcts::{run_mcts, MctsConfig, RolloutPolicy, SearchError, UniformRollout};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::session::Session;

/// Anything that can pick and play a move for one seat.
pub trait Agent {
    /// Label used in logs and match summaries
    fn name(&self) -> &str;

    /// Pick a move for `me` and place it in the session.
    fn take_turn(&mut self, session: &mut dyn Session, me: Player) -> Result<Action>;
}

/// Plays the move chosen by a fresh MCTS search every turn.
pub struct MctsPlayer<P: RolloutPolicy = UniformRollout> {
    name: String,
    config: MctsConfig,
    policy: P,
    open_in_center: bool,
}

impl MctsPlayer<UniformRollout> {
    /// Uniform random rollouts, seeded when `seed` is given.
    pub fn uniform(config: MctsConfig, seed: Option<u64>) -> Self {
        let policy = match seed {
            Some(seed) => UniformRollout::seeded(seed),
            None => UniformRollout::from_entropy(),
        };
        Self::new(config, policy)
    }
}

impl<P: RolloutPolicy> MctsPlayer<P> {
    pub fn new(config: MctsConfig, policy: P) -> Self {
        Self {
            name: "mcts".into(),
            config,
            policy,
            open_in_center: true,
        }
    }

    /// Builder pattern: set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder pattern: drop into the middle column on an empty board
    /// without searching.
    pub fn with_open_in_center(mut self, enabled: bool) -> Self {
        self.open_in_center = enabled;
        self
    }

    /// The scripted first move, if it applies to this position.
    fn opening_move<V: BoardView + ?Sized>(&self, view: &V) -> Option<Action> {
        let bottom_empty = (0..view.width()).all(|x| view.occupant(x, 0).is_empty());
        (self.open_in_center && bottom_empty).then(|| Action::new(view.width() / 2, 0))
    }

    /// Decide on a move for `me` without touching the board.
    pub fn choose<V: BoardView + ?Sized>(
        &mut self,
        view: &V,
        me: Player,
    ) -> Result<Action, SearchError> {
        if let Some(action) = self.opening_move(view) {
            debug!(player = %me, column = action.column, "Opening in the center");
            return Ok(action);
        }

        let snapshot = Snapshot::capture(view, me);
        let result = run_mcts(
            snapshot,
            view.target(),
            self.config.clone(),
            &mut self.policy,
        )?;

        debug!(
            player = %me,
            column = result.action.column,
            row = result.action.row,
            iterations = result.iterations,
            root_visits = result.root_visits,
            root_score = result.root_score,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "MCTS move chosen"
        );

        Ok(result.action)
    }
}

impl<P: RolloutPolicy> Agent for MctsPlayer<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, session: &mut dyn Session, me: Player) -> Result<Action> {
        let action = self.choose(&*session, me)?;
        session.place_piece(action)?;
        Ok(action)
    }
}

/// Drops into a uniformly random column that still has room.
#[derive(Debug)]
pub struct RandomPlayer {
    name: String,
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::from_rng(ChaCha20Rng::from_entropy())
    }

    /// Create with a specific seed for determinism
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            name: "random".into(),
            rng,
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, session: &mut dyn Session, me: Player) -> Result<Action> {
        let actions = Snapshot::capture(&*session, me).legal_actions();
        let action = *actions
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow!("no legal moves left for {}", me))?;
        session.place_piece(action)?;
        Ok(action)
    }
}
