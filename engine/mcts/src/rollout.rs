//! Rollout policies and playout scoring.
//!
//! A rollout plays a position out to the end and scores the final result
//! from the searching player's point of view. The policy picking each move
//! is injected so that searches can be made reproducible: production play
//! uses [`UniformRollout`] over a seeded or entropy-backed RNG, tests can
//! swap in [`FirstActionRollout`] or a fixed seed.

use games_connectn::{Action, Outcome, Player, Snapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Picks the next move during a rollout.
pub trait RolloutPolicy {
    /// Return an index into `actions`. `actions` is never empty and lists
    /// the legal moves of `snapshot` in column order. An out-of-range index
    /// is a bug in the policy and panics.
    fn choose(&mut self, snapshot: &Snapshot, actions: &[Action]) -> usize;
}

impl<P: RolloutPolicy + ?Sized> RolloutPolicy for &mut P {
    fn choose(&mut self, snapshot: &Snapshot, actions: &[Action]) -> usize {
        (**self).choose(snapshot, actions)
    }
}

/// Uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct UniformRollout<R = ChaCha20Rng> {
    rng: R,
}

impl<R: Rng> UniformRollout<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl UniformRollout<ChaCha20Rng> {
    /// Deterministic rollouts for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }
}

impl<R: Rng> RolloutPolicy for UniformRollout<R> {
    fn choose(&mut self, _snapshot: &Snapshot, actions: &[Action]) -> usize {
        self.rng.gen_range(0..actions.len())
    }
}

/// Always plays the leftmost legal column. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstActionRollout;

impl RolloutPolicy for FirstActionRollout {
    fn choose(&mut self, _snapshot: &Snapshot, _actions: &[Action]) -> usize {
        0
    }
}

/// Score a finished game for `me`: +1 win, -1 loss, 0 draw.
pub fn score_outcome(outcome: Outcome, me: Player) -> i64 {
    match outcome {
        Outcome::Winner(player) if player == me => 1,
        Outcome::Winner(_) => -1,
        Outcome::Draw => 0,
    }
}

/// Play `snapshot` out with `policy` until someone wins or the board fills,
/// and score the result for the snapshot's fixed "me".
pub fn rollout<P: RolloutPolicy + ?Sized>(
    snapshot: &Snapshot,
    target: usize,
    policy: &mut P,
) -> i64 {
    let mut scratch = snapshot.clone();

    loop {
        if let Some(winner) = scratch.winner(target) {
            return score_outcome(Outcome::Winner(winner), scratch.me());
        }

        let actions = scratch.legal_actions();
        if actions.is_empty() {
            return score_outcome(Outcome::Draw, scratch.me());
        }

        let idx = policy.choose(&scratch, &actions);
        scratch.apply_mut(actions[idx]);
    }
}
