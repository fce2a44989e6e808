//! Match loop: seats two agents and plays a series of local matches.

use std::time::Instant;

use anyhow::{anyhow, Result};
use games_connectn::{Outcome, Player};
use tracing::{debug, error, info};

use crate::config::{Config, Opponent};
use crate::local_match::{LocalMatch, MatchOutcome};
use crate::player::{Agent, MctsPlayer, RandomPlayer};

/// Running totals over a series of matches. Indices follow the runner's
/// agent order, not the seat each agent played in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchStats {
    pub played: u32,
    pub wins: [u32; 2],
    pub draws: u32,
    pub failed: u32,
    pub plies: u64,
}

impl MatchStats {
    fn record(&mut self, outcome: &MatchOutcome, winner: Option<usize>) {
        self.played += 1;
        self.plies += outcome.plies as u64;
        match winner {
            Some(idx) => self.wins[idx] += 1,
            None => self.draws += 1,
        }
    }
}

pub struct MatchRunner {
    width: usize,
    height: usize,
    target: usize,
    matches: u32,
    agents: [Box<dyn Agent>; 2],
    stats: MatchStats,
}

impl MatchRunner {
    /// Build both agents from the actor configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mcts_config = config.mcts_config()?;
        let seed = config.seed();

        let first: Box<dyn Agent> = Box::new(
            MctsPlayer::uniform(mcts_config.clone(), seed)
                .with_name("mcts-1")
                .with_open_in_center(config.open_in_center),
        );
        let second: Box<dyn Agent> = match config.opponent()? {
            Opponent::Mcts => Box::new(
                MctsPlayer::uniform(mcts_config, seed.map(|s| s.wrapping_add(1)))
                    .with_name("mcts-2")
                    .with_open_in_center(config.open_in_center),
            ),
            Opponent::Random => Box::new(match seed {
                Some(s) => RandomPlayer::with_seed(s.wrapping_add(1)),
                None => RandomPlayer::new(),
            }),
        };

        Ok(Self::with_agents(
            config.width,
            config.height,
            config.target,
            config.matches,
            [first, second],
        ))
    }

    pub fn with_agents(
        width: usize,
        height: usize,
        target: usize,
        matches: u32,
        agents: [Box<dyn Agent>; 2],
    ) -> Self {
        Self {
            width,
            height,
            target,
            matches,
            agents,
            stats: MatchStats::default(),
        }
    }

    /// Play every match, then log a summary.
    pub fn run(&mut self) -> Result<&MatchStats> {
        info!(
            matches = self.matches,
            width = self.width,
            height = self.height,
            target = self.target,
            first = self.agents[0].name(),
            second = self.agents[1].name(),
            "Starting matches"
        );

        for index in 0..self.matches {
            match self.play_match(index) {
                Ok(_) => {}
                Err(e) => {
                    self.stats.failed += 1;
                    error!("Match {} failed: {:#}", index + 1, e);
                    // Continue with next match rather than stopping
                }
            }
        }

        info!(
            played = self.stats.played,
            failed = self.stats.failed,
            draws = self.stats.draws,
            plies = self.stats.plies,
            "{} won {}, {} won {}",
            self.agents[0].name(),
            self.stats.wins[0],
            self.agents[1].name(),
            self.stats.wins[1]
        );

        if self.stats.played == 0 {
            return Err(anyhow!("all {} matches failed", self.matches));
        }
        Ok(&self.stats)
    }

    /// Agent index sitting as player A in match `index`. Seats alternate
    /// so both agents get to move first.
    fn first_seat(index: u32) -> usize {
        (index % 2) as usize
    }

    fn agent_for(first: usize, player: Player) -> usize {
        match player {
            Player::A => first,
            Player::B => 1 - first,
        }
    }

    /// Play one match to completion.
    pub fn play_match(&mut self, index: u32) -> Result<MatchOutcome> {
        let first = Self::first_seat(index);
        let mut game = LocalMatch::new(self.width, self.height, self.target);
        let max_plies = self.width * self.height;
        let started = Instant::now();

        debug!(
            match_number = index + 1,
            player_a = self.agents[first].name(),
            player_b = self.agents[1 - first].name(),
            "Starting match"
        );

        let result = loop {
            if let Some(result) = game.outcome() {
                break result;
            }
            if game.moves().len() >= max_plies {
                return Err(anyhow!(
                    "match exceeded {} plies without finishing",
                    max_plies
                ));
            }

            let me = game.to_move();
            let agent = &mut self.agents[Self::agent_for(first, me)];
            let action = agent.take_turn(&mut game, me)?;
            debug!(
                player = %me,
                agent = agent.name(),
                column = action.column,
                row = action.row,
                "Piece placed"
            );
        };

        let winner = match result {
            Outcome::Winner(player) => Some(player),
            Outcome::Draw => None,
        };
        let outcome = MatchOutcome {
            winner,
            plies: game.moves().len() as u32,
            elapsed: started.elapsed(),
        };
        let winning_agent = winner.map(|player| Self::agent_for(first, player));
        self.stats.record(&outcome, winning_agent);

        info!(
            match_number = index + 1,
            winner = winning_agent.map_or("draw", |idx| self.agents[idx].name()),
            plies = outcome.plies,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Match finished\n{}",
            game.board()
        );

        Ok(outcome)
    }

    /// Totals so far
    #[cfg(test)]
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }
}
