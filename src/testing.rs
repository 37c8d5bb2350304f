//! Testing utilities.
//!
//! This module provides tools for deterministic game scenarios:
//! - [`ScriptedRandom`] replays queued dice faces and wheel draws
//! - [`Scenario`] builds a started engine with pieces already placed
//!
//! ```
//! use sugoroku::testing::Scenario;
//! use sugoroku::PlayerId;
//!
//! let mut engine = Scenario::new().place(PlayerId::new(0), 34).rolls([2]).build();
//! engine.roll_dice();
//! engine.run_until_idle();
//!
//! assert_eq!(engine.session().winner, Some(PlayerId::new(0)));
//! ```

use std::collections::VecDeque;

use crate::board::{Board, Square};
use crate::core::{EngineConfig, GameRng, PlayerId, RandomSource, Timings};
use crate::effects::{MysteryOutcome, SECTOR_DEGREES};
use crate::engine::TurnEngine;
use crate::present::{EventLog, RecordingRenderer};

/// Engine type produced by [`Scenario::build`].
pub type TestEngine = TurnEngine<ScriptedRandom, EventLog, RecordingRenderer>;

/// Random source that replays scripted values, then falls back to a seeded RNG.
///
/// Scripted integers are clamped into the requested range, so a scripted 9
/// on a die reads as 6.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    ints: VecDeque<i32>,
    floats: VecDeque<f64>,
    fallback: GameRng,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            ints: VecDeque::new(),
            floats: VecDeque::new(),
            fallback: GameRng::new(seed),
        }
    }

    /// Queue integer draws (dice faces, survivor and swap picks).
    pub fn push_ints(&mut self, values: impl IntoIterator<Item = i32>) {
        self.ints.extend(values);
    }

    /// Queue float draws in `[0, 1)`.
    pub fn push_floats(&mut self, values: impl IntoIterator<Item = f64>) {
        self.floats.extend(values);
    }

    /// Queue the two wheel draws that stop on `outcome`.
    pub fn push_mystery(&mut self, outcome: MysteryOutcome) {
        let angle = outcome.index() as f64 * SECTOR_DEGREES + SECTOR_DEGREES / 2.0;
        self.floats.extend([0.0, angle / 360.0]);
    }

    /// Scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.floats.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        match self.ints.pop_front() {
            Some(value) => value.clamp(low, high),
            None => self.fallback.uniform_int(low, high),
        }
    }

    fn uniform_float(&mut self) -> f64 {
        match self.floats.pop_front() {
            Some(value) => value.clamp(0.0, 1.0 - f64::EPSILON),
            None => self.fallback.uniform_float(),
        }
    }
}

/// Builder for a started game in a chosen position.
///
/// Timings are zero so scheduling can be checked without real waits.
#[derive(Clone, Debug)]
pub struct Scenario {
    seed: u64,
    positions: Vec<(PlayerId, Square)>,
    current: PlayerId,
    rng: ScriptedRandom,
    timings: Timings,
}

impl Scenario {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed: 0,
            positions: Vec::new(),
            current: PlayerId::new(0),
            rng: ScriptedRandom::new(0),
            timings: Timings::instant(),
        }
    }

    /// Seed for draws past the end of the script.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng.fallback = GameRng::new(seed);
        self
    }

    #[must_use]
    pub fn place(mut self, player: PlayerId, square: Square) -> Self {
        self.positions.push((player, square));
        self
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current(mut self, player: PlayerId) -> Self {
        self.current = player;
        self
    }

    /// Script dice faces and other integer draws.
    #[must_use]
    pub fn rolls(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rng.push_ints(values);
        self
    }

    /// Script float draws.
    #[must_use]
    pub fn floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.rng.push_floats(values);
        self
    }

    /// Script the next roulette result.
    #[must_use]
    pub fn mystery(mut self, outcome: MysteryOutcome) -> Self {
        self.rng.push_mystery(outcome);
        self
    }

    /// Use real timings instead of zero waits.
    #[must_use]
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Build and start the engine, then place the pieces.
    #[must_use]
    pub fn build(self) -> TestEngine {
        let config = EngineConfig::new(self.seed).with_timings(self.timings);
        let sink = EventLog::new(config.log_capacity);
        let mut engine = TurnEngine::with_parts(
            Board::standard(),
            config,
            self.rng,
            sink,
            RecordingRenderer::new(),
        );
        engine.start();
        for (player, square) in self.positions {
            engine.session.player_mut(player).position = square;
        }
        engine.session.current = self.current;
        engine
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_ints_then_fallback() {
        let mut rng = ScriptedRandom::new(5);
        rng.push_ints([3, 9]);

        assert_eq!(rng.uniform_int(1, 6), 3);
        assert_eq!(rng.uniform_int(1, 6), 6);
        let drawn = rng.uniform_int(1, 6);
        assert!((1..=6).contains(&drawn));
    }

    #[test]
    fn test_push_mystery_lands_on_outcome() {
        for outcome in MysteryOutcome::ALL {
            let mut rng = ScriptedRandom::new(0);
            rng.push_mystery(outcome);
            let rotation = crate::effects::draw_rotation(&mut rng);
            assert_eq!(MysteryOutcome::from_rotation(rotation), outcome);
        }
    }

    #[test]
    fn test_scenario_places_pieces() {
        let engine = Scenario::new()
            .place(PlayerId::new(1), 12)
            .current(PlayerId::new(1))
            .build();

        assert!(engine.session().started);
        assert_eq!(engine.session().player(PlayerId::new(1)).position, 12);
        assert_eq!(engine.session().current, PlayerId::new(1));
    }
}
