//! Engine configuration.
//!
//! The board itself is fixed; what a host can tune is the RNG seed, the
//! animation delays the scheduler honors between steps, and the length of the
//! textual log trail.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Animation delays, in milliseconds.
///
/// Each delay is the wait the external scheduler observes *before* the
/// corresponding step runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Dice tumbling before the face is drawn.
    pub anticipation_ms: u64,
    /// Predicted landing square shown before the walk starts.
    pub prediction_ms: u64,
    /// One square of movement.
    pub step_ms: u64,
    /// Between collision losers being sent home.
    pub collision_stagger_ms: u64,
    /// Mystery box opened, roulette not yet spinning.
    pub roulette_open_ms: u64,
    /// Roulette spinning until the outcome is shown.
    pub roulette_spin_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            anticipation_ms: 1000,
            prediction_ms: 1000,
            step_ms: 200,
            collision_stagger_ms: 500,
            roulette_open_ms: 100,
            roulette_spin_ms: 3000,
        }
    }
}

impl Timings {
    /// All delays zero. Useful for headless runs.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            anticipation_ms: 0,
            prediction_ms: 0,
            step_ms: 0,
            collision_stagger_ms: 0,
            roulette_open_ms: 0,
            roulette_spin_ms: 0,
        }
    }

    #[must_use]
    pub fn anticipation(&self) -> Duration {
        Duration::from_millis(self.anticipation_ms)
    }

    #[must_use]
    pub fn prediction(&self) -> Duration {
        Duration::from_millis(self.prediction_ms)
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    #[must_use]
    pub fn collision_stagger(&self) -> Duration {
        Duration::from_millis(self.collision_stagger_ms)
    }

    #[must_use]
    pub fn roulette_open(&self) -> Duration {
        Duration::from_millis(self.roulette_open_ms)
    }

    #[must_use]
    pub fn roulette_spin(&self) -> Duration {
        Duration::from_millis(self.roulette_spin_ms)
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the default [`GameRng`](crate::core::GameRng).
    pub seed: u64,

    pub timings: Timings,

    /// Maximum entries kept in the textual log trail.
    pub log_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            timings: Timings::default(),
            log_capacity: 50,
        }
    }
}

impl EngineConfig {
    /// Create a config with default timings and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the animation timings.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the log trail capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values a host could get wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings_match_animation_contract() {
        let t = Timings::default();
        assert_eq!(t.anticipation(), Duration::from_millis(1000));
        assert_eq!(t.step(), Duration::from_millis(200));
        assert_eq!(t.collision_stagger(), Duration::from_millis(500));
        assert_eq!(t.roulette_spin(), Duration::from_millis(3000));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(5)
            .with_timings(Timings::instant())
            .with_log_capacity(10);

        assert_eq!(config.seed, 5);
        assert_eq!(config.timings.step_ms, 0);
        assert_eq!(config.log_capacity, 10);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"seed": 99, "timings": {"step_ms": 50}}"#).unwrap();

        assert_eq!(config.seed, 99);
        assert_eq!(config.timings.step_ms, 50);
        assert_eq!(config.timings.anticipation_ms, 1000);
        assert_eq!(config.log_capacity, 50);
    }

    #[test]
    fn test_from_json_rejects_zero_capacity() {
        let err = EngineConfig::from_json(r#"{"log_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroLogCapacity));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
