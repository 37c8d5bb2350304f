//! Core types: players, session state, randomness, configuration.
//!
//! These are the building blocks the turn engine owns and mutates. Nothing
//! here knows about turn sequencing; that lives in [`crate::engine`].

pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap, PlayerStats, Profile, PLAYER_COUNT, ROSTER};
pub use rng::{GameRng, RandomSource};
pub use config::{EngineConfig, Timings};
pub use state::{FinalReport, FinalStats, GameSession, Occupants};
