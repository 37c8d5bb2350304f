//! # sugoroku
//!
//! Turn engine for a three-player Sugoroku race on a 36-square track.
//!
//! ## Design Principles
//!
//! 1. **One action in flight**: a processing lock admits a single dice roll
//!    or mystery confirmation at a time. Everything else is a silent no-op.
//!
//! 2. **Discrete steps**: animation pacing is a queue of steps, each with a
//!    wait. The engine never sleeps; a scheduler (or a test) drives it.
//!
//! 3. **Injected collaborators**: randomness, rendering and sound/log output
//!    are traits, so games replay deterministically under a seed.
//!
//! ## Modules
//!
//! - `core`: players, session state, RNG, configuration
//! - `board`: track topology, gimmick and mystery squares
//! - `effects`: mystery roulette and effect follow-ups
//! - `engine`: the turn state machine and its step scheduler
//! - `present`: renderer and sink traits, cue vocabulary, log trail
//! - `testing`: scripted randomness and scenario builders

pub mod core;
pub mod board;
pub mod effects;
pub mod engine;
pub mod present;
pub mod error;
pub mod testing;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, Timings,
    GameRng, RandomSource,
    Player, PlayerId, PlayerMap, PlayerStats,
    GameSession, FinalReport,
};

pub use crate::board::{Board, BoardLayout, Gimmick, GimmickEffect, Square, SquareKind, BOARD_SIZE};

pub use crate::effects::{Followup, MysteryOutcome, PendingMystery};

pub use crate::engine::{ActionOutcome, PlayerView, RejectReason, Snapshot, TurnEngine};

pub use crate::present::{
    BgmTrack, Cue, EventLog, Importance, LogTrail,
    NullRenderer, RecordingRenderer, Renderer, Sink,
};

pub use crate::error::{BoardError, ConfigError};
