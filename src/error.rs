//! Errors for fallible construction.
//!
//! Game flow itself never fails: guarded entry points report a
//! [`RejectReason`](crate::engine::RejectReason) instead. Only building a board
//! from its tagged layout and loading a configuration can go wrong.

use thiserror::Error;

use crate::board::Square;

/// A board layout that violates the topology rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown gimmick effect tag {tag:?} on square {square}")]
    UnknownEffect { square: Square, tag: String },

    #[error("square {square} is both a mystery square and a gimmick square")]
    Overlap { square: Square },

    #[error("square {square} is the start or the goal and cannot be special")]
    ReservedSquare { square: Square },

    #[error("square {square} is off the board (goal is {goal})")]
    OutOfRange { square: Square, goal: Square },
}

/// A configuration that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("log capacity must be at least 1")]
    ZeroLogCapacity,
}
