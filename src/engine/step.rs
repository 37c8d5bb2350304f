//! Discrete animation steps.
//!
//! A roll or a mystery confirmation does not run to completion inside the
//! call. It queues [`Step`]s, each tagged with the wait the scheduler must
//! observe before running it. Steps run in FIFO order, one per
//! [`TurnEngine::advance`](super::TurnEngine::advance); a step may schedule
//! its own continuation.

use std::collections::VecDeque;
use std::time::Duration;

use crate::board::Square;
use crate::core::PlayerId;

/// Why a player is walking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WalkPurpose {
    /// Moving by the dice. Plays the move cue on every square.
    Roll,
    /// Displaced by a gimmick or mystery outcome. Reaching the goal ends the
    /// game immediately.
    Effect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Dice stop tumbling: draw the face and show the prediction.
    Roll { player: PlayerId },
    /// Move exactly one square toward `target`.
    Walk {
        player: PlayerId,
        target: Square,
        purpose: WalkPurpose,
    },
    /// Evaluate the square the player stands on.
    Resolve { player: PlayerId },
    /// A collision loser goes back to the start.
    SendHome { player: PlayerId },
    /// Pass the turn.
    AdvanceTurn,
    /// Mystery box is open; start the wheel.
    SpinRoulette { player: PlayerId },
    /// Wheel stopped; stage the outcome for confirmation.
    RevealMystery { player: PlayerId, rotation: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Scheduled {
    pub wait: Duration,
    pub step: Step,
}

/// FIFO of scheduled steps.
#[derive(Clone, Debug, Default)]
pub(crate) struct StepQueue {
    pending: VecDeque<Scheduled>,
}

impl StepQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, wait: Duration, step: Step) {
        self.pending.push_back(Scheduled { wait, step });
    }

    pub fn pop(&mut self) -> Option<Scheduled> {
        self.pending.pop_front()
    }

    pub fn peek_wait(&self) -> Option<Duration> {
        self.pending.front().map(|s| s.wait)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
