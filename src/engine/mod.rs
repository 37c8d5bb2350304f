//! The turn engine.
//!
//! [`TurnEngine`] owns the session, the board and the randomness source, and
//! drives one turn at a time to completion:
//!
//! ```text
//! roll_dice ─▶ Roll ─▶ Walk × n ─▶ Resolve ─┬─▶ goal      ─▶ end_game
//!                                           ├─▶ collision ─▶ SendHome × k ─▶ AdvanceTurn
//!                                           ├─▶ gimmick   ─▶ (Walk × n ─▶ Resolve) | AdvanceTurn | extra turn
//!                                           ├─▶ mystery   ─▶ SpinRoulette ─▶ RevealMystery
//!                                           └─▶ plain     ─▶ AdvanceTurn
//! confirm_mystery_outcome ─▶ (Walk × n ─▶ Resolve) | AdvanceTurn | extra turn
//! ```
//!
//! ## Scheduling
//!
//! The engine never sleeps. Entry points queue steps; an external scheduler
//! waits [`next_wait`](TurnEngine::next_wait) and calls
//! [`advance`](TurnEngine::advance) until the queue drains. Headless callers
//! use [`run_until_idle`](TurnEngine::run_until_idle).
//!
//! ## Processing lock
//!
//! `processing` is set before any entry point yields and stays set until the
//! turn passes, an extra turn is granted, or a mystery outcome is on screen.
//! While it is set, `roll_dice` and `confirm_mystery_outcome` are rejected.
//! After the game ends it stays set until `reset`.
//!
//! ## Example
//!
//! ```
//! use sugoroku::{EngineConfig, TurnEngine};
//!
//! let mut engine = TurnEngine::new(EngineConfig::new(42));
//! engine.start();
//! engine.roll_dice();
//! engine.run_until_idle();
//!
//! let snapshot = engine.snapshot();
//! assert!(snapshot.idle);
//! assert_eq!(snapshot.players[0].stats.roll_count, 1);
//! ```

mod resolve;
mod snapshot;
mod step;

pub use snapshot::{PlayerView, Snapshot};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::core::{EngineConfig, GameRng, GameSession, PlayerId, RandomSource};
use crate::present::{BgmTrack, Cue, EventLog, Importance, NullRenderer, Renderer, Sink};

use step::{Step, StepQueue};

/// Why an entry point did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NotStarted,
    AlreadyStarted,
    GameOver,
    /// Another action sequence is in flight.
    Busy,
    /// Rolling is disabled for the current state.
    RollDisabled,
    /// A mystery outcome must be confirmed first.
    AwaitingConfirmation,
    /// No mystery outcome is staged.
    NothingPending,
}

/// Result of a guarded entry point. Rejections are silent no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Accepted,
    /// The roll was consumed by a skipped turn.
    Skipped,
    Rejected(RejectReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, ActionOutcome::Rejected(_))
    }
}

/// Sequential state machine for one Sugoroku session.
pub struct TurnEngine<R = GameRng, S = EventLog, V = NullRenderer> {
    pub(crate) board: Board,
    pub(crate) config: EngineConfig,
    pub(crate) session: GameSession,
    pub(crate) rng: R,
    pub(crate) sink: S,
    pub(crate) renderer: V,
    pub(crate) queue: StepQueue,
}

impl TurnEngine {
    /// Standard board, seeded RNG, recording sink, no renderer.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let sink = EventLog::new(config.log_capacity);
        Self::with_parts(Board::standard(), config, rng, sink, NullRenderer)
    }
}

impl<R: RandomSource, S: Sink, V: Renderer> TurnEngine<R, S, V> {
    /// Assemble an engine from explicit collaborators.
    pub fn with_parts(board: Board, config: EngineConfig, rng: R, sink: S, renderer: V) -> Self {
        Self {
            board,
            config,
            session: GameSession::new(),
            rng,
            sink,
            renderer,
            queue: StepQueue::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut V {
        &mut self.renderer
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Read-only view for a UI layer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, self.queue.is_empty())
    }

    /// True while a turn-altering sequence is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.session.processing
    }

    /// No steps are queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    // === Lifecycle ===

    /// Begin the game: turn 1, first seat to roll.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> ActionOutcome {
        if self.session.started {
            return ActionOutcome::Rejected(RejectReason::AlreadyStarted);
        }

        self.session.started = true;
        self.session.turn_number = 1;
        self.session.processing = false;
        self.session.roll_enabled = true;
        self.set_bgm(BgmTrack::Normal);

        let first = self.session.current_player().name.clone();
        info!(first = %first, "game started");
        self.log(format!("ゲームが始まりました！{first}からスタートです。"), Importance::Important);
        self.render_board();
        ActionOutcome::Accepted
    }

    /// Back to the not-started state. Queued steps are discarded, so a reset
    /// in the middle of an animation leaves nothing behind.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.set_bgm(BgmTrack::Stopped);
        self.session.reset();

        info!(dropped_steps = dropped, "game reset");
        self.sink.clear_log();
        self.renderer.highlight_prediction(None);
        self.log("ゲーム開始を待っています...", Importance::Normal);
        self.render_board();
    }

    /// Open the settings panel. No gameplay effect.
    pub fn open_settings(&mut self) {
        self.session.settings_open = true;
    }

    /// Close the settings panel. No gameplay effect.
    pub fn close_settings(&mut self) {
        self.session.settings_open = false;
    }

    // === Turn entry points ===

    /// Roll for the current player.
    ///
    /// Takes the processing lock before anything else. A player with skipped
    /// turns pending consumes one and the turn passes without a roll.
    #[instrument(skip(self), fields(player = %self.session.current))]
    pub fn roll_dice(&mut self) -> ActionOutcome {
        if let Some(reason) = self.roll_blocker() {
            debug!(?reason, "roll rejected");
            return ActionOutcome::Rejected(reason);
        }

        self.session.processing = true;
        self.session.roll_enabled = false;

        let player = self.session.current;
        let skipping = {
            let p = self.session.player_mut(player);
            if p.skip_turns > 0 {
                p.skip_turns -= 1;
                true
            } else {
                false
            }
        };

        if skipping {
            let name = self.session.player(player).name.clone();
            debug!(%player, "turn skipped");
            self.sink.notify(Cue::Sleep);
            self.log(format!("{name}は1回休みです。"), Importance::Normal);
            self.advance_turn();
            return ActionOutcome::Skipped;
        }

        self.sink.notify(Cue::Anticipation);
        self.queue.push(self.config.timings.anticipation(), Step::Roll { player });
        ActionOutcome::Accepted
    }

    /// Apply the staged mystery outcome.
    #[instrument(skip(self))]
    pub fn confirm_mystery_outcome(&mut self) -> ActionOutcome {
        if self.session.ended {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }
        if self.session.processing {
            return ActionOutcome::Rejected(RejectReason::Busy);
        }
        let Some(pending) = self.session.pending_mystery.take() else {
            return ActionOutcome::Rejected(RejectReason::NothingPending);
        };

        self.session.processing = true;
        self.apply_mystery(pending.player, pending.outcome);
        ActionOutcome::Accepted
    }

    /// Make a player's next roll count double.
    pub fn grant_double_roll(&mut self, player: PlayerId) -> ActionOutcome {
        if self.session.ended {
            return ActionOutcome::Rejected(RejectReason::GameOver);
        }
        if self.session.processing {
            return ActionOutcome::Rejected(RejectReason::Busy);
        }
        self.session.player_mut(player).double_next_roll = true;
        ActionOutcome::Accepted
    }

    /// The single "primary" input: confirm a revealed mystery outcome, restart
    /// a finished game, close settings, or roll, whichever applies first.
    pub fn press_primary(&mut self) -> ActionOutcome {
        if self.session.pending_mystery.is_some() {
            return self.confirm_mystery_outcome();
        }
        if self.session.ended {
            self.reset();
            return ActionOutcome::Accepted;
        }
        if self.session.settings_open {
            self.close_settings();
            return ActionOutcome::Accepted;
        }
        self.roll_dice()
    }

    fn roll_blocker(&self) -> Option<RejectReason> {
        let s = &self.session;
        if !s.started {
            Some(RejectReason::NotStarted)
        } else if s.ended {
            Some(RejectReason::GameOver)
        } else if s.processing {
            Some(RejectReason::Busy)
        } else if s.pending_mystery.is_some() {
            Some(RejectReason::AwaitingConfirmation)
        } else if !s.roll_enabled {
            Some(RejectReason::RollDisabled)
        } else {
            None
        }
    }

    // === Scheduling ===

    /// Wait before the next step, or `None` when idle.
    #[must_use]
    pub fn next_wait(&self) -> Option<Duration> {
        self.queue.peek_wait()
    }

    /// Run exactly one queued step. Returns false when idle.
    pub fn advance(&mut self) -> bool {
        match self.queue.pop() {
            Some(scheduled) => {
                self.run_step(scheduled.step);
                true
            }
            None => false,
        }
    }

    /// Run every queued step, ignoring waits. Returns the number of steps run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0;
        while self.advance() {
            count += 1;
        }
        count
    }

    // === Shared helpers ===

    pub(crate) fn log(&mut self, message: impl AsRef<str>, importance: Importance) {
        self.sink.log(message.as_ref(), importance);
    }

    pub(crate) fn set_bgm(&mut self, track: BgmTrack) {
        if self.session.bgm != track {
            self.session.bgm = track;
            self.sink.change_bgm(track);
        }
    }

    pub(crate) fn render_board(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render_board(&snapshot);
    }

    pub(crate) fn render_piece(&mut self, player: PlayerId) {
        self.renderer.render_piece(self.session.player(player));
    }

    pub(crate) fn clear_prediction(&mut self) {
        if self.session.prediction.take().is_some() {
            self.renderer.highlight_prediction(None);
        }
    }
}
