//! Session state owned by the turn engine.
//!
//! ## GameSession
//!
//! Everything that changes during a game:
//! - The three players (positions, stats, modifiers)
//! - Turn progression: current seat, turn number, started/ended
//! - The processing lock and whether rolling is enabled
//! - Derived presentation state: reach flag, background music, prediction
//! - A staged mystery outcome awaiting confirmation
//!
//! The session is plain data. All transitions go through
//! [`TurnEngine`](crate::engine::TurnEngine), which is the only owner.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
use crate::board::{Square, REACH_THRESHOLD};
use crate::effects::PendingMystery;
use crate::present::BgmTrack;

/// Players sharing a square, in seat order.
pub type Occupants = SmallVec<[PlayerId; PLAYER_COUNT]>;

/// End-of-game statistics for one player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    /// Mean raw die face, 0 with no rolls.
    pub average_roll: f64,
    pub sixes: u32,
    pub gimmick_hits: u32,
    pub mystery_hits: u32,
}

/// Summary computed once when the game ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub winner: PlayerId,
    pub turns: u32,
    pub players: PlayerMap<FinalStats>,
}

impl FinalReport {
    fn compute(session: &GameSession, winner: PlayerId) -> Self {
        Self {
            winner,
            turns: session.turn_number,
            players: PlayerMap::new(|id| {
                let stats = &session.players[id].stats;
                FinalStats {
                    average_roll: stats.average_roll(),
                    sixes: stats.sixes,
                    gimmick_hits: stats.gimmick_hits,
                    mystery_hits: stats.mystery_hits,
                }
            }),
        }
    }
}

/// Mutable state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub players: PlayerMap<Player>,

    /// Seat whose turn it is.
    pub current: PlayerId,

    /// 0 before start, 1 on the first round, +1 each time seat 0 comes up again.
    pub turn_number: u32,

    pub started: bool,
    pub ended: bool,
    pub winner: Option<PlayerId>,

    /// True while a turn-altering sequence is in flight.
    pub processing: bool,

    /// Caller-visible roll button state.
    pub roll_enabled: bool,

    /// Someone is within the last six squares.
    pub reach: bool,

    /// Landing square shown while the die result is displayed.
    pub prediction: Option<Square>,

    /// Revealed mystery outcome awaiting confirmation.
    pub pending_mystery: Option<PendingMystery>,

    /// Settings panel open (no gameplay effect).
    pub settings_open: bool,

    pub bgm: BgmTrack,

    pub final_report: Option<FinalReport>,
}

impl GameSession {
    /// A fresh, not-started session with every player on square 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: PlayerMap::new(Player::from_profile),
            current: PlayerId::new(0),
            turn_number: 0,
            started: false,
            ended: false,
            winner: None,
            processing: false,
            roll_enabled: false,
            reach: false,
            prediction: None,
            pending_mystery: None,
            settings_open: false,
            bgm: BgmTrack::Stopped,
            final_report: None,
        }
    }

    /// Return to the not-started state, clearing every player's mutable fields.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Players standing on `square`, in seat order.
    #[must_use]
    pub fn occupants(&self, square: Square) -> Occupants {
        self.players
            .iter()
            .filter(|(_, p)| p.position == square)
            .map(|(id, _)| id)
            .collect()
    }

    /// Is anyone other than `player` standing on `square`?
    #[must_use]
    pub fn is_shared(&self, player: PlayerId, square: Square) -> bool {
        self.players
            .iter()
            .any(|(id, p)| id != player && p.position == square)
    }

    /// The rearmost player other than `player` (lowest seat wins ties).
    #[must_use]
    pub fn rearmost_other(&self, player: PlayerId) -> Option<PlayerId> {
        self.players
            .iter()
            .filter(|(id, _)| *id != player)
            .min_by_key(|(_, p)| p.position)
            .map(|(id, _)| id)
    }

    /// Players currently past [`REACH_THRESHOLD`].
    #[must_use]
    pub fn in_reach(&self) -> Occupants {
        self.players
            .iter()
            .filter(|(_, p)| p.position > REACH_THRESHOLD)
            .map(|(id, _)| id)
            .collect()
    }

    /// Exchange two players' positions.
    pub fn swap_positions(&mut self, a: PlayerId, b: PlayerId) {
        let pa = self.players[a].position;
        let pb = self.players[b].position;
        self.players[a].position = pb;
        self.players[b].position = pa;
    }

    /// Compute and store the final report.
    pub fn record_win(&mut self, winner: PlayerId) {
        self.ended = true;
        self.winner = Some(winner);
        self.final_report = Some(FinalReport::compute(self, winner));
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
