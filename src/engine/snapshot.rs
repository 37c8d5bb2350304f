//! Read-only view of the engine for a UI layer.

use serde::{Deserialize, Serialize};

use crate::board::{Square, REACH_THRESHOLD};
use crate::core::{FinalReport, GameSession, Player, PlayerId, PlayerStats};
use crate::effects::PendingMystery;
use crate::present::BgmTrack;

/// One player as seen by the UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub key: String,
    pub name: String,
    pub color: String,
    pub avatar: String,
    pub position: Square,
    pub stats: PlayerStats,
    pub average_roll: f64,
    pub skip_turns: u8,
    pub double_next_roll: bool,
    /// Within the last six squares.
    pub in_reach: bool,
    /// This player's turn, game running.
    pub active: bool,
}

impl PlayerView {
    fn new(player: &Player, active: bool) -> Self {
        Self {
            id: player.id,
            key: player.key.clone(),
            name: player.name.clone(),
            color: player.color.clone(),
            avatar: player.avatar.clone(),
            position: player.position,
            stats: player.stats,
            average_roll: player.stats.average_roll(),
            skip_turns: player.skip_turns,
            double_next_roll: player.double_next_roll,
            in_reach: player.position > REACH_THRESHOLD,
            active,
        }
    }
}

/// Everything a UI needs to draw the game and gate its inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current: PlayerId,
    pub turn_number: u32,
    pub started: bool,
    pub ended: bool,
    pub winner: Option<PlayerId>,
    pub reach: bool,
    pub processing: bool,
    pub roll_enabled: bool,
    /// No animation steps are queued.
    pub idle: bool,
    pub prediction: Option<Square>,
    pub pending_mystery: Option<PendingMystery>,
    pub settings_open: bool,
    pub bgm: BgmTrack,
    pub players: Vec<PlayerView>,
    pub final_report: Option<FinalReport>,
}

impl Snapshot {
    pub(crate) fn capture(session: &GameSession, idle: bool) -> Self {
        let running = session.started && !session.ended;
        Self {
            current: session.current,
            turn_number: session.turn_number,
            started: session.started,
            ended: session.ended,
            winner: session.winner,
            reach: session.reach,
            processing: session.processing,
            roll_enabled: session.roll_enabled,
            idle,
            prediction: session.prediction,
            pending_mystery: session.pending_mystery,
            settings_open: session.settings_open,
            bgm: session.bgm,
            players: session
                .players
                .iter()
                .map(|(id, p)| PlayerView::new(p, running && id == session.current))
                .collect(),
            final_report: session.final_report.clone(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerView {
        &self.players[id.index()]
    }

    /// Positions in seat order.
    #[must_use]
    pub fn positions(&self) -> Vec<Square> {
        self.players.iter().map(|p| p.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fresh_session() {
        let session = GameSession::new();
        let snap = Snapshot::capture(&session, true);

        assert!(!snap.started);
        assert_eq!(snap.positions(), vec![0, 0, 0]);
        assert!(snap.players.iter().all(|p| !p.active && !p.in_reach));
        assert_eq!(snap.player(PlayerId::new(2)).name, "ママ");
    }

    #[test]
    fn test_capture_marks_active_and_reach() {
        let mut session = GameSession::new();
        session.started = true;
        session.current = PlayerId::new(1);
        session.player_mut(PlayerId::new(2)).position = 31;

        let snap = Snapshot::capture(&session, true);

        assert!(snap.player(PlayerId::new(1)).active);
        assert!(!snap.player(PlayerId::new(0)).active);
        assert!(snap.player(PlayerId::new(2)).in_reach);
    }

    #[test]
    fn test_snapshot_json() {
        let snap = Snapshot::capture(&GameSession::new(), true);
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
