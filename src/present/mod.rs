//! Output collaborators: the renderer and the sound/log sink.
//!
//! The engine never touches a display or an audio device. It reports what
//! happened through two traits:
//!
//! - [`Renderer`]: reflects piece positions and cosmetic highlights. Piece
//!   renders are part of the animation contract: one call per square walked.
//! - [`Sink`]: audio cues from a fixed vocabulary ([`Cue`]), background music
//!   changes, and the textual log trail.
//!
//! Both are infallible from the engine's point of view. A collaborator that
//! fails to play a sound or draw a frame deals with it internally; game
//! progression never waits on it.

mod log;

pub use log::{EventLog, LogEntry, LogTrail};

use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::core::{Player, PlayerId};
use crate::engine::Snapshot;

/// Audio cue identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cue {
    NormalRoll,
    HighRoll,
    LowRoll,
    CriticalHit,
    Move,
    Collision,
    ReturnStart,
    MysteryBox,
    Rocket,
    Sad,
    Lucky,
    Sleep,
    Wind,
    Swap,
    Bomb,
    Money,
    Blackhole,
    Storm,
    Fortune,
    Tragedy,
    Win,
    Firework,
    Anticipation,
    DoubleBonus,
    Reach,
}

impl Cue {
    /// Every cue, in declaration order.
    pub const ALL: [Cue; 25] = [
        Cue::NormalRoll,
        Cue::HighRoll,
        Cue::LowRoll,
        Cue::CriticalHit,
        Cue::Move,
        Cue::Collision,
        Cue::ReturnStart,
        Cue::MysteryBox,
        Cue::Rocket,
        Cue::Sad,
        Cue::Lucky,
        Cue::Sleep,
        Cue::Wind,
        Cue::Swap,
        Cue::Bomb,
        Cue::Money,
        Cue::Blackhole,
        Cue::Storm,
        Cue::Fortune,
        Cue::Tragedy,
        Cue::Win,
        Cue::Firework,
        Cue::Anticipation,
        Cue::DoubleBonus,
        Cue::Reach,
    ];

    /// The wire identifier of this cue, as an audio host keys its clips.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Cue::NormalRoll => "normalRoll",
            Cue::HighRoll => "highRoll",
            Cue::LowRoll => "lowRoll",
            Cue::CriticalHit => "criticalHit",
            Cue::Move => "move",
            Cue::Collision => "collision",
            Cue::ReturnStart => "returnStart",
            Cue::MysteryBox => "mysteryBox",
            Cue::Rocket => "rocket",
            Cue::Sad => "sad",
            Cue::Lucky => "lucky",
            Cue::Sleep => "sleep",
            Cue::Wind => "wind",
            Cue::Swap => "swap",
            Cue::Bomb => "bomb",
            Cue::Money => "money",
            Cue::Blackhole => "blackhole",
            Cue::Storm => "storm",
            Cue::Fortune => "fortune",
            Cue::Tragedy => "tragedy",
            Cue::Win => "win",
            Cue::Firework => "firework",
            Cue::Anticipation => "anticipation",
            Cue::DoubleBonus => "doubleBonus",
            Cue::Reach => "reach",
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmetic classification of a die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollTier {
    Six,
    High,
    Low,
}

impl RollTier {
    #[must_use]
    pub fn classify(face: u8) -> Self {
        match face {
            6 => RollTier::Six,
            4..=5 => RollTier::High,
            _ => RollTier::Low,
        }
    }

    #[must_use]
    pub const fn cue(self) -> Cue {
        match self {
            RollTier::Six => Cue::CriticalHit,
            RollTier::High => Cue::HighRoll,
            RollTier::Low => Cue::LowRoll,
        }
    }
}

/// How prominently a log line should be shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[default]
    Normal,
    Important,
}

/// Background music tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgmTrack {
    /// Not started, or the game is over.
    #[default]
    Stopped,
    Normal,
    /// Someone is in reach of the goal.
    Finale,
}

/// Reflects engine state to a display.
pub trait Renderer {
    /// A piece moved. Called once for every square of every walk.
    fn render_piece(&mut self, player: &Player);

    /// Redraw everything from a snapshot.
    fn render_board(&mut self, _snapshot: &Snapshot) {}

    /// Show (or clear, with `None`) the predicted landing square.
    fn highlight_prediction(&mut self, _square: Option<Square>) {}

    /// Show the die: the raw face and the effective step count.
    fn show_dice(&mut self, _face: u8, _steps: u8) {}

    /// Start the roulette spin toward `rotation` degrees.
    fn spin_roulette(&mut self, _rotation: f64) {}

    /// Flash a collision on a square.
    fn show_collision(&mut self, _square: Square) {}
}

/// Receives audio cues and log lines.
pub trait Sink {
    fn notify(&mut self, cue: Cue);

    fn log(&mut self, message: &str, importance: Importance);

    fn change_bgm(&mut self, _track: BgmTrack) {}

    /// Drop the whole log trail (on reset).
    fn clear_log(&mut self) {}
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_piece(&mut self, _player: &Player) {}
}

/// Renderer that remembers everything it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    /// Every piece render, in order.
    pub pieces: Vec<(PlayerId, Square)>,
    pub predictions: Vec<Option<Square>>,
    pub dice: Vec<(u8, u8)>,
    pub rotations: Vec<f64>,
    pub collisions: Vec<Square>,
    pub board_renders: usize,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Squares rendered for one player, in order.
    #[must_use]
    pub fn path_of(&self, player: PlayerId) -> Vec<Square> {
        self.pieces
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|&(_, s)| s)
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render_piece(&mut self, player: &Player) {
        self.pieces.push((player.id, player.position));
    }

    fn render_board(&mut self, _snapshot: &Snapshot) {
        self.board_renders += 1;
    }

    fn highlight_prediction(&mut self, square: Option<Square>) {
        self.predictions.push(square);
    }

    fn show_dice(&mut self, face: u8, steps: u8) {
        self.dice.push((face, steps));
    }

    fn spin_roulette(&mut self, rotation: f64) {
        self.rotations.push(rotation);
    }

    fn show_collision(&mut self, square: Square) {
        self.collisions.push(square);
    }
}
