//! Mystery box roulette.
//!
//! The wheel is split into six 60° sectors, one per outcome in declaration
//! order. A spin lands on a rotation; the outcome is the sector containing
//! `rotation mod 360`.

use serde::{Deserialize, Serialize};

use super::Followup;
use crate::core::{PlayerId, RandomSource};
use crate::present::Cue;

/// Width of one roulette sector, in degrees.
pub const SECTOR_DEGREES: f64 = 60.0;

/// Steps granted by the rocket outcome.
pub const ROCKET_STEPS: u8 = 5;

/// The six equiprobable mystery outcomes, in wheel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MysteryOutcome {
    /// Walk forward five squares.
    Rocket,
    /// Straight back to square 0.
    ReturnToStart,
    /// Take one square from every other player off the start.
    StealSteps,
    /// Swap with the rearmost other player, if they are strictly behind.
    SwapWithLast,
    /// Skip the next turn (absolute, not cumulative).
    SkipOne,
    /// Roll again.
    ExtraTurn,
}

impl MysteryOutcome {
    /// All outcomes in wheel order.
    pub const ALL: [MysteryOutcome; 6] = [
        MysteryOutcome::Rocket,
        MysteryOutcome::ReturnToStart,
        MysteryOutcome::StealSteps,
        MysteryOutcome::SwapWithLast,
        MysteryOutcome::SkipOne,
        MysteryOutcome::ExtraTurn,
    ];

    /// The outcome under the pointer for a given wheel rotation in degrees.
    ///
    /// ```
    /// use sugoroku::effects::MysteryOutcome;
    ///
    /// assert_eq!(MysteryOutcome::from_rotation(59.9), MysteryOutcome::Rocket);
    /// assert_eq!(MysteryOutcome::from_rotation(60.1), MysteryOutcome::ReturnToStart);
    /// assert_eq!(MysteryOutcome::from_rotation(359.9), MysteryOutcome::ExtraTurn);
    /// assert_eq!(MysteryOutcome::from_rotation(360.0 * 7.0 + 130.0), MysteryOutcome::StealSteps);
    /// ```
    #[must_use]
    pub fn from_rotation(rotation: f64) -> Self {
        let angle = rotation.rem_euclid(360.0);
        let sector = (angle / SECTOR_DEGREES).floor() as usize;
        Self::ALL[sector.min(Self::ALL.len() - 1)]
    }

    /// Position on the wheel.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Text shown when the wheel stops.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MysteryOutcome::Rocket => "ロケット！5マス進む",
            MysteryOutcome::ReturnToStart => "悲劇…スタートに戻る",
            MysteryOutcome::StealSteps => "全員から1マス吸収",
            MysteryOutcome::SwapWithLast => "最下位と場所を交換",
            MysteryOutcome::SkipOne => "ひとやすみ。1回休み",
            MysteryOutcome::ExtraTurn => "もう一度サイコロ！",
        }
    }

    /// Cue played when the outcome is applied.
    #[must_use]
    pub const fn cue(self) -> Cue {
        match self {
            MysteryOutcome::Rocket => Cue::Rocket,
            MysteryOutcome::ReturnToStart => Cue::ReturnStart,
            MysteryOutcome::StealSteps => Cue::Lucky,
            MysteryOutcome::SwapWithLast => Cue::Swap,
            MysteryOutcome::SkipOne => Cue::Sleep,
            MysteryOutcome::ExtraTurn => Cue::Fortune,
        }
    }

    /// How the turn continues after this outcome.
    #[must_use]
    pub const fn followup(self) -> Followup {
        match self {
            MysteryOutcome::Rocket | MysteryOutcome::StealSteps => Followup::Resolve,
            MysteryOutcome::ExtraTurn => Followup::ExtraTurn,
            MysteryOutcome::ReturnToStart
            | MysteryOutcome::SwapWithLast
            | MysteryOutcome::SkipOne => Followup::AdvanceTurn,
        }
    }
}

/// Draw a final wheel rotation: five to ten full turns plus a uniform offset.
pub fn draw_rotation(rng: &mut impl RandomSource) -> f64 {
    let spins = 5.0 + rng.uniform_float() * 5.0;
    spins * 360.0 + rng.uniform_float() * 360.0
}

/// A revealed outcome waiting for confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingMystery {
    pub player: PlayerId,
    pub outcome: MysteryOutcome,
    /// Where the wheel stopped, in degrees.
    pub rotation: f64,
}
