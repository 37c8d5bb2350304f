//! Square effects and how a turn continues after them.
//!
//! Two families of effects act on the player who arrives at a square:
//! - Gimmicks: fixed per square, see [`GimmickEffect`](crate::board::GimmickEffect)
//! - Mystery outcomes: drawn from a six-sector roulette, see [`MysteryOutcome`]
//!
//! Every effect ends in one of three ways, captured by [`Followup`]. The
//! engine dispatches on it after applying the effect.

mod mystery;

pub use mystery::{draw_rotation, MysteryOutcome, PendingMystery, ROCKET_STEPS, SECTOR_DEGREES};

use serde::{Deserialize, Serialize};

use crate::board::GimmickEffect;

/// What happens after an effect has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Followup {
    /// Pass the turn to the next player.
    AdvanceTurn,
    /// The player was walked to a new square; resolve it.
    Resolve,
    /// Same player rolls again; the turn does not advance.
    ExtraTurn,
}

impl GimmickEffect {
    /// How the turn continues after this gimmick.
    #[must_use]
    pub const fn followup(self) -> Followup {
        match self {
            GimmickEffect::ExtraTurn => Followup::ExtraTurn,
            GimmickEffect::Advance(_) | GimmickEffect::Retreat(_) | GimmickEffect::RandomBig => {
                Followup::Resolve
            }
            GimmickEffect::Skip
            | GimmickEffect::Swap
            | GimmickEffect::ToStart
            | GimmickEffect::AllBack(_) => Followup::AdvanceTurn,
        }
    }
}
