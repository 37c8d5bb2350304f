//! Gimmick square definitions.
//!
//! Layout tables describe gimmicks with short string tags (`"+3"`, `"swap"`,
//! ...). Tags are decoded exactly once, when the board is built, into the
//! closed [`GimmickEffect`] variant the engine matches on.

use serde::{Deserialize, Serialize};

use crate::present::Cue;

/// Steps moved by the random_big gimmick, in either direction.
pub const RANDOM_BIG_STEPS: u8 = 3;

/// What a gimmick square does to the player who lands on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GimmickEffect {
    /// Walk forward `n` squares, then resolve the new square.
    Advance(u8),
    /// Walk back `n` squares, then resolve the new square.
    Retreat(u8),
    /// Exchange positions with a uniformly chosen other player.
    Swap,
    /// Jump straight back to the start.
    ToStart,
    /// Every player off the start square moves back `n` (floor 0).
    AllBack(u8),
    /// Walk [`RANDOM_BIG_STEPS`] forward or back with equal odds.
    RandomBig,
    /// Roll again without passing the turn.
    ExtraTurn,
    /// Lose the next turn.
    Skip,
}

impl GimmickEffect {
    /// Decode a layout tag.
    ///
    /// Signed tags need a non-zero magnitude written in plain digits.
    ///
    /// ```
    /// use sugoroku::board::GimmickEffect;
    ///
    /// assert_eq!(GimmickEffect::decode("+3"), Some(GimmickEffect::Advance(3)));
    /// assert_eq!(GimmickEffect::decode("-2"), Some(GimmickEffect::Retreat(2)));
    /// assert_eq!(GimmickEffect::decode("start"), Some(GimmickEffect::ToStart));
    /// assert_eq!(GimmickEffect::decode("fly"), None);
    /// ```
    #[must_use]
    pub fn decode(tag: &str) -> Option<Self> {
        match tag {
            "extra_turn" => Some(Self::ExtraTurn),
            "skip" => Some(Self::Skip),
            "swap" => Some(Self::Swap),
            "start" => Some(Self::ToStart),
            "all_back" => Some(Self::AllBack(1)),
            "random_big" => Some(Self::RandomBig),
            _ => {
                let (sign, digits) = tag.split_at(tag.char_indices().nth(1)?.0);
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let n: u8 = digits.parse().ok().filter(|&n| n > 0)?;
                match sign {
                    "+" => Some(Self::Advance(n)),
                    "-" => Some(Self::Retreat(n)),
                    _ => None,
                }
            }
        }
    }

    /// Signed displacement for walk effects, `None` for the rest.
    ///
    /// `RandomBig` has no fixed displacement; its sign is drawn at resolution.
    #[must_use]
    pub fn fixed_displacement(self) -> Option<i16> {
        match self {
            Self::Advance(n) => Some(i16::from(n)),
            Self::Retreat(n) => Some(-i16::from(n)),
            _ => None,
        }
    }
}

/// A decoded gimmick square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gimmick {
    /// Display name.
    pub name: String,
    pub effect: GimmickEffect,
    /// Cue played when a player lands here.
    pub cue: Cue,
}
