//! Board topology: the linear track and its special squares.
//!
//! The track runs from square 0 (start) to [`BOARD_SIZE`] (goal). Some squares
//! open a mystery box, others carry a gimmick. The two sets are disjoint and
//! never include the start or the goal.
//!
//! A [`Board`] is immutable after construction.

mod gimmick;

pub use gimmick::{Gimmick, GimmickEffect, RANDOM_BIG_STEPS};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::present::Cue;

/// A square on the track, `0..=BOARD_SIZE`.
pub type Square = u8;

/// The goal square. Landing here (or passing it) wins.
pub const BOARD_SIZE: Square = 36;

/// Positions above this are "in reach" of the goal (the last six squares).
pub const REACH_THRESHOLD: Square = BOARD_SIZE - 7;

/// Clamp a signed position onto the track.
#[must_use]
pub fn clamp_square(position: i32) -> Square {
    position.clamp(0, i32::from(BOARD_SIZE)) as Square
}

/// How a square behaves on arrival, ignoring other players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareKind<'a> {
    Start,
    Goal,
    Mystery,
    Gimmick(&'a Gimmick),
    Plain,
}

/// One gimmick entry of a tagged layout table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GimmickEntry {
    pub square: Square,
    pub name: String,
    /// Effect tag, e.g. `"+3"` or `"swap"`.
    pub effect: String,
    pub cue: Cue,
}

/// Tagged description of the special squares, decoded by [`Board::from_layout`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub mystery: Vec<Square>,
    pub gimmicks: Vec<GimmickEntry>,
}

impl BoardLayout {
    /// The game's board.
    #[must_use]
    pub fn standard() -> Self {
        let gimmick = |square: Square, name: &str, effect: &str, cue: Cue| GimmickEntry {
            square,
            name: name.to_string(),
            effect: effect.to_string(),
            cue,
        };

        Self {
            mystery: vec![4, 8, 13, 16, 19, 22, 25, 27, 29, 31, 33, 35],
            gimmicks: vec![
                gimmick(5, "ロケットダッシュ", "+3", Cue::Rocket),
                gimmick(7, "忘れ物", "-2", Cue::Sad),
                gimmick(11, "ラッキーセブン", "extra_turn", Cue::Lucky),
                gimmick(12, "運命の分かれ道", "random_big", Cue::Fortune),
                gimmick(14, "お昼寝タイム", "skip", Cue::Sleep),
                gimmick(17, "追い風", "+2", Cue::Wind),
                gimmick(20, "場所交換", "swap", Cue::Swap),
                gimmick(23, "爆弾", "-3", Cue::Bomb),
                gimmick(26, "お小遣いゲット", "+1", Cue::Money),
                gimmick(30, "ブラックホール", "start", Cue::Blackhole),
                gimmick(32, "大嵐", "all_back", Cue::Storm),
            ],
        }
    }
}

/// Immutable board topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    mystery: FxHashSet<Square>,
    gimmicks: FxHashMap<Square, Gimmick>,
}

impl Board {
    /// The standard board.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_layout(&BoardLayout::standard()).expect("built-in board layout is valid")
    }

    /// Decode and validate a layout table.
    pub fn from_layout(layout: &BoardLayout) -> Result<Self, BoardError> {
        let check_range = |square: Square| {
            if square == 0 || square == BOARD_SIZE {
                Err(BoardError::ReservedSquare { square })
            } else if square > BOARD_SIZE {
                Err(BoardError::OutOfRange { square, goal: BOARD_SIZE })
            } else {
                Ok(())
            }
        };

        let mut mystery = FxHashSet::default();
        for &square in &layout.mystery {
            check_range(square)?;
            mystery.insert(square);
        }

        let mut gimmicks = FxHashMap::default();
        for entry in &layout.gimmicks {
            check_range(entry.square)?;
            if mystery.contains(&entry.square) {
                return Err(BoardError::Overlap { square: entry.square });
            }
            let effect = GimmickEffect::decode(&entry.effect).ok_or_else(|| {
                BoardError::UnknownEffect {
                    square: entry.square,
                    tag: entry.effect.clone(),
                }
            })?;
            gimmicks.insert(
                entry.square,
                Gimmick {
                    name: entry.name.clone(),
                    effect,
                    cue: entry.cue,
                },
            );
        }

        Ok(Self { mystery, gimmicks })
    }

    /// The goal square.
    #[must_use]
    pub const fn goal(&self) -> Square {
        BOARD_SIZE
    }

    /// Classify a square.
    #[must_use]
    pub fn kind(&self, square: Square) -> SquareKind<'_> {
        if square == 0 {
            SquareKind::Start
        } else if square >= BOARD_SIZE {
            SquareKind::Goal
        } else if let Some(gimmick) = self.gimmicks.get(&square) {
            SquareKind::Gimmick(gimmick)
        } else if self.mystery.contains(&square) {
            SquareKind::Mystery
        } else {
            SquareKind::Plain
        }
    }

    /// The gimmick on a square, if any.
    #[must_use]
    pub fn gimmick(&self, square: Square) -> Option<&Gimmick> {
        self.gimmicks.get(&square)
    }

    /// Does this square open a mystery box?
    #[must_use]
    pub fn is_mystery(&self, square: Square) -> bool {
        self.mystery.contains(&square)
    }

    /// Mystery squares in ascending order.
    #[must_use]
    pub fn mystery_squares(&self) -> Vec<Square> {
        let mut squares: Vec<_> = self.mystery.iter().copied().collect();
        squares.sort_unstable();
        squares
    }

    /// Gimmick squares in ascending order.
    #[must_use]
    pub fn gimmick_squares(&self) -> Vec<(Square, &Gimmick)> {
        let mut squares: Vec<_> = self.gimmicks.iter().map(|(&s, g)| (s, g)).collect();
        squares.sort_unstable_by_key(|&(s, _)| s);
        squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_topology() {
        let board = Board::standard();

        assert_eq!(board.goal(), 36);
        assert_eq!(board.mystery_squares().len(), 12);
        assert_eq!(board.gimmick_squares().len(), 11);

        for square in board.mystery_squares() {
            assert!(board.gimmick(square).is_none(), "square {square} overlaps");
        }
        assert_eq!(board.kind(0), SquareKind::Start);
        assert_eq!(board.kind(36), SquareKind::Goal);
        assert_eq!(board.kind(8), SquareKind::Mystery);
        assert_eq!(board.kind(1), SquareKind::Plain);
    }

    #[test]
    fn test_standard_gimmicks_decoded() {
        let board = Board::standard();

        let rocket = board.gimmick(5).unwrap();
        assert_eq!(rocket.name, "ロケットダッシュ");
        assert_eq!(rocket.effect, GimmickEffect::Advance(3));
        assert_eq!(rocket.cue, Cue::Rocket);

        assert_eq!(board.gimmick(7).unwrap().effect, GimmickEffect::Retreat(2));
        assert_eq!(board.gimmick(11).unwrap().effect, GimmickEffect::ExtraTurn);
        assert_eq!(board.gimmick(12).unwrap().effect, GimmickEffect::RandomBig);
        assert_eq!(board.gimmick(14).unwrap().effect, GimmickEffect::Skip);
        assert_eq!(board.gimmick(20).unwrap().effect, GimmickEffect::Swap);
        assert_eq!(board.gimmick(30).unwrap().effect, GimmickEffect::ToStart);
        assert_eq!(board.gimmick(32).unwrap().effect, GimmickEffect::AllBack(1));
    }

    #[test]
    fn test_layout_rejects_overlap() {
        let mut layout = BoardLayout::standard();
        layout.mystery.push(5);

        assert_eq!(Board::from_layout(&layout), Err(BoardError::Overlap { square: 5 }));
    }

    #[test]
    fn test_layout_rejects_reserved_squares() {
        let mut layout = BoardLayout::standard();
        layout.mystery.push(0);
        assert_eq!(
            Board::from_layout(&layout),
            Err(BoardError::ReservedSquare { square: 0 })
        );

        let mut layout = BoardLayout::standard();
        layout.gimmicks[0].square = BOARD_SIZE;
        assert_eq!(
            Board::from_layout(&layout),
            Err(BoardError::ReservedSquare { square: BOARD_SIZE })
        );

        let mut layout = BoardLayout::standard();
        layout.mystery.push(40);
        assert!(matches!(
            Board::from_layout(&layout),
            Err(BoardError::OutOfRange { square: 40, .. })
        ));
    }

    #[test]
    fn test_layout_rejects_unknown_tag() {
        let mut layout = BoardLayout::standard();
        layout.gimmicks[1].effect = "teleport_home".to_string();

        assert_eq!(
            Board::from_layout(&layout),
            Err(BoardError::UnknownEffect {
                square: 7,
                tag: "teleport_home".to_string()
            })
        );
    }

    #[test]
    fn test_clamp_square() {
        assert_eq!(clamp_square(-4), 0);
        assert_eq!(clamp_square(12), 12);
        assert_eq!(clamp_square(41), BOARD_SIZE);
    }

    #[test]
    fn test_layout_json_roundtrip() {
        let layout = BoardLayout::standard();
        let json = serde_json::to_string(&layout).unwrap();
        let back: BoardLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(Board::from_layout(&back).unwrap(), Board::standard());
    }
}
