//! Player identification, per-player storage and the fixed roster.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the three seats. Seat 0 always moves first.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec` with exactly one entry per seat.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Player
//!
//! Identity (key, display name, color, avatar glyph), board position,
//! cumulative dice statistics and the transient turn modifiers.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::board::Square;

/// Number of seats in every session.
pub const PLAYER_COUNT: usize = 3;

/// Seat identifier, `0..PLAYER_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that moves after this one, wrapping back to seat 0.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(((self.0 as usize + 1) % PLAYER_COUNT) as u8)
    }

    /// Iterate over every seat in turn order.
    ///
    /// ```
    /// use sugoroku::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use sugoroku::core::{PlayerId, PlayerMap};
///
/// let mut laps: PlayerMap<u32> = PlayerMap::with_value(0);
/// laps[PlayerId::new(1)] = 2;
/// assert_eq!(laps[PlayerId::new(1)], 2);
/// assert_eq!(laps[PlayerId::new(2)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Cumulative dice and square statistics for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Dice rolls taken (skipped turns do not count).
    pub roll_count: u32,
    /// Sum of the raw die faces, before any doubling.
    pub value_sum: u32,
    /// Number of sixes rolled.
    pub sixes: u32,
    /// Gimmick squares resolved.
    pub gimmick_hits: u32,
    /// Mystery boxes opened.
    pub mystery_hits: u32,
}

impl PlayerStats {
    /// Record one raw die face.
    pub fn record_roll(&mut self, face: u8) {
        self.roll_count += 1;
        self.value_sum += u32::from(face);
        if face == 6 {
            self.sixes += 1;
        }
    }

    /// Mean die face, or 0 when the player has not rolled yet.
    #[must_use]
    pub fn average_roll(&self) -> f64 {
        if self.roll_count == 0 {
            0.0
        } else {
            f64::from(self.value_sum) / f64::from(self.roll_count)
        }
    }
}

/// Fixed identity of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub avatar: &'static str,
}

/// The three characters, in turn order.
pub const ROSTER: [Profile; PLAYER_COUNT] = [
    Profile { key: "ken", name: "けんちゃん", color: "#4285F4", avatar: "け" },
    Profile { key: "papa", name: "パパ", color: "#EA4335", avatar: "パ" },
    Profile { key: "mama", name: "ママ", color: "#34A853", avatar: "マ" },
];

/// A participant: identity plus everything the engine mutates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub key: String,
    pub name: String,
    pub color: String,
    pub avatar: String,

    /// Current square, always within `0..=BOARD_SIZE`.
    pub position: Square,

    pub stats: PlayerStats,

    /// Turns still to be skipped; one is consumed per turn.
    pub skip_turns: u8,

    /// Next roll counts double; cleared when consumed.
    pub double_next_roll: bool,
}

impl Player {
    /// Create the player for a seat from the roster.
    #[must_use]
    pub fn from_profile(id: PlayerId) -> Self {
        let profile = &ROSTER[id.index()];
        Self {
            id,
            key: profile.key.to_string(),
            name: profile.name.to_string(),
            color: profile.color.to_string(),
            avatar: profile.avatar.to_string(),
            position: 0,
            stats: PlayerStats::default(),
            skip_turns: 0,
            double_next_roll: false,
        }
    }
}
