//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player index. Games have 2-4 players.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access, indexable by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player after this one, wrapping to player 0.
    #[must_use]
    pub const fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.0 as usize + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T>(Vec<T>);

impl<T> PlayerMap<T> {
    /// Create with a factory function, one entry per player.
    pub fn new(player_count: usize, mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self(PlayerId::all(player_count).map(&mut factory).collect())
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(player, value)` pairs in player order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, value)| (PlayerId(i as u8), value))
    }
}

impl<T: Default> PlayerMap<T> {
    /// Create with default values for all players.
    #[must_use]
    pub fn with_default(player_count: usize) -> Self {
        Self::new(player_count, |_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.0[player.index()]
    }
}
