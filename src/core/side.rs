//! Combat sides and per-side data storage.
//!
//! ## Side
//!
//! An encounter always has exactly two sides: the player and the enemy.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, the two-party counterpart of a
//! per-player map.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two parties in an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Enemy];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    #[must_use]
    const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use spirit_duel::core::{Side, SideMap};
///
/// let mut health = SideMap::new(100, 40);
/// health[Side::Enemy] -= 15;
/// assert_eq!(health[Side::Enemy], 25);
/// assert_eq!(health[Side::Player], 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from the player and enemy values.
    pub fn new(player: T, enemy: T) -> Self {
        Self {
            data: [player, enemy],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
        assert_eq!(format!("{}", Side::Enemy), "Enemy");
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map = SideMap::new(0, 0);
        map[Side::Player] = 10;
        map[Side::Enemy] = 20;

        assert_eq!(map[Side::Player], 10);
        assert_eq!(map[Side::Enemy], 20);
    }

    #[test]
    fn test_iter_order() {
        let map = SideMap::new("p", "e");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Player, &"p"), (Side::Enemy, &"e")]);
    }
}
