//! Player commands and the resolved-action history.

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::cards::CardId;

/// A command the caller may submit to an encounter.
///
/// Only accepted while the encounter is in the player's active phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Play the card at this hand position.
    PlayCard { hand_index: usize },
    /// Discard the hand and pass to the enemy.
    EndTurn,
}

/// A resolved action, kept for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that acted.
    pub side: Side,

    /// The card resolved. Enemy fallback attacks use `CardId::BASIC_ATTACK`.
    pub card: CardId,

    /// Round number when the action resolved.
    pub round: u32,

    /// Sequence number across the whole encounter.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(side: Side, card: CardId, round: u32, sequence: u32) -> Self {
        Self {
            side,
            card,
            round,
            sequence,
        }
    }
}
