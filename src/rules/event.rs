//! Turn phases and the event stream.
//!
//! The encounter advances as a sequence of discrete `TurnEvent`s. A
//! presentation layer may pace them however it likes (`Pause` events carry
//! the suggested delay); outcomes never depend on wall-clock time.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::cards::CardId;
use crate::core::{InstanceId, Side, TalismanId};
use crate::effects::PresentationCue;

/// Turn controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PlayerUpkeep,
    /// Waiting for `play_card` / `end_turn`.
    PlayerActive,
    EnemyUpkeep,
    EnemyActive,
    /// Absorbing terminal state.
    Ended(Outcome),
}

impl Phase {
    /// Upkeep phase of whichever side moves first. Ties go to the player.
    #[must_use]
    pub fn opening(player_speed: i64, enemy_speed: i64) -> Self {
        if enemy_speed > player_speed {
            Phase::EnemyUpkeep
        } else {
            Phase::PlayerUpkeep
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Ended(_))
    }

    /// Side whose turn this is, if any.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Phase::PlayerUpkeep | Phase::PlayerActive => Some(Side::Player),
            Phase::EnemyUpkeep | Phase::EnemyActive => Some(Side::Enemy),
            Phase::Ended(_) => None,
        }
    }
}

/// One observable step of an encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    PhaseEntered(Phase),

    /// Burn dealt damage during upkeep.
    BurnTick {
        side: Side,
        damage: i64,
        health: i64,
    },

    /// Discard was shuffled back into the deck.
    Reshuffled { cards: usize },

    CardDrawn { instance: InstanceId, card: CardId },

    /// Hand was full; the drawn card was discarded.
    HandOverflow { instance: InstanceId, card: CardId },

    /// Deck and discard ran dry; this many draws were skipped.
    OutOfCards { missing: usize },

    HandDiscarded { cards: usize },

    /// Player card paid for and left the hand.
    CardPlayed { instance: InstanceId, card: CardId },

    /// Enemy reveals its next action before it resolves.
    EnemyIntent { card: CardId, name: String },

    /// Suggested presentation delay.
    Pause { millis: u64 },

    Cue(PresentationCue),

    /// A card resolved; `log` is the matching combat log line.
    Resolved { side: Side, log: String },

    TalismanExhausted { id: TalismanId },

    /// A logged command rejection, surfaced on the next drain.
    ActionRejected { reason: String },

    EncounterEnded(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_phase() {
        assert_eq!(Phase::opening(5, 3), Phase::PlayerUpkeep);
        assert_eq!(Phase::opening(3, 5), Phase::EnemyUpkeep);
        assert_eq!(Phase::opening(4, 4), Phase::PlayerUpkeep);
    }

    #[test]
    fn test_phase_side() {
        assert_eq!(Phase::PlayerActive.side(), Some(Side::Player));
        assert_eq!(Phase::EnemyUpkeep.side(), Some(Side::Enemy));
        assert_eq!(Phase::Ended(Outcome::Win).side(), None);
        assert!(Phase::Ended(Outcome::Loss).is_terminal());
        assert!(!Phase::EnemyActive.is_terminal());
    }

    #[test]
    fn test_event_serialization() {
        let event = TurnEvent::Resolved {
            side: Side::Enemy,
            log: "Wolf uses Bite".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: TurnEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
