//! Error types for encounter setup and player commands.
//!
//! - `SetupError`: the loadout or configuration cannot produce a valid
//!   encounter. Reported by the constructor before any turn begins.
//! - `PlayError`: a player command was rejected. Always recoverable; the
//!   encounter state is untouched and the caller may issue another command.

use crate::cards::{CardId, Element};

use super::entity::TalismanId;
use super::state::Shortfall;

/// Failure to build an encounter from its inputs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Player deck (including talisman cards) has no cards.
    #[error("player deck is empty")]
    EmptyDeck,

    /// A deck, talisman or enemy action references a card missing from the catalog.
    #[error("card {card} is not in the catalog")]
    UnknownCard { card: CardId },

    /// A catalog card used by this encounter has a negative cost.
    #[error("card {card} has a negative cost")]
    InvalidCard { card: CardId },

    /// A side has a non-positive maximum health.
    #[error("maximum health must be positive, got {max_health}")]
    InvalidMaxHealth { max_health: i64 },

    /// A stat that must be non-negative is negative.
    #[error("stat `{stat}` must not be negative, got {value}")]
    NegativeStat { stat: &'static str, value: i64 },

    /// Two bindings share an ID.
    #[error("talisman {id} is bound more than once")]
    DuplicateTalisman { id: TalismanId },

    /// Rule constants are out of range.
    #[error("invalid combat config: {0}")]
    InvalidConfig(String),
}

/// Reason a `play_card` or `end_turn` command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    /// Commands are only accepted while the player is active.
    #[error("not the player's turn")]
    NotPlayerTurn,

    /// The encounter has reached a terminal state.
    #[error("encounter is over")]
    EncounterOver,

    #[error("no card at hand index {index} (hand size {hand_size})")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("requires level {required}, player is level {level}")]
    LevelTooLow { required: u32, level: u32 },

    #[error("needs {required} spirit, has {available}")]
    InsufficientSpirit { required: i64, available: i64 },

    #[error("needs {required} {element} essence, has {available}")]
    InsufficientElement {
        element: Element,
        required: i64,
        available: i64,
    },

    /// The bound talisman has no uses left.
    #[error("talisman {id} is depleted")]
    TalismanDepleted { id: TalismanId },
}

impl PlayError {
    /// Whether this rejection is reported in the combat log.
    ///
    /// Commands sent outside the player's active phase are dropped silently.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        !matches!(self, Self::NotPlayerTurn | Self::EncounterOver)
    }
}

impl From<Shortfall> for PlayError {
    fn from(shortfall: Shortfall) -> Self {
        match shortfall {
            Shortfall::Spirit {
                required,
                available,
            } => Self::InsufficientSpirit {
                required,
                available,
            },
            Shortfall::Essence {
                element,
                required,
                available,
            } => Self::InsufficientElement {
                element,
                required,
                available,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::UnknownCard { card: CardId::new(9) };
        assert_eq!(err.to_string(), "card Card(9) is not in the catalog");
        assert_eq!(SetupError::EmptyDeck.to_string(), "player deck is empty");

        let err = SetupError::InvalidCard { card: CardId::new(3) };
        assert_eq!(err.to_string(), "card Card(3) has a negative cost");
    }

    #[test]
    fn test_play_error_display() {
        let err = PlayError::InsufficientElement {
            element: Element::Fire,
            required: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "needs 3 Fire essence, has 1");
    }

    #[test]
    fn test_from_shortfall() {
        let err: PlayError = Shortfall::Spirit { required: 2, available: 1 }.into();
        assert_eq!(err, PlayError::InsufficientSpirit { required: 2, available: 1 });
    }

    #[test]
    fn test_silent_rejections() {
        assert!(!PlayError::NotPlayerTurn.is_logged());
        assert!(!PlayError::EncounterOver.is_logged());
        assert!(PlayError::InsufficientSpirit { required: 1, available: 0 }.is_logged());
    }
}
