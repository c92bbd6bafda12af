//! Card instances - physical copies in the player's piles.
//!
//! A deck listing the same `CardId` three times yields three instances.
//! Talisman cards are instances bound to a `TalismanId`; they cost nothing
//! to play and are removed once the talisman runs out of uses.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::{InstanceId, TalismanId};

/// A card instance in an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this copy.
    pub id: InstanceId,

    /// The card definition this copy plays as.
    pub card: CardId,

    /// Talisman binding, if this copy was injected by a consumable.
    pub talisman: Option<TalismanId>,
}

impl CardInstance {
    /// Create a regular deck card.
    #[must_use]
    pub fn new(id: InstanceId, card: CardId) -> Self {
        Self {
            id,
            card,
            talisman: None,
        }
    }

    /// Create a talisman-bound card.
    #[must_use]
    pub fn bound(id: InstanceId, card: CardId, talisman: TalismanId) -> Self {
        Self {
            id,
            card,
            talisman: Some(talisman),
        }
    }

    /// Talisman cards ignore spirit and essence costs.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.talisman.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_instance() {
        let card = CardInstance::new(InstanceId::new(0), CardId::new(5));
        assert_eq!(card.card, CardId::new(5));
        assert!(card.talisman.is_none());
        assert!(!card.is_free());
    }

    #[test]
    fn test_bound_instance() {
        let card = CardInstance::bound(InstanceId::new(1), CardId::new(5), TalismanId::new(9));
        assert_eq!(card.talisman, Some(TalismanId::new(9)));
        assert!(card.is_free());
    }
}
