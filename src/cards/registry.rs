//! Card catalog for definition lookup.
//!
//! The catalog is owned by external collaborators and only read by the
//! engine. An encounter copies the definitions it needs at construction
//! (`CardCatalog::subset`) so it never aliases the caller's catalog.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use spirit_duel::cards::{Card, CardCatalog, CardId, EffectKind};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::new(CardId::new(1), "Strike", EffectKind::Attack, 5));
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Strike");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, replacing any previous definition.
    ///
    /// Returns the replaced definition, if any.
    pub fn register(&mut self, card: Card) -> Option<Card> {
        self.cards.insert(card.id, card)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Copy the definitions for `ids` into a new catalog.
    ///
    /// Returns the first ID that is not registered.
    pub fn subset(&self, ids: impl IntoIterator<Item = CardId>) -> Result<Self, CardId> {
        let mut out = Self::new();
        for id in ids {
            if out.contains(id) {
                continue;
            }
            let card = self.get(id).ok_or(id)?;
            out.register(card.clone());
        }
        Ok(out)
    }
}

impl FromIterator<Card> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.register(card);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::EffectKind;

    fn strike(id: u32) -> Card {
        Card::new(CardId::new(id), format!("Strike {}", id), EffectKind::Attack, 3)
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.register(strike(1)).is_none());
        assert!(catalog.contains(CardId::new(1)));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = CardCatalog::new();
        catalog.register(strike(1));
        let replaced = catalog.register(Card::new(CardId::new(1), "New", EffectKind::Heal, 2));

        assert_eq!(replaced.map(|c| c.name), Some("Strike 1".to_string()));
        assert_eq!(catalog.get(CardId::new(1)).unwrap().kind, EffectKind::Heal);
    }

    #[test]
    fn test_subset() {
        let catalog: CardCatalog = (1..=5).map(strike).collect();

        let sub = catalog
            .subset([CardId::new(2), CardId::new(4), CardId::new(2)])
            .unwrap();
        assert_eq!(sub.len(), 2);
        assert!(sub.contains(CardId::new(4)));

        let missing = catalog.subset([CardId::new(1), CardId::new(42)]);
        assert_eq!(missing.unwrap_err(), CardId::new(42));
    }
}
