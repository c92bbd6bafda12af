//! Zone manager for the player's card piles.
//!
//! Tracks which pile each card instance is in and handles movement:
//! - `Deck`: draw pile, top = end of the vec
//! - `Hand`: play order is the order cards were drawn
//! - `Discard`: reshuffled into the deck when the deck runs dry
//! - `Exhausted`: talisman cards whose binding ran out; never return
//!
//! Every instance lives in exactly one zone at a time.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;

/// A pile of cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    Exhausted,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Deck, Zone::Hand, Zone::Discard, Zone::Exhausted];
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the vec).
    Top,
    /// Add to bottom of zone.
    Bottom,
}

/// One observable step of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStep {
    /// Discard was shuffled back into the empty deck.
    Reshuffled { cards: usize },
    /// A card moved from deck to hand.
    Drawn(InstanceId),
    /// Hand was full; the drawn card went straight to discard.
    Overflow(InstanceId),
    /// Deck and discard were both empty; the draw stopped early.
    OutOfCards { missing: usize },
}

/// Manages card locations across the player's piles.
///
/// ## Usage
///
/// ```
/// use spirit_duel::core::{GameRng, InstanceId};
/// use spirit_duel::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new();
/// zones.add_to_zone(InstanceId(0), Zone::Deck, ZonePosition::Top);
/// zones.add_to_zone(InstanceId(1), Zone::Deck, ZonePosition::Top);
///
/// let mut rng = GameRng::new(1);
/// let steps = zones.draw(1, 10, &mut rng);
/// assert_eq!(zones.zone_size(Zone::Hand), 1);
/// assert_eq!(steps.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: instance -> zone
    locations: FxHashMap<InstanceId, Zone>,

    /// Ordered card lists per zone.
    zone_order: FxHashMap<Zone, Vec<InstanceId>>,
}

impl ZoneManager {
    /// Create a manager with all zones empty.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self::default();
        for zone in Zone::ALL {
            manager.zone_order.insert(zone, Vec::new());
        }
        manager
    }

    /// Add a new card to a zone.
    ///
    /// Returns false (and changes nothing) if the instance is already tracked.
    pub fn add_to_zone(&mut self, card: InstanceId, zone: Zone, position: ZonePosition) -> bool {
        if self.locations.contains_key(&card) {
            return false;
        }
        self.locations.insert(card, zone);
        self.insert_ordered(card, zone, position);
        true
    }

    /// Move a card from its zone to another.
    ///
    /// Returns the old zone, or `None` if the card wasn't found.
    pub fn move_to_zone(
        &mut self,
        card: InstanceId,
        new_zone: Zone,
        position: ZonePosition,
    ) -> Option<Zone> {
        let old_zone = self.locations.get(&card).copied()?;

        if old_zone == new_zone {
            return Some(old_zone);
        }

        if let Some(order) = self.zone_order.get_mut(&old_zone) {
            order.retain(|&c| c != card);
        }
        self.locations.insert(card, new_zone);
        self.insert_ordered(card, new_zone, position);

        Some(old_zone)
    }

    fn insert_ordered(&mut self, card: InstanceId, zone: Zone, position: ZonePosition) {
        let order = self.zone_order.entry(zone).or_default();
        match position {
            ZonePosition::Top => order.push(card),
            ZonePosition::Bottom => order.insert(0, card),
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, card: InstanceId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Cards in a zone, bottom first (for the hand: oldest first).
    #[must_use]
    pub fn cards_in_zone(&self, zone: Zone) -> &[InstanceId] {
        self.zone_order.get(&zone).map_or(&[], |v| v.as_slice())
    }

    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.cards_in_zone(zone).len()
    }

    /// Card at a hand position.
    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<InstanceId> {
        self.cards_in_zone(Zone::Hand).get(index).copied()
    }

    /// Cards still in circulation (deck, hand and discard).
    #[must_use]
    pub fn circulating(&self) -> usize {
        self.zone_size(Zone::Deck) + self.zone_size(Zone::Hand) + self.zone_size(Zone::Discard)
    }

    /// Total cards tracked, including exhausted ones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Shuffle a zone in place.
    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            rng.shuffle(order);
        }
    }

    /// Move the whole discard pile into the deck and shuffle it.
    ///
    /// Returns the number of cards moved.
    pub fn reshuffle_discard(&mut self, rng: &mut GameRng) -> usize {
        let discard = std::mem::take(self.zone_order.entry(Zone::Discard).or_default());
        let moved = discard.len();
        for &card in &discard {
            self.locations.insert(card, Zone::Deck);
        }
        self.zone_order.entry(Zone::Deck).or_default().extend(discard);
        self.shuffle_zone(Zone::Deck, rng);
        moved
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// An empty deck is refilled from the discard pile. Cards drawn while
    /// the hand already holds `max_hand` cards go to discard instead. When
    /// both deck and discard are empty the draw stops early.
    pub fn draw(&mut self, count: usize, max_hand: usize, rng: &mut GameRng) -> Vec<DrawStep> {
        let mut steps = Vec::with_capacity(count);

        for drawn in 0..count {
            if self.zone_size(Zone::Deck) == 0 {
                if self.zone_size(Zone::Discard) == 0 {
                    steps.push(DrawStep::OutOfCards {
                        missing: count - drawn,
                    });
                    break;
                }
                let cards = self.reshuffle_discard(rng);
                steps.push(DrawStep::Reshuffled { cards });
            }

            let Some(card) = self.zone_order.get(&Zone::Deck).and_then(|d| d.last()).copied()
            else {
                break;
            };

            if self.zone_size(Zone::Hand) >= max_hand {
                self.move_to_zone(card, Zone::Discard, ZonePosition::Top);
                steps.push(DrawStep::Overflow(card));
            } else {
                self.move_to_zone(card, Zone::Hand, ZonePosition::Top);
                steps.push(DrawStep::Drawn(card));
            }
        }

        steps
    }

    /// Move every card in hand to discard.
    ///
    /// Returns the cards moved, in hand order.
    pub fn discard_hand(&mut self) -> Vec<InstanceId> {
        let hand = self.cards_in_zone(Zone::Hand).to_vec();
        for &card in &hand {
            self.move_to_zone(card, Zone::Discard, ZonePosition::Top);
        }
        hand
    }
}
