//! Immutable snapshots handed to the engine at encounter start.
//!
//! `PlayerLoadout` and `EnemyTemplate` are copied in; nothing in an
//! encounter holds a reference back to them. Post-combat deltas are
//! reported through `CombatResult`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entity::{ItemId, TalismanId};
use super::error::SetupError;
use crate::cards::{CardId, Element};

/// Combat stats shared by both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub max_health: i64,

    /// Maximum spirit (primary resource).
    #[serde(default)]
    pub max_spirit: i64,

    /// Added to the value of every attack card.
    #[serde(default)]
    pub attack: i64,

    /// Carried for collaborators; not part of damage resolution.
    #[serde(default)]
    pub defense: i64,

    /// Higher speed acts first.
    #[serde(default)]
    pub speed: i64,

    /// Essence caps per element.
    #[serde(default)]
    pub elements: FxHashMap<Element, i64>,
}

impl Stats {
    /// Create stats with the given health and spirit and no other bonuses.
    #[must_use]
    pub fn new(max_health: i64, max_spirit: i64) -> Self {
        Self {
            max_health,
            max_spirit,
            attack: 0,
            defense: 0,
            speed: 0,
            elements: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_attack(mut self, attack: i64) -> Self {
        self.attack = attack;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i64) -> Self {
        self.defense = defense;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: i64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element, cap: i64) -> Self {
        self.elements.insert(element, cap);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SetupError> {
        if self.max_health <= 0 {
            return Err(SetupError::InvalidMaxHealth {
                max_health: self.max_health,
            });
        }
        if self.max_spirit < 0 {
            return Err(SetupError::NegativeStat {
                stat: "max_spirit",
                value: self.max_spirit,
            });
        }
        if let Some(&cap) = self.elements.values().find(|&&cap| cap < 0) {
            return Err(SetupError::NegativeStat {
                stat: "elements",
                value: cap,
            });
        }
        Ok(())
    }
}

/// A consumable that injects a free, limited-use card into the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalismanBinding {
    pub id: TalismanId,
    pub card: CardId,
    /// Remaining uses. Bindings at zero are reported back but not injected.
    pub durability: u32,
}

impl TalismanBinding {
    #[must_use]
    pub fn new(id: TalismanId, card: CardId, durability: u32) -> Self {
        Self { id, card, durability }
    }
}

/// Everything the engine needs to know about the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLoadout {
    #[serde(default)]
    pub level: u32,

    pub stats: Stats,

    /// Starting health; `None` enters at full health.
    #[serde(default)]
    pub health: Option<i64>,

    /// Ordered card multiset.
    pub deck: Vec<CardId>,

    #[serde(default)]
    pub talismans: Vec<TalismanBinding>,
}

impl PlayerLoadout {
    #[must_use]
    pub fn new(stats: Stats, deck: Vec<CardId>) -> Self {
        Self {
            level: 1,
            stats,
            health: None,
            deck,
            talismans: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_talisman(mut self, binding: TalismanBinding) -> Self {
        self.talismans.push(binding);
        self
    }

    /// Health the encounter starts with, clamped to `1..=max_health`.
    #[must_use]
    pub fn starting_health(&self) -> i64 {
        let max = self.stats.max_health.max(1);
        self.health.unwrap_or(max).clamp(1, max)
    }

    /// All card IDs referenced by deck and talismans.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .copied()
            .chain(self.talismans.iter().map(|t| t.card))
    }
}

/// What the victor collects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardYield {
    pub experience: i64,
    pub currency: i64,
    /// Candidate bonus items, one picked uniformly on a successful drop roll.
    #[serde(default)]
    pub drop_pool: Vec<ItemId>,
}

/// Everything the engine needs to know about an enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub stats: Stats,
    /// Fixed action pool; never drawn or discarded.
    #[serde(default)]
    pub actions: Vec<CardId>,
    #[serde(default)]
    pub rewards: RewardYield,
}

impl EnemyTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, stats: Stats, actions: Vec<CardId>) -> Self {
        Self {
            name: name.into(),
            stats,
            actions,
            rewards: RewardYield::default(),
        }
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardYield) -> Self {
        self.rewards = rewards;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_health_clamped() {
        let loadout = PlayerLoadout::new(Stats::new(100, 3), vec![CardId::new(1)]);
        assert_eq!(loadout.starting_health(), 100);

        assert_eq!(loadout.clone().with_health(40).starting_health(), 40);
        assert_eq!(loadout.clone().with_health(500).starting_health(), 100);
        assert_eq!(loadout.with_health(-3).starting_health(), 1);
    }

    #[test]
    fn test_card_ids_include_talismans() {
        let loadout = PlayerLoadout::new(Stats::new(10, 1), vec![CardId::new(1), CardId::new(1)])
            .with_talisman(TalismanBinding::new(TalismanId::new(1), CardId::new(7), 2));

        let ids: Vec<_> = loadout.card_ids().collect();
        assert_eq!(ids, vec![CardId::new(1), CardId::new(1), CardId::new(7)]);
    }

    #[test]
    fn test_stats_validation() {
        assert!(Stats::new(10, 0).validate().is_ok());
        assert_eq!(
            Stats::new(0, 0).validate(),
            Err(SetupError::InvalidMaxHealth { max_health: 0 })
        );
        assert!(matches!(
            Stats::new(10, -1).validate(),
            Err(SetupError::NegativeStat { stat: "max_spirit", .. })
        ));
        assert!(Stats::new(10, 1).with_element(Element::Fire, -2).validate().is_err());
    }

    #[test]
    fn test_loadout_json() {
        let json = r#"{
            "stats": {"max_health": 80, "max_spirit": 3, "attack": 2,
                      "elements": {"Fire": 2}},
            "deck": [1, 1, 2],
            "talismans": [{"id": 4, "card": 9, "durability": 3}]
        }"#;
        let loadout: PlayerLoadout = serde_json::from_str(json).unwrap();

        assert_eq!(loadout.level, 0);
        assert_eq!(loadout.stats.elements.get(&Element::Fire), Some(&2));
        assert_eq!(loadout.deck.len(), 3);
        assert_eq!(loadout.talismans[0].durability, 3);
        assert_eq!(loadout.starting_health(), 80);
    }
}
