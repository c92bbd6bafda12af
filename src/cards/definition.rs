//! Card definitions - static card data.
//!
//! A `Card` is catalog-owned and never mutated during combat. Playing a card
//! only changes combatant state; the definition itself is shared read-only.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card definition.
///
/// This identifies the kind of card, not a specific copy in a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Reserved ID for the enemy's resource-free fallback attack.
    pub const BASIC_ATTACK: CardId = CardId(u32::MAX);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Closed set of elemental essences used as secondary resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Metal => "Metal",
            Element::Wood => "Wood",
            Element::Water => "Water",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
        };
        f.write_str(name)
    }
}

/// What a card does when resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Damage the opponent for `value + attack`.
    Attack,
    /// Add `value` to the caster's shield.
    Defend,
    /// Restore `value` health to the caster.
    Heal,
    /// Restore `value` spirit to the caster.
    Buff,
    /// Raise the cap and current amount of the card's element by `value`.
    Growth,
}

/// Modifiers on attack resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTag {
    /// Ignore the target's shield entirely.
    Pierce,
    /// Chance to add one burn stack to the target.
    Burn,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use spirit_duel::cards::{Card, CardId, CardTag, EffectKind, Element};
///
/// let spear = Card::new(CardId::new(1), "Piercing Spear", EffectKind::Attack, 6)
///     .with_cost(2)
///     .with_element_cost(Element::Metal, 1)
///     .with_tag(CardTag::Pierce);
///
/// assert!(spear.has_tag(CardTag::Pierce));
/// assert_eq!(spear.element_cost, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Spirit cost.
    #[serde(default)]
    pub cost: i64,

    /// Element this card draws on (cost) or grows (Growth cards).
    #[serde(default)]
    pub element: Option<Element>,

    /// Essence cost in `element`.
    #[serde(default)]
    pub element_cost: i64,

    pub kind: EffectKind,

    /// Magnitude of the effect.
    pub value: i64,

    #[serde(default)]
    pub tags: SmallVec<[CardTag; 2]>,

    /// Minimum player level required to play the card.
    #[serde(default)]
    pub min_level: u32,
}

impl Card {
    /// Create a free card with no tags.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: EffectKind, value: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 0,
            element: None,
            element_cost: 0,
            kind,
            value,
            tags: SmallVec::new(),
            min_level: 0,
        }
    }

    /// The enemy's fallback attack: zero value, so damage equals base attack.
    #[must_use]
    pub fn basic_attack() -> Self {
        Self::new(CardId::BASIC_ATTACK, "Basic Attack", EffectKind::Attack, 0)
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_element_cost(mut self, element: Element, amount: i64) -> Self {
        self.element = Some(element);
        self.element_cost = amount;
        self
    }

    /// Set the element without a cost (for Growth cards).
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: CardTag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: u32) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: CardTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Essence cost, if the card charges one.
    #[must_use]
    pub fn essence_cost(&self) -> Option<(Element, i64)> {
        match self.element {
            Some(element) if self.element_cost > 0 => Some((element, self.element_cost)),
            _ => None,
        }
    }
}
