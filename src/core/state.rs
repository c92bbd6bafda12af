//! Per-side runtime state.
//!
//! ## Combatant
//!
//! Mutable record for one side of an encounter:
//! - Health and shield (never negative, clamped after every mutation)
//! - Spirit (primary resource), refilled at the side's upkeep
//! - Essence pool (secondary resources) with a session cap per element
//! - Burn stacks
//!
//! Built once from a `Stats` snapshot and dropped when the encounter ends.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::loadout::Stats;
use crate::cards::{Card, Element};

/// Current and capped amount of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essence {
    pub current: i64,
    pub cap: i64,
}

/// Essence per element. Missing elements have zero current and zero cap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssencePool {
    reserves: FxHashMap<Element, Essence>,
}

impl EssencePool {
    /// Create a full pool from caps.
    #[must_use]
    pub fn from_caps(caps: &FxHashMap<Element, i64>) -> Self {
        let reserves = caps
            .iter()
            .map(|(&element, &cap)| (element, Essence { current: cap, cap }))
            .collect();
        Self { reserves }
    }

    #[must_use]
    pub fn get(&self, element: Element) -> Essence {
        self.reserves.get(&element).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn current(&self, element: Element) -> i64 {
        self.get(element).current
    }

    #[must_use]
    pub fn cap(&self, element: Element) -> i64 {
        self.get(element).cap
    }

    /// Deduct `amount`; callers check affordability first.
    pub fn spend(&mut self, element: Element, amount: i64) {
        let reserve = self.reserves.entry(element).or_default();
        reserve.current = reserve.current.saturating_sub(amount).max(0);
    }

    /// Raise both cap and current by `amount`. Growth never shrinks a pool.
    pub fn grow(&mut self, element: Element, amount: i64) {
        let amount = amount.max(0);
        let reserve = self.reserves.entry(element).or_default();
        reserve.cap = reserve.cap.saturating_add(amount);
        reserve.current = reserve.current.saturating_add(amount).min(reserve.cap);
    }

    /// Refill every element to its cap.
    pub fn refill(&mut self) {
        for reserve in self.reserves.values_mut() {
            reserve.current = reserve.cap;
        }
    }
}

/// Outcome of a single hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage soaked by shield.
    pub absorbed: i64,
    /// Damage that reached health.
    pub dealt: i64,
}

/// Reason a combatant cannot pay for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortfall {
    Spirit { required: i64, available: i64 },
    Essence { element: Element, required: i64, available: i64 },
}

/// Runtime state for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub health: i64,
    pub max_health: i64,
    pub shield: i64,
    pub spirit: i64,
    pub max_spirit: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub essence: EssencePool,
    pub burn: u32,
}

impl Combatant {
    /// Build a fresh combatant at full resources.
    #[must_use]
    pub fn from_stats(stats: &Stats, health: i64) -> Self {
        let max_health = stats.max_health.max(1);
        Self {
            health: health.clamp(0, max_health),
            max_health,
            shield: 0,
            spirit: stats.max_spirit.max(0),
            max_spirit: stats.max_spirit.max(0),
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            essence: EssencePool::from_caps(&stats.elements),
            burn: 0,
        }
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Apply incoming damage. Piercing damage skips the shield.
    pub fn take_damage(&mut self, amount: i64, pierce: bool) -> DamageReport {
        let amount = amount.max(0);
        let absorbed = if pierce { 0 } else { amount.min(self.shield) };
        self.shield = (self.shield - absorbed).max(0);
        let dealt = amount - absorbed;
        self.health = self.health.saturating_sub(dealt).max(0);
        DamageReport { absorbed, dealt }
    }

    /// Damage straight to health (status effects).
    pub fn lose_health(&mut self, amount: i64) {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }

    pub fn add_shield(&mut self, amount: i64) {
        self.shield = self.shield.saturating_add(amount).max(0);
    }

    /// Returns the amount actually restored.
    pub fn restore_spirit(&mut self, amount: i64) -> i64 {
        let before = self.spirit;
        self.spirit = self.spirit.saturating_add(amount.max(0)).min(self.max_spirit);
        self.spirit - before
    }

    /// Check spirit and essence against a card's costs.
    pub fn check_affordable(&self, card: &Card) -> Result<(), Shortfall> {
        if self.spirit < card.cost {
            return Err(Shortfall::Spirit {
                required: card.cost,
                available: self.spirit,
            });
        }
        if let Some((element, required)) = card.essence_cost() {
            let available = self.essence.current(element);
            if available < required {
                return Err(Shortfall::Essence {
                    element,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Deduct a card's costs. Callers check affordability first.
    pub fn pay(&mut self, card: &Card) {
        self.spirit = self.spirit.saturating_sub(card.cost.max(0)).max(0);
        if let Some((element, amount)) = card.essence_cost() {
            self.essence.spend(element, amount);
        }
    }

    /// Start-of-turn refresh: spirit and essence to max, shield dropped.
    pub fn refresh(&mut self) {
        self.spirit = self.max_spirit;
        self.essence.refill();
        self.shield = 0;
    }
}
