//! Terminal conditions and what an encounter hands back.
//!
//! `OutcomeEvaluator` decides whether either side has fallen and rolls the
//! victory rewards. `CombatResult` is the single summary the external owner
//! receives; nothing else about the encounter persists.

use serde::{Deserialize, Serialize};

use crate::cards::Element;
use crate::core::{Combatant, GameRng, ItemId, RewardYield, Side, SideMap, TalismanId};

/// How an encounter ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Victory spoils.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub experience: i64,
    pub currency: i64,
    pub drops: Vec<ItemId>,
}

/// Remaining uses of a talisman after the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurabilityDelta {
    pub id: TalismanId,
    pub remaining_uses: u32,
}

/// Essence cap gained by the player during the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementGrowth {
    pub element: Element,
    pub amount: i64,
}

/// Summary returned to the caller when an encounter terminates.
///
/// On a loss the caller applies its own penalty; the engine only reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub outcome: Outcome,
    /// Rounds started before the end.
    pub rounds: u32,
    /// Present on a win only.
    pub rewards: Option<Rewards>,
    /// One entry per talisman binding in the loadout.
    pub talismans: Vec<DurabilityDelta>,
    pub element_growth: Vec<ElementGrowth>,
}

impl CombatResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

/// Detects terminal states and computes rewards.
pub struct OutcomeEvaluator;

impl OutcomeEvaluator {
    /// Check both sides. An enemy at zero health is checked first.
    #[must_use]
    pub fn evaluate(combatants: &SideMap<Combatant>) -> Option<Outcome> {
        if combatants[Side::Enemy].is_defeated() {
            Some(Outcome::Win)
        } else if combatants[Side::Player].is_defeated() {
            Some(Outcome::Loss)
        } else {
            None
        }
    }

    /// Fixed yield plus one bonus drop with probability `drop_chance`.
    pub fn roll_rewards(yield_: &RewardYield, drop_chance: f64, rng: &mut GameRng) -> Rewards {
        let mut drops = Vec::new();
        if !yield_.drop_pool.is_empty() && rng.gen_bool(drop_chance) {
            drops.extend(rng.choose(&yield_.drop_pool).copied());
        }
        Rewards {
            experience: yield_.experience,
            currency: yield_.currency,
            drops,
        }
    }
}
