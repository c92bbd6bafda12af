//! Enemy action planning.
//!
//! Planning is trait-based so encounters can swap in other behaviour:
//! - `EnemyPolicy`: choose the enemy's actions for one turn
//! - `RandomAffordable`: greedy uniform pick among affordable cards
//!
//! A plan is made against a `ResourceBudget` copied from the enemy after
//! upkeep. The plan is not re-checked against live state while it resolves.

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId, Element};
use crate::core::{Combatant, GameRng};

/// Planning copy of the enemy's spendable resources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceBudget {
    pub spirit: i64,
    pub essence: FxHashMap<Element, i64>,
}

impl ResourceBudget {
    /// Snapshot a combatant's current resources.
    #[must_use]
    pub fn of(combatant: &Combatant) -> Self {
        let essence = Element::ALL
            .into_iter()
            .map(|element| (element, combatant.essence.current(element)))
            .filter(|&(_, amount)| amount > 0)
            .collect();
        Self {
            spirit: combatant.spirit,
            essence,
        }
    }

    #[must_use]
    pub fn affords(&self, card: &Card) -> bool {
        if card.cost > self.spirit {
            return false;
        }
        match card.essence_cost() {
            Some((element, amount)) => self.essence.get(&element).copied().unwrap_or(0) >= amount,
            None => true,
        }
    }

    /// Deduct a card's costs from the budget.
    pub fn spend(&mut self, card: &Card) {
        self.spirit -= card.cost.max(0);
        if let Some((element, amount)) = card.essence_cost() {
            *self.essence.entry(element).or_default() -= amount;
        }
    }
}

/// Chooses the enemy's actions for a turn.
pub trait EnemyPolicy {
    /// Plan up to `max_actions` cards from `pool` within `budget`.
    ///
    /// May return fewer (or none) when nothing is affordable.
    fn plan(
        &self,
        pool: &[Card],
        budget: ResourceBudget,
        max_actions: usize,
        rng: &mut GameRng,
    ) -> Vec<CardId>;
}

/// Repeatedly picks uniformly among cards the remaining budget can pay for.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAffordable;

impl EnemyPolicy for RandomAffordable {
    fn plan(
        &self,
        pool: &[Card],
        mut budget: ResourceBudget,
        max_actions: usize,
        rng: &mut GameRng,
    ) -> Vec<CardId> {
        let mut chosen = Vec::with_capacity(max_actions);

        while chosen.len() < max_actions {
            let eligible: Vec<&Card> = pool.iter().filter(|c| budget.affords(c)).collect();
            let Some(&card) = rng.choose(&eligible) else {
                break;
            };
            budget.spend(card);
            chosen.push(card.id);
        }

        tracing::trace!(?chosen, spirit_left = budget.spirit, "enemy plan");
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::EffectKind;

    fn card(id: u32, cost: i64) -> Card {
        Card::new(CardId::new(id), format!("Move {}", id), EffectKind::Attack, 1).with_cost(cost)
    }

    fn budget(spirit: i64) -> ResourceBudget {
        ResourceBudget {
            spirit,
            essence: FxHashMap::default(),
        }
    }

    #[test]
    fn test_plan_respects_max_actions() {
        let pool = vec![card(1, 0)];
        let plan = RandomAffordable.plan(&pool, budget(0), 2, &mut GameRng::new(1));
        assert_eq!(plan, vec![CardId::new(1), CardId::new(1)]);
    }

    #[test]
    fn test_plan_never_overspends() {
        let pool = vec![card(1, 2), card(2, 3)];
        for seed in 0..50 {
            let plan = RandomAffordable.plan(&pool, budget(4), 2, &mut GameRng::new(seed));
            let spent: i64 = plan
                .iter()
                .map(|id| pool.iter().find(|c| c.id == *id).unwrap().cost)
                .sum();
            assert!(spent <= 4, "seed {} overspent: {:?}", seed, plan);
            assert!(!plan.is_empty());
        }
    }

    #[test]
    fn test_plan_stops_when_unaffordable() {
        let pool = vec![card(1, 3)];
        let plan = RandomAffordable.plan(&pool, budget(4), 2, &mut GameRng::new(1));
        assert_eq!(plan, vec![CardId::new(1)]);

        let plan = RandomAffordable.plan(&pool, budget(2), 2, &mut GameRng::new(1));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_empty_pool() {
        let plan = RandomAffordable.plan(&[], budget(10), 2, &mut GameRng::new(1));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_essence_budget() {
        let fire = card(1, 0).with_element_cost(Element::Fire, 2);
        let mut b = budget(0);
        assert!(!b.affords(&fire));

        b.essence.insert(Element::Fire, 3);
        assert!(b.affords(&fire));
        b.spend(&fire);
        assert!(!b.affords(&fire));
    }

    #[test]
    fn test_budget_of_combatant() {
        use crate::core::Stats;

        let stats = Stats::new(10, 4).with_element(Element::Water, 2);
        let b = ResourceBudget::of(&Combatant::from_stats(&stats, 10));
        assert_eq!(b.spirit, 4);
        assert_eq!(b.essence.get(&Element::Water), Some(&2));
        assert_eq!(b.essence.get(&Element::Fire), None);
    }
}
