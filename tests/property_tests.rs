//! Property tests for combat invariants.
//!
//! - Health and shield never go negative under any command sequence
//! - Player piles neither lose nor duplicate cards
//! - Shield arithmetic for piercing and regular hits

use proptest::prelude::*;

use spirit_duel::cards::{Card, CardCatalog, CardId, CardTag, EffectKind, Element};
use spirit_duel::core::{
    CombatConfig, Combatant, EnemyTemplate, GameRng, InstanceId, PlayerLoadout, Side, Stats,
    TalismanBinding, TalismanId,
};
use spirit_duel::rules::Encounter;
use spirit_duel::zones::{DrawStep, Zone, ZoneManager, ZonePosition};

fn catalog() -> CardCatalog {
    [
        Card::new(CardId::new(1), "Strike", EffectKind::Attack, 6).with_cost(1),
        Card::new(CardId::new(2), "Guard", EffectKind::Defend, 5).with_cost(1),
        Card::new(CardId::new(3), "Needle", EffectKind::Attack, 3).with_tag(CardTag::Pierce),
        Card::new(CardId::new(4), "Ember", EffectKind::Attack, 1).with_tag(CardTag::Burn),
        Card::new(CardId::new(5), "Mend", EffectKind::Heal, 4).with_cost(2),
        Card::new(CardId::new(6), "Focus", EffectKind::Buff, 2),
        Card::new(CardId::new(7), "Sprout", EffectKind::Growth, 1).with_element(Element::Wood),
        Card::new(CardId::new(8), "Thorn", EffectKind::Attack, 4)
            .with_element_cost(Element::Wood, 1),
    ]
    .into_iter()
    .collect()
}

fn fighters(player_attack: i64, enemy_attack: i64) -> (PlayerLoadout, EnemyTemplate) {
    let deck = (1..=8).map(CardId::new).chain((1..=4).map(CardId::new)).collect();
    let player = PlayerLoadout::new(Stats::new(60, 3).with_attack(player_attack), deck)
        .with_talisman(TalismanBinding::new(TalismanId::new(1), CardId::new(1), 2));
    let enemy = EnemyTemplate::new(
        "Shade",
        Stats::new(60, 2).with_attack(enemy_attack),
        vec![CardId::new(1), CardId::new(2), CardId::new(4), CardId::new(5)],
    );
    (player, enemy)
}

fn assert_non_negative(encounter: &Encounter) -> Result<(), TestCaseError> {
    for side in Side::ALL {
        let combatant = encounter.combatant(side);
        prop_assert!(combatant.health >= 0, "{} health {}", side, combatant.health);
        prop_assert!(combatant.shield >= 0, "{} shield {}", side, combatant.shield);
        prop_assert!(combatant.spirit >= 0, "{} spirit {}", side, combatant.spirit);
    }
    Ok(())
}

proptest! {
    /// Any mix of plays and turn ends keeps health and shield non-negative.
    #[test]
    fn test_health_and_shield_never_negative(
        seed in any::<u64>(),
        player_attack in -5i64..10,
        enemy_attack in -5i64..10,
        commands in prop::collection::vec(prop::option::of(0usize..12), 0..80),
    ) {
        let (player, enemy) = fighters(player_attack, enemy_attack);
        let config = CombatConfig::default().with_enemy_action_delay(0);
        let mut encounter = Encounter::new(&player, &enemy, &catalog(), config, seed).unwrap();
        encounter.advance();

        for command in commands {
            // Rejections are fine; only the invariants matter here
            let _ = match command {
                Some(index) => encounter.play_card(index),
                None => encounter.end_turn(),
            };
            encounter.advance();
            assert_non_negative(&encounter)?;

            let zones = encounter.zones();
            prop_assert_eq!(zones.circulating() + zones.zone_size(Zone::Exhausted), zones.total_cards());
        }
    }

    /// Reshuffling never loses or duplicates an instance.
    #[test]
    fn test_reshuffle_conservation(
        seed in any::<u64>(),
        size in 1u32..40,
        rounds in prop::collection::vec((1usize..8, 1usize..10), 1..20),
    ) {
        let mut zones = ZoneManager::new();
        for i in 0..size {
            zones.add_to_zone(InstanceId::new(i), Zone::Deck, ZonePosition::Top);
        }
        let mut rng = GameRng::new(seed);

        for (draw, max_hand) in rounds {
            let deck_empty = zones.zone_size(Zone::Deck) == 0;
            let discard_before = zones.zone_size(Zone::Discard);

            let steps = zones.draw(draw, max_hand, &mut rng);
            zones.discard_hand();

            if deck_empty && discard_before > 0 {
                prop_assert_eq!(steps.first(), Some(&DrawStep::Reshuffled { cards: discard_before }));
            }

            let mut seen: Vec<_> = Zone::ALL
                .iter()
                .flat_map(|&zone| zones.cards_in_zone(zone).to_vec())
                .collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), size as usize);
            prop_assert_eq!(zones.total_cards(), size as usize);
            prop_assert_eq!(zones.zone_size(Zone::Hand), 0);
        }
    }

    /// Deck refill on empty deck moves the whole discard.
    #[test]
    fn test_reshuffle_moves_whole_discard(seed in any::<u64>(), size in 1u32..30) {
        let mut zones = ZoneManager::new();
        for i in 0..size {
            zones.add_to_zone(InstanceId::new(i), Zone::Discard, ZonePosition::Top);
        }

        let moved = zones.reshuffle_discard(&mut GameRng::new(seed));

        prop_assert_eq!(moved, size as usize);
        prop_assert_eq!(zones.zone_size(Zone::Deck), size as usize);
        prop_assert_eq!(zones.zone_size(Zone::Discard), 0);
    }

    /// Regular hits drain shield first; piercing hits skip it.
    #[test]
    fn test_shield_arithmetic(
        damage in 0i64..100,
        shield in 0i64..100,
        health in 1i64..200,
        pierce in any::<bool>(),
    ) {
        let mut target = Combatant::from_stats(&Stats::new(200, 0), health);
        target.add_shield(shield);

        target.take_damage(damage, pierce);

        if pierce {
            prop_assert_eq!(target.shield, shield);
            prop_assert_eq!(target.health, (health - damage).max(0));
        } else if shield >= damage {
            prop_assert_eq!(target.shield, shield - damage);
            prop_assert_eq!(target.health, health);
        } else {
            prop_assert_eq!(target.shield, 0);
            prop_assert_eq!(target.health, (health - (damage - shield)).max(0));
        }
    }
}
