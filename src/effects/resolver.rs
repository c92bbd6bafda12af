//! Effect resolution - numeric combat rules.
//!
//! Resolution is split in two:
//! - `EffectResolver::resolve` reads the card, the caster and the current
//!   state and produces an `EffectDelta`. The only randomness is the Burn
//!   roll, taken here so the delta is fully determined.
//! - `Resolution::apply` commits the delta to the combatants and returns
//!   the single log line describing what happened.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardTag, EffectKind, Element};
use crate::core::{Combatant, DamageReport, GameRng, Side, SideMap};

/// Cosmetic cue for a presentation layer, emitted before the log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationCue {
    pub kind: EffectKind,
    /// Side the animation plays on.
    pub target: Side,
}

/// State change produced by one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDelta {
    /// Hit the target. `burn` is the already-rolled Burn result.
    Damage {
        target: Side,
        amount: i64,
        pierce: bool,
        burn: bool,
    },
    Shield { side: Side, amount: i64 },
    Heal { side: Side, amount: i64 },
    Spirit { side: Side, amount: i64 },
    Growth { side: Side, element: Element, amount: i64 },
    /// The card had nothing to act on (Growth without an element).
    Fizzle { side: Side },
}

/// A resolved card, ready to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub card: CardId,
    pub card_name: String,
    pub caster: Side,
    pub delta: EffectDelta,
    pub cue: Option<PresentationCue>,
}

/// What applying a delta did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub log: String,
    /// Damage split, for attacks.
    pub damage: Option<DamageReport>,
    /// Whether a burn stack was added.
    pub burned: bool,
}

/// Maps a played card to its state change.
pub struct EffectResolver;

impl EffectResolver {
    /// Compute the delta of `card` cast by `caster`.
    pub fn resolve(
        card: &Card,
        caster: Side,
        combatants: &SideMap<Combatant>,
        burn_chance: f64,
        rng: &mut GameRng,
    ) -> Resolution {
        let (delta, cue_target) = match card.kind {
            EffectKind::Attack => {
                let target = caster.opponent();
                let amount = card.value.saturating_add(combatants[caster].attack).max(0);
                let burn = card.has_tag(CardTag::Burn) && rng.gen_bool(burn_chance);
                let delta = EffectDelta::Damage {
                    target,
                    amount,
                    pierce: card.has_tag(CardTag::Pierce),
                    burn,
                };
                (delta, Some(target))
            }
            EffectKind::Defend => (
                EffectDelta::Shield {
                    side: caster,
                    amount: card.value,
                },
                Some(caster),
            ),
            EffectKind::Heal => (
                EffectDelta::Heal {
                    side: caster,
                    amount: card.value,
                },
                Some(caster),
            ),
            EffectKind::Buff => (
                EffectDelta::Spirit {
                    side: caster,
                    amount: card.value,
                },
                Some(caster),
            ),
            EffectKind::Growth => match card.element {
                Some(element) => (
                    EffectDelta::Growth {
                        side: caster,
                        element,
                        amount: card.value.max(0),
                    },
                    None,
                ),
                None => (EffectDelta::Fizzle { side: caster }, None),
            },
        };

        Resolution {
            card: card.id,
            card_name: card.name.clone(),
            caster,
            delta,
            cue: cue_target.map(|target| PresentationCue {
                kind: card.kind,
                target,
            }),
        }
    }
}

impl Resolution {
    /// Commit the delta. `names` label each side in the log line.
    pub fn apply(&self, combatants: &mut SideMap<Combatant>, names: &SideMap<String>) -> Applied {
        let caster = &names[self.caster];
        let card = &self.card_name;

        match self.delta {
            EffectDelta::Damage {
                target,
                amount,
                pierce,
                burn,
            } => {
                let victim = &mut combatants[target];
                let report = victim.take_damage(amount, pierce);
                if burn {
                    victim.burn = victim.burn.saturating_add(1);
                }

                let mut log = format!(
                    "{caster} uses {card}: {} takes {} damage",
                    names[target], report.dealt
                );
                if report.absorbed > 0 {
                    log.push_str(&format!(" ({} absorbed by shield)", report.absorbed));
                }
                if pierce {
                    log.push_str(", piercing");
                }
                if burn {
                    log.push_str(&format!(", burning ({} stacks)", victim.burn));
                }

                Applied {
                    log,
                    damage: Some(report),
                    burned: burn,
                }
            }
            EffectDelta::Shield { side, amount } => {
                combatants[side].add_shield(amount);
                Self::plain(format!(
                    "{caster} uses {card}: shield +{amount} (now {})",
                    combatants[side].shield
                ))
            }
            EffectDelta::Heal { side, amount } => {
                let restored = combatants[side].heal(amount);
                Self::plain(format!(
                    "{caster} uses {card}: restores {restored} health"
                ))
            }
            EffectDelta::Spirit { side, amount } => {
                let restored = combatants[side].restore_spirit(amount);
                Self::plain(format!(
                    "{caster} uses {card}: restores {restored} spirit"
                ))
            }
            EffectDelta::Growth {
                side,
                element,
                amount,
            } => {
                combatants[side].essence.grow(element, amount);
                Self::plain(format!(
                    "{caster} uses {card}: {element} essence grows by {amount} (cap {})",
                    combatants[side].essence.cap(element)
                ))
            }
            EffectDelta::Fizzle { .. } => {
                Self::plain(format!("{caster} uses {card}, but nothing happens"))
            }
        }
    }

    fn plain(log: String) -> Applied {
        Applied {
            log,
            damage: None,
            burned: false,
        }
    }
}
