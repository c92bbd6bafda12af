//! Turn controller for a single encounter.
//!
//! `Encounter` owns all mutable state of one fight and moves through
//! `Phase`s:
//!
//! ```text
//! PlayerUpkeep -> PlayerActive -> EnemyUpkeep -> EnemyActive -> PlayerUpkeep ...
//!                     any phase -> Ended(outcome)
//! ```
//!
//! ## Driving an encounter
//!
//! - `step()` does one unit of autonomous work (an upkeep, one enemy action)
//!   and yields the next `TurnEvent`. It returns `None` while waiting for the
//!   player or once the encounter is over.
//! - `play_card` / `end_turn` are the only commands, accepted in
//!   `PlayerActive` only.
//!
//! Health is checked after every mutation; the first terminal state wins and
//! the `CombatResult` is produced exactly once.

use std::collections::VecDeque;

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::event::{Phase, TurnEvent};
use super::outcome::{CombatResult, DurabilityDelta, ElementGrowth, Outcome, OutcomeEvaluator};
use crate::ai::{EnemyPolicy, RandomAffordable, ResourceBudget};
use crate::cards::{Card, CardCatalog, CardId, CardInstance, Element};
use crate::core::{
    ActionRecord, CombatConfig, CombatLog, Combatant, Command, EnemyTemplate, GameRng,
    GameRngState, InstanceId,
    PlayError, PlayerLoadout, RewardYield, SetupError, Side, SideMap, TalismanBinding, TalismanId,
};
use crate::effects::EffectResolver;
use crate::zones::{DrawStep, Zone, ZoneManager, ZonePosition};

/// Live durability of one talisman binding.
#[derive(Clone, Copy, Debug)]
struct TalismanSlot {
    binding: TalismanBinding,
    remaining: u32,
}

/// Captured positions of both random streams, for replays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// Shuffles, burn rolls and drops.
    pub combat: GameRngState,
    /// Enemy planning.
    pub enemy_ai: GameRngState,
}

/// A single player-versus-enemy fight.
///
/// ## Usage
///
/// ```
/// use spirit_duel::cards::{Card, CardCatalog, CardId, EffectKind};
/// use spirit_duel::core::{CombatConfig, EnemyTemplate, PlayerLoadout, Stats};
/// use spirit_duel::rules::{Encounter, Phase};
///
/// let strike = Card::new(CardId::new(1), "Strike", EffectKind::Attack, 6);
/// let catalog: CardCatalog = [strike].into_iter().collect();
///
/// let player = PlayerLoadout::new(Stats::new(40, 3), vec![CardId::new(1); 6]);
/// let enemy = EnemyTemplate::new("Slime", Stats::new(10, 0), vec![]);
/// let config = CombatConfig::default().with_enemy_action_delay(0);
///
/// let mut encounter = Encounter::new(&player, &enemy, &catalog, config, 7).unwrap();
/// encounter.advance();
/// assert_eq!(encounter.phase(), Phase::PlayerActive);
///
/// encounter.play_card(0).unwrap();
/// encounter.play_card(0).unwrap();
/// assert!(encounter.result().is_some_and(|r| r.is_win()));
/// ```
#[derive(Clone, Debug)]
pub struct Encounter<P: EnemyPolicy = RandomAffordable> {
    config: CombatConfig,

    /// Only the cards this encounter references.
    catalog: CardCatalog,

    combatants: SideMap<Combatant>,
    names: SideMap<String>,
    level: u32,

    /// Every player card instance, wherever it currently is.
    cards: FxHashMap<InstanceId, CardInstance>,
    zones: ZoneManager,
    talismans: Vec<TalismanSlot>,

    enemy_pool: Vec<Card>,
    enemy_rewards: RewardYield,
    policy: P,

    /// Actions planned at enemy upkeep, resolved one per step.
    enemy_plan: VecDeque<CardId>,
    enemy_acted: bool,

    /// Player essence caps at the start, for growth reporting.
    starting_caps: FxHashMap<Element, i64>,

    phase: Phase,
    first_mover: Side,
    round: u32,
    sequence: u32,

    /// Deck shuffles, burn rolls and drop rolls.
    rng: GameRng,
    /// Enemy planning only.
    ai_rng: GameRng,

    pending: VecDeque<TurnEvent>,
    log: CombatLog,
    history: Vector<ActionRecord>,
    result: Option<CombatResult>,
}

impl Encounter {
    /// Build an encounter with the default enemy planner.
    pub fn new(
        player: &PlayerLoadout,
        enemy: &EnemyTemplate,
        catalog: &CardCatalog,
        config: CombatConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::with_policy(player, enemy, catalog, config, seed, RandomAffordable)
    }
}

impl<P: EnemyPolicy> Encounter<P> {
    /// Build an encounter with a custom enemy planner.
    ///
    /// Validates the inputs, creates one instance per deck entry plus one per
    /// talisman with uses left, and shuffles the deck. No upkeep runs until
    /// the caller starts stepping.
    pub fn with_policy(
        player: &PlayerLoadout,
        enemy: &EnemyTemplate,
        catalog: &CardCatalog,
        config: CombatConfig,
        seed: u64,
        policy: P,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        player.stats.validate()?;
        enemy.stats.validate()?;

        let mut seen = FxHashSet::default();
        for binding in &player.talismans {
            if !seen.insert(binding.id) {
                return Err(SetupError::DuplicateTalisman { id: binding.id });
            }
        }

        let live_talismans: Vec<&TalismanBinding> =
            player.talismans.iter().filter(|t| t.durability > 0).collect();
        if player.deck.is_empty() && live_talismans.is_empty() {
            return Err(SetupError::EmptyDeck);
        }

        let catalog = catalog
            .subset(player.card_ids().chain(enemy.actions.iter().copied()))
            .map_err(|card| SetupError::UnknownCard { card })?;
        if let Some(card) = catalog.iter().find(|c| c.cost < 0 || c.element_cost < 0) {
            return Err(SetupError::InvalidCard { card: card.id });
        }
        let enemy_pool: Vec<Card> = enemy
            .actions
            .iter()
            .filter_map(|&id| catalog.get(id).cloned())
            .collect();

        let mut rng = GameRng::new(seed);
        let ai_rng = rng.for_context("enemy-ai");

        let regular = player.deck.iter().map(|&card| (card, None));
        let bound = live_talismans.iter().map(|t| (t.card, Some(t.id)));

        let mut cards = FxHashMap::default();
        let mut zones = ZoneManager::new();
        for (index, (card, talisman)) in regular.chain(bound).enumerate() {
            let id = InstanceId::new(index as u32);
            let instance = match talisman {
                Some(talisman) => CardInstance::bound(id, card, talisman),
                None => CardInstance::new(id, card),
            };
            cards.insert(id, instance);
            zones.add_to_zone(id, Zone::Deck, ZonePosition::Top);
        }
        zones.shuffle_zone(Zone::Deck, &mut rng);

        let talismans = player
            .talismans
            .iter()
            .map(|&binding| TalismanSlot {
                binding,
                remaining: binding.durability,
            })
            .collect();

        let combatants = SideMap::new(
            Combatant::from_stats(&player.stats, player.starting_health()),
            Combatant::from_stats(&enemy.stats, enemy.stats.max_health),
        );
        let phase = Phase::opening(player.stats.speed, enemy.stats.speed);
        let first_mover = phase.side().unwrap_or(Side::Player);

        let mut log = CombatLog::new(config.log_window);
        log.push(0, Some(Side::Enemy), format!("{} appears!", enemy.name));

        tracing::info!(
            enemy = %enemy.name,
            seed,
            deck = zones.total_cards(),
            first = %first_mover,
            "encounter started"
        );

        Ok(Self {
            config,
            catalog,
            combatants,
            names: SideMap::new("Player".to_string(), enemy.name.clone()),
            level: player.level,
            cards,
            zones,
            talismans,
            enemy_pool,
            enemy_rewards: enemy.rewards.clone(),
            policy,
            enemy_plan: VecDeque::new(),
            enemy_acted: false,
            starting_caps: player.stats.elements.clone(),
            phase,
            first_mover,
            round: 0,
            sequence: 0,
            rng,
            ai_rng,
            pending: VecDeque::new(),
            log,
            history: Vector::new(),
            result: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Current round; 0 before the first upkeep.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    #[must_use]
    pub fn name(&self, side: Side) -> &str {
        &self.names[side]
    }

    /// Card definition by ID, if this encounter uses it.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.catalog.get(id)
    }

    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Hand contents in play order.
    pub fn hand(&self) -> impl Iterator<Item = &Card> + '_ {
        self.zones
            .cards_in_zone(Zone::Hand)
            .iter()
            .filter_map(|id| self.cards.get(id))
            .filter_map(|instance| self.catalog.get(instance.card))
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Enemy actions still queued for this turn.
    pub fn enemy_plan(&self) -> impl Iterator<Item = CardId> + '_ {
        self.enemy_plan.iter().copied()
    }

    #[must_use]
    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The final summary, once the encounter has ended.
    #[must_use]
    pub fn result(&self) -> Option<&CombatResult> {
        self.result.as_ref()
    }

    /// Current position of both random streams.
    #[must_use]
    pub fn rng_state(&self) -> RngSnapshot {
        RngSnapshot {
            combat: self.rng.state(),
            enemy_ai: self.ai_rng.state(),
        }
    }

    /// Rewind or fast-forward both random streams to a captured position.
    pub fn restore_rng(&mut self, snapshot: &RngSnapshot) {
        self.rng = GameRng::from_state(&snapshot.combat);
        self.ai_rng = GameRng::from_state(&snapshot.enemy_ai);
    }

    /// Uses left on a bound talisman.
    #[must_use]
    pub fn talisman_remaining(&self, id: TalismanId) -> Option<u32> {
        self.talismans
            .iter()
            .find(|slot| slot.binding.id == id)
            .map(|slot| slot.remaining)
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Run autonomous work until an event is available.
    ///
    /// Returns `None` while the player is active or after the encounter ended
    /// and every event has been taken.
    pub fn step(&mut self) -> Option<TurnEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            match self.phase {
                Phase::PlayerActive | Phase::Ended(_) => return None,
                Phase::PlayerUpkeep => self.upkeep(Side::Player),
                Phase::EnemyUpkeep => self.upkeep(Side::Enemy),
                Phase::EnemyActive => self.enemy_action(),
            }
        }
    }

    /// Iterate events until input is needed or the encounter ends.
    pub fn steps(&mut self) -> impl Iterator<Item = TurnEvent> + '_ {
        std::iter::from_fn(move || self.step())
    }

    /// Drain `steps()` into a vector.
    pub fn advance(&mut self) -> Vec<TurnEvent> {
        self.steps().collect()
    }

    // =========================================================================
    // Player commands
    // =========================================================================

    /// Play the card at `hand_index`.
    ///
    /// On success returns the events the play produced, including any
    /// earlier events not yet drained. On failure nothing changes.
    pub fn play_card(&mut self, hand_index: usize) -> Result<Vec<TurnEvent>, PlayError> {
        self.ensure_player_active().map_err(|err| self.reject(err))?;
        let (instance, card) = self.playable(hand_index).map_err(|err| self.reject(err))?;

        self.pending.push_back(TurnEvent::CardPlayed {
            instance: instance.id,
            card: card.id,
        });

        if !instance.is_free() {
            self.combatants[Side::Player].pay(&card);
        }
        match instance.talisman {
            Some(id) => {
                if self.use_talisman(id) == 0 {
                    self.zones.move_to_zone(instance.id, Zone::Exhausted, ZonePosition::Top);
                    self.log.push(
                        self.round,
                        Some(Side::Player),
                        format!("{id} is exhausted; {} crumbles away", card.name),
                    );
                    self.pending.push_back(TurnEvent::TalismanExhausted { id });
                } else {
                    self.zones.move_to_zone(instance.id, Zone::Discard, ZonePosition::Top);
                }
            }
            None => {
                self.zones.move_to_zone(instance.id, Zone::Discard, ZonePosition::Top);
            }
        }

        self.resolve(Side::Player, &card);
        Ok(self.pending.drain(..).collect())
    }

    /// Discard the hand and pass to the enemy.
    ///
    /// The enemy turn itself runs through `step()`.
    pub fn end_turn(&mut self) -> Result<Vec<TurnEvent>, PlayError> {
        self.ensure_player_active().map_err(|err| self.reject(err))?;

        let discarded = self.zones.discard_hand();
        self.pending.push_back(TurnEvent::HandDiscarded {
            cards: discarded.len(),
        });
        self.enter(Phase::EnemyUpkeep);
        Ok(self.pending.drain(..).collect())
    }

    pub fn submit(&mut self, command: Command) -> Result<Vec<TurnEvent>, PlayError> {
        match command {
            Command::PlayCard { hand_index } => self.play_card(hand_index),
            Command::EndTurn => self.end_turn(),
        }
    }

    /// Check whether `play_card(hand_index)` would be accepted.
    pub fn can_play(&self, hand_index: usize) -> Result<(), PlayError> {
        self.ensure_player_active()?;
        self.playable(hand_index).map(|_| ())
    }

    /// Drop the encounter without a result.
    pub fn abandon(self) {
        tracing::info!(round = self.round, "encounter abandoned");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_player_active(&self) -> Result<(), PlayError> {
        match self.phase {
            Phase::PlayerActive => Ok(()),
            Phase::Ended(_) => Err(PlayError::EncounterOver),
            _ => Err(PlayError::NotPlayerTurn),
        }
    }

    fn playable(&self, hand_index: usize) -> Result<(CardInstance, Card), PlayError> {
        let invalid = || PlayError::InvalidHandIndex {
            index: hand_index,
            hand_size: self.zones.zone_size(Zone::Hand),
        };

        let instance = self
            .zones
            .hand_card(hand_index)
            .and_then(|id| self.cards.get(&id))
            .copied()
            .ok_or_else(invalid)?;
        let card = self.catalog.get(instance.card).cloned().ok_or_else(invalid)?;

        if card.min_level > self.level {
            return Err(PlayError::LevelTooLow {
                required: card.min_level,
                level: self.level,
            });
        }

        if let Some(id) = instance.talisman {
            if self.talisman_remaining(id).unwrap_or(0) == 0 {
                return Err(PlayError::TalismanDepleted { id });
            }
        }
        if !instance.is_free() {
            self.combatants[Side::Player].check_affordable(&card)?;
        }

        Ok((instance, card))
    }

    fn reject(&mut self, err: PlayError) -> PlayError {
        tracing::debug!(%err, phase = ?self.phase, "command rejected");
        if err.is_logged() {
            self.log
                .push(self.round, Some(Side::Player), format!("Cannot play: {err}"));
            self.pending.push_back(TurnEvent::ActionRejected {
                reason: err.to_string(),
            });
        }
        err
    }

    /// Spend one use. Returns the uses left.
    fn use_talisman(&mut self, id: TalismanId) -> u32 {
        match self.talismans.iter_mut().find(|slot| slot.binding.id == id) {
            Some(slot) => {
                slot.remaining = slot.remaining.saturating_sub(1);
                slot.remaining
            }
            None => 0,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(?phase, round = self.round, "phase entered");
        self.phase = phase;
        self.pending.push_back(TurnEvent::PhaseEntered(phase));
    }

    fn pause(&mut self) {
        let millis = self.config.enemy_action_delay_ms;
        if millis > 0 {
            self.pending.push_back(TurnEvent::Pause { millis });
        }
    }

    fn upkeep(&mut self, side: Side) {
        if side == self.first_mover {
            self.round += 1;
        }

        let burn = self.combatants[side].burn;
        if burn > 0 {
            let damage = i64::from(burn);
            let combatant = &mut self.combatants[side];
            combatant.lose_health(damage);
            let health = combatant.health;

            self.log.push(
                self.round,
                Some(side),
                format!("{} suffers {damage} burn damage", self.names[side]),
            );
            self.pending.push_back(TurnEvent::BurnTick {
                side,
                damage,
                health,
            });
            if self.check_outcome() {
                return;
            }
        }

        self.combatants[side].refresh();

        match side {
            Side::Player => {
                self.draw_hand();
                self.enter(Phase::PlayerActive);
            }
            Side::Enemy => {
                let budget = ResourceBudget::of(&self.combatants[Side::Enemy]);
                let plan = self.policy.plan(
                    &self.enemy_pool,
                    budget,
                    self.config.enemy_actions_per_turn,
                    &mut self.ai_rng,
                );
                tracing::debug!(round = self.round, ?plan, "enemy planned");
                self.enemy_plan = plan.into();
                self.enemy_acted = false;
                self.enter(Phase::EnemyActive);
            }
        }
    }

    fn draw_hand(&mut self) {
        let steps = self.zones.draw(
            self.config.draw_per_turn,
            self.config.max_hand_size,
            &mut self.rng,
        );

        for step in steps {
            let event = match step {
                DrawStep::Reshuffled { cards } => {
                    self.log.push(
                        self.round,
                        Some(Side::Player),
                        format!("Discard pile shuffled into the deck ({cards} cards)"),
                    );
                    TurnEvent::Reshuffled { cards }
                }
                DrawStep::Drawn(instance) => TurnEvent::CardDrawn {
                    instance,
                    card: self.card_of(instance),
                },
                DrawStep::Overflow(instance) => {
                    let card = self.card_of(instance);
                    let name = self.catalog.get(card).map_or("a card", |c| c.name.as_str());
                    let text = format!("Hand is full; {name} is discarded");
                    self.log.push(self.round, Some(Side::Player), text);
                    TurnEvent::HandOverflow { instance, card }
                }
                DrawStep::OutOfCards { missing } => TurnEvent::OutOfCards { missing },
            };
            self.pending.push_back(event);
        }
    }

    fn card_of(&self, instance: InstanceId) -> CardId {
        self.cards
            .get(&instance)
            .map_or(CardId::BASIC_ATTACK, |c| c.card)
    }

    /// Resolve the next planned enemy action, or close the enemy turn.
    fn enemy_action(&mut self) {
        // Ids outside the pool are skipped
        let planned = std::iter::from_fn(|| self.enemy_plan.pop_front())
            .find_map(|id| self.enemy_pool.iter().find(|c| c.id == id).cloned());
        let next = match planned {
            Some(card) => Some(card),
            // Nothing affordable this turn
            None if !self.enemy_acted => Some(Card::basic_attack()),
            None => None,
        };

        let Some(card) = next else {
            self.enter(Phase::PlayerUpkeep);
            return;
        };

        self.enemy_acted = true;
        self.pending.push_back(TurnEvent::EnemyIntent {
            card: card.id,
            name: card.name.clone(),
        });
        self.pause();

        self.combatants[Side::Enemy].pay(&card);
        if self.resolve(Side::Enemy, &card) {
            return;
        }
        self.pause();
    }

    /// Resolve and apply a paid card. Returns true if the encounter ended.
    fn resolve(&mut self, side: Side, card: &Card) -> bool {
        let resolution = EffectResolver::resolve(
            card,
            side,
            &self.combatants,
            self.config.burn_chance,
            &mut self.rng,
        );
        if let Some(cue) = resolution.cue {
            self.pending.push_back(TurnEvent::Cue(cue));
        }

        let applied = resolution.apply(&mut self.combatants, &self.names);
        self.log.push(self.round, Some(side), applied.log.clone());
        self.pending.push_back(TurnEvent::Resolved {
            side,
            log: applied.log,
        });

        self.history
            .push_back(ActionRecord::new(side, card.id, self.round, self.sequence));
        self.sequence += 1;

        self.check_outcome()
    }

    fn check_outcome(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }
        match OutcomeEvaluator::evaluate(&self.combatants) {
            Some(outcome) => {
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    /// Enter the terminal state. Only the first call has any effect.
    fn finish(&mut self, outcome: Outcome) {
        if self.result.is_some() {
            return;
        }

        let rewards = match outcome {
            Outcome::Win => Some(OutcomeEvaluator::roll_rewards(
                &self.enemy_rewards,
                self.config.bonus_drop_chance,
                &mut self.rng,
            )),
            Outcome::Loss => None,
        };

        let talismans = self
            .talismans
            .iter()
            .map(|slot| DurabilityDelta {
                id: slot.binding.id,
                remaining_uses: slot.remaining,
            })
            .collect();

        let essence = &self.combatants[Side::Player].essence;
        let element_growth = Element::ALL
            .into_iter()
            .filter_map(|element| {
                let before = self.starting_caps.get(&element).copied().unwrap_or(0);
                let amount = essence.cap(element) - before;
                (amount > 0).then_some(ElementGrowth { element, amount })
            })
            .collect();

        let text = match outcome {
            Outcome::Win => format!("{} is defeated. Victory!", self.names[Side::Enemy]),
            Outcome::Loss => format!("{} has fallen. Defeat.", self.names[Side::Player]),
        };
        self.log.push(self.round, None, text);
        tracing::info!(?outcome, rounds = self.round, "encounter ended");

        self.enemy_plan.clear();
        self.phase = Phase::Ended(outcome);
        self.pending.push_back(TurnEvent::EncounterEnded(outcome));
        self.result = Some(CombatResult {
            outcome,
            rounds: self.round,
            rewards,
            talismans,
            element_growth,
        });
    }
}
