//! # spirit-duel
//!
//! A turn-based, deck-driven combat engine for one player against one enemy.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Result Out**: An encounter copies the player loadout
//!    and enemy template at construction and reports back a single
//!    `CombatResult`. It never holds references into caller state.
//!
//! 2. **Deterministic**: All randomness flows from one seed through
//!    `GameRng`. The enemy planner draws from its own stream.
//!
//! 3. **Events, Not Timers**: The enemy turn is a sequence of discrete
//!    `TurnEvent`s. Presentation pacing is advisory (`Pause` events) and
//!    never affects outcomes.
//!
//! ## Modules
//!
//! - `core`: IDs, sides, RNG, configuration, loadouts, combatant state, log, errors
//! - `cards`: Card definitions, catalog and instances
//! - `zones`: Deck/hand/discard management
//! - `effects`: Numeric resolution of played cards
//! - `ai`: Enemy action planning
//! - `rules`: Turn controller, event stream and outcome evaluation

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, CombatConfig, CombatLog, Combatant, Command, EnemyTemplate, GameRng,
    GameRngState, InstanceId, ItemId, LogEntry, PlayError, PlayerLoadout, RewardYield,
    SetupError, Side, SideMap, Stats, TalismanBinding, TalismanId,
};

pub use crate::cards::{Card, CardCatalog, CardId, CardInstance, CardTag, EffectKind, Element};

pub use crate::zones::{DrawStep, Zone, ZoneManager, ZonePosition};

pub use crate::effects::{EffectDelta, EffectResolver, PresentationCue, Resolution};

pub use crate::ai::{EnemyPolicy, RandomAffordable, ResourceBudget};

pub use crate::rules::{
    CombatResult, DurabilityDelta, ElementGrowth, Encounter, Outcome, OutcomeEvaluator, Phase,
    Rewards, RngSnapshot, TurnEvent,
};
