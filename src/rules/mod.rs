//! Encounter rules: turn flow, event stream and outcomes.
//!
//! ## Key Types
//!
//! - `Encounter`: Turn controller owning all state of one fight
//! - `Phase`: Upkeep/active phases per side plus the terminal state
//! - `TurnEvent`: Discrete observable steps, paced by the caller
//! - `OutcomeEvaluator`: Terminal checks and reward rolls
//! - `CombatResult`: The summary handed back once the fight ends

pub mod encounter;
pub mod event;
pub mod outcome;

pub use encounter::{Encounter, RngSnapshot};
pub use event::{Phase, TurnEvent};
pub use outcome::{CombatResult, DurabilityDelta, ElementGrowth, Outcome, OutcomeEvaluator, Rewards};
