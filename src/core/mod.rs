//! Core engine types: identifiers, sides, RNG, configuration, loadouts,
//! combatant state, log, action records and errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod loadout;
pub mod log;
pub mod rng;
pub mod side;
pub mod state;

pub use action::{ActionRecord, Command};
pub use config::CombatConfig;
pub use entity::{InstanceId, ItemId, TalismanId};
pub use error::{PlayError, SetupError};
pub use loadout::{EnemyTemplate, PlayerLoadout, RewardYield, Stats, TalismanBinding};
pub use log::{CombatLog, LogEntry};
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
pub use state::{Combatant, DamageReport, Essence, EssencePool, Shortfall};
