//! Enemy AI: action planning against a resource snapshot.

pub mod policy;

pub use policy::{EnemyPolicy, RandomAffordable, ResourceBudget};
