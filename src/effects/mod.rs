//! Effect resolution for played cards.
//!
//! - `EffectResolver`: maps card + caster + state to an `EffectDelta`
//! - `Resolution`: a computed delta, applied to produce one log line
//! - `PresentationCue`: cosmetic hint keyed by effect kind and target side

pub mod resolver;

pub use resolver::{Applied, EffectDelta, EffectResolver, PresentationCue, Resolution};
