//! Deck, hand and discard management for the player side.
//!
//! ## Key Types
//!
//! - `Zone`: Deck, Hand, Discard or Exhausted
//! - `ZoneManager`: Card location tracking, draw, reshuffle and discard
//! - `DrawStep`: Observable outcome of each card in a draw

pub mod manager;

pub use manager::{DrawStep, Zone, ZoneManager, ZonePosition};
