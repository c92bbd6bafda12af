//! Identifiers for encounter-scoped objects.
//!
//! - `InstanceId`: one physical card in the player's piles. Two copies of the
//!   same `CardId` in a deck get distinct instance IDs.
//! - `TalismanId`: an externally owned consumable binding.
//! - `ItemId`: a reward item handed back to the caller.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one encounter.
///
/// Allocated sequentially from zero at construction and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Identifier of a talisman binding, assigned by the external owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TalismanId(pub u32);

impl TalismanId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TalismanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Talisman({})", self.0)
    }
}

/// Identifier of a reward item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_basics() {
        let id = InstanceId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(InstanceId::from(7), id);
        assert_eq!(format!("{}", id), "Instance(7)");
    }

    #[test]
    fn test_talisman_display() {
        assert_eq!(format!("{}", TalismanId::new(3)), "Talisman(3)");
    }

    #[test]
    fn test_serialization() {
        let id = ItemId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
