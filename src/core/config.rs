//! Encounter configuration.
//!
//! `CombatConfig` carries the fixed rule constants of an encounter: hand
//! limits, draw count, enemy action budget, the probabilistic constants for
//! Burn and bonus drops, the display log window and presentation pacing.
//!
//! Every field has a default, so collaborators may supply a partial JSON
//! object and let serde fill in the rest.

use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Rule constants for an encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Maximum cards held in hand. Draws past this go straight to discard.
    pub max_hand_size: usize,

    /// Cards drawn during the player's upkeep.
    pub draw_per_turn: usize,

    /// Upper bound on enemy actions planned per turn.
    pub enemy_actions_per_turn: usize,

    /// Chance that a Burn-tagged attack adds a stack to its target.
    pub burn_chance: f64,

    /// Chance of a bonus drop on victory.
    pub bonus_drop_chance: f64,

    /// Number of recent log entries kept for display.
    pub log_window: usize,

    /// Presentation delay around each enemy action, in milliseconds.
    /// Zero removes the pause events entirely; outcomes are unaffected.
    pub enemy_action_delay_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 10,
            draw_per_turn: 5,
            enemy_actions_per_turn: 2,
            burn_chance: 0.5,
            bonus_drop_chance: 0.3,
            log_window: 5,
            enemy_action_delay_ms: 800,
        }
    }
}

impl CombatConfig {
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_draw_per_turn(mut self, count: usize) -> Self {
        self.draw_per_turn = count;
        self
    }

    #[must_use]
    pub fn with_enemy_actions(mut self, count: usize) -> Self {
        self.enemy_actions_per_turn = count;
        self
    }

    #[must_use]
    pub fn with_burn_chance(mut self, chance: f64) -> Self {
        self.burn_chance = chance;
        self
    }

    #[must_use]
    pub fn with_bonus_drop_chance(mut self, chance: f64) -> Self {
        self.bonus_drop_chance = chance;
        self
    }

    #[must_use]
    pub fn with_log_window(mut self, window: usize) -> Self {
        self.log_window = window;
        self
    }

    /// Set the enemy action delay (0 for headless simulation).
    #[must_use]
    pub fn with_enemy_action_delay(mut self, millis: u64) -> Self {
        self.enemy_action_delay_ms = millis;
        self
    }

    /// Check that the constants describe a playable encounter.
    pub fn validate(&self) -> Result<(), SetupError> {
        let probability = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(SetupError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )))
            }
        };

        probability("burn_chance", self.burn_chance)?;
        probability("bonus_drop_chance", self.bonus_drop_chance)?;

        if self.max_hand_size == 0 {
            return Err(SetupError::InvalidConfig(
                "max_hand_size must be at least 1".to_string(),
            ));
        }
        if self.log_window == 0 {
            return Err(SetupError::InvalidConfig(
                "log_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CombatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enemy_actions_per_turn, 2);
        assert_eq!(config.log_window, 5);
    }

    #[test]
    fn test_builder() {
        let config = CombatConfig::default()
            .with_max_hand_size(3)
            .with_draw_per_turn(4)
            .with_enemy_actions(1)
            .with_burn_chance(1.0)
            .with_enemy_action_delay(0);

        assert_eq!(config.max_hand_size, 3);
        assert_eq!(config.draw_per_turn, 4);
        assert_eq!(config.enemy_actions_per_turn, 1);
        assert_eq!(config.burn_chance, 1.0);
        assert_eq!(config.enemy_action_delay_ms, 0);
    }

    #[test]
    fn test_invalid_probability() {
        let config = CombatConfig::default().with_burn_chance(1.5);
        assert!(matches!(config.validate(), Err(SetupError::InvalidConfig(_))));

        let config = CombatConfig::default().with_bonus_drop_chance(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_hand_size_rejected() {
        let config = CombatConfig::default().with_max_hand_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CombatConfig = serde_json::from_str(r#"{"draw_per_turn": 3}"#).unwrap();
        assert_eq!(config.draw_per_turn, 3);
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.burn_chance, 0.5);
    }
}
