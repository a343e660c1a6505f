use std::time::Duration;

use common::config::{Validate, validate_range};
use common::games::snake::{SnakeSessionSettings, TickIntervals};
use common::PlayMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct GameplayConfig {
    pub manual_tick_interval_ms: u32,
    pub autonomous_tick_interval_ms: u32,
    pub flash_duration_ms: u32,
    pub initial_lives: u32,
    pub start_in_autonomous_mode: bool,
}

impl GameplayConfig {
    pub fn to_session_settings(&self) -> SnakeSessionSettings {
        SnakeSessionSettings {
            initial_lives: self.initial_lives,
            flash_duration: Duration::from_millis(self.flash_duration_ms as u64),
            tick_intervals: TickIntervals {
                manual: Duration::from_millis(self.manual_tick_interval_ms as u64),
                autonomous: Duration::from_millis(self.autonomous_tick_interval_ms as u64),
            },
            initial_mode: if self.start_in_autonomous_mode {
                PlayMode::Autonomous
            } else {
                PlayMode::Manual
            },
            ..SnakeSessionSettings::default()
        }
    }
}

impl Validate for GameplayConfig {
    fn validate(&self) -> Result<(), String> {
        validate_range("manual_tick_interval_ms", self.manual_tick_interval_ms, 20..=5000)?;
        validate_range("autonomous_tick_interval_ms", self.autonomous_tick_interval_ms, 20..=5000)?;
        validate_range("flash_duration_ms", self.flash_duration_ms, 0..=5000)?;
        validate_range("initial_lives", self.initial_lives, 1..=9)?;
        Ok(())
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            manual_tick_interval_ms: 600,
            autonomous_tick_interval_ms: 100,
            flash_duration_ms: 400,
            initial_lives: 3,
            start_in_autonomous_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_defaults() {
        let settings = GameplayConfig::default().to_session_settings();
        assert_eq!(settings, SnakeSessionSettings::default());
    }

    #[test]
    fn test_autonomous_start() {
        let config = GameplayConfig {
            start_in_autonomous_mode: true,
            ..GameplayConfig::default()
        };
        assert_eq!(config.to_session_settings().initial_mode, PlayMode::Autonomous);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let config = GameplayConfig {
            initial_lives: 0,
            ..GameplayConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err("initial_lives must be between 1 and 9, got 0".to_string())
        );

        let config = GameplayConfig {
            manual_tick_interval_ms: 10,
            ..GameplayConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
