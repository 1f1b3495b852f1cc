use serde::{Deserialize, Serialize};

/// Gameplay rules that differ between variants of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Defer mine placement until the first reveal so that reveal is never a mine.
    pub first_click_safe: bool,
    /// Flag every remaining mine when the game is won.
    pub auto_flag_on_win: bool,
    /// Report vibration patterns for flags and mine hits.
    pub haptics: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            first_click_safe: true,
            auto_flag_on_win: true,
            haptics: true,
        }
    }
}

/// Vibration feedback for a move, for hosts that can vibrate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Haptic {
    MineHit,
    FlagPlaced,
    FlagRemoved,
}

impl Haptic {
    /// Alternating vibrate/pause durations in milliseconds.
    pub const fn pattern(self) -> &'static [u32] {
        match self {
            Self::MineHit => &[1500],
            Self::FlagPlaced => &[200],
            Self::FlagRemoved => &[100, 100, 100],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for every board of the session, random when absent.
    pub seed: Option<u64>,
    pub policy: Policy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"seed": 7, "policy": {"haptics": false}}"#).unwrap();

        assert_eq!(config.seed, Some(7));
        assert!(config.policy.first_click_safe);
        assert!(config.policy.auto_flag_on_win);
        assert!(!config.policy.haptics);
    }

    #[test]
    fn empty_config_is_default() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, SessionConfig::default());
    }
}
