//! Configuration for the editor and its playback driver.

use serde::{Deserialize, Serialize};

fn default_loop() -> bool {
    true
}

fn default_tick_limit() -> u64 {
    600
}

fn default_overwrite() -> bool {
    true
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Playback options.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Write edits back to the input file when no output path is given.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            overwrite: default_overwrite(),
        }
    }
}

/// Playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Restart from frame 0 after the last frame.
    #[serde(default = "default_loop")]
    pub loop_enabled: bool,
    /// Enter the paused state when playback starts.
    #[serde(default)]
    pub start_paused: bool,
    /// Ticks simulated by headless playback.
    #[serde(default = "default_tick_limit")]
    pub tick_limit: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            loop_enabled: default_loop(),
            start_paused: false,
            tick_limit: default_tick_limit(),
        }
    }
}

impl EditorConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playback.tick_limit == 0 {
            return Err(ConfigError::InvalidTickLimit);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Playback tick limit must be non-zero")]
    InvalidTickLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert!(config.playback.loop_enabled);
        assert!(!config.playback.start_paused);
        assert_eq!(config.playback.tick_limit, 600);
        assert!(config.overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_playback_section() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"playback": {"loop_enabled": false}, "overwrite": false}"#)
                .unwrap();
        assert!(!config.playback.loop_enabled);
        assert_eq!(config.playback.tick_limit, 600);
        assert!(!config.overwrite);
    }

    #[test]
    fn test_zero_tick_limit_rejected() {
        let mut config = EditorConfig::default();
        config.playback.tick_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickLimit)
        ));
    }
}
