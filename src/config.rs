//! Player configuration, read from an optional JSON block on the page:
//!
//! ```html
//! <script type="application/json" id="player-config">
//!   { "capabilities": { "control_bar": false }, "log_level": "debug" }
//! </script>
//! ```
//!
//! Every field has a default, so an absent block or a partial one is fine.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Id of the `<script>` element carrying the config JSON.
pub const CONFIG_ELEMENT_ID: &str = "player-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub log_level: String,
    pub capabilities: Capabilities,
    pub playback: PlaybackOptions,
    pub selectors: Selectors,
    pub classes: Classes,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            capabilities: Capabilities::default(),
            playback: PlaybackOptions::default(),
            selectors: Selectors::default(),
            classes: Classes::default(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Configured log level, `INFO` when unrecognized.
    pub fn level(&self) -> tracing::Level {
        self.log_level.trim().parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Which UI affordances the page provides. A page without a custom control
/// bar relies on the media session alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub control_bar: bool,
    pub media_session: bool,
    pub title_toggle: bool,
    pub keyboard_shortcuts: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            control_bar: true,
            media_session: true,
            title_toggle: true,
            keyboard_shortcuts: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Continue with the next track when one ends.
    pub auto_advance: bool,
    /// Save per-track positions and restore them on play.
    pub resume_position: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            auto_advance: true,
            resume_position: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub track: String,
    pub audio: String,
    pub title: String,
    pub cover: String,
    pub prev: String,
    pub next: String,
    pub play_pause: String,
    pub progress: String,
    pub elapsed: String,
    pub total: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            track: ".track".to_string(),
            audio: "audio".to_string(),
            title: ".title".to_string(),
            cover: ".cover > img".to_string(),
            prev: ".controls .prev".to_string(),
            next: ".controls .next".to_string(),
            play_pause: ".controls .play-pause".to_string(),
            progress: ".controls input[type=range]".to_string(),
            elapsed: ".controls .elapsed".to_string(),
            total: ".controls .total".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub current: String,
    pub playing: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            current: "currentTrack".to_string(),
            playing: "playing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = PlayerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.selectors.track, ".track");
        assert_eq!(config.classes.current, "currentTrack");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = PlayerConfig::from_json(
            r#"{ "capabilities": { "control_bar": false }, "playback": { "auto_advance": false } }"#,
        )
        .unwrap();
        assert!(!config.capabilities.control_bar);
        assert!(config.capabilities.media_session);
        assert!(!config.playback.auto_advance);
        assert!(config.playback.resume_position);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = PlayerConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, crate::error::PlayerError::Config(_)));
    }

    #[test]
    fn log_level_parses_or_defaults() {
        let mut config = PlayerConfig::default();
        assert_eq!(config.level(), tracing::Level::INFO);
        config.log_level = "debug".to_string();
        assert_eq!(config.level(), tracing::Level::DEBUG);
        config.log_level = "chatty".to_string();
        assert_eq!(config.level(), tracing::Level::INFO);
    }
}
