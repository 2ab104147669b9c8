//! Panel UI configuration.
//!
//! Every field has a default so an empty JSON object (or no config at all)
//! yields the stock admin panel behavior. In the browser the JSON is read
//! from an inline `<script type="application/json">` block; see
//! `browser::load_config`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::UiError;
use crate::locale::date::DisplayZone;

pub const DEFAULT_TOAST_LIFETIME_MS: u64 = 5000;
pub const DEFAULT_TOAST_Z_INDEX: i32 = 9999;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a toast stays attached before automatic removal.
    pub toast_lifetime_ms: u64,
    /// Inline `z-index` applied to every toast banner.
    pub toast_z_index: i32,
    /// Display zone for dates, in minutes east of UTC. `None` uses the host zone.
    pub utc_offset_minutes: Option<i32>,
    /// Console log level installed by `browser::init`.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_lifetime_ms: DEFAULT_TOAST_LIFETIME_MS,
            toast_z_index: DEFAULT_TOAST_Z_INDEX,
            utc_offset_minutes: None,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse config from JSON text. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_lifetime_ms)
    }

    /// Configured display zone, if one was pinned.
    pub fn display_zone(&self) -> Option<DisplayZone> {
        self.utc_offset_minutes.and_then(DisplayZone::from_minutes)
    }

    /// Parsed log level, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    fn validate(&self) -> Result<(), UiError> {
        if let Some(minutes) = self.utc_offset_minutes {
            if DisplayZone::from_minutes(minutes).is_none() {
                return Err(UiError::Config(format!("utc_offset_minutes out of range: {minutes}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
