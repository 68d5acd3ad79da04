//! TOML-based application configuration.
//!
//! Stores preferences for:
//! - The celebration pause after a completed day
//! - How the checklist is displayed (ideas, badges)
//! - The advertised challenge length
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::challenge::DEFAULT_CELEBRATION_MS;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Longest accepted celebration pause (ten minutes).
pub const MAX_CELEBRATION_MS: u64 = 600_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Pause between a completed day and the switch to the next one.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print example ideas under each item of an expanded category.
    #[serde(default = "default_true")]
    pub show_ideas: bool,
    /// Prefix milestone rewards with their badge glyph.
    #[serde(default = "default_true")]
    pub badges: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Shown as "Day N of <length_days>". Days past it keep counting.
    #[serde(default = "default_length_days")]
    pub length_days: u32,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub celebration: CelebrationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub challenge: ChallengeConfig,
}

fn default_true() -> bool {
    true
}
fn default_delay_ms() -> u64 {
    DEFAULT_CELEBRATION_MS
}
fn default_length_days() -> u32 {
    75
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ideas: true,
            badges: true,
        }
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            length_days: default_length_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("expected a whole number, got '{value}'")))?
                        .into(),
                ),
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load from `path`, writing defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a leaf value by dot-separated key. The value must parse as the
    /// type of the current value. Does not write to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json)?;
        if updated.celebration.delay_ms > MAX_CELEBRATION_MS {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("must be at most {MAX_CELEBRATION_MS} ms, got '{value}'"),
            }
            .into());
        }
        *self = updated;
        Ok(())
    }

    /// Celebration pause to hand to the engine. Zero when disabled, capped at
    /// [`MAX_CELEBRATION_MS`] for hand-edited files.
    pub fn celebration_delay(&self) -> chrono::Duration {
        if self.celebration.enabled {
            chrono::Duration::milliseconds(self.celebration.delay_ms.min(MAX_CELEBRATION_MS) as i64)
        } else {
            chrono::Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert!(cfg.celebration.enabled);
        assert_eq!(cfg.celebration.delay_ms, 2_000);
        assert!(cfg.display.show_ideas);
        assert!(cfg.display.badges);
        assert_eq!(cfg.challenge.length_days, 75);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[celebration]\ndelay_ms = 500\n").unwrap();
        assert_eq!(cfg.celebration.delay_ms, 500);
        assert!(cfg.celebration.enabled);
        assert_eq!(cfg.challenge.length_days, 75);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("celebration.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("celebration.delay_ms").as_deref(), Some("2000"));
        assert!(cfg.get("celebration").is_none());
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("display.show_ideas", "false").unwrap();
        cfg.set("celebration.delay_ms", "750").unwrap();
        assert!(!cfg.display.show_ideas);
        assert_eq!(cfg.celebration.delay_ms, 750);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("display.nonexistent_key", "true"),
            Err(crate::CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("display", "true").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("display.badges", "not_a_bool").is_err());
        assert!(cfg.set("challenge.length_days", "-3").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn disabled_celebration_has_no_delay() {
        let mut cfg = Config::default();
        assert_eq!(cfg.celebration_delay(), chrono::Duration::seconds(2));
        cfg.celebration.enabled = false;
        assert_eq!(cfg.celebration_delay(), chrono::Duration::zero());
    }

    #[test]
    fn set_rejects_oversized_delay() {
        let mut cfg = Config::default();
        let err = cfg
            .set("celebration.delay_ms", "10000000000000000")
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Config(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.celebration.delay_ms, DEFAULT_CELEBRATION_MS);

        cfg.set("celebration.delay_ms", &MAX_CELEBRATION_MS.to_string())
            .unwrap();
        assert_eq!(cfg.celebration.delay_ms, MAX_CELEBRATION_MS);
    }

    #[test]
    fn hand_edited_delay_is_capped() {
        let mut cfg = Config::default();
        cfg.celebration.delay_ms = u64::MAX;
        assert_eq!(
            cfg.celebration_delay(),
            chrono::Duration::milliseconds(MAX_CELEBRATION_MS as i64)
        );
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::path_in(dir.path());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        assert!(path.exists());

        let mut cfg = Config::default();
        cfg.set("challenge.length_days", "30").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().challenge.length_days, 30);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::path_in(dir.path());
        std::fs::write(&path, "celebration = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
