//! Session configuration.
//!
//! Settings resolve in layers: built-in defaults, then an optional config
//! file, then CLI flags (applied by the binary). Everything is immutable
//! once the session starts.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use pulsegate_types::{Bpm, InvalidThresholds, Thresholds};

use crate::duration::parse_duration;

/// Default UDP port the heart-rate bridge sends to.
pub const DEFAULT_PORT: u16 = 12345;

/// Default scheduling-tick interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Resolved configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// UDP port for inbound BPM datagrams.
    pub port: u16,
    /// Scheduling-tick interval for the dispatcher and recovery polling.
    pub tick: Duration,
    /// Trigger/recovery thresholds and timing windows.
    pub thresholds: Thresholds,
    /// Calming content identifier; `None` leaves the collaborator in
    /// degraded no-op mode.
    pub calming: Option<String>,
    /// Exposure content identifiers, grouped in levels.
    pub levels: Vec<Vec<String>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tick: DEFAULT_TICK,
            thresholds: Thresholds::default(),
            calming: None,
            levels: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Load defaults overlaid with a config file.
    ///
    /// The file may set any subset of keys; unset keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        let mut cfg = Self::default();
        if let Some(port) = file.port {
            cfg.port = port;
        }
        if let Some(tick) = file.tick {
            cfg.tick = parse_duration(&tick).map_err(|e| ConfigError::Duration(e.to_string()))?;
        }
        if let Some(bpm) = file.trigger_bpm {
            cfg.thresholds.trigger = Bpm::new(bpm);
        }
        if let Some(bpm) = file.recovery_bpm {
            cfg.thresholds.recovery = Bpm::new(bpm);
        }
        if let Some(sustain) = file.sustain {
            cfg.thresholds.sustain =
                parse_duration(&sustain).map_err(|e| ConfigError::Duration(e.to_string()))?;
        }
        if let Some(floor) = file.cooldown_floor {
            cfg.thresholds.cooldown_floor =
                parse_duration(&floor).map_err(|e| ConfigError::Duration(e.to_string()))?;
        }
        if let Some(calming) = file.calming {
            cfg.calming = Some(calming);
        }
        if let Some(levels) = file.levels {
            cfg.levels = levels;
        }
        Ok(cfg)
    }

    /// Validate the resolved configuration.
    ///
    /// Called by the binary after CLI overrides have been applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.tick.is_zero() {
            return Err(ConfigError::Duration("tick interval must be non-zero".into()));
        }
        Ok(())
    }
}

/// On-disk schema. All keys optional; durations are strings like "3s".
#[derive(Debug, Deserialize)]
struct FileConfig {
    port: Option<u16>,
    tick: Option<String>,
    trigger_bpm: Option<u16>,
    recovery_bpm: Option<u16>,
    sustain: Option<String>,
    cooldown_floor: Option<String>,
    calming: Option<String>,
    levels: Option<Vec<Vec<String>>>,
}

/// Errors resolving a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or deserializing the config file failed.
    #[error("failed to load config file: {0}")]
    File(#[from] config::ConfigError),

    /// A duration value could not be parsed.
    #[error("invalid duration: {0}")]
    Duration(String),

    /// The resolved thresholds are inconsistent.
    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] InvalidThresholds),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = SessionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.tick, DEFAULT_TICK);
        assert!(cfg.calming.is_none());
    }

    #[test]
    fn file_overrides_subset_of_keys() {
        let file = write_config(
            r#"
            port = 9000
            trigger_bpm = 100
            sustain = "5s"
            "#,
        );

        let cfg = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.thresholds.trigger, Bpm::new(100));
        assert_eq!(cfg.thresholds.sustain, Duration::from_secs(5));
        // Untouched keys keep their defaults
        assert_eq!(cfg.thresholds.recovery, Bpm::new(85));
        assert_eq!(cfg.thresholds.cooldown_floor, Duration::from_secs(10));
    }

    #[test]
    fn file_can_configure_content() {
        let file = write_config(
            r#"
            calming = "calm-meadow"
            levels = [["spider-far", "spider-near"], ["spider-hand"]]
            "#,
        );

        let cfg = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.calming.as_deref(), Some("calm-meadow"));
        assert_eq!(cfg.levels.len(), 2);
        assert_eq!(cfg.levels[0][1], "spider-near");
    }

    #[test]
    fn bad_duration_is_rejected() {
        let file = write_config(r#"sustain = "three seconds""#);
        assert!(matches!(
            SessionConfig::from_file(file.path()),
            Err(ConfigError::Duration(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = SessionConfig::from_file(Path::new("/nonexistent/pulsegate.toml"));
        assert!(matches!(err, Err(ConfigError::File(_))));
    }

    #[test]
    fn validation_catches_collapsed_hysteresis_gap() {
        let mut cfg = SessionConfig::default();
        cfg.thresholds.recovery = cfg.thresholds.trigger;
        assert!(matches!(cfg.validate(), Err(ConfigError::Thresholds(_))));
    }

    #[test]
    fn validation_catches_zero_tick() {
        let cfg = SessionConfig {
            tick: Duration::ZERO,
            ..SessionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Duration(_))));
    }
}
