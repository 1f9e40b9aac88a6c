use crate::swipe::SwipeParams;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub thumbs_up: ThumbsUpConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swipe: SwipeConfig::default(),
            thumbs_up: ThumbsUpConfig::default(),
            transport: TransportConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

// ============================================================================
// Swipe Config
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SwipeConfig {
    /// Normalized (0-1) fingertip displacement needed for a swipe
    #[serde(default = "default_min_swipe_distance")]
    pub min_swipe_distance: f32,
    /// Normalized units/sec - filters accidental drifts
    #[serde(default = "default_min_swipe_velocity")]
    pub min_swipe_velocity: f32,
    /// Primary axis must carry this share of |dx|+|dy|
    #[serde(default = "default_directionality_ratio")]
    pub directionality_ratio: f32,
    /// Seconds before another swipe can fire
    #[serde(default = "default_cooldown_s")]
    pub cooldown_s: f64,
    /// Tip-to-knuckle distance at which the index finger counts as pointing
    #[serde(default = "default_index_extend_threshold")]
    pub index_extend_threshold: f32,
    /// Seconds of fingertip history to analyse
    #[serde(default = "default_history_window_s")]
    pub history_window_s: f64,
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: default_min_swipe_distance(),
            min_swipe_velocity: default_min_swipe_velocity(),
            directionality_ratio: default_directionality_ratio(),
            cooldown_s: default_cooldown_s(),
            index_extend_threshold: default_index_extend_threshold(),
            history_window_s: default_history_window_s(),
            min_samples: default_min_samples(),
            max_samples: default_max_samples(),
        }
    }
}

impl SwipeConfig {
    pub fn params(&self) -> SwipeParams {
        SwipeParams {
            min_distance: self.min_swipe_distance,
            min_velocity: self.min_swipe_velocity,
            directionality_ratio: self.directionality_ratio,
            history_window: Duration::from_secs_f64(self.history_window_s),
            min_samples: self.min_samples,
            max_samples: self.max_samples,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_s)
    }
}

fn default_min_swipe_distance() -> f32 {
    0.12
}
fn default_min_swipe_velocity() -> f32 {
    0.35
}
fn default_directionality_ratio() -> f32 {
    0.70
}
fn default_cooldown_s() -> f64 {
    1.0
}
fn default_index_extend_threshold() -> f32 {
    0.14
}
fn default_history_window_s() -> f64 {
    0.35
}
fn default_min_samples() -> usize {
    2
}
fn default_max_samples() -> usize {
    64
}

// ============================================================================
// Thumbs-up Config
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ThumbsUpConfig {
    /// Thumb tip must be above the thumb base knuckle by at least this much
    #[serde(default = "default_thumb_rise_min")]
    pub thumb_rise_min: f32,
    /// Seconds before thumbs-up can fire again
    #[serde(default = "default_cooldown_s")]
    pub cooldown_s: f64,
}

impl Default for ThumbsUpConfig {
    fn default() -> Self {
        Self {
            thumb_rise_min: default_thumb_rise_min(),
            cooldown_s: default_cooldown_s(),
        }
    }
}

impl ThumbsUpConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_s)
    }
}

fn default_thumb_rise_min() -> f32 {
    0.08
}

// ============================================================================
// Transport Config
// ============================================================================

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// `adb shell input keyevent` on a TV or phone (default)
    #[default]
    Adb,
    /// Arrow keys and Return on this machine
    Keyboard,
    /// Print commands only
    Console,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adb" => Ok(TransportKind::Adb),
            "keyboard" => Ok(TransportKind::Keyboard),
            "console" => Ok(TransportKind::Console),
            other => Err(format!("unknown transport '{}' (adb, keyboard, console)", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TransportConfig {
    #[serde(default)]
    pub kind: TransportKind,
    /// adb client executable
    #[serde(default = "default_adb_path")]
    pub adb_path: String,
    /// Device serial or `ip:port` (supports ${ENV_VAR} syntax, empty = default device)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adb_host: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::default(),
            adb_path: default_adb_path(),
            adb_host: None,
        }
    }
}

fn default_adb_path() -> String {
    "adb".into()
}

// ============================================================================
// UI Config
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiConfig {
    /// Status line with cooldown bar and last gesture
    #[serde(default = "default_hud")]
    pub hud: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { hud: default_hud() }
    }
}

fn default_hud() -> bool {
    true
}

// ============================================================================
// Loading
// ============================================================================

/// Expand ${VAR} to environment variable values
fn expand_env_vars(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();

    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = lookup(var_name).unwrap_or_else(|| {
                warn!("environment variable '{}' not found", var_name);
                String::new()
            });
            result.replace_range(start..start + end + 1, &value);
        } else {
            break;
        }
    }

    result
}

fn override_from<T: std::str::FromStr>(
    target: &mut T,
    var: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) {
    if let Some(raw) = lookup(var) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!("ignoring {}={:?}: not a number", var, raw),
        }
    }
}

impl Config {
    /// Read `path` if it exists, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))?
        } else {
            Config::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Environment wins over the file. `lookup` is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("ADB_HOST") {
            self.transport.adb_host = Some(host);
        }
        if let Some(host) = self.transport.adb_host.take() {
            let host = expand_env_vars(&host, &lookup);
            let host = host.trim();
            self.transport.adb_host = (!host.is_empty()).then(|| host.to_string());
        }

        let swipe = &mut self.swipe;
        override_from(&mut swipe.min_swipe_distance, "FLICK_MIN_SWIPE_DISTANCE", &lookup);
        override_from(&mut swipe.min_swipe_velocity, "FLICK_MIN_SWIPE_VELOCITY", &lookup);
        override_from(&mut swipe.directionality_ratio, "FLICK_DIRECTIONALITY_RATIO", &lookup);
        override_from(&mut swipe.cooldown_s, "FLICK_GESTURE_COOLDOWN_S", &lookup);
        override_from(
            &mut swipe.index_extend_threshold,
            "FLICK_INDEX_EXTEND_THRESHOLD",
            &lookup,
        );
        override_from(&mut self.thumbs_up.thumb_rise_min, "FLICK_THUMB_RISE_MIN", &lookup);
        override_from(&mut self.thumbs_up.cooldown_s, "FLICK_THUMBS_UP_COOLDOWN_S", &lookup);
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let thresholds = [
            ("swipe.min_swipe_distance", self.swipe.min_swipe_distance as f64),
            ("swipe.min_swipe_velocity", self.swipe.min_swipe_velocity as f64),
            ("swipe.cooldown_s", self.swipe.cooldown_s),
            ("swipe.index_extend_threshold", self.swipe.index_extend_threshold as f64),
            ("swipe.history_window_s", self.swipe.history_window_s),
            ("thumbs_up.thumb_rise_min", self.thumbs_up.thumb_rise_min as f64),
            ("thumbs_up.cooldown_s", self.thumbs_up.cooldown_s),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                bail!("{} must be a finite, non-negative number (got {})", name, value);
            }
        }

        let durations = [
            ("swipe.cooldown_s", self.swipe.cooldown_s),
            ("swipe.history_window_s", self.swipe.history_window_s),
            ("thumbs_up.cooldown_s", self.thumbs_up.cooldown_s),
        ];
        for (name, secs) in durations {
            if Duration::try_from_secs_f64(secs).is_err() {
                bail!("{} is too large to be a duration (got {})", name, secs);
            }
        }

        let ratio = self.swipe.directionality_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            bail!("swipe.directionality_ratio must be in (0, 1] (got {})", ratio);
        }
        if self.swipe.min_samples < 2 {
            bail!("swipe.min_samples must be at least 2 (got {})", self.swipe.min_samples);
        }
        if self.swipe.max_samples < self.swipe.min_samples {
            bail!(
                "swipe.max_samples ({}) must not be below swipe.min_samples ({})",
                self.swipe.max_samples,
                self.swipe.min_samples
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.swipe.min_swipe_distance, 0.12);
        assert_eq!(config.swipe.min_swipe_velocity, 0.35);
        assert_eq!(config.swipe.directionality_ratio, 0.70);
        assert_eq!(config.swipe.cooldown_s, 1.0);
        assert_eq!(config.swipe.index_extend_threshold, 0.14);
        assert_eq!(config.thumbs_up.thumb_rise_min, 0.08);
        assert_eq!(config.thumbs_up.cooldown_s, 1.0);
        assert_eq!(config.transport.kind, TransportKind::Adb);
        assert!(config.ui.hud);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [swipe]
            min_swipe_distance = 0.2
            cooldown_s = 0.5

            [transport]
            kind = "console"
            "#,
        )
        .unwrap();
        assert_eq!(config.swipe.min_swipe_distance, 0.2);
        assert_eq!(config.swipe.cooldown(), Duration::from_millis(500));
        assert_eq!(config.swipe.min_swipe_velocity, 0.35);
        assert_eq!(config.thumbs_up.cooldown_s, 1.0);
        assert_eq!(config.transport.kind, TransportKind::Console);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("ADB_HOST", "192.168.1.20:5555"),
            ("FLICK_MIN_SWIPE_DISTANCE", "0.2"),
            ("FLICK_THUMBS_UP_COOLDOWN_S", " 2.5 "),
            ("FLICK_GESTURE_COOLDOWN_S", "soon"),
        ]));
        assert_eq!(config.transport.adb_host.as_deref(), Some("192.168.1.20:5555"));
        assert_eq!(config.swipe.min_swipe_distance, 0.2);
        assert_eq!(config.thumbs_up.cooldown_s, 2.5);
        // unparseable values are ignored
        assert_eq!(config.swipe.cooldown_s, 1.0);
    }

    #[test]
    fn test_adb_host_expansion() {
        let mut config = Config::default();
        config.transport.adb_host = Some("${TV_IP}:5555".into());
        config.apply_env(env(&[("TV_IP", "10.0.0.7")]));
        assert_eq!(config.transport.adb_host.as_deref(), Some("10.0.0.7:5555"));

        let mut config = Config::default();
        config.transport.adb_host = Some("${MISSING}".into());
        config.apply_env(env(&[]));
        assert_eq!(config.transport.adb_host, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.swipe.directionality_ratio = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.swipe.min_swipe_distance = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thumbs_up.cooldown_s = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.swipe.min_samples = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.swipe.history_window_s = 1e300;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.swipe.max_samples = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_cooldown_from_env_is_rejected() {
        let mut config = Config::default();
        config.apply_env(env(&[("FLICK_GESTURE_COOLDOWN_S", "1e300")]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("swipe.cooldown_s"));

        let mut config = Config::default();
        config.apply_env(env(&[("FLICK_THUMBS_UP_COOLDOWN_S", "1e300")]));
        assert!(config.validate().is_err());

        // largest accepted values still convert
        let mut config = Config::default();
        config.apply_env(env(&[("FLICK_GESTURE_COOLDOWN_S", "86400")]));
        config.validate().unwrap();
        let settings = crate::recognizer::RecognizerSettings::from(&config);
        assert_eq!(settings.swipe_cooldown, Duration::from_secs(86400));
    }

    #[test]
    fn test_transport_kind_from_str() {
        assert_eq!("ADB".parse::<TransportKind>().unwrap(), TransportKind::Adb);
        assert_eq!("console".parse::<TransportKind>().unwrap(), TransportKind::Console);
        assert!("bluetooth".parse::<TransportKind>().is_err());
    }

    #[test]
    fn test_params_conversion() {
        let params = SwipeConfig::default().params();
        assert_eq!(params.min_distance, 0.12);
        assert!((params.history_window.as_secs_f64() - 0.35).abs() < 1e-6);
        assert_eq!(params.min_samples, 2);
    }
}
