//! Overlay configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. an optional config file (TOML, JSON or YAML, chosen by extension)
//! 2. `UXLATENCY_*` environment variables
//! 3. command-line flags
//!
//! ```toml
//! file = "latency.json"
//! refresh = "500ms"
//! green = "300ms"
//! orange = "800ms"
//! missing_tier = "red"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use uxlatency_types::{Thresholds, Tier};

/// Report file read when nothing else is configured.
pub const DEFAULT_REPORT_FILE: &str = "uxlatency.json";

/// Refresh interval used when nothing else is configured.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(1);

/// Errors raised while resolving the overlay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file or environment could not be read.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A duration setting could not be parsed.
    #[error("invalid duration for `{key}`: {value:?}")]
    InvalidDuration { key: &'static str, value: String },

    /// `missing_tier` named no known tier.
    #[error("unknown tier {0:?} (expected green, orange, red or gray)")]
    UnknownTier(String),

    /// The green limit is above the orange limit.
    #[error("green limit {green:?} exceeds orange limit {orange:?}")]
    InvalidThresholds { green: Duration, orange: Duration },
}

/// Settings given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub green: Option<String>,
    pub orange: Option<String>,
}

/// Raw settings as they appear in the file and environment.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    file: Option<PathBuf>,
    refresh: Option<String>,
    green: Option<String>,
    orange: Option<String>,
    missing_tier: Option<String>,
}

/// Resolved overlay settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Report file to poll.
    pub file: PathBuf,
    /// How often to poll it.
    pub refresh: Duration,
    /// Thresholds to classify with. `None` uses the ones carried in the report.
    pub thresholds: Option<Thresholds>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_REPORT_FILE),
            refresh: DEFAULT_REFRESH,
            thresholds: None,
        }
    }
}

impl OverlayConfig {
    /// Load the file (if any) and environment, then apply `overrides`.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let raw: RawSettings = builder
            .add_source(Environment::with_prefix("UXLATENCY"))
            .build()?
            .try_deserialize()?;

        Self::resolve(raw, overrides)
    }

    fn resolve(raw: RawSettings, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = overrides
            .file
            .clone()
            .or(raw.file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));

        let refresh = match overrides.refresh.as_ref().or(raw.refresh.as_ref()) {
            Some(value) => duration_setting("refresh", value)?,
            None => DEFAULT_REFRESH,
        };

        let green = overrides.green.as_ref().or(raw.green.as_ref());
        let orange = overrides.orange.as_ref().or(raw.orange.as_ref());

        let thresholds = if green.is_none() && orange.is_none() && raw.missing_tier.is_none() {
            None
        } else {
            let green = match green {
                Some(value) => duration_setting("green", value)?,
                None => Thresholds::DEFAULT_GREEN_LIMIT,
            };
            let orange = match orange {
                Some(value) => duration_setting("orange", value)?,
                None => Thresholds::DEFAULT_ORANGE_LIMIT,
            };
            let missing_tier = match raw.missing_tier {
                Some(name) => parse_tier(&name)?,
                None => Tier::Neutral,
            };
            Some(validate_thresholds(green, orange, missing_tier)?)
        };

        Ok(Self {
            file,
            refresh,
            thresholds,
        })
    }
}

/// Build thresholds, rejecting a green limit above the orange limit.
pub fn validate_thresholds(
    green: Duration,
    orange: Duration,
    missing_tier: Tier,
) -> Result<Thresholds, ConfigError> {
    if green > orange {
        return Err(ConfigError::InvalidThresholds { green, orange });
    }
    Ok(Thresholds::new(green, orange, missing_tier))
}

/// Parse a tier name. `gray` and `neutral` both mean [`Tier::Neutral`].
pub fn parse_tier(name: &str) -> Result<Tier, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "green" => Ok(Tier::Green),
        "orange" => Ok(Tier::Orange),
        "red" => Ok(Tier::Red),
        "gray" | "grey" | "neutral" => Ok(Tier::Neutral),
        _ => Err(ConfigError::UnknownTier(name.to_string())),
    }
}

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
];

/// Parse duration strings like "400ms", "0.9s" or "2".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();

    let (value, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| s.strip_suffix(suffix).map(|v| (v, *multiplier)))
        .unwrap_or((s, 1_000_000_000.0));

    let value: f64 = value.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(Duration::from_nanos((value * multiplier).round() as u64))
}

fn duration_setting(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("400ms"), Some(Duration::from_millis(400)));
        assert_eq!(parse_duration("0.9s"), Some(Duration::from_millis(900)));
        assert_eq!(parse_duration("250us"), Some(Duration::from_micros(250)));
        assert_eq!(parse_duration("16µs"), Some(Duration::from_micros(16)));
        assert_eq!(parse_duration("0ns"), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_bare_number_is_seconds() {
        assert_eq!(parse_duration("2"), Some(Duration::from_secs(2)));
        assert_eq!(parse_duration(" 1.5 "), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_duration("fast"), None);
        assert_eq!(parse_duration("-1s"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = OverlayConfig::resolve(RawSettings::default(), &Overrides::default()).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let raw = RawSettings {
            file: Some("from-file.json".into()),
            refresh: Some("5s".into()),
            green: Some("100ms".into()),
            ..Default::default()
        };
        let overrides = Overrides {
            file: Some("from-cli.json".into()),
            green: Some("300ms".into()),
            ..Default::default()
        };

        let config = OverlayConfig::resolve(raw, &overrides).unwrap();
        assert_eq!(config.file, PathBuf::from("from-cli.json"));
        assert_eq!(config.refresh, Duration::from_secs(5));

        let thresholds = config.thresholds.unwrap();
        assert_eq!(thresholds.green_limit, Duration::from_millis(300));
        assert_eq!(thresholds.orange_limit, Thresholds::DEFAULT_ORANGE_LIMIT);
        assert_eq!(thresholds.missing_tier, Tier::Neutral);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let overrides = Overrides {
            green: Some("1s".into()),
            orange: Some("500ms".into()),
            ..Default::default()
        };
        let err = OverlayConfig::resolve(RawSettings::default(), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThresholds { .. }));
    }

    #[test]
    fn test_equal_thresholds_allowed() {
        let thresholds =
            validate_thresholds(Duration::from_millis(500), Duration::from_millis(500), Tier::Red)
                .unwrap();
        assert_eq!(thresholds.classify(Some(Duration::from_millis(499))), Tier::Green);
        assert_eq!(thresholds.classify(Some(Duration::from_millis(500))), Tier::Red);
    }

    #[test]
    fn test_invalid_duration_names_key() {
        let overrides = Overrides {
            refresh: Some("soon".into()),
            ..Default::default()
        };
        let err = OverlayConfig::resolve(RawSettings::default(), &overrides).unwrap_err();
        assert_eq!(err.to_string(), "invalid duration for `refresh`: \"soon\"");
    }

    #[test]
    fn test_parse_tier_names() {
        assert_eq!(parse_tier("Red").unwrap(), Tier::Red);
        assert_eq!(parse_tier("gray").unwrap(), Tier::Neutral);
        assert_eq!(parse_tier("neutral").unwrap(), Tier::Neutral);
        assert!(matches!(parse_tier("blue"), Err(ConfigError::UnknownTier(_))));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "file = \"app.json\"\nrefresh = \"250ms\"\norange = \"700ms\"\nmissing_tier = \"red\""
        )
        .unwrap();

        let config = OverlayConfig::load(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(config.file, PathBuf::from("app.json"));
        assert_eq!(config.refresh, Duration::from_millis(250));

        let thresholds = config.thresholds.unwrap();
        assert_eq!(thresholds.green_limit, Thresholds::DEFAULT_GREEN_LIMIT);
        assert_eq!(thresholds.orange_limit, Duration::from_millis(700));
        assert_eq!(thresholds.missing_tier, Tier::Red);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = OverlayConfig::load(
            Some(Path::new("/nonexistent/uxlatency.toml")),
            &Overrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
