use dioxus_logger::tracing::Level;
use engine::coordinator::MAX_TURN_TIMEOUT;
use std::{ops::RangeInclusive, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const DEFAULT_TURN_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_MAX_IDLE_SECS: i64 = 900;
const DEFAULT_SWEEP_SCHEDULE: &str = "0 * * * * *";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Accepted turn timeouts: at least a second, at most what the coordinator arms.
const TURN_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=MAX_TURN_TIMEOUT.as_secs();
/// Accepted idle limits: a minute up to thirty days.
const SESSION_MAX_IDLE_RANGE: RangeInclusive<i64> = 60..=30 * 24 * 60 * 60;

pub struct Config {
    pub discord_bot_token: String,

    /// How long a player has to act before their game is abandoned.
    pub turn_timeout: Duration,
    /// How long a session may sit untouched before the sweep closes it.
    pub session_max_idle: chrono::Duration,
    /// Cron expression (with seconds) of the idle session sweep.
    pub sweep_schedule: String,

    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Only `DISCORD_BOT_TOKEN` is required; everything else falls back to a default
    /// when unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when it is unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed configuration
    /// - `Err(AppError::ConfigErr)` - Token missing or a value failed to parse
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let turn_timeout_secs = parse_in_range(
            &lookup,
            "TURN_TIMEOUT_SECS",
            DEFAULT_TURN_TIMEOUT_SECS,
            TURN_TIMEOUT_RANGE,
        )?;
        let max_idle_secs = parse_in_range(
            &lookup,
            "SESSION_MAX_IDLE_SECS",
            DEFAULT_SESSION_MAX_IDLE_SECS,
            SESSION_MAX_IDLE_RANGE,
        )?;

        Ok(Self {
            discord_bot_token: lookup("DISCORD_BOT_TOKEN")
                .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            turn_timeout: Duration::from_secs(turn_timeout_secs),
            session_max_idle: chrono::Duration::seconds(max_idle_secs),
            sweep_schedule: lookup("SWEEP_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_SWEEP_SCHEDULE.to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", DEFAULT_LOG_LEVEL)?,
        })
    }
}

/// Parses an optional variable, using `default` when it is unset.
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}

/// Parses an optional number that must fall within `range`.
fn parse_in_range<T: FromStr + PartialOrd + ToString>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError> {
    let value = parse_or(lookup, name, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    /// Tests that only the token has to be set.
    ///
    /// Expected: Ok with every other setting at its default
    #[test]
    fn uses_defaults_when_unset() {
        let config = config_from(&[("DISCORD_BOT_TOKEN", "token")]).unwrap();

        assert_eq!(config.discord_bot_token, "token");
        assert_eq!(config.turn_timeout, Duration::from_secs(60));
        assert_eq!(config.session_max_idle, chrono::Duration::minutes(15));
        assert_eq!(config.sweep_schedule, "0 * * * * *");
        assert_eq!(config.log_level, Level::INFO);
    }

    /// Tests overriding the optional settings.
    ///
    /// Expected: Ok with the given values
    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("TURN_TIMEOUT_SECS", "30"),
            ("SESSION_MAX_IDLE_SECS", "120"),
            ("SWEEP_SCHEDULE", "*/10 * * * * *"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.turn_timeout, Duration::from_secs(30));
        assert_eq!(config.session_max_idle, chrono::Duration::minutes(2));
        assert_eq!(config.sweep_schedule, "*/10 * * * * *");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    /// Tests a missing token.
    ///
    /// Expected: Err(MissingEnvVar)
    #[test]
    fn fails_without_token() {
        let result = config_from(&[]);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DISCORD_BOT_TOKEN"
        ));
    }

    /// Tests a timeout that is not a number.
    ///
    /// Expected: Err(InvalidEnvVar) naming the variable and value
    #[test]
    fn fails_on_unparsable_value() {
        let result = config_from(&[("DISCORD_BOT_TOKEN", "token"), ("TURN_TIMEOUT_SECS", "soon")]);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, value }))
                if name == "TURN_TIMEOUT_SECS" && value == "soon"
        ));
    }

    /// Tests a negative idle limit, which would make every session look idle.
    ///
    /// Expected: Err(InvalidEnvVar) for SESSION_MAX_IDLE_SECS
    #[test]
    fn rejects_negative_idle_limit() {
        let result = config_from(&[("DISCORD_BOT_TOKEN", "token"), ("SESSION_MAX_IDLE_SECS", "-1")]);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, value }))
                if name == "SESSION_MAX_IDLE_SECS" && value == "-1"
        ));
    }

    /// Tests limits too large for the clock to represent.
    ///
    /// Expected: Err(InvalidEnvVar) for both variables
    #[test]
    fn rejects_oversized_limits() {
        let timeout = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("TURN_TIMEOUT_SECS", "1000000000000000"),
        ]);
        let idle = config_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("SESSION_MAX_IDLE_SECS", "9223372036854775807"),
        ]);

        assert!(matches!(
            timeout,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, .. })) if name == "TURN_TIMEOUT_SECS"
        ));
        assert!(matches!(
            idle,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, .. })) if name == "SESSION_MAX_IDLE_SECS"
        ));
    }

    /// Tests a zero turn timeout, which would abandon every game at once.
    ///
    /// Expected: Err(InvalidEnvVar)
    #[test]
    fn rejects_zero_timeout() {
        let result = config_from(&[("DISCORD_BOT_TOKEN", "token"), ("TURN_TIMEOUT_SECS", "0")]);

        assert!(matches!(result, Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))));
    }
}
