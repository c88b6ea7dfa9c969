use std::time::Duration;

use thiserror::Error;

use crate::modules::time_entries::use_cases::weekly_summary::summary::{
    DEFAULT_WEEKLY_TARGET_HOURS, WeeklyTargets,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Service configuration loaded from environment variables.
///
/// | Env Var                   | Default   |
/// |---------------------------|-----------|
/// | `HOST`                    | `0.0.0.0` |
/// | `PORT`                    | `8080`    |
/// | `STORE_TIMEOUT_MS`        | `2000`    |
/// | `WEEKLY_TARGET_HOURS`     | `16`      |
/// | `WEEKLY_TARGET_OVERRIDES` | empty     |
///
/// `WEEKLY_TARGET_OVERRIDES` is a comma separated list of `user=hours` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_timeout: Duration,
    pub weekly_targets: WeeklyTargets,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16",
                value: raw,
            })?,
            None => 8080,
        };

        let store_timeout_ms = match lookup("STORE_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "STORE_TIMEOUT_MS",
                        expected: "a positive number of milliseconds",
                        value: raw,
                    });
                }
            },
            None => 2_000,
        };

        let default_hours = match lookup("WEEKLY_TARGET_HOURS") {
            Some(raw) => parse_hours("WEEKLY_TARGET_HOURS", &raw)?,
            None => DEFAULT_WEEKLY_TARGET_HOURS,
        };

        let mut weekly_targets = WeeklyTargets::new(default_hours);
        if let Some(raw) = lookup("WEEKLY_TARGET_OVERRIDES") {
            for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let invalid = || ConfigError::Invalid {
                    name: "WEEKLY_TARGET_OVERRIDES",
                    expected: "comma separated user=hours pairs",
                    value: pair.to_string(),
                };
                let (user_id, hours) = pair.split_once('=').ok_or_else(invalid)?;
                let user_id = user_id.trim();
                if user_id.is_empty() {
                    return Err(invalid());
                }
                let hours = parse_hours("WEEKLY_TARGET_OVERRIDES", hours)?;
                weekly_targets = weekly_targets.with_override(user_id, hours);
            }
        }

        Ok(Self {
            host,
            port,
            store_timeout: Duration::from_millis(store_timeout_ms),
            weekly_targets,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_hours(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => Ok(hours),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "a non-negative number of hours",
            value: raw.to_string(),
        }),
    }
}
