use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{
    env,
    sync::{OnceLock, PoisonError, RwLock},
    time::Duration,
};

use crate::time_zone::SupportedTimeZone;

/// Zone used by `DomainClock::from_local()` when nothing else is configured.
pub const DEFAULT_TIME_ZONE: SupportedTimeZone = SupportedTimeZone::UsPacific;
pub const DEFAULT_LUNCH_POLL_INTERVAL_SECONDS: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub time_zone: SupportedTimeZone,
    pub lunch_poll_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            lunch_poll_interval_seconds: DEFAULT_LUNCH_POLL_INTERVAL_SECONDS,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let time_zone = parse_time_zone(env::var("APP_TIMEZONE").ok())?;
        let lunch_poll_interval_seconds =
            parse_poll_interval(env::var("LUNCH_POLL_INTERVAL_SECONDS").ok());

        Ok(Config {
            time_zone,
            lunch_poll_interval_seconds,
        })
    }

    /// Publishes this config's zone as the process-wide default.
    pub fn install(&self) {
        let mut current = installed_time_zone()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Some(self.time_zone);
        tracing::debug!(time_zone = %self.time_zone, "Installed default time zone");
    }

    pub fn lunch_poll_interval(&self) -> Duration {
        Duration::from_secs(self.lunch_poll_interval_seconds)
    }
}

fn installed_time_zone() -> &'static RwLock<Option<SupportedTimeZone>> {
    static INSTALLED_TIME_ZONE: OnceLock<RwLock<Option<SupportedTimeZone>>> = OnceLock::new();
    INSTALLED_TIME_ZONE.get_or_init(|| RwLock::new(None))
}

/// The default zone for local clocks: the installed config's zone, or
/// [`DEFAULT_TIME_ZONE`] when no config has been installed.
pub fn current_time_zone() -> SupportedTimeZone {
    installed_time_zone()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .unwrap_or(DEFAULT_TIME_ZONE)
}

fn parse_time_zone(raw: Option<String>) -> anyhow::Result<SupportedTimeZone> {
    match raw {
        None => Ok(DEFAULT_TIME_ZONE),
        Some(name) => name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", name)),
    }
}

fn parse_poll_interval(raw: Option<String>) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_LUNCH_POLL_INTERVAL_SECONDS)
}
