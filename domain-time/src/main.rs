use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain_time::{
    config::Config, time_zone::validate_zone_table, DomainClock, FixedClock, LocalizedInstant,
    SupportedTimeZone,
};

#[derive(Serialize)]
struct ClockSnapshot {
    time_zone: SupportedTimeZone,
    now: LocalizedInstant,
    offset_seconds: i32,
    is_lunchtime: bool,
    today: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_expired: Option<bool>,
}

/// Every field is derived from a single clock reading.
fn snapshot(clock: &DomainClock, expiration_date: Option<NaiveDate>) -> ClockSnapshot {
    let now = clock.now();
    let frozen = clock.clone().with_clock(FixedClock::new(now.utc()));
    ClockSnapshot {
        time_zone: frozen.zone(),
        now,
        offset_seconds: now.offset_seconds(),
        is_lunchtime: frozen.is_lunchtime(),
        today: now.date_naive(),
        expiration_date,
        is_expired: expiration_date.map(|date| frozen.is_expired(date)),
    }
}

fn parse_expiration_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid expiration date: {}", raw))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_time=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_zone_table()?;

    let config = Config::load()?;
    config.install();
    tracing::info!(
        time_zone = %config.time_zone,
        lunch_poll_interval_seconds = config.lunch_poll_interval_seconds,
        "Loaded configuration from environment/.env"
    );

    let mut args = std::env::args().skip(1);
    let clock = match args.next() {
        Some(zone) => DomainClock::from_local_zone(&zone)?,
        None => DomainClock::from_local(),
    };
    let expiration_date = args
        .next()
        .map(|raw| parse_expiration_date(&raw))
        .transpose()?;

    let snapshot = snapshot(&clock, expiration_date);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
