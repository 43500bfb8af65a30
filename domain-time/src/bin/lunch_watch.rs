use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain_time::{config::Config, time_zone::validate_zone_table, DomainClock};

fn set_calendar(message: &str) {
    tracing::info!(note = message, "Calendar status updated");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_time=debug,lunch_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_zone_table()?;

    let config = Config::load()?;
    config.install();

    let clock = match std::env::args().nth(1) {
        Some(zone) => DomainClock::from_local_zone(&zone)?,
        None => DomainClock::from_config(&config),
    };
    tracing::info!(
        time_zone = %clock.zone(),
        poll_interval_seconds = config.lunch_poll_interval_seconds,
        "Waiting for lunchtime"
    );

    let lunch = clock
        .wait_for_lunchtime(config.lunch_poll_interval())
        .await;
    tracing::info!(now = %lunch, "Time for lunch!");
    set_calendar("Back in 30 minutes.");

    Ok(())
}
