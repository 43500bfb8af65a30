//! "Now" as observed through one of the supported time zones.
//!
//! A `DomainClock` is built through one of its factories and never changes
//! zone afterwards. By default it reads the process-wide clock source
//! ([`GlobalClock`]); tests bind an explicit source with
//! [`DomainClock::with_clock`] so they never touch global state.

use std::{fmt, sync::Arc, time::Duration};

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::{
    clock::{ClockSource, GlobalClock},
    config::{self, Config},
    error::Result,
    time_zone::{LocalizedInstant, SupportedTimeZone},
};

const LUNCH_HOUR: u32 = 12;
const LUNCH_MINUTE: u32 = 0;

#[derive(Clone)]
pub struct DomainClock {
    zone: SupportedTimeZone,
    source: Arc<dyn ClockSource>,
}

impl DomainClock {
    fn bound_to(zone: SupportedTimeZone) -> Self {
        Self {
            zone,
            source: Arc::new(GlobalClock),
        }
    }

    /// Binds to the configured default zone (see [`config::current_time_zone`]).
    pub fn from_local() -> Self {
        Self::bound_to(config::current_time_zone())
    }

    /// Binds to the named zone; names outside the supported set are rejected.
    pub fn from_local_zone(time_zone: &str) -> Result<Self> {
        Ok(Self::bound_to(SupportedTimeZone::parse(time_zone)?))
    }

    pub fn from_universal() -> Self {
        Self::bound_to(SupportedTimeZone::Utc)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::bound_to(config.time_zone)
    }

    pub fn with_clock_source(mut self, source: Arc<dyn ClockSource>) -> Self {
        self.source = source;
        self
    }

    pub fn with_clock<C>(self, source: C) -> Self
    where
        C: ClockSource + 'static,
    {
        self.with_clock_source(Arc::new(source))
    }

    pub fn zone(&self) -> SupportedTimeZone {
        self.zone
    }

    /// Reads the clock source and converts the reading into this clock's zone.
    /// The source is consulted on every call.
    pub fn now(&self) -> LocalizedInstant {
        self.zone.localize(self.source.now_utc())
    }

    /// Returns today's date in this clock's zone.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// True only during the minute starting at 12:00 local time.
    pub fn is_lunchtime(&self) -> bool {
        is_lunch(&self.now())
    }

    /// The instant of 23:59:59 local time on `date`.
    ///
    /// When that wall time occurs twice the later instant is used. Returns
    /// `None` when it does not exist in this zone.
    pub fn expiration_cutoff(&self, date: NaiveDate) -> Option<LocalizedInstant> {
        let cutoff = date.and_hms_opt(23, 59, 59)?;
        self.zone
            .tz()
            .from_local_datetime(&cutoff)
            .latest()
            .map(|local| self.zone.localize(local.with_timezone(&Utc)))
    }

    /// True once the local day named by `expiration` has fully elapsed, i.e.
    /// strictly after 23:59:59 local time on that date. Any time-of-day on
    /// the input is ignored.
    pub fn is_expired(&self, expiration: impl Datelike) -> bool {
        let Some(date) =
            NaiveDate::from_ymd_opt(expiration.year(), expiration.month(), expiration.day())
        else {
            return false;
        };

        let now = self.now();
        match self.expiration_cutoff(date) {
            Some(cutoff) => now.utc() > cutoff.utc(),
            None => date
                .and_hms_opt(23, 59, 59)
                .is_some_and(|cutoff| now.naive_local() > cutoff),
        }
    }

    /// Polls the clock until it reports lunchtime and returns that reading.
    pub async fn wait_for_lunchtime(&self, poll_interval: Duration) -> LocalizedInstant {
        loop {
            let now = self.now();
            if is_lunch(&now) {
                return now;
            }
            tracing::trace!(now = %now, zone = %self.zone, "Not lunchtime yet");
            tokio::time::sleep(poll_interval).await;
        }
    }
}

fn is_lunch(now: &LocalizedInstant) -> bool {
    now.hour() == LUNCH_HOUR && now.minute() == LUNCH_MINUTE
}

impl fmt::Debug for DomainClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainClock")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}
