#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use domain_time::{DomainClock, FixedClock};

static GLOBAL_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that touch process-wide state (clock source, installed
/// config, environment variables).
pub fn global_guard() -> MutexGuard<'static, ()> {
    GLOBAL_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid utc instant")
}

pub fn fixed_clock(zone: &str, instant: DateTime<Utc>) -> DomainClock {
    DomainClock::from_local_zone(zone)
        .expect("supported zone")
        .with_clock(FixedClock::new(instant))
}
