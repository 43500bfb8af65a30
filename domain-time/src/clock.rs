use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Source of the current UTC instant.
#[cfg_attr(test, mockall::automock)]
pub trait ClockSource: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

impl<F> ClockSource for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now_utc(&self) -> DateTime<Utc> {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl ClockSource for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSourceState {
    Real,
    Overridden,
}

struct ClockSlot {
    source: Arc<dyn ClockSource>,
    state: ClockSourceState,
}

impl ClockSlot {
    fn real() -> Self {
        Self {
            source: Arc::new(SystemClock),
            state: ClockSourceState::Real,
        }
    }
}

fn clock_slot() -> &'static RwLock<ClockSlot> {
    static CLOCK_SLOT: OnceLock<RwLock<ClockSlot>> = OnceLock::new();
    CLOCK_SLOT.get_or_init(|| RwLock::new(ClockSlot::real()))
}

/// Replaces the process-wide clock source. The last call wins; overrides do
/// not nest, so callers must restore with [`reset_clock_source`].
pub fn set_clock_source<C>(source: C)
where
    C: ClockSource + 'static,
{
    let mut slot = clock_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    slot.source = Arc::new(source);
    slot.state = ClockSourceState::Overridden;
    tracing::debug!("Process-wide clock source overridden");
}

/// Restores the system clock as the process-wide source.
pub fn reset_clock_source() {
    let mut slot = clock_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = ClockSlot::real();
    tracing::debug!("Process-wide clock source reset to system clock");
}

pub fn clock_source_state() -> ClockSourceState {
    clock_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .state
}

pub fn current_clock_source() -> Arc<dyn ClockSource> {
    clock_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .source
        .clone()
}

/// Delegates to whatever the process-wide source is at the time of each read.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalClock;

impl ClockSource for GlobalClock {
    fn now_utc(&self) -> DateTime<Utc> {
        current_clock_source().now_utc()
    }
}
