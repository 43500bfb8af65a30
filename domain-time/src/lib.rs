pub mod clock;
pub mod config;
pub mod domain_clock;
pub mod error;
pub mod time_zone;

pub use clock::{
    clock_source_state, reset_clock_source, set_clock_source, ClockSource, ClockSourceState,
    FixedClock, GlobalClock, SystemClock,
};
pub use domain_clock::DomainClock;
pub use error::DomainTimeError;
pub use time_zone::{
    resolve, validate_zone_table, LocalizedInstant, SupportedTimeZone, UtcTagged,
};
