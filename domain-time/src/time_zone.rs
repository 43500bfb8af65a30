//! Name table for the supported time zones and UTC to local conversion.
//!
//! Zone names follow the `us/pacific` convention and are matched
//! case-insensitively. Each name maps to an identifier of the IANA rule
//! database shipped with `chrono-tz`, which supplies the DST rules.

use std::{collections::HashMap, fmt, str::FromStr, sync::OnceLock};

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DomainTimeError, Result};

pub const US_EASTERN: &str = "us/eastern";
pub const US_CENTRAL: &str = "us/central";
pub const US_MOUNTAIN: &str = "us/mountain";
pub const US_PACIFIC: &str = "us/pacific";
pub const US_ALASKA: &str = "us/alaska";
pub const US_HAWAII: &str = "us/hawaii";
pub const UTC: &str = "utc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SupportedTimeZone {
    UsEastern,
    UsCentral,
    UsMountain,
    UsPacific,
    UsAlaska,
    UsHawaii,
    Utc,
}

struct ZoneEntry {
    name: &'static str,
    zone: SupportedTimeZone,
    tz: Tz,
}

/// Indexed by `SupportedTimeZone` discriminant.
static ZONE_TABLE: [ZoneEntry; 7] = [
    ZoneEntry {
        name: US_EASTERN,
        zone: SupportedTimeZone::UsEastern,
        tz: chrono_tz::America::New_York,
    },
    ZoneEntry {
        name: US_CENTRAL,
        zone: SupportedTimeZone::UsCentral,
        tz: chrono_tz::America::Chicago,
    },
    ZoneEntry {
        name: US_MOUNTAIN,
        zone: SupportedTimeZone::UsMountain,
        tz: chrono_tz::America::Denver,
    },
    ZoneEntry {
        name: US_PACIFIC,
        zone: SupportedTimeZone::UsPacific,
        tz: chrono_tz::America::Los_Angeles,
    },
    ZoneEntry {
        name: US_ALASKA,
        zone: SupportedTimeZone::UsAlaska,
        tz: chrono_tz::America::Anchorage,
    },
    ZoneEntry {
        name: US_HAWAII,
        zone: SupportedTimeZone::UsHawaii,
        tz: chrono_tz::Pacific::Honolulu,
    },
    ZoneEntry {
        name: UTC,
        zone: SupportedTimeZone::Utc,
        tz: chrono_tz::UTC,
    },
];

fn zone_index() -> &'static HashMap<&'static str, SupportedTimeZone> {
    static ZONE_INDEX: OnceLock<HashMap<&'static str, SupportedTimeZone>> = OnceLock::new();
    ZONE_INDEX.get_or_init(|| {
        ZONE_TABLE
            .iter()
            .map(|entry| (entry.name, entry.zone))
            .collect()
    })
}

impl SupportedTimeZone {
    pub const ALL: [SupportedTimeZone; 7] = [
        SupportedTimeZone::UsEastern,
        SupportedTimeZone::UsCentral,
        SupportedTimeZone::UsMountain,
        SupportedTimeZone::UsPacific,
        SupportedTimeZone::UsAlaska,
        SupportedTimeZone::UsHawaii,
        SupportedTimeZone::Utc,
    ];

    /// Looks up a zone by name, ignoring ASCII case.
    pub fn parse(name: &str) -> Result<Self> {
        zone_index()
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| DomainTimeError::UnsupportedTimeZone(name.to_string()))
    }

    fn entry(self) -> &'static ZoneEntry {
        &ZONE_TABLE[self as usize]
    }

    /// Canonical lower-case name, e.g. `us/pacific`.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Identifier in the IANA rule database.
    pub fn tz(self) -> Tz {
        self.entry().tz
    }

    pub fn localize(self, instant: DateTime<Utc>) -> LocalizedInstant {
        LocalizedInstant {
            zone: self,
            local: instant.with_timezone(&self.tz()),
        }
    }
}

impl fmt::Display for SupportedTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SupportedTimeZone {
    type Err = DomainTimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SupportedTimeZone {
    type Error = DomainTimeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SupportedTimeZone> for String {
    fn from(zone: SupportedTimeZone) -> Self {
        zone.name().to_string()
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for chrono::Utc {}
    impl Sealed for chrono::FixedOffset {}
    impl Sealed for chrono::Local {}
    impl Sealed for chrono_tz::Tz {}
}

/// Time zone types `resolve` accepts, and whether a given one is UTC.
///
/// The tag decides, not the current offset: `Europe/London` in winter or a
/// `Local` zone on a UTC host are still local times.
pub trait UtcTagged: TimeZone + private::Sealed {
    fn is_utc_tagged(&self) -> bool;

    fn tag(&self) -> String;
}

impl UtcTagged for Utc {
    fn is_utc_tagged(&self) -> bool {
        true
    }

    fn tag(&self) -> String {
        "UTC".to_string()
    }
}

impl UtcTagged for FixedOffset {
    fn is_utc_tagged(&self) -> bool {
        self.local_minus_utc() == 0
    }

    fn tag(&self) -> String {
        self.to_string()
    }
}

impl UtcTagged for Local {
    fn is_utc_tagged(&self) -> bool {
        false
    }

    fn tag(&self) -> String {
        "Local".to_string()
    }
}

impl UtcTagged for Tz {
    fn is_utc_tagged(&self) -> bool {
        matches!(
            self.name(),
            "UTC" | "Etc/UTC" | "UCT" | "Etc/UCT" | "Universal" | "Etc/Universal" | "Zulu"
                | "Etc/Zulu"
        )
    }

    fn tag(&self) -> String {
        self.name().to_string()
    }
}

/// Converts a UTC instant into the wall-clock time of the named zone.
///
/// The instant must be tagged as UTC; anything else is rejected with
/// [`DomainTimeError::InvalidArgument`] before the zone name is looked at.
pub fn resolve<T: UtcTagged>(zone_name: &str, instant: &DateTime<T>) -> Result<LocalizedInstant> {
    let tag = instant.timezone();
    if !tag.is_utc_tagged() {
        return Err(DomainTimeError::InvalidArgument(format!(
            "the input instant must be UTC, got {}",
            tag.tag()
        )));
    }

    let zone = SupportedTimeZone::parse(zone_name)?;
    Ok(zone.localize(instant.with_timezone(&Utc)))
}

/// Checks that every supported zone has exactly one table entry, in
/// discriminant order, pointing at an identifier the rule database knows.
pub fn validate_zone_table() -> Result<()> {
    if zone_index().len() != ZONE_TABLE.len() {
        return Err(DomainTimeError::UnsupportedTimeZone(
            "duplicate name in zone table".to_string(),
        ));
    }

    for (index, zone) in SupportedTimeZone::ALL.iter().enumerate() {
        let entry = &ZONE_TABLE[index];
        if entry.zone != *zone || *zone as usize != index {
            return Err(DomainTimeError::UnsupportedTimeZone(format!(
                "zone table entry {} is out of order",
                entry.name
            )));
        }
        if zone_index().get(entry.name) != Some(zone) {
            return Err(DomainTimeError::UnsupportedTimeZone(format!(
                "zone table entry {} is not indexed",
                entry.name
            )));
        }
        if entry.tz.name().parse::<Tz>().ok() != Some(entry.tz) {
            return Err(DomainTimeError::UnsupportedTimeZone(format!(
                "{} maps to unknown identifier {}",
                entry.name,
                entry.tz.name()
            )));
        }
    }

    Ok(())
}

/// An instant as observed in one of the supported zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedInstant {
    zone: SupportedTimeZone,
    local: DateTime<Tz>,
}

impl LocalizedInstant {
    pub fn zone(&self) -> SupportedTimeZone {
        self.zone
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    pub fn offset(&self) -> FixedOffset {
        self.local.offset().fix()
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset().local_minus_utc()
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        self.local.naive_local()
    }

    pub fn date_naive(&self) -> NaiveDate {
        self.local.date_naive()
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.local
    }
}

impl fmt::Display for LocalizedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local.to_rfc3339())
    }
}

impl Serialize for LocalizedInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.local.to_rfc3339())
    }
}
