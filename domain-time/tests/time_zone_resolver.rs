use chrono::{FixedOffset, TimeZone};
use domain_time::{
    resolve,
    time_zone::{US_ALASKA, US_CENTRAL, US_EASTERN, US_HAWAII, US_MOUNTAIN, US_PACIFIC, UTC},
    DomainTimeError,
};

mod support;

const SUPPORTED: [&str; 7] = [
    US_EASTERN,
    US_CENTRAL,
    US_MOUNTAIN,
    US_PACIFIC,
    US_ALASKA,
    US_HAWAII,
    UTC,
];

#[test]
fn resolve_accepts_every_supported_name_in_any_case() {
    let instant = support::utc(2015, 11, 4, 8, 45, 12);
    for name in SUPPORTED {
        assert!(resolve(name, &instant).is_ok(), "{name}");
        assert!(resolve(&name.to_uppercase(), &instant).is_ok(), "{name}");
    }
    assert!(resolve("Us/Pacific", &instant).is_ok());
}

#[test]
fn resolve_rejects_unknown_zone_names() {
    let instant = support::utc(2015, 11, 4, 8, 45, 12);
    for name in ["America/New_York", "us/arizona", "gmt", "us pacific", ""] {
        assert_eq!(
            resolve(name, &instant),
            Err(DomainTimeError::UnsupportedTimeZone(name.to_string()))
        );
    }
}

#[test]
fn resolve_rejects_instants_with_offset() {
    for hours in [-8, -1, 1, 9] {
        let offset = FixedOffset::east_opt(hours * 3600).unwrap();
        let instant = offset.with_ymd_and_hms(2015, 11, 4, 8, 45, 12).unwrap();
        assert!(matches!(
            resolve(US_PACIFIC, &instant),
            Err(DomainTimeError::InvalidArgument(_))
        ));
    }
}

#[test]
fn resolve_rejects_london_winter_instant() {
    let instant = chrono_tz::Europe::London
        .with_ymd_and_hms(2015, 1, 4, 8, 45, 12)
        .unwrap();
    assert!(matches!(
        resolve(US_PACIFIC, &instant),
        Err(DomainTimeError::InvalidArgument(_))
    ));
}

#[test]
fn resolve_accepts_utc_tagged_iana_zone() {
    let instant = chrono_tz::Etc::UTC
        .with_ymd_and_hms(2015, 11, 4, 8, 45, 12)
        .unwrap();
    let local = resolve(US_PACIFIC, &instant).unwrap();
    assert_eq!(local.utc(), support::utc(2015, 11, 4, 8, 45, 12));
}

#[test]
fn resolve_converts_to_local_wall_clock() {
    let local = resolve("US/Pacific", &support::utc(2015, 11, 4, 8, 45, 12)).unwrap();
    assert_eq!((local.year(), local.month(), local.day()), (2015, 11, 4));
    assert_eq!((local.hour(), local.minute(), local.second()), (0, 45, 12));
    assert_eq!(local.offset(), FixedOffset::west_opt(8 * 3600).unwrap());
}

#[test]
fn resolve_offsets_follow_daylight_saving() {
    let winter = support::utc(2014, 2, 23, 5, 0, 0);
    let summer = support::utc(2014, 7, 23, 5, 0, 0);

    let cases = [
        (US_EASTERN, -5, -4),
        (US_CENTRAL, -6, -5),
        (US_MOUNTAIN, -7, -6),
        (US_PACIFIC, -8, -7),
        (US_ALASKA, -9, -8),
        (US_HAWAII, -10, -10),
        (UTC, 0, 0),
    ];
    for (name, winter_hours, summer_hours) in cases {
        let w = resolve(name, &winter).unwrap();
        let s = resolve(name, &summer).unwrap();
        assert_eq!(w.offset_seconds(), winter_hours * 3600, "{name} winter");
        assert_eq!(s.offset_seconds(), summer_hours * 3600, "{name} summer");
    }
}
