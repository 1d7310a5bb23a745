// File: crates/heatmap-core/src/calendar.rs
// Summary: Timezone-aware calendar helpers: zone resolution, interval truncation, day bounds.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::Error;

/// Which wall clock to bucket against. `Default` is the host's "browser"
/// sentinel and resolves to the system zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneSpec {
    Default,
    Utc,
    Named(Tz),
}

impl std::str::FromStr for ZoneSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if s.is_empty() || s.eq_ignore_ascii_case("browser") {
            return Ok(ZoneSpec::Default);
        }
        if s.eq_ignore_ascii_case("utc") {
            return Ok(ZoneSpec::Utc);
        }
        s.parse::<Tz>()
            .map(ZoneSpec::Named)
            .map_err(|_| Error::UnknownTimeZone(s.to_string()))
    }
}

impl ZoneSpec {
    /// Bucket start for `millis`: subtract `minute % width` wall-clock
    /// minutes in the zone and zero out seconds and milliseconds.
    pub fn truncate_to_minutes(&self, millis: i64, width_minutes: u32) -> i64 {
        match self {
            ZoneSpec::Default => truncate_in(&chrono::Local, millis, width_minutes),
            ZoneSpec::Utc => truncate_in(&Utc, millis, width_minutes),
            ZoneSpec::Named(tz) => truncate_in(tz, millis, width_minutes),
        }
    }

    /// Local midnight of the instant's calendar day.
    pub fn start_of_day(&self, millis: i64) -> i64 {
        match self {
            ZoneSpec::Default => day_start_in(&chrono::Local, millis),
            ZoneSpec::Utc => day_start_in(&Utc, millis),
            ZoneSpec::Named(tz) => day_start_in(tz, millis),
        }
    }

    /// Local midnight of the following calendar day. The time-range filter
    /// uses this as an exclusive upper bound, so the whole last day is kept.
    pub fn end_of_day(&self, millis: i64) -> i64 {
        match self {
            ZoneSpec::Default => day_end_in(&chrono::Local, millis),
            ZoneSpec::Utc => day_end_in(&Utc, millis),
            ZoneSpec::Named(tz) => day_end_in(tz, millis),
        }
    }

    /// Local hour of day, 0..=23.
    pub fn hour_of_day(&self, millis: i64) -> u32 {
        match self {
            ZoneSpec::Default => to_zone(&chrono::Local, millis).hour(),
            ZoneSpec::Utc => to_zone(&Utc, millis).hour(),
            ZoneSpec::Named(tz) => to_zone(tz, millis).hour(),
        }
    }

    /// Local wall-clock minutes since midnight, 0..1440. Row placement in
    /// the rendered grid divides this by the bucket width.
    pub fn minute_of_day(&self, millis: i64) -> u32 {
        match self {
            ZoneSpec::Default => minute_of_day_in(&chrono::Local, millis),
            ZoneSpec::Utc => minute_of_day_in(&Utc, millis),
            ZoneSpec::Named(tz) => minute_of_day_in(tz, millis),
        }
    }

    /// Calendar-day label, `YYYY-MM-DD` in the zone.
    pub fn format_date(&self, millis: i64) -> String {
        self.local_date(millis).format("%Y-%m-%d").to_string()
    }

    /// Whole local calendar days from `a`'s day to `b`'s day. Counted on
    /// dates, not on elapsed time, so DST days still count as one.
    pub fn days_between(&self, a: i64, b: i64) -> i64 {
        self.local_date(b)
            .signed_duration_since(self.local_date(a))
            .num_days()
    }

    fn local_date(&self, millis: i64) -> NaiveDate {
        match self {
            ZoneSpec::Default => to_zone(&chrono::Local, millis).date_naive(),
            ZoneSpec::Utc => to_zone(&Utc, millis).date_naive(),
            ZoneSpec::Named(tz) => to_zone(tz, millis).date_naive(),
        }
    }
}

fn to_zone<Z: TimeZone>(zone: &Z, millis: i64) -> DateTime<Z> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .expect("timestamp outside chrono range")
        .with_timezone(zone)
}

fn truncate_in<Z: TimeZone>(zone: &Z, millis: i64, width_minutes: u32) -> i64 {
    let dt = to_zone(zone, millis);
    let excess = i64::from(dt.minute() % width_minutes.max(1)) * 60_000
        + i64::from(dt.second()) * 1_000
        + i64::from(dt.timestamp_subsec_millis());
    millis - excess
}

fn minute_of_day_in<Z: TimeZone>(zone: &Z, millis: i64) -> u32 {
    let dt = to_zone(zone, millis);
    dt.hour() * 60 + dt.minute()
}

fn day_start_in<Z: TimeZone>(zone: &Z, millis: i64) -> i64 {
    local_midnight(zone, to_zone(zone, millis).date_naive())
}

fn day_end_in<Z: TimeZone>(zone: &Z, millis: i64) -> i64 {
    let next = to_zone(zone, millis)
        .date_naive()
        .succ_opt()
        .expect("date outside chrono range");
    local_midnight(zone, next)
}

fn local_midnight<Z: TimeZone>(zone: &Z, date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        // Clocks fell back across midnight: the earlier instant starts the day.
        LocalResult::Ambiguous(earlier, _) => earlier.timestamp_millis(),
        // Midnight inside a DST gap: the first valid local instant starts
        // the day. Gaps are at most a couple of hours, probed in halves.
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..8 {
                probe = probe + Duration::minutes(30);
                if let Some(dt) = zone.from_local_datetime(&probe).earliest() {
                    return dt.timestamp_millis();
                }
            }
            unreachable!("DST gap longer than four hours")
        }
    }
}
