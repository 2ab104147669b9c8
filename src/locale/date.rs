//! Date formatting for the admin panel.
//!
//! DESIGN
//! ======
//! Timestamps arrive from the panel backend as ISO-style strings. They are
//! parsed the way a browser's `Date` constructor treats them: date-only
//! strings are UTC midnight, date-times without an offset are wall-clock
//! time in the display zone, and explicit offsets are honored. The result
//! is rendered as a Solar Hijri date with a 24-hour clock in Persian digits.
//!
//! TRADE-OFFS
//! ==========
//! The display zone is a fixed offset rather than a tz database zone. The
//! panel's audience is in Iran, which has had no DST since 2022.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Timelike, Utc};

use super::calendar::to_jalali;
use super::digits::to_persian_digits;

#[cfg(test)]
#[path = "date_test.rs"]
mod date_test;

/// Placeholder rendered for an absent date.
pub const EMPTY_DATE: &str = "-";

/// Rendered for a non-empty value that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const ZONED_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%d %H:%M%z"];

const FLOATING_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Fixed UTC offset used to render dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayZone(FixedOffset);

impl DisplayZone {
    /// Iran Standard Time, minutes east of UTC.
    pub const TEHRAN_MINUTES: i32 = 210;

    /// Build from minutes east of UTC. `None` if a day or more away.
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self)
    }

    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    pub fn tehran() -> Self {
        Self::from_minutes(Self::TEHRAN_MINUTES).unwrap_or_else(Self::utc)
    }

    /// The host's current zone: the browser's offset under `hydrate`,
    /// Tehran otherwise.
    pub fn host() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let offset = js_sys::Date::new_0().get_timezone_offset();
            #[allow(clippy::cast_possible_truncation)]
            let minutes = (-offset).round() as i32;
            Self::from_minutes(minutes).unwrap_or_else(Self::tehran)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::tehran()
        }
    }

    pub fn minutes(self) -> i32 {
        self.0.local_minus_utc() / 60
    }

    pub fn offset(self) -> FixedOffset {
        self.0
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::tehran()
    }
}

/// How much zone information a parsed string carried.
enum ParsedDate {
    Zoned(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
    DateOnly(NaiveDate),
}

impl ParsedDate {
    /// Roll a `24:00` reading, parsed as `00:00`, over to the next day.
    /// Only an exact midnight qualifies.
    fn end_of_day(self) -> Option<Self> {
        let next = Days::new(1);
        match self {
            Self::Zoned(dt) if dt.time() == NaiveTime::MIN => dt.checked_add_days(next).map(Self::Zoned),
            Self::Floating(naive) if naive.time() == NaiveTime::MIN => {
                naive.checked_add_days(next).map(Self::Floating)
            }
            _ => None,
        }
    }
}

fn parse_parts(raw: &str) -> Option<ParsedDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(ParsedDate::DateOnly(date));
    }
    if has_stray_whitespace(trimmed) {
        return None;
    }
    match end_of_day_as_midnight(trimmed) {
        Some(midnight) => parse_clock(&midnight)?.end_of_day(),
        None => parse_clock(trimmed),
    }
}

fn parse_clock(text: &str) -> Option<ParsedDate> {
    let normalized = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_owned(),
    };
    if let Some(zoned) = ZONED_FORMATS.iter().find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok()) {
        return Some(ParsedDate::Zoned(zoned));
    }
    FLOATING_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(ParsedDate::Floating)
}

/// Whitespace is only allowed as the date/time separator. Anything later,
/// such as a gap before the offset, makes the string invalid.
fn has_stray_whitespace(text: &str) -> bool {
    let mut gaps = text.match_indices(char::is_whitespace);
    match (gaps.next(), gaps.next()) {
        (None, _) => false,
        (Some(_), Some(_)) => true,
        (Some((at, _)), None) => text[..at].contains(['T', 't', ':']),
    }
}

/// `2024-03-20T24:00` names the end of that day. Rewrite the hour to `00`
/// so it parses; `ParsedDate::end_of_day` then moves it forward a day.
fn end_of_day_as_midnight(text: &str) -> Option<String> {
    let date = text.get(..10)?;
    let clock = text.get(10..)?.strip_prefix(['T', 't', ' '])?.strip_prefix("24:")?;
    Some(format!("{date}T00:{clock}"))
}

/// Parse a date string into an instant shown in `zone`.
pub fn parse_date(raw: &str, zone: DisplayZone) -> Option<DateTime<FixedOffset>> {
    match parse_parts(raw)? {
        ParsedDate::Zoned(dt) => Some(dt.with_timezone(&zone.offset())),
        ParsedDate::Floating(naive) => naive.and_local_timezone(zone.offset()).single(),
        ParsedDate::DateOnly(date) => Some(date.and_time(NaiveTime::MIN).and_utc().with_timezone(&zone.offset())),
    }
}

/// Format an optional date string in the host's display zone.
///
/// Absent or empty input renders `-`; unparseable input renders
/// `Invalid Date`.
pub fn format_date(value: Option<&str>) -> String {
    format_date_in(value, DisplayZone::host())
}

/// Format an optional date string in an explicit display zone.
pub fn format_date_in(value: Option<&str>, zone: DisplayZone) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return EMPTY_DATE.to_owned();
    };
    parse_date(raw, zone).map_or_else(|| INVALID_DATE.to_owned(), |dt| render_jalali(&dt.naive_local()))
}

/// Format an optional date string as a Gregorian `YYYY-MM-DD HH:MM:SS`
/// stamp in Latin digits, keeping the value's own wall-clock time.
/// Matches the panel's server-rendered tables.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return EMPTY_DATE.to_owned();
    };
    let wall_clock = match parse_parts(raw) {
        Some(ParsedDate::Zoned(dt)) => dt.naive_local(),
        Some(ParsedDate::Floating(naive)) => naive,
        Some(ParsedDate::DateOnly(date)) => date.and_time(NaiveTime::MIN),
        None => return INVALID_DATE.to_owned(),
    };
    wall_clock.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn render_jalali(local: &NaiveDateTime) -> String {
    let Some(j) = to_jalali(local.date()) else {
        return INVALID_DATE.to_owned();
    };
    let plain = format!(
        "{}/{}/{}, {}:{:02}:{:02}",
        j.year,
        j.month,
        j.day,
        local.hour(),
        local.minute(),
        local.second()
    );
    to_persian_digits(&plain)
}
