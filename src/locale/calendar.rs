//! Gregorian to Solar Hijri (Jalali) conversion.
//!
//! Uses the 33-year break table, which agrees with the astronomical Persian
//! calendar over the supported range (Jalali years -61 through 3177).

use chrono::{Datelike, Days, NaiveDate};

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;

/// Jalali years at which the leap cycle pattern shifts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324, 2394, 2456, 3178,
];

/// A date in the Solar Hijri calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Leap information for a Jalali year.
struct YearInfo {
    /// 0 for a leap year, otherwise years since the last leap year.
    leap: i32,
    /// Gregorian year in which this Jalali year starts.
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls.
    march_day: u32,
}

fn year_info(jy: i32) -> Option<YearInfo> {
    let last = BREAKS[BREAKS.len() - 1];
    if jy < BREAKS[0] || jy >= last {
        return None;
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march_day = u32::try_from(20 + leap_j - leap_g).unwrap_or(20);

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo { leap, gregorian_year: gy, march_day })
}

fn farvardin_first(info: &YearInfo) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day)
}

/// Whether Esfand of `year` has 30 days.
pub fn is_jalali_leap_year(year: i32) -> bool {
    year_info(year).is_some_and(|info| info.leap == 0)
}

/// Number of days in a Jalali month, or `None` for an invalid month.
pub fn jalali_month_length(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_jalali_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Convert a Gregorian date. Returns `None` outside the supported range.
pub fn to_jalali(date: NaiveDate) -> Option<JalaliDate> {
    let gy = date.year();
    let mut jy = gy - 621;
    let info = year_info(jy)?;
    let start = farvardin_first(&info)?;

    let mut k = date.num_days_from_ce() - start.num_days_from_ce();
    if k >= 0 {
        if k <= 185 {
            return Some(JalaliDate { year: jy, month: day_index(1 + k / 31), day: day_index(k % 31 + 1) });
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    Some(JalaliDate { year: jy, month: day_index(7 + k / 30), day: day_index(k % 30 + 1) })
}

/// Convert a Jalali date back to Gregorian. Returns `None` for an invalid
/// month or day, or outside the supported range.
pub fn from_jalali(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let length = jalali_month_length(year, month)?;
    if day == 0 || day > length {
        return None;
    }
    let start = farvardin_first(&year_info(year)?)?;
    let offset = if month <= 6 { (month - 1) * 31 } else { 186 + (month - 7) * 30 };
    start.checked_add_days(Days::new(u64::from(offset + day - 1)))
}

/// Month and day values computed above are always small and positive.
fn day_index(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(1)
}
