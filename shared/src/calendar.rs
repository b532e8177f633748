//! Jalali (Shamsi) calendar conversion
//!
//! Bidirectional Gregorian ⇄ Jalali conversion with the 33-year-cycle
//! break-table leap rule, bridged through Julian day numbers. This is the
//! exact algorithm, not a day-of-year approximation; round-trips are
//! lossless for every valid date in the supported range.
//!
//! All stored appointment dates use the canonical `jYYYY-jMM-jDD` form
//! (zero-padded), so lexical order of stored strings agrees with
//! chronological order — but chronology, via the Gregorian instant, is
//! the source of truth for comparisons.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Offset between chrono's proleptic-Gregorian day count (day 1 =
/// 0001-01-01) and the Julian day number (JDN 2451545 = 2000-01-01).
const JDN_OFFSET: i64 = 1_721_425;

/// Years at which the 33-year leap cycle breaks (astronomical fit).
const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// A validated Jalali calendar date.
///
/// Field order gives derived `Ord` chronological meaning for valid
/// dates; `compare_date_strings` compares through the Gregorian instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    /// Construct a validated date. Invalid month/day fails with
    /// `InvalidDate`; never clamps.
    pub fn new(year: i32, month: u32, day: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDate(format!(
                "month out of range: {year}-{month}-{day}"
            )));
        }
        let len = month_length(year, month)?;
        if day < 1 || day > len {
            return Err(EngineError::InvalidDate(format!(
                "day out of range: {year}-{month}-{day}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Convert a Gregorian date to its Jalali equivalent.
    pub fn from_gregorian(date: NaiveDate) -> EngineResult<Self> {
        d2j(i64::from(date.num_days_from_ce()) + JDN_OFFSET)
    }

    /// Convert to the equivalent Gregorian date.
    pub fn to_gregorian(&self) -> EngineResult<NaiveDate> {
        let jdn = j2d(i64::from(self.year), i64::from(self.month), i64::from(self.day))?;
        jdn_to_gregorian(jdn)
    }

    /// Today's date in the Jalali calendar (UTC day).
    pub fn today() -> EngineResult<Self> {
        Self::from_gregorian(Utc::now().date_naive())
    }

    /// Strict parse of the canonical `jYYYY-jMM-jDD` form.
    pub fn parse(s: &str) -> EngineResult<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        let &[y, m, d] = parts.as_slice() else {
            return Err(EngineError::InvalidDate(format!("malformed date: {s:?}")));
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(EngineError::InvalidDate(format!("malformed date: {s:?}")));
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(y) && all_digits(m) && all_digits(d)) {
            return Err(EngineError::InvalidDate(format!("malformed date: {s:?}")));
        }
        let year: i32 = y
            .parse()
            .map_err(|_| EngineError::InvalidDate(format!("malformed date: {s:?}")))?;
        let month: u32 = m
            .parse()
            .map_err(|_| EngineError::InvalidDate(format!("malformed date: {s:?}")))?;
        let day: u32 = d
            .parse()
            .map_err(|_| EngineError::InvalidDate(format!("malformed date: {s:?}")))?;
        Self::new(year, month, day)
    }

    /// Canonical zero-padded storage form.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Whether `year` is a Jalali leap year (Esfand has 30 days).
pub fn is_leap_year(year: i32) -> EngineResult<bool> {
    Ok(jal_cal(i64::from(year))?.leap == 0)
}

/// Number of days in the given Jalali month.
pub fn month_length(year: i32, month: u32) -> EngineResult<u32> {
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 => Ok(if is_leap_year(year)? { 30 } else { 29 }),
        _ => Err(EngineError::InvalidDate(format!(
            "month out of range: {year}-{month}"
        ))),
    }
}

/// Chronological comparison of two stored `jYYYY-jMM-jDD` strings,
/// resolved through the Gregorian instant.
pub fn compare_date_strings(a: &str, b: &str) -> EngineResult<Ordering> {
    let ga = JalaliDate::parse(a)?.to_gregorian()?;
    let gb = JalaliDate::parse(b)?.to_gregorian()?;
    Ok(ga.cmp(&gb))
}

struct JalCal {
    /// 0 when the year is leap; 1..=4 index the year within its cycle.
    leap: i64,
    /// Gregorian calendar day of March on which Farvardin 1 falls.
    march: i64,
    /// Gregorian year containing Farvardin 1.
    gy: i64,
}

fn jal_cal(jy: i64) -> EngineResult<JalCal> {
    if jy < BREAKS[0] || jy >= BREAKS[BREAKS.len() - 1] {
        return Err(EngineError::InvalidDate(format!("year out of range: {jy}")));
    }

    let gy = jy + 621;
    let mut leap_j: i64 = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    // Count leap years from the epoch up to the cycle containing jy.
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
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(JalCal { leap, march, gy })
}

/// Julian day number of a Jalali date.
fn j2d(jy: i64, jm: i64, jd: i64) -> EngineResult<i64> {
    let r = jal_cal(jy)?;
    let first = gregorian_to_jdn(r.gy, 3, r.march)?;
    Ok(first + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1)
}

/// Jalali date of a Julian day number.
fn d2j(jdn: i64) -> EngineResult<JalaliDate> {
    let gy = i64::from(jdn_to_gregorian(jdn)?.year());
    let mut jy = gy - 621;
    let r = jal_cal(jy)?;
    let first = gregorian_to_jdn(gy, 3, r.march)?;

    let mut k = jdn - first;
    if k >= 0 {
        if k <= 185 {
            return JalaliDate::new(jy as i32, (1 + k / 31) as u32, (k % 31 + 1) as u32);
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if r.leap == 1 {
            k += 1;
        }
    }
    JalaliDate::new(jy as i32, (7 + k / 30) as u32, (k % 30 + 1) as u32)
}

fn gregorian_to_jdn(gy: i64, gm: u32, gd: i64) -> EngineResult<i64> {
    let date = NaiveDate::from_ymd_opt(gy as i32, gm, gd as u32).ok_or_else(|| {
        EngineError::InvalidDate(format!("gregorian date out of range: {gy}-{gm}-{gd}"))
    })?;
    Ok(i64::from(date.num_days_from_ce()) + JDN_OFFSET)
}

fn jdn_to_gregorian(jdn: i64) -> EngineResult<NaiveDate> {
    let days = jdn - JDN_OFFSET;
    i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| EngineError::InvalidDate(format!("julian day out of range: {jdn}")))
}
