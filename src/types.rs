use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_DAY_COUNT, MAX_MONTH, MAX_YEAR, MIN_DAY, UNIX_EPOCH_DAY_COUNT,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Error type for date and day-count validation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Day count {} exceeds the 7-digit capacity ({})", "_0", MAX_DAY_COUNT)]
    DayCountOverflow(u32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

/// Number of whole days from the epoch (0001-01-01 = day 0) to a date,
/// guaranteed to fit in the key's seven decimal digits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayCount(u32);

impl DayCount {
    /// Creates a new `DayCount`, validating that it fits in 7 decimal digits.
    ///
    /// # Errors
    /// Returns `DateError::DayCountOverflow` if the value is > `MAX_DAY_COUNT`.
    pub const fn new(value: u32) -> Result<Self, DateError> {
        if value > MAX_DAY_COUNT {
            return Err(DateError::DayCountOverflow(value));
        }
        Ok(Self(value))
    }

    /// Returns the day count as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DayCount {
    type Error = DateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayCount> for u32 {
    fn from(count: DayCount) -> Self {
        count.0
    }
}

/// A calendar date with day precision in the proleptic Gregorian calendar.
/// Valid from 0001-01-01 (day 0) through year `MAX_YEAR`; no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct ExpiryDate {
    year: u16,
    month: u8,
    day: u8,
}

impl ExpiryDate {
    /// Creates a new date, validating every component.
    ///
    /// # Errors
    /// Returns the matching `DateError` variant for an out-of-range year,
    /// month, or day (leap years are taken into account).
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if year == 0 || year > MAX_YEAR {
            return Err(DateError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(DateError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(DateError::InvalidDay { month, day, year });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year component
    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Returns the month component
    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the day component
    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Number of whole days from the epoch to this date.
    /// Returns `None` for the handful of dates in year `MAX_YEAR` that lie
    /// beyond day `MAX_DAY_COUNT` (after 27380-01-26).
    pub const fn day_count(self) -> Option<DayCount> {
        let raw = day_count_from_civil(self.year as i64, self.month as i64, self.day as i64);
        if raw < 0 || raw > MAX_DAY_COUNT as i64 {
            return None;
        }
        Some(DayCount(raw as u32))
    }

    /// Date that lies `count` whole days after the epoch.
    pub const fn from_day_count(count: DayCount) -> Self {
        let (year, month, day) = civil_from_day_count(count.0);
        Self { year, month, day }
    }

    /// The date `days` days away from this one.
    /// Returns `None` if the result falls outside the representable range.
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        let raw =
            day_count_from_civil(i64::from(self.year), i64::from(self.month), i64::from(self.day));
        let shifted = raw.checked_add(days)?;
        if !(0..=i64::from(MAX_DAY_COUNT)).contains(&shifted) {
            return None;
        }
        Some(Self::from_day_count(DayCount(shifted as u32)))
    }

    /// Today's date in UTC, derived from the system clock.
    /// A clock reading before 1970 is clamped to 1970-01-01.
    pub fn today_utc() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let since_1970 = (secs / 86_400).min(u64::from(MAX_DAY_COUNT - UNIX_EPOCH_DAY_COUNT));
        Self::from_day_count(DayCount(UNIX_EPOCH_DAY_COUNT + since_1970 as u32))
    }
}

impl FromStr for ExpiryDate {
    type Err = DateError;

    /// Parses a strict ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(DateError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parts[0]
            .parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(parts[0].to_owned()))?;
        let month = parts[1]
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(parts[1].to_owned()))?;
        let day = parts[2]
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(parts[2].to_owned()))?;

        Self::new(year, month, day)
    }
}

impl serde::Serialize for ExpiryDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ExpiryDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days from 0001-01-01 to the given civil date (Howard Hinnant's
/// `days_from_civil`, shifted so the epoch is day 0 rather than 1970-01-01).
/// Plain division is exact here since years >= 1 keep every term non-negative.
const fn day_count_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 306
}

/// Inverse of `day_count_from_civil` (Hinnant's `civil_from_days`).
const fn civil_from_day_count(count: u32) -> (u16, u8, u8) {
    let z = count as i64 + 306;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as u16, month as u8, day as u8)
}
