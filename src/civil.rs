// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated civil date/time values.
//!
//! [`CivilDateTime`] is the input of every forward conversion and the output
//! of every inverse one.  Fields are checked once, at construction, against
//! the leap-aware bounds of the proleptic Gregorian calendar, so the
//! conversion engine never sees an out-of-range value.
//!
//! Years use astronomical numbering: year `0` is 1 BCE, year `-1` is 2 BCE,
//! and so on.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CalendarError, CalendarResult};
use crate::gregorian::{days_before_month, days_in_month, days_in_year, is_leap_year};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Nanoseconds in one minute.
pub const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
/// Nanoseconds in one hour.
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
/// Nanoseconds in one (non leap-second) day.
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// A calendar date and time of day, resolved to nanoseconds.
///
/// Ordering is chronological: `(year, ordinal day, time of day)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "CivilFields", into = "CivilFields")
)]
pub struct CivilDateTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    leap_year: bool,
}

impl CivilDateTime {
    /// Epoch of the Julian Day Number: noon, 24 November 4714 BCE (year −4713).
    pub const JDN_EPOCH: Self = Self::from_parts_unchecked(-4713, 11, 24, 12, 0, 0, 0);

    /// Epoch of the ordinal day number: midnight, 1 January 1 CE.
    pub const ORDINAL_EPOCH: Self = Self::from_parts_unchecked(1, 1, 1, 0, 0, 0, 0);

    /// Creates a validated date/time.
    ///
    /// `second` may be `60` only at `23:59`, for a leap second.
    ///
    /// # Errors
    /// Returns [`CalendarError::Validation`] naming the first field that is
    /// out of range.
    pub fn new(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> CalendarResult<Self> {
        CalendarError::check("month", month.into(), 1, 12)?;
        let month_len = days_in_month(year, month).unwrap_or(31);
        CalendarError::check("day", day.into(), 1, month_len.into())?;
        CalendarError::check("hour", hour.into(), 0, 23)?;
        CalendarError::check("minute", minute.into(), 0, 59)?;
        let max_second = if hour == 23 && minute == 59 { 60 } else { 59 };
        CalendarError::check("second", second.into(), 0, max_second)?;
        CalendarError::check("nanosecond", nanosecond.into(), 0, NANOS_PER_SECOND - 1)?;
        Ok(Self::from_parts_unchecked(
            year, month, day, hour, minute, second, nanosecond,
        ))
    }

    /// Creates a validated date at midnight.
    ///
    /// # Errors
    /// Returns [`CalendarError::Validation`] for an out-of-range month or day.
    pub fn from_ymd(year: i64, month: u8, day: u8) -> CalendarResult<Self> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    pub(crate) const fn from_parts_unchecked(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            leap_year: is_leap_year(year),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i64 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// Whether the date's year has 366 days.
    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        self.leap_year
    }

    // ── derived quantities ────────────────────────────────────────────

    /// Day of the year, `1` for 1 January.
    #[inline]
    pub const fn ordinal_day(&self) -> u16 {
        days_before_month(self.year, self.month) + self.day as u16
    }

    /// Days left in the year after this date (`0` on 31 December).
    #[inline]
    pub const fn remaining_days_in_year(&self) -> u16 {
        days_in_year(self.year) - self.ordinal_day()
    }

    /// Nanoseconds elapsed since midnight.
    ///
    /// During a leap second this reaches past [`NANOS_PER_DAY`].
    #[inline]
    pub const fn time_of_day_nanos(&self) -> i64 {
        self.hour as i64 * NANOS_PER_HOUR
            + self.minute as i64 * NANOS_PER_MINUTE
            + self.second as i64 * NANOS_PER_SECOND
            + self.nanosecond as i64
    }

    // ── chrono helpers ────────────────────────────────────────────────

    /// Builds a value from a `chrono::DateTime<Utc>`.
    ///
    /// chrono encodes a leap second as second `59` with a nanosecond of at
    /// least one billion; that maps to second `60` here.
    ///
    /// # Errors
    /// Returns [`CalendarError::Validation`] for a chrono leap second that
    /// does not fall at `23:59`.
    pub fn from_utc(datetime: DateTime<Utc>) -> CalendarResult<Self> {
        let naive = datetime.naive_utc();
        let (second, nanosecond) = match naive.nanosecond() {
            ns if i64::from(ns) >= NANOS_PER_SECOND => (naive.second() + 1, ns - 1_000_000_000),
            ns => (naive.second(), ns),
        };
        Self::new(
            naive.year().into(),
            naive.month() as u8,
            naive.day() as u8,
            naive.hour() as u8,
            naive.minute() as u8,
            second as u8,
            nanosecond,
        )
    }

    /// Converts to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the year falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let year = i32::try_from(self.year).ok()?;
        let date = NaiveDate::from_ymd_opt(year, self.month.into(), self.day.into())?;
        let (second, nanosecond) = if self.second == 60 {
            (59, self.nanosecond + 1_000_000_000)
        } else {
            (u32::from(self.second), self.nanosecond)
        };
        let naive = date.and_hms_nano_opt(self.hour.into(), self.minute.into(), second, nanosecond)?;
        Some(naive.and_utc())
    }
}

impl PartialOrd for CivilDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CivilDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.ordinal_day().cmp(&other.ordinal_day()))
            .then_with(|| self.time_of_day_nanos().cmp(&other.time_of_day_nanos()))
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

/// Wire shape of [`CivilDateTime`]; deserialisation goes through validation.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CivilFields {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<CivilFields> for CivilDateTime {
    type Error = CalendarError;

    fn try_from(f: CivilFields) -> CalendarResult<Self> {
        Self::new(f.year, f.month, f.day, f.hour, f.minute, f.second, f.nanosecond)
    }
}

#[cfg(feature = "serde")]
impl From<CivilDateTime> for CivilFields {
    fn from(dt: CivilDateTime) -> Self {
        Self {
            year: dt.year,
            month: dt.month,
            day: dt.day,
            hour: dt.hour,
            minute: dt.minute,
            second: dt.second,
            nanosecond: dt.nanosecond,
        }
    }
}
