// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian calendar ↔ day-count conversions.
//!
//! The forward conversions turn a [`CivilDateTime`] into a [`DayNumber`];
//! the inverse ones rebuild the date from an exact rational day value.
//!
//! | Forward | Inverse | Epoch |
//! |---------|---------|-------|
//! | [`date_to_jdn`] | [`jdn_to_date`] | noon, −4713-11-24 |
//! | [`date_to_ordinal_day`] | [`ordinal_day_to_date`] | midnight, 0001-01-01 |
//! | [`date_to_mjd`] | [`mjd_to_date`] | midnight, 1858-11-17 |
//!
//! Whole-year intervals are measured in arbitrary precision, so any `i64`
//! year converts exactly; only the final narrowing to `i64` can fail.
//!
//! The Julian Day increments at noon.  Day counts are first computed for the
//! noon of the civil date and the time of day is then shifted by twelve
//! hours, borrowing one day for times before noon.

use log::debug;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use std::cmp::Ordering;

use crate::civil::{CivilDateTime, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use crate::cycles::CycleTable;
use crate::day_number::DayNumber;
use crate::epochs::{DayEpoch, JulianDay, ModifiedJulianDay, Ordinal};
use crate::error::{CalendarError, CalendarResult};

/// Days in a full 400-year Gregorian cycle.
pub const DAYS_PER_400_YEARS: u64 = 146_097;

const NOON_NANOS: i64 = 12 * NANOS_PER_HOUR;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ═══════════════════════════════════════════════════════════════════════════
// Calendar primitives
// ═══════════════════════════════════════════════════════════════════════════

/// Divisible by 4, except centuries not divisible by 400.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// 366 for leap years, 365 otherwise.
#[inline]
pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Length of `month` (1–12) in `year`, or `None` for an invalid month.
pub const fn days_in_month(year: i64, month: u8) -> Option<u8> {
    match month {
        2 if is_leap_year(year) => Some(29),
        1..=12 => Some(DAYS_IN_MONTH[month as usize - 1]),
        _ => None,
    }
}

/// Days in `year` before the first of `month`; `month` must be 1–12.
#[inline]
pub(crate) const fn days_before_month(year: i64, month: u8) -> u16 {
    let before = DAYS_BEFORE_MONTH[month as usize - 1];
    if month > 2 && is_leap_year(year) {
        before + 1
    } else {
        before
    }
}

/// Days in `years` whole years counted from 1 January of a year `≡ 1 (mod 400)`.
///
/// Complete 400-year blocks contribute [`DAYS_PER_400_YEARS`] each; the
/// remaining `r` years contribute `365·r + ⌊r/4⌋ − ⌊r/100⌋`.
pub fn days_in_whole_year_interval(years: u64) -> BigInt {
    let blocks = years / 400;
    let rest = years % 400;
    BigInt::from(blocks) * DAYS_PER_400_YEARS + (365 * rest + rest / 4 - rest / 100)
}

/// Days from 0001-01-01 to 1 January of `year` (negative for earlier years).
fn days_before_year(year: i64) -> BigInt {
    let (blocks, rest) = (i128::from(year) - 1).div_mod_floor(&400);
    // `rest` is in 0..400 after a floored division.
    BigInt::from(blocks) * DAYS_PER_400_YEARS + days_in_whole_year_interval(rest as u64)
}

// ═══════════════════════════════════════════════════════════════════════════
// Forward conversions
// ═══════════════════════════════════════════════════════════════════════════

/// Julian Day Number and time of `date`, using the Gregorian cycle table.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the day count does not fit `i64`.
pub fn date_to_jdn(date: &CivilDateTime) -> CalendarResult<DayNumber<JulianDay>> {
    date_to_jdn_with(CycleTable::gregorian(), date)
}

/// [`date_to_jdn`] against an explicit cycle table.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the day count does not fit `i64`.
pub fn date_to_jdn_with(
    table: &CycleTable,
    date: &CivilDateTime,
) -> CalendarResult<DayNumber<JulianDay>> {
    let noon_day = match date.cmp(&CivilDateTime::JDN_EPOCH) {
        Ordering::Equal => {
            debug!("{date} is the Julian Day epoch");
            return Ok(DayNumber::zero());
        }
        Ordering::Greater => {
            let anchor = table.positive_anchor();
            let years = i128::from(date.year()) - i128::from(anchor.boundary_year());
            debug!("{date}: positive branch, {years} whole years from boundary");
            table.days_for_years(&BigInt::from(years))
                + (date.ordinal_day() - 1)
                + anchor.adjustment_days()
        }
        Ordering::Less => {
            let anchor = table.negative_anchor();
            let years = i128::from(anchor.boundary_year()) - i128::from(date.year()) - 1;
            debug!("{date}: negative branch, {years} whole years to boundary");
            let magnitude = table.days_for_years(&BigInt::from(years))
                + (date.remaining_days_in_year() + 1)
                + anchor.adjustment_days();
            -magnitude
        }
    };

    let time = date.time_of_day_nanos();
    let (day, since_noon) = if time >= NOON_NANOS {
        (noon_day, time - NOON_NANOS)
    } else {
        (noon_day - 1, time + NOON_NANOS)
    };
    DayNumber::from_parts(day, day_fraction(since_noon))
}

/// Ordinal day number (days since 0001-01-01T00:00) and time of `date`.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the day count does not fit `i64`.
pub fn date_to_ordinal_day(date: &CivilDateTime) -> CalendarResult<DayNumber<Ordinal>> {
    let day = days_before_year(date.year()) + (date.ordinal_day() - 1);
    // A leap second pushes the fraction to 1 or past it; `from_parts` carries.
    DayNumber::from_parts(day, day_fraction(date.time_of_day_nanos()))
}

/// Modified Julian Day (`JD − 2 400 000.5`) and time of `date`.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the day count does not fit `i64`.
pub fn date_to_mjd(date: &CivilDateTime) -> CalendarResult<DayNumber<ModifiedJulianDay>> {
    date_to_ordinal_day(date)?.to::<ModifiedJulianDay>()
}

fn day_fraction(nanos: i64) -> BigRational {
    BigRational::new(BigInt::from(nanos), BigInt::from(NANOS_PER_DAY))
}

// ═══════════════════════════════════════════════════════════════════════════
// Inverse conversions
// ═══════════════════════════════════════════════════════════════════════════

/// Civil date/time of a Julian Day value, using the Gregorian cycle table.
///
/// The time of day is rounded to the nearest nanosecond, ties away from zero.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the year does not fit `i64`.
///
/// # Panics
/// Panics if the cycle table reconstructs a day outside its year, which a
/// consistent table never does.
pub fn jdn_to_date(combined: &BigRational) -> CalendarResult<CivilDateTime> {
    jdn_to_date_with(CycleTable::gregorian(), combined)
}

/// [`jdn_to_date`] against an explicit cycle table.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the year does not fit `i64`.
///
/// # Panics
/// Panics if the cycle table reconstructs a day outside its year.
pub fn jdn_to_date_with(table: &CycleTable, combined: &BigRational) -> CalendarResult<CivilDateTime> {
    let (day, nanos) = split_day(combined)?;
    let (noon_day, time) = if nanos >= NOON_NANOS {
        (day + 1, nanos - NOON_NANOS)
    } else {
        (day, nanos + NOON_NANOS)
    };

    let (year, ordinal) = if !noon_day.is_negative() {
        let anchor = table.positive_anchor();
        let since_boundary = noon_day - anchor.adjustment_days();
        let (years, rest) = table.years_for_days(&since_boundary);
        debug!("positive branch: {years} years and {rest} days after boundary");
        (years + anchor.boundary_year(), rest + 1)
    } else {
        let anchor = table.negative_anchor();
        let to_boundary = -noon_day - anchor.adjustment_days();
        let (years, rest) = table.years_for_days(&(to_boundary - 1));
        debug!("negative branch: {years} years and {rest} days before boundary");
        let year = BigInt::from(anchor.boundary_year() - 1) - years;
        let ordinal = narrow_year(&year).map(|y| BigInt::from(days_in_year(y)) - rest)?;
        (year, ordinal)
    };

    let year = narrow_year(&year)?;
    let ordinal = ordinal
        .to_i64()
        .ok_or_else(|| CalendarError::overflow("day of year"))?;
    Ok(civil_from_ordinal(year, ordinal, time))
}

/// Civil date/time of an ordinal day value (days since 0001-01-01T00:00).
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the year does not fit `i64`.
///
/// # Panics
/// Panics if the cycle table reconstructs a day outside its year.
pub fn ordinal_day_to_date(combined: &BigRational) -> CalendarResult<CivilDateTime> {
    let (day, time) = split_day(combined)?;
    let (blocks, rest) = day.div_mod_floor(&BigInt::from(DAYS_PER_400_YEARS));
    let (years, rest) = CycleTable::gregorian().years_for_days(&rest);
    let year = narrow_year(&(blocks * 400u32 + years + 1u32))?;
    let ordinal = rest
        .to_i64()
        .ok_or_else(|| CalendarError::overflow("day of year"))?;
    Ok(civil_from_ordinal(year, ordinal + 1, time))
}

/// Civil date/time of a Modified Julian Day value.
///
/// # Errors
/// Returns [`CalendarError::Overflow`] if the year does not fit `i64`.
pub fn mjd_to_date(combined: &BigRational) -> CalendarResult<CivilDateTime> {
    ordinal_day_to_date(&Ordinal::from_ordinal(&ModifiedJulianDay::to_ordinal(combined)))
}

/// Splits a day value into its floor day and the rounded nanoseconds past it.
fn split_day(combined: &BigRational) -> CalendarResult<(BigInt, i64)> {
    let floor = combined.floor();
    let fraction = combined - &floor;
    let mut day = floor.to_integer();
    let nanos = (fraction * BigRational::from_integer(BigInt::from(NANOS_PER_DAY)))
        .round()
        .to_integer()
        .to_i64()
        .ok_or_else(|| CalendarError::overflow("time of day"))?;
    if nanos == NANOS_PER_DAY {
        day += 1;
        return Ok((day, 0));
    }
    Ok((day, nanos))
}

fn narrow_year(year: &BigInt) -> CalendarResult<i64> {
    year.to_i64().ok_or_else(|| CalendarError::overflow("year"))
}

/// Builds the date for `ordinal` in `year`, carrying one year either way
/// when the ordinal falls just outside it.
fn civil_from_ordinal(year: i64, ordinal: i64, time: i64) -> CivilDateTime {
    let (year, ordinal) = if ordinal <= 0 {
        let prior = year - 1;
        (prior, ordinal + i64::from(days_in_year(prior)))
    } else if ordinal > i64::from(days_in_year(year)) {
        (year + 1, ordinal - i64::from(days_in_year(year)))
    } else {
        (year, ordinal)
    };
    assert!(
        (1..=i64::from(days_in_year(year))).contains(&ordinal),
        "reconstructed day {ordinal} is outside year {year}"
    );

    let mut day = ordinal as u16;
    let mut month = 1u8;
    while month < 12 && day > days_before_month(year, month + 1) {
        month += 1;
    }
    day -= days_before_month(year, month);

    CivilDateTime::from_parts_unchecked(
        year,
        month,
        day as u8,
        (time / NANOS_PER_HOUR) as u8,
        (time % NANOS_PER_HOUR / NANOS_PER_MINUTE) as u8,
        (time % NANOS_PER_MINUTE / NANOS_PER_SECOND) as u8,
        (time % NANOS_PER_SECOND) as u32,
    )
}
