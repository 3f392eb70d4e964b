// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-count Module
//!
//! Exact conversions between civil dates in the proleptic Gregorian calendar
//! (astronomical year numbering, year 0 valid) and continuous day counts,
//! with the time of day resolved to nanoseconds.
//!
//! # Core types
//!
//! - [`CivilDateTime`] — validated calendar date and time of day.
//! - [`DayNumber<E>`] — integer day plus exact fractional day on epoch `E`.
//! - [`DayEpoch`] — trait that places an epoch on the ordinal axis.
//! - [`CycleTable`] — nested 400/100/4/1-year leap cycles and their anchors.
//! - [`CalendarError`] — validation, overflow and precision-loss failures.
//!
//! # Epochs
//!
//! | Marker | Day count | Alias |
//! |--------|-----------|-------|
//! | [`JulianDay`] | Julian Day Number/Time | [`JulianDayNumber`] |
//! | [`Ordinal`] | days since 0001-01-01 | [`OrdinalDayNumber`] |
//! | [`ModifiedJulianDay`] | JD − 2 400 000.5 | [`ModifiedJulianDayNumber`] |
//!
//! # Example
//!
//! ```rust
//! use daycount::{date_to_jdn, jdn_to_date, CivilDateTime};
//!
//! let date = CivilDateTime::new(2013, 1, 1, 12, 0, 0, 0)?;
//! let jd = date_to_jdn(&date)?;
//! assert_eq!(jd.day(), 2_456_294);
//! assert_eq!(jdn_to_date(jd.combined())?, date);
//! # Ok::<(), daycount::CalendarError>(())
//! ```
//!
//! # Diagnostics
//!
//! Branch selection and every cycle-decomposition step are reported through
//! the [`log`] facade at `debug`/`trace` level.  Nothing is emitted unless
//! the application installs a logger.

mod civil;
mod cycles;
mod day_number;
mod epochs;
mod error;
mod gregorian;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::{CivilDateTime, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
pub use cycles::{CycleDefinition, CycleTable, MainCycleAnchor, GREGORIAN_CYCLES};
pub use day_number::DayNumber;
pub use epochs::{DayEpoch, JulianDay, ModifiedJulianDay, Ordinal};
pub use error::{CalendarError, CalendarResult};
pub use gregorian::{
    date_to_jdn, date_to_jdn_with, date_to_mjd, date_to_ordinal_day, days_in_month,
    days_in_whole_year_interval, days_in_year, is_leap_year, jdn_to_date, jdn_to_date_with,
    mjd_to_date, ordinal_day_to_date, DAYS_PER_400_YEARS,
};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Day Number with time, counted from noon of −4713-11-24.
pub type JulianDayNumber = DayNumber<JulianDay>;

/// Ordinal (fixed) day number with time, counted from 0001-01-01T00:00.
pub type OrdinalDayNumber = DayNumber<Ordinal>;

/// Modified Julian Day with time, counted from 1858-11-17T00:00.
pub type ModifiedJulianDayNumber = DayNumber<ModifiedJulianDay>;
