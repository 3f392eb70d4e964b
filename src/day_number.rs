// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch-parameterised day number with an exact fractional day.
//!
//! [`DayNumber<E>`] is the result of every forward conversion.  It keeps the
//! value as an exact [`BigRational`] and splits it into an integer day and a
//! fraction in `[0, 1)`:
//!
//! ```text
//! combined = day + fraction      day = ⌊combined⌋
//! ```
//!
//! The sign therefore lives on `combined` (and on `day`), never on the
//! fraction.  The hour/minute/second/nanosecond accessors describe the
//! fraction of the day; for [`JulianDay`](crate::JulianDay) values that is
//! time elapsed since noon.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use qtty::Days;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::civil::{NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use crate::epochs::DayEpoch;
use crate::error::{CalendarError, CalendarResult};

/// A day count on epoch `E`, with its fractional day at full precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayNumber<E: DayEpoch> {
    day: i64,
    fraction: BigRational,
    combined: BigRational,
    nanos_of_day: i64,
    _epoch: PhantomData<E>,
}

impl<E: DayEpoch> DayNumber<E> {
    // ── constructors ──────────────────────────────────────────────────

    /// Day zero of the epoch.
    pub fn zero() -> Self {
        Self {
            day: 0,
            fraction: BigRational::zero(),
            combined: BigRational::zero(),
            nanos_of_day: 0,
            _epoch: PhantomData,
        }
    }

    /// Builds from an integer day and a fraction of any sign or size.
    ///
    /// The parts are summed exactly and re-split so that the stored
    /// fraction lies in `[0, 1)`.
    ///
    /// # Errors
    /// Returns [`CalendarError::Overflow`] if the resulting day does not fit `i64`.
    pub fn from_parts(day: BigInt, fraction: BigRational) -> CalendarResult<Self> {
        Self::from_combined(BigRational::from_integer(day) + fraction)
    }

    /// Builds from the combined day value.
    ///
    /// # Errors
    /// Returns [`CalendarError::Overflow`] if `⌊combined⌋` does not fit `i64`.
    pub fn from_combined(combined: BigRational) -> CalendarResult<Self> {
        let floor = combined.floor();
        let day = floor
            .to_integer()
            .to_i64()
            .ok_or_else(|| CalendarError::overflow("day count"))?;
        let fraction = &combined - &floor;
        let nanos_of_day = (&fraction * BigRational::from_integer(BigInt::from(NANOS_PER_DAY)))
            .floor()
            .to_integer()
            .to_i64()
            .ok_or_else(|| CalendarError::overflow("time of day"))?;
        Ok(Self {
            day,
            fraction,
            combined,
            nanos_of_day,
            _epoch: PhantomData,
        })
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Integer day count, `⌊combined⌋`.
    #[inline]
    pub const fn day(&self) -> i64 {
        self.day
    }

    /// Fraction of the day, in `[0, 1)`.
    #[inline]
    pub fn fraction(&self) -> &BigRational {
        &self.fraction
    }

    /// Exact `day + fraction`.
    #[inline]
    pub fn combined(&self) -> &BigRational {
        &self.combined
    }

    /// `true` when the day number lies before day zero of its epoch.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.day < 0
    }

    /// Sign of the combined value: `-1`, `0` or `1`.
    #[inline]
    pub fn signum(&self) -> i8 {
        if self.day < 0 {
            -1
        } else if self.day == 0 && self.fraction.is_zero() {
            0
        } else {
            1
        }
    }

    /// Whole nanoseconds of the fraction, truncated.
    #[inline]
    pub const fn nanos_of_day(&self) -> i64 {
        self.nanos_of_day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.nanos_of_day / NANOS_PER_HOUR) as u8
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        (self.nanos_of_day % NANOS_PER_HOUR / NANOS_PER_MINUTE) as u8
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        (self.nanos_of_day % NANOS_PER_MINUTE / NANOS_PER_SECOND) as u8
    }

    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        (self.nanos_of_day % NANOS_PER_SECOND) as u32
    }

    // ── cross-epoch conversion ────────────────────────────────────────

    /// Convert this day number to another epoch, exactly.
    ///
    /// ```text
    /// self → ordinal axis → target
    /// ```
    ///
    /// # Errors
    /// Returns [`CalendarError::Overflow`] if the shifted day does not fit `i64`.
    pub fn to<T: DayEpoch>(&self) -> CalendarResult<DayNumber<T>> {
        DayNumber::<T>::from_combined(T::from_ordinal(&E::to_ordinal(&self.combined)))
    }

    // ── reduced precision ─────────────────────────────────────────────

    /// The combined value as an `f64` quantity of days.
    ///
    /// # Errors
    /// Returns [`CalendarError::PrecisionLoss`] when the `f64` differs from
    /// the exact value by more than `tolerance`, and
    /// [`CalendarError::Overflow`] when it is not finite.
    pub fn to_days(&self, tolerance: Days) -> CalendarResult<Days> {
        let approx = self
            .combined
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CalendarError::overflow("f64 day value"))?;
        let exact = BigRational::from_float(approx)
            .ok_or_else(|| CalendarError::overflow("f64 day value"))?;
        let error = (&self.combined - exact)
            .abs()
            .to_f64()
            .unwrap_or(f64::INFINITY);
        if error > tolerance.value() {
            return Err(CalendarError::PrecisionLoss {
                error: Days::new(error),
                tolerance,
            });
        }
        Ok(Days::new(approx))
    }

    /// Decimal rendering with `places` fractional digits, rounded half away
    /// from zero.
    pub fn to_decimal_string(&self, places: u32) -> String {
        let scale = BigInt::from(10u8).pow(places);
        let scaled = (&self.combined * BigRational::from_integer(scale.clone()))
            .round()
            .to_integer();
        let sign = if scaled.is_negative() { "-" } else { "" };
        let (whole, frac) = scaled.abs().div_rem(&scale);
        if places == 0 {
            format!("{sign}{whole}")
        } else {
            let frac = frac.to_string();
            format!("{sign}{whole}.{frac:0>width$}", width = places as usize)
        }
    }
}

impl<E: DayEpoch> PartialOrd for DayNumber<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: DayEpoch> Ord for DayNumber<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.combined.cmp(&other.combined)
    }
}

impl<E: DayEpoch> fmt::Display for DayNumber<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", E::LABEL, self.to_decimal_string(9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epochs::{JulianDay, ModifiedJulianDay, Ordinal};

    fn frac(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn from_parts_normalises_fraction() {
        let n = DayNumber::<Ordinal>::from_parts(BigInt::from(5), frac(5, 4)).unwrap();
        assert_eq!(n.day(), 6);
        assert_eq!(n.fraction(), &frac(1, 4));
        assert_eq!(n.combined(), &frac(25, 4));

        let negative = DayNumber::<Ordinal>::from_parts(BigInt::from(0), frac(-1, 4)).unwrap();
        assert_eq!(negative.day(), -1);
        assert_eq!(negative.fraction(), &frac(3, 4));
        assert_eq!(negative.combined(), &frac(-1, 4));
    }

    #[test]
    fn combined_equals_day_plus_fraction() {
        for (n, d) in [(-7, 3), (7, 3), (0, 1), (-86_400, 86_401)] {
            let v = DayNumber::<JulianDay>::from_combined(frac(n, d)).unwrap();
            assert_eq!(
                BigRational::from_integer(BigInt::from(v.day())) + v.fraction(),
                *v.combined()
            );
            assert!(!v.fraction().is_negative());
            assert!(v.fraction() < &BigRational::from_integer(BigInt::from(1)));
        }
    }

    #[test]
    fn sign_is_read_from_the_combined_value() {
        let before = DayNumber::<JulianDay>::from_combined(frac(-1, 4)).unwrap();
        assert!(before.is_negative());
        assert_eq!(before.signum(), -1);
        assert!(!before.fraction().is_negative());

        let zero = DayNumber::<JulianDay>::zero();
        assert!(!zero.is_negative());
        assert_eq!(zero.signum(), 0);

        let after = DayNumber::<JulianDay>::from_combined(frac(1, 4)).unwrap();
        assert!(!after.is_negative());
        assert_eq!(after.signum(), 1);
    }

    #[test]
    fn day_outside_i64_overflows() {
        let huge = BigInt::from(i64::MAX) + 1;
        assert_eq!(
            DayNumber::<Ordinal>::from_parts(huge, BigRational::zero()),
            Err(CalendarError::overflow("day count"))
        );
    }

    #[test]
    fn time_fields_from_fraction() {
        let ns = 13 * NANOS_PER_HOUR + 7 * NANOS_PER_MINUTE + 9 * NANOS_PER_SECOND + 42;
        let n = DayNumber::<Ordinal>::from_parts(BigInt::from(3), frac(ns, NANOS_PER_DAY)).unwrap();
        assert_eq!(
            (n.hour(), n.minute(), n.second(), n.nanosecond()),
            (13, 7, 9, 42)
        );
        assert_eq!(n.nanos_of_day(), ns);
    }

    #[test]
    fn epoch_conversion_is_exact() {
        let jd = DayNumber::<JulianDay>::from_combined(frac(4_903_089, 2)).unwrap(); // 2451544.5
        let rd = jd.to::<Ordinal>().unwrap();
        assert_eq!(rd.day(), 730_119);
        assert!(rd.fraction().is_zero());
        let mjd = jd.to::<ModifiedJulianDay>().unwrap();
        assert_eq!(mjd.day(), 51_544);
        assert_eq!(mjd.to::<JulianDay>().unwrap(), jd);
    }

    #[test]
    fn to_days_respects_tolerance() {
        let exact = DayNumber::<JulianDay>::from_combined(frac(4_912_587, 2)).unwrap();
        assert_eq!(exact.to_days(Days::new(0.0)).unwrap(), Days::new(2_456_293.5));

        let one_ns = DayNumber::<JulianDay>::from_parts(
            BigInt::from(2_456_293),
            frac(1, NANOS_PER_DAY),
        )
        .unwrap();
        assert!(matches!(
            one_ns.to_days(Days::new(0.0)),
            Err(CalendarError::PrecisionLoss { .. })
        ));
        assert_eq!(
            one_ns.to_days(Days::new(1e-9)).unwrap(),
            Days::new(2_456_293.0)
        );
    }

    #[test]
    fn decimal_rendering_rounds_half_away_from_zero() {
        let v = DayNumber::<JulianDay>::from_combined(frac(-1, 4)).unwrap();
        assert_eq!(v.to_decimal_string(2), "-0.25");
        assert_eq!(v.to_decimal_string(1), "-0.3");
        assert_eq!(v.to_decimal_string(0), "0");

        let w = DayNumber::<Ordinal>::from_combined(frac(1_000_001, 1_000_000)).unwrap();
        assert_eq!(w.to_decimal_string(6), "1.000001");
        assert_eq!(w.to_string(), "RD 1.000001000");
    }

    #[test]
    fn ordering_follows_combined_value() {
        let a = DayNumber::<JulianDay>::from_combined(frac(-1, 4)).unwrap();
        let b = DayNumber::<JulianDay>::zero();
        let c = DayNumber::<JulianDay>::from_combined(frac(1, 3)).unwrap();
        assert!(a < b && b < c);
    }
}
