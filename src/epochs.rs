// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-count epoch marker types.
//!
//! Each zero-sized type names a day count and places its day zero on the
//! canonical **ordinal axis** (days since 0001-01-01T00:00).
//!
//! | Marker | Description | Day zero | Ordinal position |
//! |--------|-------------|----------|------------------|
//! | [`JulianDay`] | Julian Day | −4713-11-24T12:00 | −1 721 425.5 |
//! | [`Ordinal`] | Ordinal / fixed day | 0001-01-01T00:00 | 0 |
//! | [`ModifiedJulianDay`] | Modified Julian Day | 1858-11-17T00:00 | 678 575 |
//!
//! The offsets are whole multiples of half a day, so conversions between
//! epochs are exact in rational arithmetic.

use num_bigint::BigInt;
use num_rational::BigRational;
use std::fmt::Debug;

/// Marker trait for day-count epochs.
pub trait DayEpoch: Copy + Clone + Debug + PartialEq + Eq + 'static {
    /// Display label used by [`DayNumber`](crate::DayNumber) formatting.
    const LABEL: &'static str;

    /// Position of this epoch's day zero on the ordinal axis, in half days.
    const ORDINAL_OFFSET_HALF_DAYS: i64;

    /// Position of this epoch's day zero on the ordinal axis, in days.
    fn ordinal_offset() -> BigRational {
        BigRational::new(BigInt::from(Self::ORDINAL_OFFSET_HALF_DAYS), BigInt::from(2))
    }

    /// Convert a value in this epoch to the ordinal axis.
    fn to_ordinal(value: &BigRational) -> BigRational {
        value + Self::ordinal_offset()
    }

    /// Convert an ordinal-axis value to this epoch.
    fn from_ordinal(ordinal: &BigRational) -> BigRational {
        ordinal - Self::ordinal_offset()
    }
}

/// Julian Day — days since noon, 24 November 4714 BCE.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JulianDay;

impl DayEpoch for JulianDay {
    const LABEL: &'static str = "JD";
    const ORDINAL_OFFSET_HALF_DAYS: i64 = -3_442_851;
}

/// Ordinal (fixed) day — days since midnight, 1 January 1 CE.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ordinal;

impl DayEpoch for Ordinal {
    const LABEL: &'static str = "RD";
    const ORDINAL_OFFSET_HALF_DAYS: i64 = 0;
}

/// Modified Julian Day — JD minus 2 400 000.5.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModifiedJulianDay;

impl DayEpoch for ModifiedJulianDay {
    const LABEL: &'static str = "MJD";
    const ORDINAL_OFFSET_HALF_DAYS: i64 = 1_357_150;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(v: f64) -> BigRational {
        BigRational::from_float(v).unwrap()
    }

    #[test]
    fn jd_mjd_offset_is_2400000_5() {
        let jd = days(2_451_545.0);
        let mjd = ModifiedJulianDay::from_ordinal(&JulianDay::to_ordinal(&jd));
        assert_eq!(mjd, days(51_544.5));
    }

    #[test]
    fn ordinal_is_identity() {
        let value = days(12.25);
        assert_eq!(Ordinal::to_ordinal(&value), value);
        assert_eq!(Ordinal::from_ordinal(&value), value);
    }

    #[test]
    fn jd_of_ordinal_epoch() {
        let jd = JulianDay::from_ordinal(&days(0.0));
        assert_eq!(jd, days(1_721_425.5));
    }
}
