// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Nested leap-cycle table and main-cycle anchors.
//!
//! The Gregorian leap rule repeats every 400 years, and inside that period
//! every 100, 4 and 1 years.  A [`CycleTable`] lists those periods largest
//! first together with their exact day counts, which lets whole-year
//! intervals of any length be turned into day counts (and back) with
//! integer division only.
//!
//! Decomposition starts from a cycle-aligned *boundary* year.  The table
//! carries two [`MainCycleAnchor`]s: one before the Julian Day epoch, used
//! for dates after it, and one after the epoch, used for dates before it.
//!
//! | Direction | Anchor date | Boundary year | Alignment |
//! |-----------|-------------|---------------|-----------|
//! | positive  | −4713-01-01 | −4799 | `≡ 1 (mod 400)`, counted forward |
//! | negative  | −4400-01-01 | −4400 | `≡ 0 (mod 400)`, counted backward |
//!
//! Counting backward from a year `≡ 0 (mod 400)` visits the same leap
//! pattern as counting forward from a year `≡ 1 (mod 400)`, because the
//! Gregorian rule is symmetric under `year → −year`.  Both directions can
//! therefore share one decomposition routine.

use log::trace;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use std::sync::OnceLock;

use crate::civil::CivilDateTime;
use crate::error::{CalendarError, CalendarResult};
use crate::gregorian::days_in_whole_year_interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One period of the leap rule: `years` calendar years spanning `days` days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CycleDefinition {
    years: u32,
    days: u32,
}

impl CycleDefinition {
    #[inline]
    pub const fn new(years: u32, days: u32) -> Self {
        Self { years, days }
    }

    #[inline]
    pub const fn years(&self) -> u32 {
        self.years
    }

    #[inline]
    pub const fn days(&self) -> u32 {
        self.days
    }
}

/// The Gregorian 400/100/4/1-year periods.
pub const GREGORIAN_CYCLES: [CycleDefinition; 4] = [
    CycleDefinition::new(400, 146_097),
    CycleDefinition::new(100, 36_524),
    CycleDefinition::new(4, 1_461),
    CycleDefinition::new(1, 365),
];

/// Start point for cycle decomposition on one side of the Julian Day epoch.
///
/// `adjustment_years` moves the anchor date's year back to the
/// cycle-aligned boundary year.  `adjustment_days` is the negated distance,
/// in days, between that boundary and the epoch; it is derived when the
/// table is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MainCycleAnchor {
    date: CivilDateTime,
    adjustment_years: i64,
    adjustment_days: i64,
}

impl MainCycleAnchor {
    #[inline]
    pub const fn date(&self) -> CivilDateTime {
        self.date
    }

    #[inline]
    pub const fn adjustment_years(&self) -> i64 {
        self.adjustment_years
    }

    #[inline]
    pub const fn adjustment_days(&self) -> i64 {
        self.adjustment_days
    }

    /// Cycle-aligned year from which decomposition proceeds.
    #[inline]
    pub const fn boundary_year(&self) -> i64 {
        self.date.year() + self.adjustment_years
    }
}

/// Scratch result of dividing by one cycle: how many whole cycles fit and
/// what is left over for the next level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CycleCell {
    count: BigInt,
    remainder: BigInt,
}

impl CycleCell {
    /// Splits `value` into whole multiples of `divisor`.
    ///
    /// With a `cap`, at most `cap` cycles are taken and the excess stays in
    /// the remainder: the last sub-period of a parent cycle is the one that
    /// holds the extra leap day.
    fn split(value: &BigInt, divisor: u32, cap: Option<u32>) -> Self {
        let (mut count, mut remainder) = value.div_mod_floor(&BigInt::from(divisor));
        if let Some(cap) = cap {
            let cap = BigInt::from(cap);
            if count > cap {
                remainder += (&count - &cap) * divisor;
                count = cap;
            }
        }
        Self { count, remainder }
    }
}

/// Immutable nested-cycle table with its two main-cycle anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTable {
    cycles: Vec<CycleDefinition>,
    positive: MainCycleAnchor,
    negative: MainCycleAnchor,
}

static GREGORIAN: OnceLock<CycleTable> = OnceLock::new();

impl CycleTable {
    /// The proleptic Gregorian table, built on first use and shared after.
    pub fn gregorian() -> &'static Self {
        GREGORIAN.get_or_init(|| {
            Self::new(
                GREGORIAN_CYCLES.to_vec(),
                (CivilDateTime::from_parts_unchecked(-4713, 1, 1, 0, 0, 0, 0), -86),
                (CivilDateTime::from_parts_unchecked(-4400, 1, 1, 0, 0, 0, 0), 0),
            )
            .expect("built-in Gregorian cycle table is consistent")
        })
    }

    /// Builds and validates a table.
    ///
    /// Each anchor is given as `(date, adjustment_years)`; the day
    /// adjustments are derived from the Julian Day epoch.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidCycleTable`] when the periods are not
    /// strictly nested down to one year, a day count disagrees with the
    /// Gregorian leap rule, or an anchor sits on the wrong side of the epoch,
    /// has a positive adjustment, or does not reach an aligned boundary.
    pub fn new(
        cycles: Vec<CycleDefinition>,
        positive: (CivilDateTime, i64),
        negative: (CivilDateTime, i64),
    ) -> CalendarResult<Self> {
        let invalid = |msg: String| Err(CalendarError::InvalidCycleTable(msg));

        let Some(top) = cycles.first().copied() else {
            return invalid("no cycles".into());
        };
        if cycles.last().map(CycleDefinition::years) != Some(1) {
            return invalid("smallest cycle must span one year".into());
        }
        for cycle in &cycles {
            let years = u64::from(cycle.years);
            if years == 0 || BigInt::from(cycle.days) != days_in_whole_year_interval(years) {
                return invalid(format!(
                    "{} days do not span {} Gregorian years",
                    cycle.days, cycle.years
                ));
            }
        }
        for pair in cycles.windows(2) {
            if pair[1].years >= pair[0].years || pair[0].years % pair[1].years != 0 {
                return invalid(format!(
                    "{}-year cycle does not nest in {}-year cycle",
                    pair[1].years, pair[0].years
                ));
            }
        }

        let epoch = CivilDateTime::JDN_EPOCH;
        let period = i64::from(top.years);
        let (positive_date, positive_years) = positive;
        let (negative_date, negative_years) = negative;
        if positive_years > 0 || negative_years > 0 {
            return invalid("anchor adjustments must not be positive".into());
        }
        if positive_date >= epoch || negative_date <= epoch {
            return invalid("anchors must straddle the Julian Day epoch".into());
        }

        let positive_boundary = positive_date.year() + positive_years;
        let negative_boundary = negative_date.year() + negative_years;
        if positive_boundary.rem_euclid(period) != 1 {
            return invalid(format!(
                "positive boundary year {} is not 1 mod {}",
                positive_boundary, period
            ));
        }
        if negative_boundary.rem_euclid(period) != 0 || negative_boundary <= epoch.year() {
            return invalid(format!(
                "negative boundary year {} is not a multiple of {} after the epoch",
                negative_boundary, period
            ));
        }

        let mut table = Self {
            cycles,
            positive: MainCycleAnchor {
                date: positive_date,
                adjustment_years: positive_years,
                adjustment_days: 0,
            },
            negative: MainCycleAnchor {
                date: negative_date,
                adjustment_years: negative_years,
                adjustment_days: 0,
            },
        };

        // Boundary (1 January, counted at noon) to epoch noon.
        let forward = table.days_for_years(&BigInt::from(epoch.year() - positive_boundary))
            + (epoch.ordinal_day() - 1);
        // Epoch noon to boundary (1 January, counted at noon).
        let backward = table.days_for_years(&BigInt::from(negative_boundary - epoch.year() - 1))
            + (epoch.remaining_days_in_year() + 1);

        table.positive.adjustment_days = -forward
            .to_i64()
            .ok_or_else(|| CalendarError::InvalidCycleTable("positive anchor too far".into()))?;
        table.negative.adjustment_days = -backward
            .to_i64()
            .ok_or_else(|| CalendarError::InvalidCycleTable("negative anchor too far".into()))?;
        Ok(table)
    }

    /// Cycle periods, largest first.
    #[inline]
    pub fn cycles(&self) -> &[CycleDefinition] {
        &self.cycles
    }

    /// Anchor used for dates after the Julian Day epoch.
    #[inline]
    pub const fn positive_anchor(&self) -> MainCycleAnchor {
        self.positive
    }

    /// Anchor used for dates before the Julian Day epoch.
    #[inline]
    pub const fn negative_anchor(&self) -> MainCycleAnchor {
        self.negative
    }

    /// Days spanned by `years` whole years starting at an aligned boundary.
    ///
    /// `years` must not be negative.
    pub fn days_for_years(&self, years: &BigInt) -> BigInt {
        debug_assert!(!years.is_negative(), "negative year interval");
        let mut remaining = years.clone();
        let mut total = BigInt::zero();
        for cycle in &self.cycles {
            let cell = CycleCell::split(&remaining, cycle.years, None);
            trace!(
                "{}-year cycle: {} x {} days, {} years left",
                cycle.years,
                cell.count,
                cycle.days,
                cell.remainder
            );
            total += &cell.count * cycle.days;
            remaining = cell.remainder;
        }
        total
    }

    /// Splits a day count measured from an aligned boundary into whole
    /// years and the 0-based day within the following year.
    ///
    /// `days` must not be negative.
    pub fn years_for_days(&self, days: &BigInt) -> (BigInt, BigInt) {
        debug_assert!(!days.is_negative(), "negative day count");
        let mut remaining = days.clone();
        let mut years = BigInt::zero();
        let mut parent: Option<u32> = None;
        for cycle in &self.cycles {
            let cap = parent.map(|p| p / cycle.years - 1);
            let cell = CycleCell::split(&remaining, cycle.days, cap);
            trace!(
                "{}-day cycle: {} x {} years, {} days left",
                cycle.days,
                cell.count,
                cycle.years,
                cell.remainder
            );
            years += &cell.count * cycle.years;
            remaining = cell.remainder;
            parent = Some(cycle.years);
        }
        (years, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn gregorian_anchor_adjustments_are_derived() {
        let table = CycleTable::gregorian();
        let positive = table.positive_anchor();
        assert_eq!(positive.boundary_year(), -4799);
        assert_eq!(positive.adjustment_years(), -86);
        assert_eq!(positive.adjustment_days(), -31_738);

        let negative = table.negative_anchor();
        assert_eq!(negative.boundary_year(), -4400);
        assert_eq!(negative.adjustment_years(), 0);
        assert_eq!(negative.adjustment_days(), -113_993);

        assert!(positive.date() < CivilDateTime::JDN_EPOCH);
        assert!(negative.date() > CivilDateTime::JDN_EPOCH);
    }

    #[test]
    fn anchor_boundaries_are_one_gregorian_cycle_apart_in_days() {
        // −4799-01-01 to −4400-01-01 is 399 years ending in a leap year.
        let table = CycleTable::gregorian();
        let spread =
            table.positive_anchor().adjustment_days() + table.negative_anchor().adjustment_days();
        assert_eq!(-spread, 146_097 - 366);
    }

    #[test]
    fn cycles_are_handed_out_read_only() {
        let table = CycleTable::gregorian();
        let mut owned = table.cycles().to_vec();
        owned[0] = CycleDefinition::new(1, 365);
        assert_ne!(owned.as_slice(), table.cycles());
        assert_eq!(table.cycles(), &GREGORIAN_CYCLES);
    }

    #[test]
    fn days_for_years_matches_closed_form() {
        let table = CycleTable::gregorian();
        for years in [0u64, 1, 3, 4, 99, 100, 101, 399, 400, 401, 799, 800, 1234, 2019, 9_999] {
            assert_eq!(
                table.days_for_years(&BigInt::from(years)),
                days_in_whole_year_interval(years),
                "interval of {years} years"
            );
        }
    }

    #[test]
    fn days_for_years_handles_huge_intervals() {
        let table = CycleTable::gregorian();
        let years = BigInt::from(400u64) * BigInt::from(u64::MAX);
        assert_eq!(
            table.days_for_years(&years),
            BigInt::from(146_097u64) * BigInt::from(u64::MAX)
        );
    }

    #[test]
    fn years_for_days_keeps_leap_day_in_its_year() {
        let table = CycleTable::gregorian();
        // Day 365 (0-based) after an aligned boundary is in year 1; the
        // fourth year holds 366 days and its last day must not spill over.
        assert_eq!(table.years_for_days(&big(365)), (big(1), big(0)));
        assert_eq!(table.years_for_days(&big(1_460)), (big(3), big(365)));
        assert_eq!(table.years_for_days(&big(1_461)), (big(4), big(0)));
        // Last day of the 400-year cycle (year 400 is leap).
        assert_eq!(table.years_for_days(&big(146_096)), (big(399), big(365)));
        assert_eq!(table.years_for_days(&big(146_097)), (big(400), big(0)));
        // Last day of a common century year (year 100 is not leap).
        assert_eq!(table.years_for_days(&big(36_523)), (big(99), big(364)));
        assert_eq!(table.years_for_days(&big(36_524)), (big(100), big(0)));
    }

    #[test]
    fn years_for_days_inverts_days_for_years() {
        let table = CycleTable::gregorian();
        for years in [0i64, 1, 7, 96, 97, 100, 303, 399, 400, 4_000, 12_345] {
            let days = table.days_for_years(&big(years));
            assert_eq!(table.years_for_days(&days), (big(years), big(0)));
        }
    }

    #[test]
    fn cycle_cell_caps_and_carries_excess() {
        let cell = CycleCell::split(&big(1_460), 365, Some(3));
        assert_eq!((cell.count, cell.remainder), (big(3), big(365)));

        let uncapped = CycleCell::split(&big(1_460), 365, None);
        assert_eq!((uncapped.count, uncapped.remainder), (big(4), big(0)));
    }

    #[test]
    fn rejects_inconsistent_tables() {
        let positive = (CivilDateTime::from_parts_unchecked(-4713, 1, 1, 0, 0, 0, 0), -86);
        let negative = (CivilDateTime::from_parts_unchecked(-4400, 1, 1, 0, 0, 0, 0), 0);

        assert!(CycleTable::new(Vec::new(), positive, negative).is_err());
        assert!(CycleTable::new(GREGORIAN_CYCLES[..3].to_vec(), positive, negative).is_err());

        let mut bad_days = GREGORIAN_CYCLES.to_vec();
        bad_days[2] = CycleDefinition::new(4, 1_500);
        assert!(CycleTable::new(bad_days, positive, negative).is_err());

        let not_nested = vec![
            CycleDefinition::new(400, 146_097),
            CycleDefinition::new(3, 1_096),
            CycleDefinition::new(1, 365),
        ];
        assert!(CycleTable::new(not_nested, positive, negative).is_err());

        let misaligned = (positive.0, -85);
        assert!(CycleTable::new(GREGORIAN_CYCLES.to_vec(), misaligned, negative).is_err());

        let swapped = CycleTable::new(GREGORIAN_CYCLES.to_vec(), negative, positive);
        assert!(matches!(swapped, Err(CalendarError::InvalidCycleTable(_))));

        let positive_adjustment = (negative.0, 400);
        assert!(CycleTable::new(GREGORIAN_CYCLES.to_vec(), positive, positive_adjustment).is_err());
    }

    #[test]
    fn rejects_julian_calendar_cycles() {
        let julian = vec![
            CycleDefinition::new(400, 146_100),
            CycleDefinition::new(100, 36_525),
            CycleDefinition::new(4, 1_461),
            CycleDefinition::new(1, 365),
        ];
        let table = CycleTable::new(
            julian,
            (CivilDateTime::from_parts_unchecked(-4713, 1, 1, 0, 0, 0, 0), -86),
            (CivilDateTime::from_parts_unchecked(-4400, 1, 1, 0, 0, 0, 0), 0),
        );
        assert!(matches!(
            table,
            Err(CalendarError::InvalidCycleTable(msg)) if msg.contains("146100 days")
        ));
    }

    #[test]
    fn rejects_skipped_century_leap_day() {
        let mut cycles = GREGORIAN_CYCLES.to_vec();
        cycles[1] = CycleDefinition::new(100, 36_525);
        let positive = (CivilDateTime::from_parts_unchecked(-4713, 1, 1, 0, 0, 0, 0), -86);
        let negative = (CivilDateTime::from_parts_unchecked(-4400, 1, 1, 0, 0, 0, 0), 0);
        assert!(CycleTable::new(cycles, positive, negative).is_err());
    }

    #[test]
    fn custom_table_with_equivalent_anchors_agrees() {
        // Same boundaries, reached from different anchor dates.
        let table = CycleTable::new(
            GREGORIAN_CYCLES.to_vec(),
            (CivilDateTime::from_parts_unchecked(-4799, 6, 1, 0, 0, 0, 0), 0),
            (CivilDateTime::from_parts_unchecked(-4001, 1, 1, 0, 0, 0, 0), -399),
        )
        .unwrap();
        let gregorian = CycleTable::gregorian();
        assert_eq!(
            table.positive_anchor().adjustment_days(),
            gregorian.positive_anchor().adjustment_days()
        );
        assert_eq!(
            table.negative_anchor().adjustment_days(),
            gregorian.negative_anchor().adjustment_days()
        );
    }
}
