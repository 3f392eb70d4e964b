// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every conversion in the crate.

use qtty::Days;

/// Failure of a single conversion call.
///
/// Every error only invalidates the call that produced it; no partially
/// computed value is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// A date or time field is outside its (leap-aware) bounds.
    #[error("invalid {field}: {value} (must be {min}-{max})")]
    Validation {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A custom cycle table failed its consistency checks.
    #[error("invalid cycle table: {0}")]
    InvalidCycleTable(String),

    /// An arbitrary-precision intermediate does not fit the fixed-width output.
    #[error("{what} does not fit the output range")]
    Overflow { what: &'static str },

    /// Reducing a day number to `f64` would lose more than the caller accepts.
    #[error("reduced precision loses {error}, more than the accepted {tolerance}")]
    PrecisionLoss { error: Days, tolerance: Days },
}

/// Shorthand result used throughout the crate.
pub type CalendarResult<T> = Result<T, CalendarError>;

impl CalendarError {
    /// Checks `value` against the inclusive range `min..=max`.
    pub(crate) fn check(field: &'static str, value: i64, min: i64, max: i64) -> CalendarResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::Validation {
                field,
                value,
                min,
                max,
            })
        }
    }

    pub(crate) const fn overflow(what: &'static str) -> Self {
        Self::Overflow { what }
    }
}
