//! Accrual calendar
//!
//! Pure predicates answering "does accrual land on this day?" for each
//! cadence. The simulator dispatches through [`accrual_due`], which matches
//! the cadence enum exhaustively.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::policy::AccrualFrequency;

/// Weekly accrual lands on Sundays, including a Sunday start date.
pub fn is_weekly_boundary(day: NaiveDate, _start: NaiveDate) -> bool {
    day.weekday() == Weekday::Sun
}

/// Biweekly accrual lands every 14th day after the start date.
pub fn is_biweekly_boundary(day: NaiveDate, start: NaiveDate) -> bool {
    let elapsed = day.signed_duration_since(start).num_days();
    elapsed > 0 && elapsed % 14 == 0
}

/// Monthly accrual lands on the 1st of the month, excluding the start date.
pub fn is_monthly_boundary(day: NaiveDate, start: NaiveDate) -> bool {
    day.day() == 1 && day > start
}

/// Annual accrual lands on January 1st, excluding the start date.
///
/// The annual grant shares this boundary: Jan 1 strictly after the start.
pub fn is_annual_boundary(day: NaiveDate, start: NaiveDate) -> bool {
    day.month() == 1 && day.day() == 1 && day > start
}

/// Whether `day` is an accrual boundary under the given cadence.
pub fn accrual_due(frequency: AccrualFrequency, day: NaiveDate, start: NaiveDate) -> bool {
    match frequency {
        AccrualFrequency::Weekly => is_weekly_boundary(day, start),
        AccrualFrequency::Biweekly => is_biweekly_boundary(day, start),
        AccrualFrequency::Monthly => is_monthly_boundary(day, start),
        AccrualFrequency::Annually => is_annual_boundary(day, start),
    }
}

/// Whether `day` falls in the granted week: the first seven days of the year
/// a grant was applied in. A weekly boundary inside it is suppressed; the
/// grant substitutes for that one accrual.
pub fn in_grant_week(day: NaiveDate, last_grant_year: i32) -> bool {
    day.year() == last_grant_year && day.ordinal() <= 7
}
