//! Per-pass simulation counters
//!
//! One [`CapTracker`] is owned by exactly one replay: it carries the running
//! per-calendar-year periodic accrual total (for the yearly cap) and the year
//! the annual grant last fired in (for grant-week suppression). Nothing here
//! is shared or reused across calls.

use chrono::{Datelike, NaiveDate};

/// Year marker meaning "no grant has been applied yet"
const NO_GRANT: i32 = 0;

#[derive(Debug, Clone)]
pub struct CapTracker {
    /// Periodic accrual credited so far in `current_year`. Grants and ledger
    /// deltas never pass through here.
    year_accrued: f64,
    current_year: i32,
    last_grant_year: i32,
}

impl CapTracker {
    /// The carry-in seeds the year counter only when the category started in
    /// the same calendar year the replay begins in; a carry-in from an
    /// earlier year has already been spent against an earlier cap.
    pub fn new(start_year: i32, first_year: i32, carry_in: f64) -> Self {
        let year_accrued = if start_year == first_year {
            carry_in
        } else {
            0.0
        };
        Self {
            year_accrued,
            current_year: first_year,
            last_grant_year: NO_GRANT,
        }
    }

    /// Periodic-accrual room left under the cap this year; `+inf` when
    /// uncapped.
    pub fn remaining_headroom(&self, cap: Option<f64>) -> f64 {
        match cap {
            Some(cap) => (cap - self.year_accrued).max(0.0),
            None => f64::INFINITY,
        }
    }

    /// Record periodic accrual actually credited (post-clamp).
    pub fn record_periodic(&mut self, amount: f64) {
        self.year_accrued += amount;
    }

    /// Record that the annual grant fired in `year`.
    pub fn record_grant(&mut self, year: i32) {
        self.last_grant_year = year;
    }

    pub fn last_grant_year(&self) -> i32 {
        self.last_grant_year
    }

    pub fn year_accrued(&self) -> f64 {
        self.year_accrued
    }

    /// Reset the year counter when the simulated day crosses into a new
    /// calendar year. Call once per simulated day; off-year days are no-ops.
    pub fn maybe_reset(&mut self, day: NaiveDate) {
        if day.year() != self.current_year {
            self.current_year = day.year();
            self.year_accrued = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_carry_in_seeds_matching_year_only() {
        let seeded = CapTracker::new(2024, 2024, 15.0);
        assert_eq!(seeded.year_accrued(), 15.0);

        let unseeded = CapTracker::new(2023, 2024, 15.0);
        assert_eq!(unseeded.year_accrued(), 0.0);
    }

    #[test]
    fn test_headroom_clamps_at_zero() {
        let mut tracker = CapTracker::new(2024, 2024, 0.0);
        assert_eq!(tracker.remaining_headroom(Some(10.0)), 10.0);

        tracker.record_periodic(8.0);
        assert_eq!(tracker.remaining_headroom(Some(10.0)), 2.0);

        tracker.record_periodic(2.0);
        assert_eq!(tracker.remaining_headroom(Some(10.0)), 0.0);

        // Over-full (carry-in above cap) still reports zero, not negative
        let over = CapTracker::new(2024, 2024, 50.0);
        assert_eq!(over.remaining_headroom(Some(38.0)), 0.0);
    }

    #[test]
    fn test_uncapped_headroom_is_infinite() {
        let tracker = CapTracker::new(2024, 2024, 1000.0);
        assert_eq!(tracker.remaining_headroom(None), f64::INFINITY);
    }

    #[test]
    fn test_reset_on_year_rollover() {
        let mut tracker = CapTracker::new(2023, 2023, 0.0);
        tracker.record_periodic(40.0);
        assert_eq!(tracker.remaining_headroom(Some(40.0)), 0.0);

        // Same-year days leave the counter alone
        tracker.maybe_reset(date(2023, 12, 31));
        assert_eq!(tracker.year_accrued(), 40.0);

        tracker.maybe_reset(date(2024, 1, 1));
        assert_eq!(tracker.year_accrued(), 0.0);
        assert_eq!(tracker.remaining_headroom(Some(40.0)), 40.0);
    }

    #[test]
    fn test_grant_marker() {
        let mut tracker = CapTracker::new(2023, 2023, 0.0);
        assert_eq!(tracker.last_grant_year(), 0);

        tracker.record_grant(2024);
        assert_eq!(tracker.last_grant_year(), 2024);

        // Rollover does not clear the grant marker
        tracker.maybe_reset(date(2025, 1, 1));
        assert_eq!(tracker.last_grant_year(), 2024);
    }
}
