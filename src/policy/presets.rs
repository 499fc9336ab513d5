//! Warehouse handbook presets
//!
//! Builds the three leave categories a warehouse associate holds, from a
//! handful of schedule parameters:
//! - UPT (unpaid time): accrues per hour worked, hard 80-hour ceiling
//! - Flex PTO: fixed weekly rate with a yearly cap and a Jan 1 grant
//! - Standard PTO: weekly rate and ceiling stepped by tenure

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{AccrualFrequency, CategoryPolicy};

/// UPT accrual credited per hour worked, in minutes
const UPT_MINUTES_PER_HOUR: f64 = 5.0;

/// UPT balance ceiling in hours
pub const UPT_MAX_BALANCE: f64 = 80.0;

/// Flex PTO accrual per week in hours
pub const FLEX_WEEKLY_RATE: f64 = 1.85;

/// Flex PTO balance ceiling in hours
pub const FLEX_MAX_BALANCE: f64 = 48.0;

/// Flex PTO accrual allowed per calendar year, grant excluded
pub const FLEX_YEARLY_CAP: f64 = 38.0;

/// Flex PTO lump sum granted every January 1st
pub const FLEX_ANNUAL_GRANT: f64 = 10.0;

/// New hires receive the annual grant up front instead of waiting for Jan 1
const FLEX_DEFAULT_STARTING: f64 = 10.0;

/// Schedule and carry-over parameters for building the presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetParams {
    /// Full years on the job, selects the Standard PTO tier. Default: 0
    #[serde(default)]
    pub tenure_years: u32,

    /// Scheduled shift length in hours. Default: 10.0
    #[serde(default = "default_shift_length")]
    pub shift_length: f64,

    /// Scheduled shifts per week. Default: 4
    #[serde(default = "default_shifts_per_week")]
    pub shifts_per_week: u32,

    /// Current UPT balance to carry in; None starts at zero
    #[serde(default)]
    pub current_upt: Option<f64>,

    /// Current Flex balance to carry in; None uses the new-hire grant
    #[serde(default)]
    pub current_flex: Option<f64>,

    /// Current Standard balance to carry in; None starts at zero
    #[serde(default)]
    pub current_std: Option<f64>,
}

fn default_shift_length() -> f64 {
    10.0
}
fn default_shifts_per_week() -> u32 {
    4
}

impl Default for PresetParams {
    fn default() -> Self {
        Self {
            tenure_years: 0,
            shift_length: 10.0,
            shifts_per_week: 4,
            current_upt: None,
            current_flex: None,
            current_std: None,
        }
    }
}

/// Weekly UPT accrual for a schedule, rounded to three decimals to match the
/// handbook tables. A 10-hour, 4-day schedule gives 3.333 hours per week.
pub fn upt_weekly_rate(shift_length: f64, shifts_per_week: u32) -> f64 {
    let minutes_per_week = shift_length * shifts_per_week as f64 * UPT_MINUTES_PER_HOUR;
    round3(minutes_per_week / 60.0)
}

/// UPT hours earned by one worked shift, unrounded. A 10-hour shift earns
/// 50 minutes. Useful for building shift-driven ledger adjustments.
pub fn upt_hours_for_shift(hours_worked: f64) -> f64 {
    hours_worked * UPT_MINUTES_PER_HOUR / 60.0
}

/// Estimated Flex hours already accrued this calendar year: one accrual per
/// completed week since January 1st, capped at the yearly limit.
pub fn flex_accrued_ytd(as_of: NaiveDate) -> f64 {
    let weeks_passed = (as_of.ordinal0() / 7) as f64;
    (weeks_passed * FLEX_WEEKLY_RATE).min(FLEX_YEARLY_CAP)
}

/// Standard PTO (weekly rate, balance ceiling) by full years of tenure
fn standard_tier(tenure_years: u32) -> (f64, f64) {
    match tenure_years {
        0 => (0.77, 40.0),
        1 => (1.54, 80.0),
        2 => (1.70, 88.0),
        3 => (1.85, 96.0),
        4 => (2.00, 104.0),
        5 => (2.16, 112.0),
        _ => (2.31, 120.0),
    }
}

/// Build the three handbook categories for one associate, starting `as_of`.
pub fn warehouse_presets(params: &PresetParams, as_of: NaiveDate) -> Vec<CategoryPolicy> {
    let (std_rate, std_ceiling) = standard_tier(params.tenure_years);

    let upt = CategoryPolicy {
        name: "UPT".to_string(),
        accrual_rate: Some(upt_weekly_rate(params.shift_length, params.shifts_per_week)),
        accrual_frequency: Some(AccrualFrequency::Weekly),
        max_balance: Some(UPT_MAX_BALANCE),
        start_date: Some(as_of),
        starting_balance: Some(params.current_upt.unwrap_or(0.0)),
        ..Default::default()
    };

    let flex = CategoryPolicy {
        name: "Flex PTO".to_string(),
        accrual_rate: Some(FLEX_WEEKLY_RATE),
        accrual_frequency: Some(AccrualFrequency::Weekly),
        max_balance: Some(FLEX_MAX_BALANCE),
        yearly_accrual_cap: Some(FLEX_YEARLY_CAP),
        accrued_ytd: Some(flex_accrued_ytd(as_of)),
        annual_grant_amount: Some(FLEX_ANNUAL_GRANT),
        start_date: Some(as_of),
        starting_balance: Some(params.current_flex.unwrap_or(FLEX_DEFAULT_STARTING)),
        ..Default::default()
    };

    let standard = CategoryPolicy {
        name: "Standard PTO".to_string(),
        accrual_rate: Some(std_rate),
        accrual_frequency: Some(AccrualFrequency::Weekly),
        max_balance: Some(std_ceiling),
        start_date: Some(as_of),
        starting_balance: Some(params.current_std.unwrap_or(0.0)),
        ..Default::default()
    };

    vec![upt, flex, standard]
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::NormalizedPolicy;
    use crate::simulation::simulate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upt_rate_for_common_schedules() {
        // 10h x 4 days: 200 minutes of UPT per week
        assert_eq!(upt_weekly_rate(10.0, 4), 3.333);
        // 8h x 5 days is the same worked-hours total
        assert_eq!(upt_weekly_rate(8.0, 5), 3.333);
        // 7.5h x 4 days
        assert_eq!(upt_weekly_rate(7.5, 4), 2.5);
        assert_eq!(upt_weekly_rate(11.5, 3), 2.875);
    }

    #[test]
    fn test_upt_hours_per_shift() {
        // 10 hours earn 50 minutes
        assert!((upt_hours_for_shift(10.0) - 50.0 / 60.0).abs() < 1e-9);
        // 12 hours earn exactly one hour
        assert_eq!(upt_hours_for_shift(12.0), 1.0);
        assert_eq!(upt_hours_for_shift(1.5), 0.125);
        assert_eq!(upt_hours_for_shift(0.0), 0.0);
    }

    #[test]
    fn test_flex_ytd_estimate() {
        // No completed weeks on Jan 1
        assert_eq!(flex_accrued_ytd(date(2024, 1, 1)), 0.0);
        // One completed week on Jan 8
        assert!((flex_accrued_ytd(date(2024, 1, 8)) - 1.85).abs() < 1e-9);
        // Five completed weeks on Feb 5
        assert!((flex_accrued_ytd(date(2024, 2, 5)) - 9.25).abs() < 1e-9);
        // Late in the year the estimate caps at the yearly limit
        assert_eq!(flex_accrued_ytd(date(2024, 6, 15)), 38.0);
        assert_eq!(flex_accrued_ytd(date(2024, 12, 31)), 38.0);
    }

    #[test]
    fn test_standard_tier_table() {
        assert_eq!(standard_tier(0), (0.77, 40.0));
        assert_eq!(standard_tier(1), (1.54, 80.0));
        assert_eq!(standard_tier(2), (1.70, 88.0));
        assert_eq!(standard_tier(3), (1.85, 96.0));
        assert_eq!(standard_tier(4), (2.00, 104.0));
        assert_eq!(standard_tier(5), (2.16, 112.0));
        // Six or more years share the top tier
        assert_eq!(standard_tier(6), (2.31, 120.0));
        assert_eq!(standard_tier(30), (2.31, 120.0));
    }

    #[test]
    fn test_default_presets() {
        let params = PresetParams::default();
        let presets = warehouse_presets(&params, date(2024, 1, 1));
        assert_eq!(presets.len(), 3);

        let upt = &presets[0];
        assert_eq!(upt.name, "UPT");
        assert_eq!(upt.accrual_rate, Some(3.333));
        assert_eq!(upt.max_balance, Some(UPT_MAX_BALANCE));
        assert_eq!(upt.yearly_accrual_cap, None);
        assert_eq!(upt.annual_grant_amount, None);
        assert_eq!(upt.starting_balance, Some(0.0));

        let flex = &presets[1];
        assert_eq!(flex.name, "Flex PTO");
        assert_eq!(flex.accrual_rate, Some(FLEX_WEEKLY_RATE));
        assert_eq!(flex.yearly_accrual_cap, Some(FLEX_YEARLY_CAP));
        assert_eq!(flex.annual_grant_amount, Some(FLEX_ANNUAL_GRANT));
        // New hire with no carried balance gets the up-front grant
        assert_eq!(flex.starting_balance, Some(10.0));
        assert_eq!(flex.accrued_ytd, Some(0.0));

        let standard = &presets[2];
        assert_eq!(standard.name, "Standard PTO");
        assert_eq!(standard.accrual_rate, Some(0.77));
        assert_eq!(standard.max_balance, Some(40.0));
    }

    #[test]
    fn test_carried_balances_override_defaults() {
        let params = PresetParams {
            tenure_years: 3,
            current_upt: Some(12.5),
            current_flex: Some(4.0),
            current_std: Some(20.0),
            ..Default::default()
        };
        let presets = warehouse_presets(&params, date(2024, 6, 15));
        assert_eq!(presets[0].starting_balance, Some(12.5));
        assert_eq!(presets[1].starting_balance, Some(4.0));
        assert_eq!(presets[2].starting_balance, Some(20.0));
        assert_eq!(presets[2].accrual_rate, Some(1.85));
        // Mid-June start means the flex cap is already spent for the year
        assert_eq!(presets[1].accrued_ytd, Some(38.0));
    }

    #[test]
    fn test_presets_simulate_end_to_end() {
        let params = PresetParams::default();
        // Monday start; first Sunday is Jan 7
        let presets = warehouse_presets(&params, date(2024, 1, 1));
        let upt = NormalizedPolicy::from_category(&presets[0]);
        let balance = simulate(&upt, &[], date(2024, 1, 14));
        assert!((balance - 2.0 * 3.333).abs() < 1e-9);
    }
}
