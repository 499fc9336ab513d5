//! Policy normalization
//!
//! One defaulting pass at the boundary turns the nullable persistence-facing
//! record into the non-nullable one the simulator consumes. After this pass
//! the replay loop never null-checks a numeric field: absent amounts are 0,
//! an absent frequency stays an explicit `None` cadence (never folded into
//! weekly), and an absent start date survives as the sentinel that
//! short-circuits simulation.

use chrono::NaiveDate;

use super::{AccrualFrequency, CategoryPolicy};

/// Fully-defaulted policy record, ready for simulation
///
/// The two ceilings stay `Option` because absence means *no ceiling*, not a
/// zero ceiling. A ceiling explicitly set to 0.0 also folds to `None`: forms
/// that leave the field blank submit 0, so an exact zero means unconfigured,
/// not a ban on all accrual.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPolicy {
    pub accrual_rate: f64,
    pub frequency: Option<AccrualFrequency>,
    pub max_balance: Option<f64>,
    pub yearly_accrual_cap: Option<f64>,
    pub accrued_ytd: f64,
    pub annual_grant_amount: f64,
    pub start_date: Option<NaiveDate>,
    pub starting_balance: f64,
}

impl NormalizedPolicy {
    pub fn from_category(category: &CategoryPolicy) -> Self {
        Self {
            accrual_rate: category.accrual_rate.unwrap_or(0.0),
            frequency: category.accrual_frequency,
            max_balance: ceiling(category.max_balance),
            yearly_accrual_cap: ceiling(category.yearly_accrual_cap),
            accrued_ytd: category.accrued_ytd.unwrap_or(0.0),
            annual_grant_amount: category.annual_grant_amount.unwrap_or(0.0),
            start_date: category.start_date,
            starting_balance: category.starting_balance.unwrap_or(0.0),
        }
    }

    /// Whether any periodic accrual can ever fire
    pub fn accrues(&self) -> bool {
        self.frequency.is_some() && self.accrual_rate != 0.0
    }
}

/// A ceiling of exactly 0.0 behaves as "no ceiling"
fn ceiling(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
