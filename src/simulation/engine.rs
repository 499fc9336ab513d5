//! Daily replay of a single leave category
//!
//! A balance is never stored. It is recomputed on demand by replaying the
//! category's life one day at a time from its start date through the target
//! date. Each simulated day applies, in order:
//!
//! 1. Ledger entries effective on or before the day
//! 2. The annual grant (Jan 1, positive grants only, never on the start date)
//! 3. Periodic accrual at the category's cadence, clamped to the yearly cap
//! 4. The maximum-balance clamp
//!
//! Usage posted on a boundary day therefore frees headroom before accrual
//! lands, and accrual lost to either clamp is never made up later.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::policy::{AccrualFrequency, LedgerEntry, NormalizedPolicy};

use super::calendar;
use super::state::CapTracker;
use super::trace::{DayRow, SimulationTrace};
use super::DEFAULT_MAX_HORIZON_DAYS;

/// Settings for guarded balance queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Longest allowed span between a category's start date and the target
    /// date, in days. Default: `DEFAULT_MAX_HORIZON_DAYS` (about a century)
    #[serde(default = "default_max_horizon_days")]
    pub max_horizon_days: i64,
}

fn default_max_horizon_days() -> i64 {
    DEFAULT_MAX_HORIZON_DAYS
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_horizon_days: DEFAULT_MAX_HORIZON_DAYS,
        }
    }
}

/// Balance calculator that validates the horizon before replaying
pub struct AccrualEngine {
    config: SimulatorConfig,
}

impl AccrualEngine {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Balance as of end of day `target`
    pub fn balance_as_of(
        &self,
        policy: &NormalizedPolicy,
        ledger: &[LedgerEntry],
        target: NaiveDate,
    ) -> Result<f64, EngineError> {
        self.check_horizon(policy, target)?;
        Ok(simulate(policy, ledger, target))
    }

    /// Same query with the full day-by-day path recorded
    pub fn trace_as_of(
        &self,
        policy: &NormalizedPolicy,
        ledger: &[LedgerEntry],
        target: NaiveDate,
    ) -> Result<SimulationTrace, EngineError> {
        self.check_horizon(policy, target)?;
        Ok(simulate_traced(policy, ledger, target))
    }

    /// The replay runs one iteration per calendar day, so an absurd target
    /// date means an absurd amount of work. Reject it up front instead of
    /// grinding through it. Categories without a start date never loop and
    /// always pass.
    fn check_horizon(
        &self,
        policy: &NormalizedPolicy,
        target: NaiveDate,
    ) -> Result<(), EngineError> {
        let start = match policy.start_date {
            Some(start) => start,
            None => return Ok(()),
        };
        let days = target.signed_duration_since(start).num_days();
        if days > self.config.max_horizon_days {
            return Err(EngineError::HorizonExceeded {
                start,
                target,
                days,
                max_days: self.config.max_horizon_days,
            });
        }
        Ok(())
    }
}

impl Default for AccrualEngine {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

/// Replay a category and return its balance as of end of day `target`.
///
/// Pure: same inputs give the same balance, and nothing is mutated. A
/// category without a start date, or a target before the start date, skips
/// the replay and returns the starting balance as-is.
pub fn simulate(policy: &NormalizedPolicy, ledger: &[LedgerEntry], target: NaiveDate) -> f64 {
    run(policy, ledger, target, None)
}

/// Same replay as [`simulate`], recording one [`DayRow`] per simulated day.
pub fn simulate_traced(
    policy: &NormalizedPolicy,
    ledger: &[LedgerEntry],
    target: NaiveDate,
) -> SimulationTrace {
    let mut rows = match policy.start_date {
        Some(start) if start <= target => {
            let days = target.signed_duration_since(start).num_days() + 1;
            Vec::with_capacity(days as usize)
        }
        _ => Vec::new(),
    };
    let final_balance = run(policy, ledger, target, Some(&mut rows));
    SimulationTrace {
        rows,
        final_balance,
    }
}

fn run(
    policy: &NormalizedPolicy,
    ledger: &[LedgerEntry],
    target: NaiveDate,
    mut rows: Option<&mut Vec<DayRow>>,
) -> f64 {
    let start = match policy.start_date {
        Some(start) => start,
        None => return policy.starting_balance,
    };
    if target < start {
        return policy.starting_balance;
    }

    // Undated entries sort ahead of every dated one and land on the first
    // simulated day, together with entries dated before the start.
    let mut sorted: Vec<&LedgerEntry> = ledger.iter().collect();
    sorted.sort_by_key(|entry| entry.date.unwrap_or(NaiveDate::MIN));
    let mut cursor = 0usize;

    let mut balance = policy.starting_balance;
    let mut day = start;
    // The year-to-date carry-in belongs to the start year, which is also the
    // first simulated year.
    let mut caps = CapTracker::new(start.year(), day.year(), policy.accrued_ytd);

    while day <= target {
        caps.maybe_reset(day);

        // Step 1: ledger entries that have become effective
        let mut ledger_delta = 0.0;
        while cursor < sorted.len() && sorted[cursor].date.map_or(true, |d| d <= day) {
            ledger_delta += sorted[cursor].amount.unwrap_or(0.0);
            cursor += 1;
        }
        balance += ledger_delta;

        // Step 2: annual grant
        let mut grant = 0.0;
        if policy.annual_grant_amount > 0.0 && calendar::is_annual_boundary(day, start) {
            grant = policy.annual_grant_amount;
            balance += grant;
            caps.record_grant(day.year());
        }

        // Step 3: periodic accrual. Grants never consume cap headroom, but a
        // weekly cadence skips the Sunday that falls in the grant week.
        let mut periodic = 0.0;
        if policy.accrual_rate != 0.0 {
            if let Some(frequency) = policy.frequency {
                let due = calendar::accrual_due(frequency, day, start);
                let suppressed = frequency == AccrualFrequency::Weekly
                    && policy.annual_grant_amount > 0.0
                    && calendar::in_grant_week(day, caps.last_grant_year());
                if due && !suppressed {
                    let headroom = caps.remaining_headroom(policy.yearly_accrual_cap);
                    periodic = policy.accrual_rate.min(headroom);
                    balance += periodic;
                    caps.record_periodic(periodic);
                }
            }
        }

        // Step 4: maximum-balance clamp
        if let Some(max_balance) = policy.max_balance {
            if balance > max_balance {
                balance = max_balance;
            }
        }

        if let Some(rows) = rows.as_mut() {
            rows.push(DayRow {
                date: day,
                ledger_delta,
                grant,
                periodic,
                balance,
            });
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    balance
}
