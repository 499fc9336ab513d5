//! Day-by-day simulation output
//!
//! The balance query itself only needs the final number, but forecasting and
//! charting want the path. A trace records one row per simulated day with the
//! amounts credited by each step, and can down-sample itself to a month-end
//! series for plotting.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One simulated day of a category replay
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    /// Net ledger amount applied on this day (deposits positive, usage negative)
    pub ledger_delta: f64,
    /// Annual grant credited on this day, zero on non-grant days
    pub grant: f64,
    /// Periodic accrual credited on this day, after the yearly cap clamp
    pub periodic: f64,
    /// End-of-day balance, after the maximum-balance clamp
    pub balance: f64,
}

/// Balance sampled at a single date
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

/// Full output of one traced simulation pass
#[derive(Debug, Clone)]
pub struct SimulationTrace {
    /// One row per simulated day, start date through target date inclusive.
    /// Empty when the pass degenerates (no start date, or target before start).
    pub rows: Vec<DayRow>,
    /// Balance as of the target date. Matches the untraced query exactly.
    pub final_balance: f64,
}

impl SimulationTrace {
    /// Total periodic accrual credited over the whole pass
    pub fn periodic_total(&self) -> f64 {
        self.rows.iter().map(|row| row.periodic).sum()
    }

    /// Total annual grant credited over the whole pass
    pub fn grant_total(&self) -> f64 {
        self.rows.iter().map(|row| row.grant).sum()
    }

    /// Down-sample the daily rows to the last simulated day of each calendar
    /// month. The final day is always included, so a pass ending mid-month
    /// still reports its closing balance.
    pub fn month_end_points(&self) -> Vec<BalancePoint> {
        let mut points = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let closes_month = match self.rows.get(i + 1) {
                Some(next) => {
                    next.date.month() != row.date.month() || next.date.year() != row.date.year()
                }
                None => true,
            };
            if closes_month {
                points.push(BalancePoint {
                    date: row.date,
                    balance: row.balance,
                });
            }
        }
        points
    }
}
