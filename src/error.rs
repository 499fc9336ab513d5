//! Error types surfaced at the engine boundary
//!
//! The simulator itself never fails: missing fields default, caps clamp, and
//! suppression rules are ordinary outcomes. Errors exist only for caller-side
//! contract violations caught before the replay loop starts: unparseable
//! input values and targets beyond the configured horizon.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Target date is further past the category start than the configured
    /// horizon allows. Raised before the loop ever runs.
    #[error("target {target} is {days} days past start {start}, beyond the {max_days}-day horizon")]
    HorizonExceeded {
        start: NaiveDate,
        target: NaiveDate,
        days: i64,
        max_days: i64,
    },

    /// A date column held something that is not a date.
    #[error("unparseable date {value:?}: expected YYYY-MM-DD, an RFC 3339 timestamp, or YYYY-MM-DD HH:MM:SS")]
    InvalidDate { value: String },

    /// A frequency column held an unknown cadence name.
    #[error("unknown accrual frequency {value:?}")]
    InvalidFrequency { value: String },

    /// A numeric column parsed to NaN or infinity.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("csv read failed")]
    Csv(#[from] csv::Error),
}
