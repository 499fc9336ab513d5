//! Category policy and ledger records
//!
//! These mirror what the persistence layer hands over: every field an
//! upstream form can leave blank is `Option` here. Normalization into the
//! non-nullable record the simulator consumes happens in one pass, at the
//! boundary (see [`super::NormalizedPolicy`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Cadence of periodic accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccrualFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Annually,
}

impl AccrualFrequency {
    /// All cadences, in the order upstream forms list them
    pub const ALL: [AccrualFrequency; 4] = [
        AccrualFrequency::Weekly,
        AccrualFrequency::Biweekly,
        AccrualFrequency::Monthly,
        AccrualFrequency::Annually,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccrualFrequency::Weekly => "weekly",
            AccrualFrequency::Biweekly => "biweekly",
            AccrualFrequency::Monthly => "monthly",
            AccrualFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for AccrualFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccrualFrequency {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(AccrualFrequency::Weekly),
            "biweekly" => Ok(AccrualFrequency::Biweekly),
            "monthly" => Ok(AccrualFrequency::Monthly),
            "annually" => Ok(AccrualFrequency::Annually),
            _ => Err(EngineError::InvalidFrequency {
                value: value.to_string(),
            }),
        }
    }
}

/// A leave category's accrual policy as supplied by the caller
///
/// Immutable for the duration of a simulation call. Numeric fields left as
/// `None` default to 0; a `None` frequency means no periodic accrual at all;
/// a `None` start date disables simulation entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Display name, e.g. "Flex PTO" or "UPT"
    pub name: String,
    /// Hours credited per accrual period
    pub accrual_rate: Option<f64>,
    pub accrual_frequency: Option<AccrualFrequency>,
    /// Absolute ceiling on the running balance
    pub max_balance: Option<f64>,
    /// Ceiling on periodic accrual per calendar year (grants and ledger
    /// entries do not count against it)
    pub yearly_accrual_cap: Option<f64>,
    /// Hours already accrued this year at category-definition time
    pub accrued_ytd: Option<f64>,
    /// Lump sum added every January 1st after the start date
    pub annual_grant_amount: Option<f64>,
    /// First simulated day; accrual is replayed from here
    pub start_date: Option<NaiveDate>,
    pub starting_balance: Option<f64>,
}

/// A dated balance delta: negative for usage, positive for an adjustment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    /// Free-text annotation; ignored by the simulator
    pub note: Option<String>,
}

impl LedgerEntry {
    pub fn dated(date: NaiveDate, amount: f64) -> Self {
        Self {
            date: Some(date),
            amount: Some(amount),
            note: None,
        }
    }

    /// An entry with no date; it sorts before every dated entry and lands on
    /// the first simulated day
    pub fn undated(amount: f64) -> Self {
        Self {
            date: None,
            amount: Some(amount),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_round_trip() {
        for freq in AccrualFrequency::ALL {
            let parsed: AccrualFrequency = freq.as_str().parse().expect("parse failed");
            assert_eq!(parsed, freq);
        }

        // Case-insensitive, tolerant of padding
        assert_eq!(
            " Weekly ".parse::<AccrualFrequency>().unwrap(),
            AccrualFrequency::Weekly
        );
        assert!("fortnightly".parse::<AccrualFrequency>().is_err());
    }

    #[test]
    fn test_frequency_serde_uses_lowercase() {
        let json = serde_json::to_string(&AccrualFrequency::Biweekly).unwrap();
        assert_eq!(json, "\"biweekly\"");

        let back: AccrualFrequency = serde_json::from_str("\"annually\"").unwrap();
        assert_eq!(back, AccrualFrequency::Annually);
    }

    #[test]
    fn test_category_policy_deserializes_with_missing_fields() {
        let json = r#"{"name": "Vacation", "accrual_rate": 2.0}"#;
        let policy: CategoryPolicy = serde_json::from_str(json).unwrap();

        assert_eq!(policy.name, "Vacation");
        assert_eq!(policy.accrual_rate, Some(2.0));
        assert_eq!(policy.accrual_frequency, None);
        assert_eq!(policy.start_date, None);
        assert_eq!(policy.starting_balance, None);
    }

    #[test]
    fn test_ledger_entry_constructors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let used = LedgerEntry::dated(date, -8.0).with_note("day off");
        assert_eq!(used.date, Some(date));
        assert_eq!(used.amount, Some(-8.0));
        assert_eq!(used.note.as_deref(), Some("day off"));

        let floating = LedgerEntry::undated(5.0);
        assert_eq!(floating.date, None);
        assert_eq!(floating.amount, Some(5.0));
    }
}
