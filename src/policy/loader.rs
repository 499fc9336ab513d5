//! CSV loading for category policies and usage ledgers
//!
//! Two file shapes are understood:
//!
//! - Category files: one row per category with the policy columns
//!   (`name,accrual_rate,accrual_frequency,max_balance,yearly_accrual_cap,`
//!   `accrued_ytd,annual_grant_amount,start_date,starting_balance`)
//! - Ledger files: one row per usage or adjustment
//!   (`category,date,amount,note`)
//!
//! Blank cells stay `None` and fall to the simulator's defaults. Dates accept
//! plain `YYYY-MM-DD`, RFC 3339 timestamps, and `YYYY-MM-DD HH:MM:SS`
//! exports; timestamps are truncated to their date.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;

use super::{AccrualFrequency, CategoryPolicy, LedgerEntry};
use crate::error::EngineError;

/// One ledger row paired with the category it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub category: String,
    pub entry: LedgerEntry,
}

/// Raw category row as it appears on disk. Dates and frequencies stay
/// strings until validated.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    name: String,
    #[serde(default)]
    accrual_rate: Option<f64>,
    #[serde(default)]
    accrual_frequency: Option<String>,
    #[serde(default)]
    max_balance: Option<f64>,
    #[serde(default)]
    yearly_accrual_cap: Option<f64>,
    #[serde(default)]
    accrued_ytd: Option<f64>,
    #[serde(default)]
    annual_grant_amount: Option<f64>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    starting_balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    category: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    note: Option<String>,
}

/// Load category policies from a CSV file.
pub fn load_categories(path: &Path) -> Result<Vec<CategoryPolicy>, EngineError> {
    let reader = csv::ReaderBuilder::new().from_path(path)?;
    let categories = read_categories(reader)?;
    debug!("loaded {} categories from {}", categories.len(), path.display());
    Ok(categories)
}

/// Load category policies from any reader (tests, stdin, embedded data).
pub fn load_categories_from_reader<R: Read>(reader: R) -> Result<Vec<CategoryPolicy>, EngineError> {
    read_categories(csv::ReaderBuilder::new().from_reader(reader))
}

/// Load ledger rows from a CSV file, preserving file order.
pub fn load_ledger(path: &Path) -> Result<Vec<LedgerRecord>, EngineError> {
    let reader = csv::ReaderBuilder::new().from_path(path)?;
    let records = read_ledger(reader)?;
    debug!("loaded {} ledger rows from {}", records.len(), path.display());
    Ok(records)
}

/// Load ledger rows from any reader.
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<Vec<LedgerRecord>, EngineError> {
    read_ledger(csv::ReaderBuilder::new().from_reader(reader))
}

/// Split ledger rows by category name, keeping each category's rows in file
/// order. The simulator sorts by effective date itself, so insertion order
/// only matters for equal dates.
pub fn group_ledger(records: Vec<LedgerRecord>) -> HashMap<String, Vec<LedgerEntry>> {
    let mut grouped: HashMap<String, Vec<LedgerEntry>> = HashMap::new();
    for record in records {
        grouped.entry(record.category).or_default().push(record.entry);
    }
    grouped
}

fn read_categories<R: Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<CategoryPolicy>, EngineError> {
    let mut categories = Vec::new();
    for row in reader.deserialize() {
        let row: CategoryRow = row?;
        categories.push(row.into_policy()?);
    }
    Ok(categories)
}

fn read_ledger<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<LedgerRecord>, EngineError> {
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: LedgerRow = row?;
        records.push(row.into_record()?);
    }
    Ok(records)
}

impl CategoryRow {
    fn into_policy(self) -> Result<CategoryPolicy, EngineError> {
        let accrual_frequency = match non_blank(self.accrual_frequency) {
            Some(raw) => Some(raw.parse::<AccrualFrequency>()?),
            None => None,
        };
        let start_date = match non_blank(self.start_date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        Ok(CategoryPolicy {
            name: self.name,
            accrual_rate: finite("accrual_rate", self.accrual_rate)?,
            accrual_frequency,
            max_balance: finite("max_balance", self.max_balance)?,
            yearly_accrual_cap: finite("yearly_accrual_cap", self.yearly_accrual_cap)?,
            accrued_ytd: finite("accrued_ytd", self.accrued_ytd)?,
            annual_grant_amount: finite("annual_grant_amount", self.annual_grant_amount)?,
            start_date,
            starting_balance: finite("starting_balance", self.starting_balance)?,
        })
    }
}

impl LedgerRow {
    fn into_record(self) -> Result<LedgerRecord, EngineError> {
        let date = match non_blank(self.date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        Ok(LedgerRecord {
            category: self.category,
            entry: LedgerEntry {
                date,
                amount: finite("amount", self.amount)?,
                note: non_blank(self.note),
            },
        })
    }
}

/// Parse a date cell. Timestamp forms lose their time component; the
/// simulator works in whole days.
fn parse_date(value: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(stamp.date());
        }
    }
    Err(EngineError::InvalidDate {
        value: trimmed.to_string(),
    })
}

fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>, EngineError> {
    match value {
        Some(v) if !v.is_finite() => Err(EngineError::NonFinite { field, value: v }),
        other => Ok(other),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
