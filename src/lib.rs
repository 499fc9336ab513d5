//! Accrual Engine - Deterministic balance replay for leave categories
//!
//! This library provides:
//! - Day-by-day balance simulation for PTO-style leave categories
//! - Weekly, biweekly, monthly and annual accrual cadences
//! - Annual grants with grant-week accrual suppression
//! - Yearly accrual caps and maximum-balance ceilings
//! - Usage ledgers replayed in effective-date order
//! - CSV loading and warehouse handbook presets

pub mod error;
pub mod policy;
pub mod simulation;

// Re-export commonly used types
pub use error::EngineError;
pub use policy::{AccrualFrequency, CategoryPolicy, LedgerEntry, NormalizedPolicy};
pub use simulation::{simulate, simulate_traced, AccrualEngine, SimulationTrace, SimulatorConfig};
