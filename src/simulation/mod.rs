//! Simulation engine for single and multi-category balance replays

mod calendar;
mod state;
mod engine;
mod trace;

pub use calendar::{accrual_due, in_grant_week};
pub use state::CapTracker;
pub use engine::{simulate, simulate_traced, AccrualEngine, SimulatorConfig};
pub use trace::{BalancePoint, DayRow, SimulationTrace};

// ============================================================================
// Replay Horizon
// ============================================================================
// Every query walks one calendar day at a time from the category start date
// to the target date. The guarded engine refuses spans beyond this limit so
// a bad target date cannot turn a lookup into an unbounded loop.

/// Default maximum span between start and target dates (about a century)
pub const DEFAULT_MAX_HORIZON_DAYS: i64 = 36_525;
