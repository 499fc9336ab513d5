//! Category policy data structures, normalization and CSV loading

mod data;
mod normalize;
pub mod loader;
pub mod presets;

pub use data::{AccrualFrequency, CategoryPolicy, LedgerEntry};
pub use normalize::NormalizedPolicy;
pub use loader::{
    group_ledger, load_categories, load_categories_from_reader, load_ledger,
    load_ledger_from_reader, LedgerRecord,
};
pub use presets::{warehouse_presets, PresetParams};
