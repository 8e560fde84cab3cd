//! `navrecon-core`: NAV reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded period rows, returns the comparison
//! and the audit trail of everything excluded. No CLI or spreadsheet
//! dependencies.

pub mod classify;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod select;

pub use config::RuleSet;
pub use engine::{extract_period, run, LabeledPeriod};
pub use error::ReconError;
pub use model::{
    Comparison, ComparisonRow, ExcludedRecord, ExclusionReason, PeriodResult, RawRecord, RawValue,
    Record, ReconReport,
};
