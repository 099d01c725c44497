//! Intake assessment module
//!
//! Threshold tables, aggregation of products into daily totals, and
//! classification of each total into a band.

pub mod aggregator;
pub mod error;
pub mod report;
pub mod thresholds;

pub use aggregator::{classify, evaluate, Band, IntakeReport, NutrientIntake, SourceContribution};
pub use error::{IntakeError, IntakeResult};
pub use report::render_markdown;
pub use thresholds::{DosageThresholds, ThresholdTable};
