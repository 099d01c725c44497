//! Intake error types

use thiserror::Error;

/// Errors raised while building or evaluating an intake
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    /// A nutrient identifier outside the tracked set
    #[error("Unknown nutrient: {0}")]
    UnknownNutrient(String),

    /// Negative/non-finite amount or a zero daily count
    #[error("Invalid dose in '{product}': {detail}")]
    InvalidDose { product: String, detail: String },

    #[error("Unknown pregnancy stage: {0} (expected early_mid or late)")]
    UnknownStage(String),
}

/// Result type for intake operations
pub type IntakeResult<T> = Result<T, IntakeError>;
