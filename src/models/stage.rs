//! Pregnancy stage model

use serde::{Deserialize, Serialize};

use crate::intake::{IntakeError, IntakeResult};

/// Physiological stage that selects the iron and choline targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// First and second trimester (weeks 1-28)
    #[default]
    EarlyMid,
    /// Third trimester (week 29 onward)
    Late,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::EarlyMid => "early_mid",
            Stage::Late => "late",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::EarlyMid => "Trimester 1-2 (weeks 1-28)",
            Stage::Late => "Trimester 3 (week 29+)",
        }
    }

    pub fn from_str(s: &str) -> IntakeResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "early_mid" | "earlymid" | "early" | "first" | "second" | "trimester_1" | "trimester_2" | "t1" | "t2" => {
                Ok(Stage::EarlyMid)
            }
            "late" | "third" | "trimester_3" | "t3" => Ok(Stage::Late),
            _ => Err(IntakeError::UnknownStage(s.to_string())),
        }
    }
}
