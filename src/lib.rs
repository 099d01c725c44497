//! Prenatal Intake Assessor Library
//!
//! Classifies daily supplement intake against prenatal dosage thresholds.

pub mod build_info;
pub mod intake;
pub mod mcp;
pub mod models;
pub mod session;
pub mod tools;
