//! Intake Tools module
//!
//! MCP tool implementations for the prenatal intake assessor.

pub mod assessment;
pub mod products;
pub mod status;
