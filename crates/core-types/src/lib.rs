//! # Maalgah Core Types
//!
//! The foundational data structures shared by every other crate: the calculator's
//! inputs, the derived metrics snapshot, and the slider domains.
//!
//! As a Layer 0 crate it depends on nothing inside the workspace.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::InputField;
pub use error::CoreError;
pub use structs::{CalculatorInputs, DerivedMetrics, WORKING_DAYS};
