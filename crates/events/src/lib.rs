//! # Maalgah Events
//!
//! This crate defines the real-time message structures used for WebSocket communication
//! between the live calculator on the landing page and the server.
//!
//! As a Layer 0 crate, it depends only on `core-types` and provides the definitive
//! language for all real-time calculator updates.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{CalculatorSnapshot, ClientMessage, RevenueFrame, WsMessage};
