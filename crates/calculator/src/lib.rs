//! # Maalgah Revenue Calculator
//!
//! The derivation engine behind the landing page's revenue calculator.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the page,
//!   the server or the animation. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `RevenueCalculator` takes the five slider values and
//!   returns a fresh `DerivedMetrics` snapshot. It cannot fail and holds no state,
//!   so two calls with the same inputs always return identical snapshots.
//!
//! ## Public API
//!
//! - `RevenueCalculator` / `derive`: the derivation pipeline.
//! - `RawMetrics`: the unrounded intermediates, useful for checking rounding behaviour.
//! - `round_to`: the rounding rule applied to every displayed metric.

pub mod engine;
pub mod rounding;

pub use engine::{RawMetrics, RevenueCalculator, derive};
pub use rounding::round_to;
