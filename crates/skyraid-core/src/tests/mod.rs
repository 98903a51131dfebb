//! Cross-module tests for the combat core.
//!
//! Per-module behavior lives in each file's own `#[cfg(test)]` block;
//! this tree holds what spans modules:
//! - `integration.rs`: frame-level scenarios (shot lifecycles, the
//!   bomb state machine, fire cadences, input mapping)
//! - `determinism.rs`: same seed + same tick script → same outcome
//! - `properties.rs`: proptest properties over budgets, cooldowns and
//!   the ship's lane clamp
//! - `helpers.rs`: the `RecordingGame` double and factory functions

mod helpers;

pub use helpers::*;
