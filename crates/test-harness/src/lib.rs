//! Test harness for the step-navigation engine.
//!
//! Provides model-library builders for common assembly shapes and rich
//! assertion helpers against the mock render backend, so scenario tests can
//! script whole builds and verify state at every step.

pub mod assertions;
pub mod helpers;

pub use helpers::HarnessError;
