//! Hierarchical step-navigation engine for 3D assembly instructions.
//!
//! A [`StepHandler`] owns one model's ordered list of build steps. A step
//! either places concrete parts (a leaf step) or places instances of a
//! nested sub-model, delegated to a child `StepHandler`. Navigating forward
//! and backward moves a single frontier through the whole nested tree, one
//! leaf step at a time, while keeping visibility, render style and
//! accumulated bounds consistent at every level.
//!
//! `current` at each level ranges over `[-1, len]`:
//! - `-1` — the pre-step: nothing at this level is shown yet.
//! - `0..len-1` — a real step is the active frontier.
//! - `len` — the synthetic placement step: the level is fully built and
//!   placed into its parent, together with any extra instances.

pub mod camera;
pub mod handler;
pub mod nav;
pub mod queries;
pub mod types;

pub use handler::StepHandler;
pub use types::{EngineError, StepInfo, BACKGROUND_COLORS};
