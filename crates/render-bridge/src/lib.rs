//! Contract between the step-navigation engine and the renderer.
//!
//! The engine never touches meshes or the GPU; it asks a [`RenderBackend`]
//! to materialize geometry for a set of placements and afterwards toggles
//! style and visibility on the returned handle. [`MockBackend`] is a
//! deterministic test double for driving the engine without a renderer.

pub mod mock_backend;
pub mod traits;

pub use mock_backend::MockBackend;
pub use traits::{BuiltGeometry, GlowId, HandleId, RenderBackend, RenderError};
