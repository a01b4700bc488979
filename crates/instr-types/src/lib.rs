//! Core data types for 3D assembly instructions: models, build steps,
//! placements, colors, rotation instructions and bounding boxes.

pub mod bounds;
pub mod color;
pub mod model;
pub mod placement;
pub mod rotation;

pub use bounds::*;
pub use color::*;
pub use model::*;
pub use placement::*;
pub use rotation::*;
