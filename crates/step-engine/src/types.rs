use instr_types::{Aabb, ModelId, Step};
use render_bridge::{HandleId, RenderError};

use crate::handler::StepHandler;

/// One slot in a handler's step list.
///
/// Real steps carry their (color-resolved) source step; the trailing
/// placement slot carries none. `old` and `visible` mirror the last style
/// and visibility the backend was told, so visibility reconciliation is a
/// pure function of `current` plus tree shape.
#[derive(Debug)]
pub struct StepInfo {
    /// Color-resolved clone of the source step. `None` for the placement slot.
    pub step: Option<Step>,
    /// Child handler for a composite step.
    pub child: Option<Box<StepHandler>>,
    /// Render handle, created the first time the step is built.
    pub handle: Option<HandleId>,
    /// This step's own new geometry.
    pub bounds: Option<Aabb>,
    /// Union of all local bounds from the first step through this one.
    pub accumulated_bounds: Option<Aabb>,
    pub old: bool,
    pub visible: bool,
}

impl StepInfo {
    pub(crate) fn leaf(step: Step) -> Self {
        Self {
            step: Some(step),
            child: None,
            handle: None,
            bounds: None,
            accumulated_bounds: None,
            old: false,
            visible: false,
        }
    }

    pub(crate) fn composite(step: Step, child: Box<StepHandler>) -> Self {
        Self {
            step: Some(step),
            child: Some(child),
            handle: None,
            bounds: None,
            accumulated_bounds: None,
            old: false,
            visible: false,
        }
    }

    pub(crate) fn placement_slot() -> Self {
        Self {
            step: None,
            child: None,
            handle: None,
            bounds: None,
            accumulated_bounds: None,
            old: false,
            visible: false,
        }
    }
}

/// Errors from step handler construction and navigation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("model has no steps: {name}")]
    EmptyModel { name: String },

    #[error("model not found: {id}")]
    ModelNotFound { id: ModelId },

    #[error("handler seeded with no placements")]
    NoPlacements,

    #[error("handler seeded with a part placement, expected a model")]
    PlacementNotAModel,

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Background tints indexed by nesting level, wrapping.
pub const BACKGROUND_COLORS: [&str; 8] = [
    "FFFFFF", "FFFF88", "CCFFCC", "FFBB99", "99AAFF", "FF99FF", "D9FF99", "FFC299",
];
