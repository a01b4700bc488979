use instr_types::{Aabb, ModelId, Placement};

/// Opaque handle to one batch of built geometry (one step's worth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

/// Opaque id of one highlightable object inside a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlowId(pub u64);

/// Result of materializing geometry: the handle plus its bounding box in the
/// same coordinate convention as the placements that produced it.
#[derive(Debug, Clone)]
pub struct BuiltGeometry {
    pub handle: HandleId,
    pub bounds: Aabb,
}

/// Errors surfaced by a render backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("unknown render handle: {0:?}")]
    UnknownHandle(HandleId),

    #[error("geometry generation failed: {reason}")]
    GeometryFailed { reason: String },

    #[error("unknown model: {model}")]
    UnknownModel { model: ModelId },
}

/// Renderer capability consumed by the step-navigation engine.
///
/// `set_old` and `set_visible` are idempotent style/visibility toggles on an
/// already-created handle; they never create or destroy geometry. `remove`
/// releases the handle; later toggles on it are no-ops.
pub trait RenderBackend {
    /// Build geometry for a set of concrete part placements (one leaf step,
    /// already transformed into world coordinates).
    fn build_parts(&mut self, parts: &[Placement]) -> Result<BuiltGeometry, RenderError>;

    /// Build geometry for whole-model instances (the extra placements shown
    /// on a placement step).
    fn build_model(
        &mut self,
        model: ModelId,
        placements: &[Placement],
    ) -> Result<BuiltGeometry, RenderError>;

    /// Switch a handle between the "old" (previously built) and "current"
    /// (just built, highlighted) render styles.
    fn set_old(&mut self, handle: HandleId, old: bool);

    fn set_visible(&mut self, handle: HandleId, visible: bool);

    /// Release a handle and all geometry behind it.
    fn remove(&mut self, handle: HandleId);

    /// Append the handle's highlightable objects to `out`.
    fn glow_objects(&self, handle: HandleId, out: &mut Vec<GlowId>);
}
