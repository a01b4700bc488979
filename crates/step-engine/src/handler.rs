use instr_types::{Aabb, ModelId, ModelLibrary, Placement};
use render_bridge::RenderBackend;

use crate::types::{EngineError, StepInfo};

/// Navigation state for one nesting level of the build.
///
/// The handler tree mirrors the sub-model tree reachable from the root
/// model: every composite step owns a child handler, children never point
/// back at their parent.
#[derive(Debug)]
pub struct StepHandler {
    pub(crate) model: ModelId,
    /// The placements that seeded this handler. The first one is the active
    /// instance being built; the rest are rendered on the placement step.
    pub(crate) placements: Vec<Placement>,
    pub(crate) is_root: bool,
    pub(crate) has_extra_parts: bool,
    /// `model.steps.len() + 1` entries; the last one is the placement slot.
    pub(crate) steps: Vec<StepInfo>,
    /// `-1` pre-step, `0..len-1` real step, `len` placement step.
    pub(crate) current: i32,
    pub(crate) total_number_of_steps: usize,
    pub(crate) first_shown_index: usize,
}

impl StepHandler {
    /// Build a handler tree for `placements[0]`'s model.
    ///
    /// Fails if the model (or any referenced sub-model) is missing or has no
    /// steps. Composite children are seeded with the step's own placements,
    /// each transformed by this handler's primary placement. The root handler
    /// computes global step indices immediately.
    pub fn new(
        library: &ModelLibrary,
        placements: Vec<Placement>,
        is_root: bool,
    ) -> Result<Self, EngineError> {
        let primary = placements.first().cloned().ok_or(EngineError::NoPlacements)?;
        let model_id = primary.sub_model().ok_or(EngineError::PlacementNotAModel)?;
        let model = library
            .get(model_id)
            .ok_or(EngineError::ModelNotFound { id: model_id })?;
        if model.steps.is_empty() {
            return Err(EngineError::EmptyModel {
                name: model.name.clone(),
            });
        }

        let mut steps = Vec::with_capacity(model.steps.len() + 1);
        for step in &model.steps {
            let cloned = step.clone_with_color(primary.color);
            if step.is_composite() {
                let seeds: Vec<Placement> =
                    step.placements.iter().map(|p| p.place_at(&primary)).collect();
                let child = StepHandler::new(library, seeds, false)?;
                steps.push(StepInfo::composite(cloned, Box::new(child)));
            } else {
                steps.push(StepInfo::leaf(cloned));
            }
        }
        steps.push(StepInfo::placement_slot());

        let has_extra_parts = placements.len() > 1;
        let mut handler = StepHandler {
            model: model_id,
            placements,
            is_root,
            has_extra_parts,
            steps,
            current: -1,
            total_number_of_steps: 0,
            first_shown_index: 0,
        };
        if is_root {
            handler.recompute_step_indices(1);
        }
        Ok(handler)
    }

    /// Convenience: root handler for a single identity placement of `model`.
    pub fn for_model(library: &ModelLibrary, model: ModelId) -> Result<Self, EngineError> {
        Self::new(library, vec![Placement::root(model)], true)
    }

    /// Number of real steps at this level (excludes the placement slot).
    pub(crate) fn real_len(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    /// Global step count of this subtree (real steps at every level).
    pub fn total_number_of_steps(&self) -> usize {
        self.total_number_of_steps
    }

    pub fn first_shown_index(&self) -> usize {
        self.first_shown_index
    }

    /// Assign global step numbering to this subtree.
    ///
    /// Walks steps in order; a composite step consumes its child's total plus
    /// one (the child's placement step), a leaf consumes one. Must be rerun
    /// from the root whenever the step tree changes shape.
    pub fn recompute_step_indices(&mut self, first_shown_index: usize) {
        self.first_shown_index = first_shown_index;
        let mut total = self.steps.len() - 1;
        let mut shown = first_shown_index;
        for info in &mut self.steps {
            if let Some(child) = info.child.as_mut() {
                child.recompute_step_indices(shown);
                total += child.total_number_of_steps;
                shown += child.total_number_of_steps + 1;
            } else {
                shown += 1;
            }
        }
        self.total_number_of_steps = total;
    }

    /// The 1-based global index of the currently displayed step.
    /// The pre-step maps to `first_shown_index - 1`.
    pub fn get_current_step_index(&self) -> usize {
        if self.current == -1 {
            return self.first_shown_index.saturating_sub(1);
        }
        let cur = self.current as usize;
        if let Some(child) = self.steps[cur].child.as_deref() {
            return child.get_current_step_index();
        }
        let mut index = self.first_shown_index;
        for info in &self.steps[..cur] {
            match info.child.as_deref() {
                Some(child) => index += child.total_number_of_steps + 1,
                None => index += 1,
            }
        }
        index
    }

    // ── Predicates ──────────────────────────────────────────────────────

    pub fn is_at_pre_step(&self) -> bool {
        self.current == -1
    }

    pub fn is_at_first_step(&self) -> bool {
        if self.current != 0 {
            return false;
        }
        match self.steps[0].child.as_deref() {
            Some(child) => child.is_at_first_step(),
            None => true,
        }
    }

    pub fn is_at_placement_step(&self) -> bool {
        self.current == self.real_len() as i32
    }

    pub fn is_at_last_step(&self) -> bool {
        if self.is_at_placement_step() {
            return true;
        }
        if self.current < self.real_len() as i32 - 1 {
            return false;
        }
        match self.steps[self.current as usize].child.as_deref() {
            Some(child) => child.is_at_placement_step(),
            None => true,
        }
    }

    // ── Bounds ──────────────────────────────────────────────────────────

    /// Record this step's local bounds and fold them into the running union.
    ///
    /// The first step of a level must produce geometry; an absent bounding
    /// box there is a broken model and fatal.
    pub(crate) fn set_current_bounds(&mut self, bounds: Option<Aabb>) {
        let cur = self.current as usize;
        if cur == 0 {
            assert!(bounds.is_some(), "illegal state: empty first step");
            self.steps[0].bounds = bounds;
            self.steps[0].accumulated_bounds = bounds;
            return;
        }
        let mut accumulated = self.steps[cur - 1]
            .accumulated_bounds
            .unwrap_or_else(Aabb::empty);
        if let Some(b) = bounds {
            accumulated.expand_to_include_box(&b);
        }
        self.steps[cur].bounds = bounds;
        self.steps[cur].accumulated_bounds = Some(accumulated);
    }

    /// Running union of everything built so far at the active level.
    ///
    /// Panics at the pre-step; callers must check [`Self::is_at_pre_step`].
    pub fn accumulated_bounds(&self) -> Aabb {
        assert!(
            !self.is_at_pre_step(),
            "accumulated bounds queried at pre-step"
        );
        let info = &self.steps[self.current as usize];
        if let Some(child) = info.child.as_deref() {
            if !child.is_at_placement_step() {
                return child.accumulated_bounds();
            }
        }
        info.accumulated_bounds.unwrap_or_else(Aabb::empty)
    }

    /// The active step's own bounds, delegating into an active sub-build.
    ///
    /// Panics at the pre-step.
    pub fn bounds(&self) -> Option<Aabb> {
        assert!(!self.is_at_pre_step(), "bounds queried at pre-step");
        let info = &self.steps[self.current as usize];
        if let Some(child) = info.child.as_deref() {
            if !child.is_at_placement_step() {
                return child.bounds();
            }
        }
        info.bounds
    }

    // ── Visibility and style ────────────────────────────────────────────

    /// Show or hide every step strictly before `idx` at this level.
    pub(crate) fn set_visible_up_to(
        &mut self,
        backend: &mut dyn RenderBackend,
        visible: bool,
        idx: usize,
    ) {
        for info in &mut self.steps[..idx] {
            if let Some(handle) = info.handle {
                backend.set_visible(handle, visible);
                info.visible = visible;
            } else if let Some(child) = info.child.as_mut() {
                child.set_visible(backend, visible);
            }
        }
    }

    /// Show or hide this whole level, extras included.
    pub(crate) fn set_visible(&mut self, backend: &mut dyn RenderBackend, visible: bool) {
        let len = self.real_len();
        self.set_visible_up_to(backend, visible, len);
        if !self.has_extra_parts {
            return;
        }
        if let Some(handle) = self.steps[len].handle {
            backend.set_visible(handle, visible);
            self.steps[len].visible = visible;
        }
    }

    /// Apply the old/current render style to every built handle in this
    /// subtree, extras included.
    pub(crate) fn update_render_style(&mut self, backend: &mut dyn RenderBackend, old: bool) {
        let len = self.real_len();
        for info in &mut self.steps[..len] {
            if let Some(handle) = info.handle {
                backend.set_old(handle, old);
                info.old = old;
            }
            if let Some(child) = info.child.as_mut() {
                child.update_render_style(backend, old);
            }
        }
        if self.has_extra_parts {
            if let Some(handle) = self.steps[len].handle {
                backend.set_old(handle, old);
                self.steps[len].old = old;
            }
        }
    }

    /// Release every render handle in this subtree and reset build state.
    /// Used when the containing model is rebuilt or replaced.
    pub fn remove_geometries(&mut self, backend: &mut dyn RenderBackend) {
        for info in &mut self.steps {
            if let Some(handle) = info.handle.take() {
                backend.remove(handle);
            }
            info.bounds = None;
            info.accumulated_bounds = None;
            info.old = false;
            info.visible = false;
            if let Some(child) = info.child.as_mut() {
                child.remove_geometries(backend);
            }
        }
        self.current = -1;
    }

    /// Re-read every step's rotation instruction from the library after a
    /// rotation-only model reload, then renumber from the root.
    pub fn refresh_rotations(&mut self, library: &ModelLibrary) -> Result<(), EngineError> {
        self.refresh_rotations_inner(library)?;
        if self.is_root {
            self.recompute_step_indices(1);
        }
        Ok(())
    }

    fn refresh_rotations_inner(&mut self, library: &ModelLibrary) -> Result<(), EngineError> {
        let model = library
            .get(self.model)
            .ok_or(EngineError::ModelNotFound { id: self.model })?;
        for (i, info) in self.steps.iter_mut().enumerate() {
            if let Some(step) = info.step.as_mut() {
                step.rotation = model.steps.get(i).and_then(|s| s.rotation);
            }
            if let Some(child) = info.child.as_mut() {
                child.refresh_rotations_inner(library)?;
            }
        }
        Ok(())
    }
}
