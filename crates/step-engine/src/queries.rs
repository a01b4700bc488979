//! Read-only queries about the current step: multiplicity, nesting level,
//! background tint, highlightable objects.

use instr_types::Step;
use render_bridge::{GlowId, RenderBackend};

use crate::handler::StepHandler;
use crate::types::{StepInfo, BACKGROUND_COLORS};

impl StepHandler {
    /// How many physical copies the currently highlighted geometry
    /// represents: the product of placement counts along the active chain.
    pub fn multiplier_of_current_step(&self) -> usize {
        let count = self.placements.len();
        if self.current < 0 {
            return count;
        }
        let info = &self.steps[self.current as usize];
        match info.child.as_deref() {
            Some(child) if !child.is_at_placement_step() => {
                count * child.multiplier_of_current_step()
            }
            _ => count,
        }
    }

    /// Nesting depth of the active sub-build chain: 0 at a leaf step or a
    /// placement step, +1 for each composite level actively being built into.
    pub fn level_of_current_step(&self) -> usize {
        if self.current == -1 {
            log::warn!("level queried at pre-step");
            return 0;
        }
        let info = &self.steps[self.current as usize];
        match info.child.as_deref() {
            Some(child) if !child.is_at_placement_step() => 1 + child.level_of_current_step(),
            _ => 0,
        }
    }

    /// Background tint for the current nesting level, wrapping the palette.
    pub fn background_color_of_current_step(&self) -> &'static str {
        BACKGROUND_COLORS[self.level_of_current_step() % BACKGROUND_COLORS.len()]
    }

    /// Union of highlightable objects over all steps built so far at this
    /// level, placement slot included.
    pub fn glow_objects(&self, backend: &dyn RenderBackend, out: &mut Vec<GlowId>) {
        if self.current < 0 {
            return;
        }
        for info in &self.steps[..=(self.current as usize)] {
            if let Some(handle) = info.handle {
                backend.glow_objects(handle, out);
                continue;
            }
            if let Some(child) = info.child.as_deref() {
                child.glow_objects(backend, out);
            }
        }
    }

    /// The deepest active step's slot. Panics at the pre-step.
    pub fn current_step_info(&self) -> &StepInfo {
        assert!(!self.is_at_pre_step(), "step info queried at pre-step");
        let info = &self.steps[self.current as usize];
        if let Some(child) = info.child.as_deref() {
            if !child.is_at_placement_step() {
                return child.current_step_info();
            }
        }
        info
    }

    /// The deepest active source step; `None` at a placement step.
    /// Panics at the pre-step.
    pub fn current_step(&self) -> Option<&Step> {
        self.current_step_info().step.as_ref()
    }
}
