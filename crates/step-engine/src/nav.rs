//! Forward/backward navigation and visibility reconciliation.

use instr_types::{Aabb, Placement};
use render_bridge::RenderBackend;

use crate::handler::StepHandler;
use crate::types::EngineError;

impl StepHandler {
    /// Advance the frontier by one unit: one leaf step, or one step inside
    /// the deepest active composite.
    ///
    /// Returns `Ok(false)` at the placement step, and for a root handler
    /// already at its last real step — the root never auto-advances into its
    /// own placement step.
    ///
    /// With `skip_visual` set, intermediate visibility updates are
    /// suppressed; the caller must reconcile with
    /// [`Self::clean_up_after_walking`] afterwards.
    pub fn next_step(
        &mut self,
        backend: &mut dyn RenderBackend,
        skip_visual: bool,
    ) -> Result<bool, EngineError> {
        if self.is_at_placement_step() || (self.is_root && self.is_at_last_step()) {
            return Ok(false);
        }
        let len = self.real_len() as i32;
        let will_step = if self.current < 0 {
            true
        } else {
            match self.steps[self.current as usize].child.as_deref() {
                Some(child) => child.is_at_placement_step(),
                None => true,
            }
        };

        // Stepping onto the synthetic placement step: the whole level turns
        // "current" again and the extra instances appear.
        if will_step && self.current == len - 1 {
            self.update_render_style(backend, false);
            self.draw_extras(backend)?;
            self.current += 1;
            return Ok(true);
        }

        if will_step {
            if self.current >= 0 {
                let idx = self.current as usize;
                if let Some(child) = self.steps[idx].child.as_mut() {
                    child.update_render_style(backend, true);
                } else if let Some(handle) = self.steps[idx].handle {
                    backend.set_old(handle, true);
                    self.steps[idx].old = true;
                }
            }
            self.current += 1;
        }

        let idx = self.current as usize;
        if self.steps[idx].child.is_none() {
            // Leaf step: materialize on first visit, otherwise reveal.
            if self.steps[idx].handle.is_none() {
                let primary = self.placements[0].clone();
                let parts: Vec<Placement> = match self.steps[idx].step.as_ref() {
                    Some(step) => step.placements.iter().map(|p| p.place_at(&primary)).collect(),
                    None => Vec::new(),
                };
                let built = backend.build_parts(&parts)?;
                let bounds = if built.bounds.is_empty() {
                    None
                } else {
                    Some(built.bounds)
                };
                let info = &mut self.steps[idx];
                info.handle = Some(built.handle);
                info.old = false;
                info.visible = true;
                self.set_current_bounds(bounds);
            } else if !skip_visual {
                if let Some(handle) = self.steps[idx].handle {
                    backend.set_old(handle, false);
                    backend.set_visible(handle, true);
                    let info = &mut self.steps[idx];
                    info.old = false;
                    info.visible = true;
                }
            }
        } else {
            // Composite step: delegate into the sub-build. On first entry the
            // earlier steps at this level disappear so the sub-build stands
            // alone; they return once the child reaches its placement step.
            let entering = matches!(
                self.steps[idx].child.as_deref(),
                Some(child) if child.is_at_pre_step()
            );
            if entering && !skip_visual {
                self.set_visible_up_to(backend, false, idx);
            }
            let mut reached_placement = false;
            let mut child_bounds: Option<Aabb> = None;
            if let Some(child) = self.steps[idx].child.as_mut() {
                child.next_step(backend, skip_visual)?;
                if child.is_at_placement_step() {
                    reached_placement = true;
                    child_bounds = child.steps.last().and_then(|s| s.accumulated_bounds);
                }
            }
            if reached_placement {
                if self.steps[idx].bounds.is_none() {
                    self.set_current_bounds(child_bounds);
                }
                if !skip_visual {
                    self.set_visible_up_to(backend, true, idx);
                }
            }
        }
        Ok(true)
    }

    /// Retreat the frontier by one unit. Returns `Ok(false)` at the pre-step.
    pub fn prev_step(
        &mut self,
        backend: &mut dyn RenderBackend,
        skip_visual: bool,
    ) -> Result<bool, EngineError> {
        if self.is_at_pre_step() {
            return Ok(false);
        }
        let len = self.real_len();

        // Step down from the placement step: extras disappear, the last real
        // step regains the current style, everything earlier stays old.
        if self.is_at_placement_step() {
            if !skip_visual && self.has_extra_parts {
                if let Some(handle) = self.steps[len].handle {
                    backend.set_visible(handle, false);
                    self.steps[len].visible = false;
                }
            }
            for info in &mut self.steps[..len.saturating_sub(1)] {
                if let Some(handle) = info.handle {
                    backend.set_old(handle, true);
                    info.old = true;
                }
                if let Some(child) = info.child.as_mut() {
                    child.update_render_style(backend, true);
                }
            }
            if len > 0 {
                if let Some(handle) = self.steps[len - 1].handle {
                    backend.set_old(handle, false);
                    self.steps[len - 1].old = false;
                }
            }
            self.current -= 1;
            return Ok(true);
        }

        let idx = self.current as usize;
        if self.steps[idx].child.is_none() {
            if !skip_visual {
                if let Some(handle) = self.steps[idx].handle {
                    backend.set_visible(handle, false);
                    self.steps[idx].visible = false;
                }
            }
            self.step_back(backend)?;
        } else {
            // Stepping back into the sub-build: hide this level while the
            // child unwinds; once it reaches its pre-step, restore and leave.
            let child_at_placement = matches!(
                self.steps[idx].child.as_deref(),
                Some(child) if child.is_at_placement_step()
            );
            if child_at_placement && !skip_visual {
                self.set_visible_up_to(backend, false, idx);
            }
            let mut child_at_pre = false;
            if let Some(child) = self.steps[idx].child.as_mut() {
                child.prev_step(backend, skip_visual)?;
                child_at_pre = child.is_at_pre_step();
            }
            if child_at_pre {
                if !skip_visual {
                    self.set_visible_up_to(backend, true, idx);
                }
                self.step_back(backend)?;
            }
        }
        Ok(true)
    }

    /// Decrement `current` and restore the newly-active step to the
    /// current render style. The root never rests at its pre-step: it
    /// immediately bounces forward to the first step again.
    fn step_back(&mut self, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        self.current -= 1;
        if self.current == -1 {
            if self.is_root {
                self.next_step(backend, false)?;
            }
            return Ok(());
        }
        let idx = self.current as usize;
        if let Some(handle) = self.steps[idx].handle {
            backend.set_old(handle, false);
            self.steps[idx].old = false;
        }
        if let Some(child) = self.steps[idx].child.as_mut() {
            child.update_render_style(backend, false);
        }
        Ok(())
    }

    /// Jump to an absolute global step index.
    ///
    /// Walks one step at a time with visual updates suppressed, then runs a
    /// single full visibility reconciliation, avoiding redundant intermediate
    /// renders on long jumps.
    pub fn move_to(
        &mut self,
        backend: &mut dyn RenderBackend,
        to: usize,
    ) -> Result<(), EngineError> {
        let mut remaining = to as i64 - self.get_current_step_index() as i64;
        let forward = remaining > 0;
        while remaining != 0 {
            let stepped = if forward {
                self.next_step(backend, true)?
            } else {
                self.prev_step(backend, true)?
            };
            if !stepped {
                break;
            }
            remaining += if forward { -1 } else { 1 };
        }
        self.clean_up_after_walking(backend);
        Ok(())
    }

    /// Recompute correct visibility bottom-up from `current` and tree shape.
    ///
    /// While a sub-build is in progress everything else at this level is
    /// hidden; otherwise every step up to `current` is shown, every later one
    /// hidden, and the extras slot is visible exactly at the placement step.
    pub fn clean_up_after_walking(&mut self, backend: &mut dyn RenderBackend) {
        let len = self.real_len();
        let cur = self.current;
        let child_active = if cur >= 0 {
            match self.steps[cur as usize].child.as_mut() {
                Some(child) => {
                    child.clean_up_after_walking(backend);
                    !child.is_at_placement_step()
                }
                None => false,
            }
        } else {
            false
        };

        if child_active {
            for (i, info) in self.steps[..len].iter_mut().enumerate() {
                if let Some(handle) = info.handle {
                    if info.visible {
                        backend.set_visible(handle, false);
                        info.visible = false;
                    }
                }
                if i as i32 != cur {
                    if let Some(child) = info.child.as_mut() {
                        child.set_visible(backend, false);
                    }
                }
            }
            if self.has_extra_parts {
                if let Some(handle) = self.steps[len].handle {
                    backend.set_visible(handle, false);
                    self.steps[len].visible = false;
                }
            }
        } else {
            for (i, info) in self.steps[..len].iter_mut().enumerate() {
                let visible = (i as i32) <= cur;
                if let Some(handle) = info.handle {
                    backend.set_visible(handle, visible);
                    info.visible = visible;
                }
                if let Some(child) = info.child.as_mut() {
                    child.set_visible(backend, visible);
                }
            }
            if self.has_extra_parts {
                let visible = cur == len as i32;
                if let Some(handle) = self.steps[len].handle {
                    backend.set_visible(handle, visible);
                    self.steps[len].visible = visible;
                }
            }
        }
    }

    /// Materialize or reveal the placement-step extras.
    ///
    /// With no extra instances the placement slot just inherits the previous
    /// step's bounds unchanged.
    pub(crate) fn draw_extras(
        &mut self,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        let len = self.real_len();
        if !self.has_extra_parts {
            if self.steps[len].bounds.is_none() {
                self.steps[len].bounds = self.steps[len - 1].bounds;
                self.steps[len].accumulated_bounds = self.steps[len - 1].accumulated_bounds;
            }
            return Ok(());
        }

        if self.steps[len].handle.is_none() {
            let mut accumulated = self.steps[len - 1]
                .accumulated_bounds
                .unwrap_or_else(Aabb::empty);
            let built = backend.build_model(self.model, &self.placements[1..])?;
            backend.set_old(built.handle, false);
            accumulated.expand_to_include_box(&built.bounds);
            let slot = &mut self.steps[len];
            slot.handle = Some(built.handle);
            slot.bounds = Some(accumulated);
            slot.accumulated_bounds = Some(accumulated);
            slot.old = false;
            slot.visible = true;
        } else if let Some(handle) = self.steps[len].handle {
            backend.set_visible(handle, true);
            self.steps[len].visible = true;
        }
        Ok(())
    }
}
