//! MockBackend — deterministic test double implementing RenderBackend.
//!
//! Fabricates a fixed-size box of geometry per placement and records every
//! style/visibility toggle, so engine tests can assert on exactly what a real
//! renderer would have been told to do.

use std::collections::HashMap;

use instr_types::{Aabb, ModelId, Placement};
use nalgebra::Point3;

use crate::traits::{BuiltGeometry, GlowId, HandleId, RenderBackend, RenderError};

/// Half extent of the box fabricated around each placement position.
const HALF_EXTENT: f64 = 10.0;

#[derive(Debug, Clone)]
struct HandleState {
    bounds: Aabb,
    old: bool,
    visible: bool,
    glow: Vec<GlowId>,
}

/// Deterministic test double for the renderer.
#[derive(Debug, Default)]
pub struct MockBackend {
    next_handle: u64,
    next_glow: u64,
    handles: HashMap<HandleId, HandleState>,
    builds: usize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&mut self, placements: &[Placement]) -> BuiltGeometry {
        let mut bounds = Aabb::empty();
        let mut glow = Vec::with_capacity(placements.len());
        for placement in placements {
            let p = placement.position;
            bounds.expand_to_include(&Point3::new(
                p.x - HALF_EXTENT,
                p.y - HALF_EXTENT,
                p.z - HALF_EXTENT,
            ));
            bounds.expand_to_include(&Point3::new(
                p.x + HALF_EXTENT,
                p.y + HALF_EXTENT,
                p.z + HALF_EXTENT,
            ));
            glow.push(GlowId(self.next_glow));
            self.next_glow += 1;
        }
        let handle = HandleId(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(
            handle,
            HandleState {
                bounds,
                old: false,
                visible: true,
                glow,
            },
        );
        self.builds += 1;
        BuiltGeometry {
            handle,
            bounds,
        }
    }

    // ── Inspection helpers for tests ────────────────────────────────────

    pub fn is_visible(&self, handle: HandleId) -> bool {
        self.handles.get(&handle).is_some_and(|h| h.visible)
    }

    pub fn is_old(&self, handle: HandleId) -> bool {
        self.handles.get(&handle).is_some_and(|h| h.old)
    }

    pub fn bounds_of(&self, handle: HandleId) -> Option<Aabb> {
        self.handles.get(&handle).map(|h| h.bounds)
    }

    /// Number of handles not yet removed.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    /// Total number of build calls served.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl RenderBackend for MockBackend {
    fn build_parts(&mut self, parts: &[Placement]) -> Result<BuiltGeometry, RenderError> {
        Ok(self.build(parts))
    }

    fn build_model(
        &mut self,
        _model: ModelId,
        placements: &[Placement],
    ) -> Result<BuiltGeometry, RenderError> {
        Ok(self.build(placements))
    }

    fn set_old(&mut self, handle: HandleId, old: bool) {
        if let Some(state) = self.handles.get_mut(&handle) {
            state.old = old;
        }
    }

    fn set_visible(&mut self, handle: HandleId, visible: bool) {
        if let Some(state) = self.handles.get_mut(&handle) {
            state.visible = visible;
        }
    }

    fn remove(&mut self, handle: HandleId) {
        self.handles.remove(&handle);
    }

    fn glow_objects(&self, handle: HandleId, out: &mut Vec<GlowId>) {
        if let Some(state) = self.handles.get(&handle) {
            out.extend_from_slice(&state.glow);
        }
    }
}
