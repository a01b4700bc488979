use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::ColorCode;
use crate::placement::{Placement, PlacementTarget};
use crate::rotation::StepRotation;

/// Identifier of a model (a part/sub-assembly definition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub Uuid);

impl ModelId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a concrete part in the part catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub String);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One build step: the placements it adds, plus an optional camera
/// reorientation instruction that takes effect when the step is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub placements: Vec<Placement>,
    pub rotation: Option<StepRotation>,
}

impl Step {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            rotation: None,
        }
    }

    pub fn with_rotation(placements: Vec<Placement>, rotation: StepRotation) -> Self {
        Self {
            placements,
            rotation: Some(rotation),
        }
    }

    /// A step is composite when every placement targets a nested model.
    /// Composite steps are delegated to a child step handler.
    pub fn is_composite(&self) -> bool {
        !self.placements.is_empty()
            && self
                .placements
                .iter()
                .all(|p| matches!(p.target, PlacementTarget::SubModel { .. }))
    }

    /// The sub-model a composite step builds. All placements of a composite
    /// step reference the same model; the first one is authoritative.
    pub fn sub_model(&self) -> Option<ModelId> {
        self.placements.first().and_then(Placement::sub_model)
    }

    /// Clone the step with inherited colors resolved against the parent's
    /// color.
    pub fn clone_with_color(&self, parent: ColorCode) -> Step {
        Step {
            placements: self
                .placements
                .iter()
                .map(|p| Placement {
                    color: p.color.resolve(parent),
                    ..p.clone()
                })
                .collect(),
            rotation: self.rotation,
        }
    }
}

/// A part/sub-assembly definition: a non-empty ordered list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub steps: Vec<Step>,
}

impl Model {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: ModelId::new(),
            name: name.into(),
            steps,
        }
    }
}

/// The resident set of models a step handler tree is built against.
///
/// This is the model-source collaborator: every referenced model must be
/// present before handler construction. Lookup failures are surfaced to the
/// caller, never masked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelLibrary {
    models: HashMap<ModelId, Model>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model, returning its id.
    pub fn insert(&mut self, model: Model) -> ModelId {
        let id = model.id;
        self.models.insert(id, model);
        id
    }

    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models.get(&id)
    }

    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.models.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
