use nalgebra::{Matrix3, Point3};
use serde::{Deserialize, Serialize};

use crate::color::ColorCode;
use crate::model::{ModelId, PartId};

/// What a placement puts into the scene: a concrete part or a nested model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlacementTarget {
    Part { part: PartId },
    SubModel { model: ModelId },
}

/// One instance of a part or sub-model inside its parent: color, translation
/// and a 3x3 rotation matrix (which may mirror).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub target: PlacementTarget,
    pub color: ColorCode,
    pub position: Point3<f64>,
    pub rotation: Matrix3<f64>,
}

impl Placement {
    /// An identity placement of a model, used to seed a root handler.
    pub fn root(model: ModelId) -> Self {
        Self {
            target: PlacementTarget::SubModel { model },
            color: ColorCode::INHERIT,
            position: Point3::origin(),
            rotation: Matrix3::identity(),
        }
    }

    /// Compose this placement with the parent placement it lives under.
    ///
    /// The result is the placement expressed in the parent's parent frame,
    /// with an inherited color resolved against the parent's color.
    pub fn place_at(&self, parent: &Placement) -> Placement {
        Placement {
            target: self.target.clone(),
            color: self.color.resolve(parent.color),
            position: parent.rotation * self.position + parent.position.coords,
            rotation: parent.rotation * self.rotation,
        }
    }

    /// The sub-model this placement references, if any.
    pub fn sub_model(&self) -> Option<ModelId> {
        match &self.target {
            PlacementTarget::SubModel { model } => Some(*model),
            PlacementTarget::Part { .. } => None,
        }
    }
}
