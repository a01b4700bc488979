use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// How a step's rotation instruction relates to the viewer's default
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationKind {
    /// Replace the default orientation outright.
    Absolute,
    /// Apply on top of the default orientation.
    Relative,
}

/// A per-step camera reorientation instruction: Euler angles in degrees,
/// applied about X, then Y, then Z.
///
/// Equality is by value; two steps carrying equal instructions do not show
/// a rotation indicator between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRotation {
    pub kind: RotationKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl StepRotation {
    pub fn absolute(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: RotationKind::Absolute,
            x,
            y,
            z,
        }
    }

    pub fn relative(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: RotationKind::Relative,
            x,
            y,
            z,
        }
    }

    /// The rotation matrix this instruction produces, given the viewer's
    /// default orientation.
    pub fn rotation_matrix(&self, default: &Matrix3<f64>) -> Matrix3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z.to_radians());
        let combined = (rx * ry * rz).into_inner();
        match self.kind {
            RotationKind::Absolute => combined,
            RotationKind::Relative => default * combined,
        }
    }
}
