//! Camera pose for the currently displayed step.

use instr_types::StepRotation;
use nalgebra::{Matrix3, Point3};

use crate::handler::StepHandler;

impl StepHandler {
    /// Center point and rotation matrix framing the current step's content
    /// in the model's local, upright frame.
    ///
    /// Composition order is fixed: placement inverse, then the render-space
    /// Y-flip inverse, then the step's rotation instruction (if any), applied
    /// to both the rotation and the center point.
    ///
    /// Panics at the pre-step and the placement step — no single frame target
    /// exists there; callers must check [`StepHandler::is_at_pre_step`] and
    /// [`StepHandler::is_at_placement_step`] first.
    pub fn compute_camera_position_rotation(
        &self,
        default_rotation: &Matrix3<f64>,
        use_accumulated_bounds: bool,
    ) -> (Point3<f64>, Matrix3<f64>) {
        assert!(
            !self.is_at_pre_step() && !self.is_at_placement_step(),
            "camera pose undefined at pre-step and placement step"
        );

        let info = &self.steps[self.current as usize];
        if let Some(child) = info.child.as_deref() {
            if !child.is_at_placement_step() {
                return child
                    .compute_camera_position_rotation(default_rotation, use_accumulated_bounds);
            }
        }

        let bounds = if use_accumulated_bounds {
            info.accumulated_bounds
        } else {
            info.bounds
        };
        let mut center = bounds.map(|b| b.center()).unwrap_or_else(Point3::origin);

        let inv_placement = self.placements[0]
            .rotation
            .try_inverse()
            .unwrap_or_else(Matrix3::identity);
        // Render space is Y-down; flip back into the world-space convention.
        let inv_y = Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0);

        let step_matrix = info
            .step
            .as_ref()
            .and_then(|s| s.rotation)
            .map(|r| r.rotation_matrix(default_rotation));

        let mut rotation = Matrix3::identity();
        if let Some(m) = step_matrix {
            rotation *= m;
        }
        rotation *= inv_y;
        rotation *= inv_placement;

        center = inv_placement * center;
        center = inv_y * center;
        if let Some(m) = step_matrix {
            center = m * center;
        }
        center = Point3::from(-center.coords);

        (center, rotation)
    }

    /// The rotation instruction to indicate for the current step, or `None`
    /// when no indicator should be shown.
    ///
    /// Never shown at the first step of a level, nor when the instruction is
    /// equal by value to the previous step's.
    pub fn show_rotator_for_current_step(&self) -> Option<StepRotation> {
        if self.current < 0 {
            return None;
        }
        let idx = self.current as usize;
        let info = &self.steps[idx];
        if let Some(child) = info.child.as_deref() {
            if !child.is_at_placement_step() {
                return child.show_rotator_for_current_step();
            }
        }
        if idx == 0 {
            return None;
        }
        let rotation = info.step.as_ref().and_then(|s| s.rotation);
        let previous = self.steps[idx - 1].step.as_ref().and_then(|s| s.rotation);
        if rotation == previous {
            return None;
        }
        rotation.or(previous)
    }
}
