//! Error type, placement constructors and model-library builders.

use instr_types::{
    ColorCode, Model, ModelId, ModelLibrary, PartId, Placement, PlacementTarget, Step,
};
use nalgebra::{Matrix3, Point3};
use step_engine::{EngineError, StepHandler};

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

// ── Placement Constructors ──────────────────────────────────────────────────

/// A concrete part placement with an explicit color.
pub fn part_at(name: &str, color: ColorCode, x: f64, y: f64, z: f64) -> Placement {
    Placement {
        target: PlacementTarget::Part {
            part: PartId(name.to_string()),
        },
        color,
        position: Point3::new(x, y, z),
        rotation: Matrix3::identity(),
    }
}

/// A color-inheriting part placement on the x axis.
pub fn part(name: &str, x: f64) -> Placement {
    part_at(name, ColorCode::INHERIT, x, 0.0, 0.0)
}

/// A color-inheriting sub-model placement on the x axis.
pub fn sub(model: ModelId, x: f64) -> Placement {
    Placement {
        target: PlacementTarget::SubModel { model },
        color: ColorCode::INHERIT,
        position: Point3::new(x, 0.0, 0.0),
        rotation: Matrix3::identity(),
    }
}

// ── Library Builders ────────────────────────────────────────────────────────

/// A flat model: `n` leaf steps, one part each, spaced 30 units apart.
pub fn flat_model(lib: &mut ModelLibrary, name: &str, n: usize) -> ModelId {
    let steps = (0..n)
        .map(|i| Step::new(vec![part("3001", i as f64 * 30.0)]))
        .collect();
    lib.insert(Model::new(name, steps))
}

/// A two-level assembly: the root places a leaf step, then a sub-model with
/// `sub_steps` leaf steps, then a trailing leaf step.
pub fn two_level_library(sub_steps: usize) -> (ModelLibrary, ModelId) {
    let mut lib = ModelLibrary::new();
    let child = flat_model(&mut lib, "sub", sub_steps);
    let root = lib.insert(Model::new(
        "root",
        vec![
            Step::new(vec![part("3001", 0.0)]),
            Step::new(vec![sub(child, 100.0)]),
            Step::new(vec![part("3001", 60.0)]),
        ],
    ));
    (lib, root)
}

/// A three-level assembly with a twice-placed middle sub-model, exercising
/// extras on the placement step and multiplier accounting.
pub fn three_level_library() -> (ModelLibrary, ModelId) {
    let mut lib = ModelLibrary::new();
    let inner = flat_model(&mut lib, "inner", 2);
    let middle = lib.insert(Model::new(
        "middle",
        vec![
            Step::new(vec![part("3020", 0.0)]),
            Step::new(vec![sub(inner, 50.0)]),
        ],
    ));
    let root = lib.insert(Model::new(
        "root",
        vec![
            Step::new(vec![part("3001", 0.0)]),
            Step::new(vec![sub(middle, 200.0), sub(middle, -200.0)]),
            Step::new(vec![part("3001", 90.0)]),
        ],
    ));
    (lib, root)
}

/// Root handler for a model already in the library.
pub fn rooted(lib: &ModelLibrary, model: ModelId) -> Result<StepHandler, HarnessError> {
    Ok(StepHandler::for_model(lib, model)?)
}
