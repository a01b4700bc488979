use instr_types::*;
use nalgebra::{Matrix3, Point3};
use render_bridge::{MockBackend, RenderBackend};

fn part(x: f64, y: f64, z: f64) -> Placement {
    Placement {
        target: PlacementTarget::Part {
            part: PartId("3001".to_string()),
        },
        color: ColorCode(4),
        position: Point3::new(x, y, z),
        rotation: Matrix3::identity(),
    }
}

#[test]
fn build_parts_bounds_cover_all_placements() {
    let mut backend = MockBackend::new();
    let built = backend
        .build_parts(&[part(0.0, 0.0, 0.0), part(50.0, 0.0, 0.0)])
        .unwrap();

    assert_eq!(built.bounds.min, Point3::new(-10.0, -10.0, -10.0));
    assert_eq!(built.bounds.max, Point3::new(60.0, 10.0, 10.0));
    assert!(backend.is_visible(built.handle));
    assert!(!backend.is_old(built.handle));
}

#[test]
fn empty_build_has_empty_bounds() {
    let mut backend = MockBackend::new();
    let built = backend.build_parts(&[]).unwrap();
    assert!(built.bounds.is_empty());
}

#[test]
fn style_and_visibility_toggles_are_idempotent() {
    let mut backend = MockBackend::new();
    let built = backend.build_parts(&[part(0.0, 0.0, 0.0)]).unwrap();

    backend.set_old(built.handle, true);
    backend.set_old(built.handle, true);
    assert!(backend.is_old(built.handle));

    backend.set_visible(built.handle, false);
    backend.set_visible(built.handle, false);
    assert!(!backend.is_visible(built.handle));

    backend.set_visible(built.handle, true);
    assert!(backend.is_visible(built.handle));
}

#[test]
fn removed_handles_become_no_ops() {
    let mut backend = MockBackend::new();
    let built = backend.build_parts(&[part(0.0, 0.0, 0.0)]).unwrap();
    backend.remove(built.handle);

    assert_eq!(backend.live_handles(), 0);
    backend.set_visible(built.handle, true);
    assert!(!backend.is_visible(built.handle));

    let mut glow = Vec::new();
    backend.glow_objects(built.handle, &mut glow);
    assert!(glow.is_empty());
}

#[test]
fn glow_ids_are_unique_per_placement() {
    let mut backend = MockBackend::new();
    let a = backend.build_parts(&[part(0.0, 0.0, 0.0), part(1.0, 0.0, 0.0)]).unwrap();
    let b = backend.build_parts(&[part(2.0, 0.0, 0.0)]).unwrap();

    let mut glow = Vec::new();
    backend.glow_objects(a.handle, &mut glow);
    backend.glow_objects(b.handle, &mut glow);
    glow.sort();
    glow.dedup();
    assert_eq!(glow.len(), 3);
}
