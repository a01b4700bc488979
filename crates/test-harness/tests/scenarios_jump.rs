//! `move_to` jumps must land on the same state a stepwise walk reaches:
//! same global index, same visibility per handle, and no duplicate geometry.

use render_bridge::MockBackend;
use test_harness::assertions::*;
use test_harness::helpers::*;

#[test]
fn jump_to_any_index_matches_the_stepwise_walk() {
    for target in 1..=7 {
        let (lib, root) = three_level_library();

        let mut jumped = rooted(&lib, root).unwrap();
        let mut jumped_backend = MockBackend::new();
        jumped.move_to(&mut jumped_backend, target).unwrap();

        let mut walked = rooted(&lib, root).unwrap();
        let mut walked_backend = MockBackend::new();
        for _ in 0..target {
            walked.next_step(&mut walked_backend, false).unwrap();
        }

        assert_index(&jumped, target, "jump target").unwrap();
        assert_index(&walked, target, "walk target").unwrap();
        assert_eq!(
            jumped_backend.builds(),
            walked_backend.builds(),
            "build count diverged at target {target}"
        );
        assert_same_visibility(
            &jumped_backend,
            &walked_backend,
            jumped_backend.builds() as u64,
            &format!("target {target}"),
        )
        .unwrap();
    }
}

#[test]
fn jumping_backward_matches_a_fresh_walk() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    while handler.next_step(&mut backend, false).unwrap() {}
    for target in [4, 2, 6, 1] {
        handler.move_to(&mut backend, target).unwrap();
        assert_index(&handler, target, "backward jump").unwrap();

        let mut fresh = rooted(&lib, root).unwrap();
        let mut fresh_backend = MockBackend::new();
        fresh.move_to(&mut fresh_backend, target).unwrap();
        assert_same_visibility(
            &fresh_backend,
            &backend,
            fresh_backend.builds() as u64,
            &format!("target {target}"),
        )
        .unwrap();
    }
}

#[test]
fn jumps_never_rebuild_existing_geometry() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    handler.move_to(&mut backend, 7).unwrap();
    let built = backend.builds();

    handler.move_to(&mut backend, 1).unwrap();
    handler.move_to(&mut backend, 7).unwrap();
    assert_eq!(backend.builds(), built, "revisited steps were rebuilt");
}

#[test]
fn jump_to_the_current_index_changes_nothing() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    handler.move_to(&mut backend, 5).unwrap();
    let builds = backend.builds();
    handler.move_to(&mut backend, 5).unwrap();
    assert_index(&handler, 5, "no-op jump").unwrap();
    assert_eq!(backend.builds(), builds);
}

#[test]
fn two_level_jump_round_trip_keeps_the_sub_build_consistent() {
    let (lib, root) = two_level_library(3);
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    // Leaf, then three sub steps plus their placement, then a trailing leaf.
    assert_eq!(handler.total_number_of_steps(), 6);

    handler.move_to(&mut backend, 3).unwrap();
    assert_eq!(handler.level_of_current_step(), 1);

    handler.move_to(&mut backend, 6).unwrap();
    assert_eq!(handler.level_of_current_step(), 0);
    assert!(handler.is_at_last_step());

    handler.move_to(&mut backend, 3).unwrap();
    assert_index(&handler, 3, "round trip").unwrap();
    assert_eq!(handler.level_of_current_step(), 1);
}
