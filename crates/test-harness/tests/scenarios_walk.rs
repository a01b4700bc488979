//! End-to-end walks through a three-level assembly with a twice-placed
//! sub-model, verifying indices, levels, multipliers, bounds and visibility
//! at every step.

use nalgebra::Point3;
use render_bridge::{HandleId, MockBackend};
use test_harness::assertions::*;
use test_harness::helpers::*;

#[test]
fn full_forward_walk_visits_every_global_index() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    assert_eq!(handler.total_number_of_steps(), 7);
    assert_index(&handler, 0, "pre-step").unwrap();

    let mut steps_taken = 0;
    while handler.next_step(&mut backend, false).unwrap() {
        steps_taken += 1;
        assert_index(&handler, steps_taken, "forward walk").unwrap();
    }
    assert_eq!(steps_taken, 7);
    assert!(handler.is_at_last_step());

    // Everything is visible at the end, extras included.
    let built: Vec<HandleId> = (0..backend.builds() as u64).map(HandleId).collect();
    assert_visible(&backend, &built, "end of build").unwrap();
}

#[test]
fn levels_and_multipliers_along_the_walk() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    // (global index, level, multiplier) after each unit step.
    let expected = [
        (1, 0, 1), // root leaf
        (2, 1, 2), // middle's first leaf, placed twice
        (3, 2, 2), // inner leaf 1
        (4, 2, 2), // inner leaf 2
        (5, 1, 2), // inner placed into middle
        (6, 0, 1), // middle placed into root (extras drawn)
        (7, 0, 1), // root trailing leaf
    ];
    for (index, level, multiplier) in expected {
        assert!(handler.next_step(&mut backend, false).unwrap());
        assert_index(&handler, index, "walk").unwrap();
        assert_eq!(handler.level_of_current_step(), level, "level at {index}");
        assert_eq!(
            handler.multiplier_of_current_step(),
            multiplier,
            "multiplier at {index}"
        );
    }
}

#[test]
fn accumulated_bounds_grow_and_cover_the_extras() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    handler.next_step(&mut backend, false).unwrap();
    let mut previous = handler.accumulated_bounds();
    let mut previous_level = handler.level_of_current_step();
    while handler.next_step(&mut backend, false).unwrap() {
        let current = handler.accumulated_bounds();
        let level = handler.level_of_current_step();
        // Descending into a sub-build starts a fresh accumulation; at the
        // same level or on the way back out the box only grows.
        if level <= previous_level {
            assert_contains(&current, &previous, "bounds growth").unwrap();
        }
        previous = current;
        previous_level = level;
    }

    // The second middle instance sits at x=-200; the deepest inner part at
    // x=280. The final accumulated box covers both.
    assert_eq!(previous.min, Point3::new(-210.0, -10.0, -10.0));
    assert_eq!(previous.max, Point3::new(290.0, 10.0, 10.0));
}

#[test]
fn walking_back_returns_through_every_index_and_bounces() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    while handler.next_step(&mut backend, false).unwrap() {}
    assert_index(&handler, 7, "end").unwrap();

    for expected in (1..=6).rev() {
        assert!(handler.prev_step(&mut backend, false).unwrap());
        assert_index(&handler, expected, "backward walk").unwrap();
    }

    // The root bounces off its pre-step and stays on the first step.
    assert!(handler.prev_step(&mut backend, false).unwrap());
    assert_index(&handler, 1, "bounced").unwrap();
    assert!(handler.is_at_first_step());
}

#[test]
fn forward_then_back_restores_visibility() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    // Walk to index 3 (inner sub-build active), remember visibility.
    for _ in 0..3 {
        handler.next_step(&mut backend, false).unwrap();
    }
    let snapshot: Vec<bool> = (0..backend.builds() as u64)
        .map(|i| backend.is_visible(HandleId(i)))
        .collect();

    handler.next_step(&mut backend, false).unwrap();
    handler.prev_step(&mut backend, false).unwrap();
    assert_index(&handler, 3, "round trip").unwrap();

    for (i, &was_visible) in snapshot.iter().enumerate() {
        assert_eq!(
            backend.is_visible(HandleId(i as u64)),
            was_visible,
            "handle {i} changed visibility over a next/prev round trip"
        );
    }
}

#[test]
fn sub_build_isolates_the_rest_of_the_model() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    handler.next_step(&mut backend, false).unwrap(); // root leaf (handle 0)
    handler.next_step(&mut backend, false).unwrap(); // middle leaf (handle 1)

    // The root's finished step disappears while the sub-build runs.
    assert_hidden(&backend, &[HandleId(0)], "sub-build active").unwrap();
    assert_visible(&backend, &[HandleId(1)], "sub-build active").unwrap();

    // Descend further: the middle level's finished step hides too.
    handler.next_step(&mut backend, false).unwrap(); // inner leaf (handle 2)
    assert_hidden(&backend, &[HandleId(0), HandleId(1)], "inner active").unwrap();
    assert_visible(&backend, &[HandleId(2)], "inner active").unwrap();

    // Finish inner: middle's earlier step returns, root's stays hidden.
    handler.next_step(&mut backend, false).unwrap();
    handler.next_step(&mut backend, false).unwrap();
    assert_hidden(&backend, &[HandleId(0)], "inner placed").unwrap();
    assert_visible(&backend, &[HandleId(1)], "inner placed").unwrap();

    // Place middle into the root: everything shows again.
    handler.next_step(&mut backend, false).unwrap();
    assert_visible(
        &backend,
        &[HandleId(0), HandleId(1), HandleId(2), HandleId(3), HandleId(4)],
        "middle placed",
    )
    .unwrap();
}

#[test]
fn glow_objects_accumulate_with_the_frontier() {
    let (lib, root) = three_level_library();
    let mut handler = rooted(&lib, root).unwrap();
    let mut backend = MockBackend::new();

    let mut last = 0;
    while handler.next_step(&mut backend, false).unwrap() {
        let mut glow = Vec::new();
        handler.glow_objects(&backend, &mut glow);
        assert!(
            glow.len() >= last,
            "glow set shrank from {last} to {}",
            glow.len()
        );
        last = glow.len();
    }
    // One glow object per placement built: 5 leaf parts + 1 extra instance.
    assert_eq!(last, 6);
}
