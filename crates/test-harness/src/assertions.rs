//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context and the expected vs. actual state, so a
//! scenario test failing mid-walk points straight at the offending step.

use instr_types::Aabb;
use render_bridge::{HandleId, MockBackend};
use step_engine::StepHandler;

use crate::helpers::HarnessError;

/// Assert that every listed handle is currently visible.
pub fn assert_visible(
    backend: &MockBackend,
    handles: &[HandleId],
    ctx: &str,
) -> Result<(), HarnessError> {
    for &h in handles {
        if !backend.is_visible(h) {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{ctx}] expected {h:?} visible"),
            });
        }
    }
    Ok(())
}

/// Assert that every listed handle is currently hidden.
pub fn assert_hidden(
    backend: &MockBackend,
    handles: &[HandleId],
    ctx: &str,
) -> Result<(), HarnessError> {
    for &h in handles {
        if backend.is_visible(h) {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{ctx}] expected {h:?} hidden"),
            });
        }
    }
    Ok(())
}

/// Assert the handler sits at the expected global step index.
pub fn assert_index(
    handler: &StepHandler,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = handler.get_current_step_index();
    if actual != expected {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected step index {expected}, got {actual}"),
        });
    }
    Ok(())
}

/// Assert `outer` fully contains `inner`.
pub fn assert_contains(outer: &Aabb, inner: &Aabb, ctx: &str) -> Result<(), HarnessError> {
    if !outer.contains_box(inner) {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] {outer:?} does not contain {inner:?}"),
        });
    }
    Ok(())
}

/// Assert two backends agree on visibility for the first `n` handles.
///
/// Handle ids are allocated in build order, which is deterministic for a
/// given walk, so the same id names the same step geometry in both backends.
pub fn assert_same_visibility(
    a: &MockBackend,
    b: &MockBackend,
    n: u64,
    ctx: &str,
) -> Result<(), HarnessError> {
    for i in 0..n {
        let h = HandleId(i);
        if a.is_visible(h) != b.is_visible(h) {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{ctx}] visibility mismatch for {h:?}: {} vs {}",
                    a.is_visible(h),
                    b.is_visible(h)
                ),
            });
        }
    }
    Ok(())
}
