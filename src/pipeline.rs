//! Pipeline orchestrator.
//!
//! Composes the four passes in their fixed order and guards the whole run
//! with a failure boundary: normalization is best-effort and must never
//! corrupt data worse than doing nothing.

use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};

use crate::rules::{self, RuleSet};
use crate::{artifacts, repair, whitespace};

/// Normalizes `input` through the full pipeline:
/// repair → substitute → strip artifacts → normalize whitespace.
///
/// Total: if any pass faults, the fault is logged and the original input is
/// returned byte-for-byte. There is no partial fallback; a fault in the
/// third pass does not return the second pass's output.
///
/// # Example
///
/// ```
/// let cleaned = ungremlin::normalize("Hello\u{00a0}World\u{2026}\u{200b}");
/// assert_eq!(cleaned, "Hello World...");
/// ```
pub fn normalize(input: &str) -> String {
    with_fault_boundary(input, || run_passes(input))
}

/// Runs `passes`, falling back to `input` unchanged if it panics.
fn with_fault_boundary(input: &str, passes: impl FnOnce() -> String) -> String {
    match panic::catch_unwind(AssertUnwindSafe(passes)) {
        Ok(output) => output,
        Err(fault) => {
            let reason = if let Some(msg) = fault.downcast_ref::<&str>() {
                (*msg).to_string()
            } else if let Some(msg) = fault.downcast_ref::<String>() {
                msg.clone()
            } else {
                "unknown panic payload".to_string()
            };
            tracing::error!(
                %reason,
                input_len = input.len(),
                "normalization fault, returning input unchanged"
            );
            input.to_string()
        }
    }
}

fn run_passes(input: &str) -> String {
    let rules = RuleSet::builtin();

    let repaired = repair::repair(input);
    let substituted = rules::substitute(&repaired, rules);
    let stripped = artifacts::strip_artifacts(&substituted, rules);
    whitespace::normalize_whitespace(&stripped)
}

/// Normalizes independent documents in parallel.
///
/// The pipeline is a pure function over an immutable rule table, so batches
/// need no coordination between invocations.
pub fn normalize_batch<S: AsRef<str> + Sync>(texts: &[S]) -> Vec<String> {
    texts.par_iter().map(|text| normalize(text.as_ref())).collect()
}
