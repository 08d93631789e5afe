//! Diff Generation
//!
//! Unified diffs of the regenerated text against what the session loaded,
//! for previewing edits before they are saved.

use diffy::{create_patch, Line, Patch};
use serde::Serialize;

/// Line counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    fn of(patch: &Patch<'_, str>) -> Self {
        let mut stats = Self::default();
        for line in patch.hunks().iter().flat_map(|hunk| hunk.lines()) {
            match line {
                Line::Insert(_) => stats.added += 1,
                Line::Delete(_) => stats.removed += 1,
                Line::Context(_) => {}
            }
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Unified diff from `original` to `modified`, headed with `label`
///
/// Empty when the texts are identical.
pub fn unified_diff(original: &str, modified: &str, label: &str) -> String {
    if original == modified {
        return String::new();
    }

    let patch = create_patch(original, modified).to_string();
    // Replace diffy's generic file names with the real one
    let body: String = patch
        .lines()
        .skip_while(|line| line.starts_with("--- ") || line.starts_with("+++ "))
        .map(|line| format!("{}\n", line))
        .collect();
    format!("--- a/{label}\n+++ b/{label}\n{body}")
}

/// Count the lines added and removed between two texts
pub fn diff_stats(original: &str, modified: &str) -> DiffStats {
    DiffStats::of(&create_patch(original, modified))
}
