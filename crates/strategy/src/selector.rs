//! Candidate ranking and capping.

use crate::stats::TrendStats;
use std::cmp::Ordering;

/// Default cap on buy and on sell candidates per cycle. Bounds exposure;
/// tunable through configuration, not an architectural limit.
pub const MAX_CANDIDATES_PER_SIDE: usize = 2;

/// Ranks one side's candidates by steepest trend and keeps the top `cap`.
///
/// Sorting is descending by delta: for buys that is the fastest riser,
/// for sells the fastest faller. Symbol is the secondary key so the
/// ordering stays deterministic on ties.
#[must_use]
pub fn select_candidates(mut candidates: Vec<TrendStats>, cap: usize) -> Vec<TrendStats> {
    candidates.sort_by(|a, b| {
        b.delta
            .partial_cmp(&a.delta)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    candidates.truncate(cap);
    candidates
}
