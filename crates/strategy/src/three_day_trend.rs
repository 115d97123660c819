//! Trend-following decision engine.
//!
//! For every instrument with a usable history, computes 3-day trend
//! statistics, ranks rising instruments as buy candidates and falling
//! ones as sell candidates, and sizes one order per selected candidate.

use crate::selector::{select_candidates, MAX_CANDIDATES_PER_SIDE};
use crate::sizer::{size_buy, size_sell};
use crate::stats::{trend_stats, TrendSignal, TrendStats};
use trendbot_core::{CycleState, OrderRequest, Strategy};

pub struct ThreeDayTrendStrategy {
    max_candidates_per_side: usize,
}

impl ThreeDayTrendStrategy {
    #[must_use]
    pub fn new(max_candidates_per_side: usize) -> Self {
        Self {
            max_candidates_per_side,
        }
    }

    /// Partitions per-instrument trend stats into rising and falling sets.
    /// Instruments without history or without a signal contribute nothing.
    fn classify(cycle: &CycleState) -> (Vec<TrendStats>, Vec<TrendStats>) {
        let mut rising = Vec::new();
        let mut falling = Vec::new();
        for instrument in &cycle.instruments {
            let Some(history) = cycle.history(&instrument.symbol) else {
                continue;
            };
            if let Some(stats) = trend_stats(&instrument.symbol, &history.bought) {
                match stats.signal {
                    TrendSignal::Rising => rising.push(stats),
                    TrendSignal::Falling => falling.push(stats),
                }
            }
        }
        (rising, falling)
    }
}

impl Default for ThreeDayTrendStrategy {
    fn default() -> Self {
        Self::new(MAX_CANDIDATES_PER_SIDE)
    }
}

impl Strategy for ThreeDayTrendStrategy {
    fn decide(&mut self, cycle: &CycleState) -> Vec<OrderRequest> {
        let (rising, falling) = Self::classify(cycle);

        let mut orders = Vec::new();

        for stats in select_candidates(falling, self.max_candidates_per_side) {
            tracing::info!(
                symbol = %stats.symbol,
                predicted = stats.predicted,
                delta = stats.delta,
                "sell candidate"
            );
            if let Some(order) = size_sell(&stats, &cycle.portfolio) {
                orders.push(order);
            }
        }

        for stats in select_candidates(rising, self.max_candidates_per_side) {
            tracing::info!(
                symbol = %stats.symbol,
                predicted = stats.predicted,
                delta = stats.delta,
                "buy candidate"
            );
            if let Some(order) = size_buy(&stats, &cycle.portfolio) {
                orders.push(order);
            }
        }

        orders
    }

    fn name(&self) -> &str {
        "three-day-trend"
    }
}
