//! Random-sampling baseline decision engine.
//!
//! The minimal viable decision rule: instruments enter the buy set and
//! held positions enter the sell set by independent coin flips, priced
//! off the mean historical purchase price with fixed fallbacks. Retained
//! for comparison against the trend engine; no trend logic at all.

use crate::sizer::{MIN_ASK, MIN_BID, MIN_QTY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trendbot_core::{CycleState, OrderRequest, Strategy, TradeHistory};

/// Probability an available instrument is bought this cycle.
pub const P_BUY: f64 = 0.10;

/// Probability a held position is sold this cycle.
pub const P_SELL: f64 = 0.20;

const BID_MARKUP: f64 = 1.1;
const ASK_MARKDOWN: f64 = 0.9;

/// Fraction of available cash bounding a single random buy.
const CASH_DIVISOR: i64 = 4;

pub struct RandomSamplingStrategy {
    p_buy: f64,
    p_sell: f64,
    rng: StdRng,
}

impl RandomSamplingStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            p_buy: P_BUY,
            p_sell: P_SELL,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fully parameterized constructor, used by tests to force selection
    /// probabilities and make the rng deterministic.
    #[must_use]
    pub fn with_rng(p_buy: f64, p_sell: f64, rng: StdRng) -> Self {
        Self { p_buy, p_sell, rng }
    }

    /// Seeded convenience constructor with the production probabilities.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(P_BUY, P_SELL, StdRng::seed_from_u64(seed))
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_bought_price(history: Option<&TradeHistory>) -> Option<f64> {
        let bought = &history?.bought;
        if bought.is_empty() {
            return None;
        }
        let sum: i64 = bought.iter().map(|t| t.price).sum();
        Some(sum as f64 / bought.len() as f64)
    }
}

impl Default for RandomSamplingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomSamplingStrategy {
    fn decide(&mut self, cycle: &CycleState) -> Vec<OrderRequest> {
        let mut orders = Vec::new();

        for instrument in &cycle.instruments {
            if self.rng.gen::<f64>() >= self.p_buy {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let bid = Self::mean_bought_price(cycle.history(&instrument.symbol))
                .map_or(MIN_BID, |mean| (BID_MARKUP * mean) as i64);
            if bid <= 0 {
                continue;
            }
            let limit = cycle.portfolio.cash / CASH_DIVISOR / bid;
            if limit <= 0 {
                continue;
            }
            let quantity = self.rng.gen_range(0..limit);
            if quantity <= 0 {
                continue;
            }
            orders.push(OrderRequest::buy(&instrument.symbol, quantity, bid));
        }

        for position in &cycle.portfolio.positions {
            if self.rng.gen::<f64>() >= self.p_sell {
                continue;
            }
            let symbol = &position.instrument.symbol;
            #[allow(clippy::cast_possible_truncation)]
            let ask = Self::mean_bought_price(cycle.history(symbol))
                .map_or(MIN_ASK, |mean| (ASK_MARKDOWN * mean) as i64);
            let quantity = position.quantity.min(MIN_QTY);
            if quantity <= 0 || ask <= 0 {
                continue;
            }
            orders.push(OrderRequest::sell(symbol, quantity, ask));
        }

        orders
    }

    fn name(&self) -> &str {
        "random-sampling"
    }
}
