//! Order construction and bounding.
//!
//! Converts a selected candidate plus the current portfolio snapshot into
//! a concrete order, or nothing when the sizing rule yields no viable
//! quantity. A `None` here is a no-op, never an error.

use crate::stats::TrendStats;
use trendbot_core::{OrderRequest, PortfolioSnapshot};

/// Fallback sell quantity for an instrument no longer in the portfolio.
pub const MIN_QTY: i64 = 10;

/// Fallback ask when no price signal is available.
pub const MIN_ASK: i64 = 13;

/// Fallback bid when no price signal is available.
pub const MIN_BID: i64 = 79;

/// Fraction of available cash a single buy may spend: `cash / CASH_DIVISOR`.
const CASH_DIVISOR: i64 = 10;

/// Sizes a buy order off the latest day's average price.
///
/// `quantity = cash / 10 / bid`; the division truncates, it does not
/// round. Returns `None` when the budget does not cover a single unit.
#[must_use]
pub fn size_buy(stats: &TrendStats, portfolio: &PortfolioSnapshot) -> Option<OrderRequest> {
    #[allow(clippy::cast_possible_truncation)]
    let bid = stats.averages[0].average.round() as i64;
    if bid <= 0 {
        return None;
    }
    let quantity = portfolio.cash / CASH_DIVISOR / bid;
    if quantity <= 0 {
        return None;
    }
    Some(OrderRequest::buy(&stats.symbol, quantity, bid))
}

/// Sizes a sell order at the predicted next-day price.
///
/// Quantity is the currently held amount; an instrument that is no longer
/// held falls back to [`MIN_QTY`] (degraded behavior, not an error path).
#[must_use]
pub fn size_sell(stats: &TrendStats, portfolio: &PortfolioSnapshot) -> Option<OrderRequest> {
    let quantity = portfolio.held_quantity(&stats.symbol).unwrap_or(MIN_QTY);
    if quantity <= 0 || stats.predicted <= 0 {
        return None;
    }
    Some(OrderRequest::sell(&stats.symbol, quantity, stats.predicted))
}
