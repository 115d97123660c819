//! Domain types shared across the trendbot crates.
//!
//! Everything here is a per-cycle snapshot or an immutable fact supplied by
//! the market gateway. Nothing in this module survives a decision cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A tradable symbol on the remote market.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// One historical fill for an instrument. Prices are integer currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub price: i64,
}

/// Per-instrument trade history split by side.
///
/// Only the `bought` side feeds the price signal; `sold` is carried for
/// completeness of the gateway response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub bought: Vec<Trade>,
    pub sold: Vec<Trade>,
}

/// A currently held position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioElement {
    pub instrument: Instrument,
    pub quantity: i64,
}

/// Read-only portfolio state, fetched fresh at the start of every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub positions: Vec<PortfolioElement>,
    /// Available cash in integer currency units.
    pub cash: i64,
    /// In-flight buy orders, as reported by the market.
    pub pending_buys: Vec<OrderRequest>,
    /// In-flight sell orders, as reported by the market.
    pub pending_sells: Vec<OrderRequest>,
}

impl PortfolioSnapshot {
    /// Looks up the held quantity for a symbol, if any position exists.
    #[must_use]
    pub fn held_quantity(&self, symbol: &str) -> Option<i64> {
        self.positions
            .iter()
            .find(|p| p.instrument.symbol == symbol)
            .map(|p| p.quantity)
    }
}

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// A concrete order to submit to the market. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    /// Fresh v4 UUID; collision probability is negligible.
    pub client_trade_id: String,
    pub quantity: i64,
    pub price: i64,
    pub side: Side,
}

impl OrderRequest {
    /// Builds a buy order with a freshly generated client trade id.
    #[must_use]
    pub fn buy(symbol: impl Into<String>, quantity: i64, price: i64) -> Self {
        Self {
            symbol: symbol.into(),
            client_trade_id: Uuid::new_v4().to_string(),
            quantity,
            price,
            side: Side::Buy,
        }
    }

    /// Builds a sell order with a freshly generated client trade id.
    #[must_use]
    pub fn sell(symbol: impl Into<String>, quantity: i64, price: i64) -> Self {
        Self {
            symbol: symbol.into(),
            client_trade_id: Uuid::new_v4().to_string(),
            quantity,
            price,
            side: Side::Sell,
        }
    }
}

/// The market's decision on a submitted order.
///
/// Transport or decode failure is the `Err` branch of the gateway call, so
/// together with this enum every submission resolves to exactly one of
/// acknowledged, rejected, or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDecision {
    Acknowledged { trade_id: String },
    Rejected { reason: String, trade_id: String },
}

/// Open orders for one instrument, fetched for observability only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOrders {
    pub buy: Vec<OrderRequest>,
    pub sell: Vec<OrderRequest>,
}

/// Everything a strategy sees for one decision cycle.
///
/// Instruments whose history fetch failed are absent from `histories`;
/// that is "no signal", not an error.
#[derive(Debug, Clone, Default)]
pub struct CycleState {
    pub portfolio: PortfolioSnapshot,
    pub instruments: Vec<Instrument>,
    pub histories: HashMap<String, TradeHistory>,
}

impl CycleState {
    /// Returns the history for a symbol, if the fetch succeeded.
    #[must_use]
    pub fn history(&self, symbol: &str) -> Option<&TradeHistory> {
        self.histories.get(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(symbol: &str, quantity: i64) -> PortfolioSnapshot {
        PortfolioSnapshot {
            positions: vec![PortfolioElement {
                instrument: Instrument::new(symbol),
                quantity,
            }],
            cash: 1000,
            pending_buys: Vec::new(),
            pending_sells: Vec::new(),
        }
    }

    #[test]
    fn held_quantity_finds_position() {
        let snapshot = snapshot_with("ABC", 5);
        assert_eq!(snapshot.held_quantity("ABC"), Some(5));
    }

    #[test]
    fn held_quantity_missing_symbol_is_none() {
        let snapshot = snapshot_with("ABC", 5);
        assert_eq!(snapshot.held_quantity("XYZ"), None);
    }

    #[test]
    fn order_request_ids_are_unique() {
        let a = OrderRequest::buy("ABC", 1, 100);
        let b = OrderRequest::buy("ABC", 1, 100);
        assert_ne!(a.client_trade_id, b.client_trade_id);
        assert_eq!(a.side, Side::Buy);
    }

    #[test]
    fn sell_order_carries_sell_side() {
        let order = OrderRequest::sell("ABC", 3, 42);
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.price, 42);
    }
}
