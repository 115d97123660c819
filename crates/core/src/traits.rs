use crate::types::{
    CycleState, Instrument, OpenOrders, OrderDecision, OrderRequest, PortfolioSnapshot,
    TradeHistory,
};
use anyhow::Result;
use async_trait::async_trait;

/// Authenticated access to the remote market.
///
/// Every call resolves to a closed outcome: `Ok` carries the full payload,
/// `Err` carries a diagnostic. The core never retries an `Err` within the
/// same cycle.
#[async_trait]
pub trait MarketGateway: Send + Sync {
    async fn fetch_portfolio(&self) -> Result<PortfolioSnapshot>;
    async fn fetch_instruments(&self) -> Result<Vec<Instrument>>;
    async fn fetch_history(&self, instrument: &Instrument) -> Result<TradeHistory>;
    async fn fetch_open_orders(&self, instrument: &Instrument) -> Result<OpenOrders>;
    async fn submit_buy(&self, order: &OrderRequest) -> Result<OrderDecision>;
    async fn submit_sell(&self, order: &OrderRequest) -> Result<OrderDecision>;
}

/// A decision rule over one cycle's prefetched state.
///
/// Implementations are selected at startup and must not hold state across
/// cycles beyond their own tunables.
pub trait Strategy: Send + Sync {
    fn decide(&mut self, cycle: &CycleState) -> Vec<OrderRequest>;
    fn name(&self) -> &str;
}
