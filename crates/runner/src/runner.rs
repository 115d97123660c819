//! One decision cycle, end to end.
//!
//! Fetch portfolio and instruments, fan out history fetches, hand the
//! assembled [`CycleState`] to the strategy, submit the resulting orders.
//! A cycle has no return value; its outcomes are observable through the
//! log stream and the market's own state.

use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use trendbot_core::{
    CycleState, Instrument, MarketGateway, OrderDecision, OrderRequest, PortfolioSnapshot, Side,
    Strategy, TradeHistory,
};

pub struct StrategyRunner {
    gateway: Arc<dyn MarketGateway>,
    strategy: Box<dyn Strategy>,
}

impl StrategyRunner {
    #[must_use]
    pub fn new(gateway: Arc<dyn MarketGateway>, strategy: Box<dyn Strategy>) -> Self {
        Self { gateway, strategy }
    }

    /// Runs one full decision cycle.
    ///
    /// Portfolio or instruments failure aborts the cycle before any
    /// instrument-level call is made. Per-instrument failures are scoped
    /// to that instrument. Nothing here is fatal to the process.
    pub async fn run_cycle(&mut self) {
        let portfolio = match self.gateway.fetch_portfolio().await {
            Ok(portfolio) => portfolio,
            Err(e) => {
                tracing::warn!(error = %e, "portfolio fetch failed, aborting cycle");
                return;
            }
        };

        let instruments = match self.gateway.fetch_instruments().await {
            Ok(instruments) => instruments,
            Err(e) => {
                tracing::warn!(error = %e, "instruments fetch failed, aborting cycle");
                return;
            }
        };

        tracing::info!(
            cash = portfolio.cash,
            positions = portfolio.positions.len(),
            instruments = instruments.len(),
            "cycle state fetched"
        );

        self.log_open_orders(&portfolio).await;

        let histories = self.fetch_histories(&instruments).await;

        let cycle = CycleState {
            portfolio,
            instruments,
            histories,
        };

        let orders = self.strategy.decide(&cycle);
        tracing::info!(
            strategy = self.strategy.name(),
            orders = orders.len(),
            "decision complete"
        );

        for order in &orders {
            self.submit(order).await;
        }
    }

    /// Logs open orders for every held instrument. Observability only;
    /// failures never abort the cycle.
    async fn log_open_orders(&self, portfolio: &PortfolioSnapshot) {
        for position in &portfolio.positions {
            let symbol = &position.instrument.symbol;
            match self.gateway.fetch_open_orders(&position.instrument).await {
                Ok(orders) => tracing::info!(
                    %symbol,
                    buy = orders.buy.len(),
                    sell = orders.sell.len(),
                    "open orders"
                ),
                Err(e) => tracing::warn!(%symbol, error = %e, "open orders fetch failed"),
            }
        }
    }

    /// Fans out history fetches, one task per instrument. All fetches
    /// complete (or are recorded as failed) before selection proceeds; a
    /// failed fetch excludes only that instrument.
    async fn fetch_histories(
        &self,
        instruments: &[Instrument],
    ) -> HashMap<String, TradeHistory> {
        let tasks: Vec<_> = instruments
            .iter()
            .cloned()
            .map(|instrument| {
                let gateway = Arc::clone(&self.gateway);
                tokio::spawn(async move {
                    let result = gateway.fetch_history(&instrument).await;
                    (instrument, result)
                })
            })
            .collect();

        let mut histories = HashMap::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok((instrument, Ok(history))) => {
                    histories.insert(instrument.symbol, history);
                }
                Ok((instrument, Err(e))) => {
                    tracing::warn!(
                        symbol = %instrument.symbol,
                        error = %e,
                        "history fetch failed, excluding instrument"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "history task failed");
                }
            }
        }
        histories
    }

    /// Submits one order and logs the market's decision. Rejected and
    /// failed submissions are terminal for this cycle; the next tick
    /// re-evaluates from scratch.
    async fn submit(&self, order: &OrderRequest) {
        let result = match order.side {
            Side::Buy => self.gateway.submit_buy(order).await,
            Side::Sell => self.gateway.submit_sell(order).await,
        };
        match result {
            Ok(OrderDecision::Acknowledged { trade_id }) => {
                tracing::info!(
                    symbol = %order.symbol,
                    side = ?order.side,
                    quantity = order.quantity,
                    price = order.price,
                    %trade_id,
                    "order acknowledged"
                );
            }
            Ok(OrderDecision::Rejected { reason, trade_id }) => {
                tracing::warn!(
                    symbol = %order.symbol,
                    side = ?order.side,
                    %trade_id,
                    %reason,
                    "order rejected"
                );
            }
            Err(e) => {
                tracing::warn!(
                    symbol = %order.symbol,
                    side = ?order.side,
                    error = %e,
                    "order submission failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashSet;
    use std::sync::Mutex;
    use trendbot_core::{OpenOrders, PortfolioElement, Trade};

    /// Scripted gateway that records every call it receives.
    struct StubGateway {
        portfolio: Option<PortfolioSnapshot>,
        instruments: Option<Vec<Instrument>>,
        histories: HashMap<String, TradeHistory>,
        failing_histories: HashSet<String>,
        reject_submissions: bool,
        fail_submissions: bool,
        fail_open_orders: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubGateway {
        fn new() -> Self {
            Self {
                portfolio: Some(PortfolioSnapshot::default()),
                instruments: Some(Vec::new()),
                histories: HashMap::new(),
                failing_histories: HashSet::new(),
                reject_submissions: false,
                fail_submissions: false,
                fail_open_orders: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MarketGateway for StubGateway {
        async fn fetch_portfolio(&self) -> anyhow::Result<PortfolioSnapshot> {
            self.record("portfolio");
            self.portfolio
                .clone()
                .ok_or_else(|| anyhow::anyhow!("portfolio unavailable"))
        }

        async fn fetch_instruments(&self) -> anyhow::Result<Vec<Instrument>> {
            self.record("instruments");
            self.instruments
                .clone()
                .ok_or_else(|| anyhow::anyhow!("instruments unavailable"))
        }

        async fn fetch_history(&self, instrument: &Instrument) -> anyhow::Result<TradeHistory> {
            self.record(format!("history:{}", instrument.symbol));
            if self.failing_histories.contains(&instrument.symbol) {
                anyhow::bail!("history unavailable for {}", instrument.symbol);
            }
            Ok(self
                .histories
                .get(&instrument.symbol)
                .cloned()
                .unwrap_or_default())
        }

        async fn fetch_open_orders(&self, instrument: &Instrument) -> anyhow::Result<OpenOrders> {
            self.record(format!("orders:{}", instrument.symbol));
            if self.fail_open_orders {
                anyhow::bail!("orders unavailable");
            }
            Ok(OpenOrders::default())
        }

        async fn submit_buy(&self, order: &OrderRequest) -> anyhow::Result<OrderDecision> {
            self.record(format!("buy:{}", order.symbol));
            self.decide(order)
        }

        async fn submit_sell(&self, order: &OrderRequest) -> anyhow::Result<OrderDecision> {
            self.record(format!("sell:{}", order.symbol));
            self.decide(order)
        }
    }

    impl StubGateway {
        fn decide(&self, order: &OrderRequest) -> anyhow::Result<OrderDecision> {
            if self.fail_submissions {
                anyhow::bail!("submission transport failure");
            }
            if self.reject_submissions {
                return Ok(OrderDecision::Rejected {
                    reason: "insufficient funds".to_string(),
                    trade_id: order.client_trade_id.clone(),
                });
            }
            Ok(OrderDecision::Acknowledged {
                trade_id: order.client_trade_id.clone(),
            })
        }
    }

    /// Strategy that emits a fixed set of orders and captures the cycle
    /// state it was handed.
    struct ScriptedStrategy {
        orders: Vec<OrderRequest>,
        seen: Arc<Mutex<Option<CycleState>>>,
    }

    impl Strategy for ScriptedStrategy {
        fn decide(&mut self, cycle: &CycleState) -> Vec<OrderRequest> {
            *self.seen.lock().unwrap() = Some(cycle.clone());
            self.orders.clone()
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn runner_with(
        gateway: StubGateway,
        orders: Vec<OrderRequest>,
    ) -> (StrategyRunner, Arc<StubGateway>, Arc<Mutex<Option<CycleState>>>) {
        let gateway = Arc::new(gateway);
        let seen = Arc::new(Mutex::new(None));
        let strategy = ScriptedStrategy {
            orders,
            seen: Arc::clone(&seen),
        };
        let runner = StrategyRunner::new(
            Arc::clone(&gateway) as Arc<dyn MarketGateway>,
            Box::new(strategy),
        );
        (runner, gateway, seen)
    }

    fn history_of(price: i64) -> TradeHistory {
        TradeHistory {
            bought: vec![Trade {
                timestamp: "2024-03-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap(),
                price,
            }],
            sold: Vec::new(),
        }
    }

    #[tokio::test]
    async fn portfolio_failure_aborts_before_any_instrument_call() {
        let mut gateway = StubGateway::new();
        gateway.portfolio = None;
        gateway.instruments = Some(vec![Instrument::new("ABC")]);
        let (mut runner, gateway, seen) =
            runner_with(gateway, vec![OrderRequest::buy("ABC", 1, 100)]);

        runner.run_cycle().await;

        assert_eq!(gateway.calls(), vec!["portfolio"]);
        assert!(seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn instruments_failure_aborts_with_zero_orders() {
        let mut gateway = StubGateway::new();
        gateway.instruments = None;
        let (mut runner, gateway, _) =
            runner_with(gateway, vec![OrderRequest::buy("ABC", 1, 100)]);

        runner.run_cycle().await;

        let calls = gateway.calls();
        assert_eq!(calls, vec!["portfolio", "instruments"]);
    }

    #[tokio::test]
    async fn one_failing_history_excludes_only_that_instrument() {
        let mut gateway = StubGateway::new();
        let symbols: Vec<String> = (0..10).map(|i| format!("S{i}")).collect();
        gateway.instruments = Some(symbols.iter().map(Instrument::new).collect());
        for symbol in &symbols {
            gateway.histories.insert(symbol.clone(), history_of(100));
        }
        gateway.failing_histories.insert("S3".to_string());
        let (mut runner, _, seen) = runner_with(gateway, Vec::new());

        runner.run_cycle().await;

        let seen = seen.lock().unwrap();
        let cycle = seen.as_ref().unwrap();
        assert_eq!(cycle.instruments.len(), 10);
        assert_eq!(cycle.histories.len(), 9);
        assert!(!cycle.histories.contains_key("S3"));
        assert!(cycle.histories.contains_key("S4"));
    }

    #[tokio::test]
    async fn open_order_failures_do_not_abort_the_cycle() {
        let mut gateway = StubGateway::new();
        gateway.fail_open_orders = true;
        gateway.portfolio = Some(PortfolioSnapshot {
            positions: vec![PortfolioElement {
                instrument: Instrument::new("HELD"),
                quantity: 5,
            }],
            cash: 1000,
            pending_buys: Vec::new(),
            pending_sells: Vec::new(),
        });
        let (mut runner, gateway, seen) = runner_with(gateway, Vec::new());

        runner.run_cycle().await;

        assert!(gateway.calls().contains(&"orders:HELD".to_string()));
        assert!(seen.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn orders_are_routed_by_side_and_submitted_exactly_once() {
        let gateway = StubGateway::new();
        let orders = vec![
            OrderRequest::sell("DOWN", 5, 90),
            OrderRequest::buy("UP", 2, 120),
        ];
        let (mut runner, gateway, _) = runner_with(gateway, orders);

        runner.run_cycle().await;

        let calls = gateway.calls();
        assert_eq!(
            calls.iter().filter(|c| c.as_str() == "sell:DOWN").count(),
            1
        );
        assert_eq!(calls.iter().filter(|c| c.as_str() == "buy:UP").count(), 1);
    }

    #[tokio::test]
    async fn rejected_submissions_are_not_retried() {
        let mut gateway = StubGateway::new();
        gateway.reject_submissions = true;
        let (mut runner, gateway, _) =
            runner_with(gateway, vec![OrderRequest::buy("ABC", 1, 100)]);

        runner.run_cycle().await;

        let calls = gateway.calls();
        assert_eq!(calls.iter().filter(|c| c.as_str() == "buy:ABC").count(), 1);
    }

    #[tokio::test]
    async fn failed_submissions_are_not_retried() {
        let mut gateway = StubGateway::new();
        gateway.fail_submissions = true;
        let (mut runner, gateway, _) =
            runner_with(gateway, vec![OrderRequest::sell("ABC", 1, 100)]);

        runner.run_cycle().await;

        let calls = gateway.calls();
        assert_eq!(calls.iter().filter(|c| c.as_str() == "sell:ABC").count(), 1);
    }
}
