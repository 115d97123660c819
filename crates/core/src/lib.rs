pub mod config;
pub mod config_loader;
pub mod traits;
pub mod types;

pub use config::{AppConfig, GatewayConfig, SchedulerConfig, StrategyConfig, StrategyKind};
pub use config_loader::ConfigLoader;
pub use traits::{MarketGateway, Strategy};
pub use types::{
    CycleState, Instrument, OpenOrders, OrderDecision, OrderRequest, PortfolioElement,
    PortfolioSnapshot, Side, Trade, TradeHistory,
};
