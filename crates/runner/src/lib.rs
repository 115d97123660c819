//! Cycle orchestration for the trendbot trading agent.
//!
//! [`StrategyRunner`] drives one decision cycle end to end; `run_scheduled`
//! repeats it on a fixed interval with cycles strictly serialized.

pub mod runner;
pub mod scheduler;

pub use runner::StrategyRunner;
pub use scheduler::run_scheduled;
