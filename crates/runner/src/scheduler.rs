//! Fixed-interval cycle scheduling.

use crate::runner::StrategyRunner;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use trendbot_core::SchedulerConfig;

/// Drives the runner on a fixed interval after an initial delay.
///
/// The cycle is awaited inline, so cycles never overlap: a tick that
/// fires while a cycle is still running waits for it to finish
/// (`MissedTickBehavior::Delay`). Runs until the process shuts down.
pub async fn run_scheduled(mut runner: StrategyRunner, config: &SchedulerConfig) {
    tokio::time::sleep(Duration::from_secs(config.initial_delay_secs)).await;

    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        tracing::debug!("cycle tick");
        runner.run_cycle().await;
    }
}
