use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub scheduler: SchedulerConfig,
    pub strategy: StrategyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub requests_per_minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Delay before the first cycle fires.
    pub initial_delay_secs: u64,
    /// Fixed interval between cycle starts. Cycles never overlap; a tick
    /// that fires while a cycle is still running waits for it to finish.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    /// Cap on buy and on sell candidates per cycle. Bounds exposure.
    pub max_candidates_per_side: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    ThreeDayTrend,
    RandomSampling,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                base_url: "https://hackathon.invalid/backend".to_string(),
                timeout_secs: 30,
                requests_per_minute: 60,
            },
            scheduler: SchedulerConfig {
                initial_delay_secs: 10,
                interval_secs: 60,
            },
            strategy: StrategyConfig {
                kind: StrategyKind::ThreeDayTrend,
                max_candidates_per_side: 2,
            },
        }
    }
}
