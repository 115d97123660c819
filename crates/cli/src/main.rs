use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use trendbot_core::{ConfigLoader, Strategy, StrategyConfig, StrategyKind};
use trendbot_gateway::{Credentials, MarketClient, MarketClientConfig};
use trendbot_runner::{run_scheduled, StrategyRunner};
use trendbot_strategy::{RandomSamplingStrategy, ThreeDayTrendStrategy};

#[derive(Parser)]
#[command(name = "trendbot")]
#[command(about = "Scheduled trend-following trading agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduled trading loop
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Credentials JSON file; falls back to TRENDBOT_API_CLIENT /
        /// TRENDBOT_API_PASSWORD environment variables
        #[arg(long)]
        credentials: Option<String>,
        /// Override the configured strategy (three-day-trend | random-sampling)
        #[arg(long)]
        strategy: Option<String>,
        /// Execute a single cycle and exit
        #[arg(long)]
        once: bool,
    },
}

fn parse_strategy(value: &str) -> Result<StrategyKind> {
    match value {
        "three-day-trend" => Ok(StrategyKind::ThreeDayTrend),
        "random-sampling" => Ok(StrategyKind::RandomSampling),
        other => bail!("unknown strategy '{other}', expected three-day-trend or random-sampling"),
    }
}

fn build_strategy(config: &StrategyConfig) -> Box<dyn Strategy> {
    match config.kind {
        StrategyKind::ThreeDayTrend => {
            Box::new(ThreeDayTrendStrategy::new(config.max_candidates_per_side))
        }
        StrategyKind::RandomSampling => Box::new(RandomSamplingStrategy::new()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            credentials,
            strategy,
            once,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();

            let mut config = ConfigLoader::load(&config)?;
            if let Some(kind) = strategy {
                config.strategy.kind = parse_strategy(&kind)?;
            }

            let credentials = match credentials {
                Some(path) => Credentials::from_file(path)?,
                None => Credentials::from_env()?,
            };

            let client = MarketClient::new(
                MarketClientConfig::from_app(&config.gateway),
                credentials,
            )?;
            let strategy = build_strategy(&config.strategy);

            tracing::info!(
                strategy = strategy.name(),
                base_url = %config.gateway.base_url,
                interval_secs = config.scheduler.interval_secs,
                "starting trendbot"
            );

            let mut runner = StrategyRunner::new(Arc::new(client), strategy);
            if once {
                runner.run_cycle().await;
            } else {
                run_scheduled(runner, &config.scheduler).await;
            }

            Ok(())
        }
    }
}
