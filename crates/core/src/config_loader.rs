use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by layering a TOML file and
    /// `TRENDBOT_`-prefixed environment variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed or a
    /// value fails to deserialize.
    pub fn load(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TRENDBOT_").split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ConfigLoader::load("does/not/exist.toml").unwrap();
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.strategy.kind, StrategyKind::ThreeDayTrend);
    }

    #[test]
    fn toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
                [scheduler]
                interval_secs = 5

                [strategy]
                kind = "random-sampling"
                "#,
            )?;
            let config = ConfigLoader::load("Config.toml").unwrap();
            assert_eq!(config.scheduler.interval_secs, 5);
            assert_eq!(config.strategy.kind, StrategyKind::RandomSampling);
            // untouched sections keep their defaults
            assert_eq!(config.gateway.requests_per_minute, 60);
            Ok(())
        });
    }
}
