use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub rating: RatingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    /// Clamp liquidity, governance and operation scores to [0,100] as well.
    pub clamp_all_categories: bool,
    pub max_batch_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for RatingSettings {
    fn default() -> Self {
        RatingSettings {
            clamp_all_categories: false,
            max_batch_size: 100,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Defaults, then `config/default.toml` if present, then `RATING__*` environment variables
    /// (e.g. `RATING__API__PORT=9000`).
    pub fn new() -> Result<Self, AppError> {
        let defaults = Settings::default();

        let settings: Settings = config::Config::builder()
            .set_default("api.host", defaults.api.host)?
            .set_default("api.port", i64::from(defaults.api.port))?
            .set_default("rating.clamp_all_categories", defaults.rating.clamp_all_categories)?
            .set_default("rating.max_batch_size", defaults.rating.max_batch_size as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("RATING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.port, 8080);
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert!(!settings.rating.clamp_all_categories);
        assert_eq!(settings.rating.max_batch_size, 100);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_new_without_overrides_is_valid() {
        let settings = Settings::new().unwrap();
        assert!(settings.validate().is_ok());
    }
}
