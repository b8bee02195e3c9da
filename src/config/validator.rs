use super::settings::Settings;
use crate::error::AppError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.host.trim().is_empty() {
            return Err(AppError::ConfigError("api.host must not be empty".to_string()));
        }
        if self.api.port == 0 {
            return Err(AppError::ConfigError("api.port must be between 1 and 65535".to_string()));
        }
        if self.rating.max_batch_size == 0 {
            return Err(AppError::ConfigError(
                "rating.max_batch_size must be at least 1".to_string(),
            ));
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::ConfigError(format!(
                "logging.level must be one of {:?}, got {}",
                LOG_LEVELS, self.logging.level
            )));
        }
        Ok(())
    }
}
