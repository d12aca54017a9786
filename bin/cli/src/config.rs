use config::{Config, ConfigError, Environment};
use payfee_logging::LogFormat;
use serde::Deserialize;

/// Settings for the CLI.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// The format for logging.
    pub log_format: LogFormat,
}

impl Settings {
    /// Create a new Settings instance from `PAYFEE_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("log_format", "Minimal")?
            .add_source(Environment::with_prefix("PAYFEE"))
            .build()?;

        config.try_deserialize()
    }
}
