use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{CalculatorDefaults, LoggingSettings, ServerSettings, Settings};
pub use telemetry::init_tracing;

/// Prefix for environment overrides, e.g. `MAALGAH__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "MAALGAH";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file (`path`, or
/// an optional `config.toml` in the working directory), then `MAALGAH__*`
/// environment variables. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    build_settings(builder)
}

/// Deserializes and validates whatever sources `builder` has been given.
pub fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}
