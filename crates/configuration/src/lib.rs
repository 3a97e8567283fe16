use std::path::Path;

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{AnalyticsSettings, Config, DataSettings, LoggingSettings, ServerOverrides, ServerSettings};

/// Prefix of environment variables that override file settings, e.g. `BRENT__SERVER__PORT`.
pub const ENV_PREFIX: &str = "BRENT";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file at `path`
/// (optional, a missing file is not an error), then `BRENT__*` environment variables.
/// The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
