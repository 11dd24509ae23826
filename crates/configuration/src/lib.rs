use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{LoggingSettings, OutputFormat, OutputSettings, Settings, SimulationSettings};

/// Name of the configuration file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "costsim";

/// Prefix for environment overrides, e.g. `COSTSIM_SIMULATION__ITERATIONS=5000`.
pub const ENV_PREFIX: &str = "COSTSIM";

/// Loads the application configuration.
///
/// Sources are layered from lowest to highest precedence: built-in defaults, the TOML
/// file (`path` if given, otherwise an optional `costsim.toml` in the working directory),
/// then `COSTSIM_`-prefixed environment variables. The merged result is validated
/// before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}
