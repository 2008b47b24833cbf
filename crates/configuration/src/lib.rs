// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AnalysisConfig, Config, DataSourceConfig};

/// Loads the application configuration.
///
/// Built-in defaults are layered under an optional `driftlab.toml` file,
/// which in turn is layered under `DRIFTLAB_*` environment variables
/// (e.g. `DRIFTLAB_DATA_SOURCE__BASE_URL`). The merged result is validated
/// before being returned.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("data_source.base_url", "http://localhost:8001")?
        .set_default("analysis.ticker", "AAPL")?
        .set_default("analysis.period", "6M")?
        .set_default("analysis.confidence_level", 0.95)?
        // A config file is optional; the defaults form a working setup.
        .add_source(config::File::with_name("driftlab").required(false))
        .add_source(config::Environment::with_prefix("DRIFTLAB").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
