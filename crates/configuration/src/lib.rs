use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, DEFAULT_HOLIDAY_LABEL, DEFAULT_REFERENCE_STORE_ID, SummarySettings,
};

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional: when it is absent, every setting falls back to its
/// compiled-in default, so the binary runs with no configuration on disk.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = SummarySettings::default();
        assert_eq!(settings.reference_store_id, 20);
        assert_eq!(settings.holiday_label, "Thanksgiving");
    }

    #[test]
    fn file_values_override_the_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[summary]\nreference_store_id = 7\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.summary.reference_store_id, 7);
        // Untouched keys keep their defaults.
        assert_eq!(config.summary.holiday_label, "Thanksgiving");
    }
}
