//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod notifications;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g.
/// `BOARDING__NOTIFICATIONS__INTERVAL_SECONDS=2`.
pub const ENV_PREFIX: &str = "BOARDING";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Notification bus settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// (`config/{env}.toml`) and environment variables prefixed with
    /// `BOARDING`. Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let parsed: Self = builder.build()?.try_deserialize()?;

        parsed.notifications.validate()?;
        Ok(parsed)
    }
}
