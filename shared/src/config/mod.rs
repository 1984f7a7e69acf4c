//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email delivery and institutional domain policy
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `verification` - Verification code lifetime, supersession and registration policy
//!
//! Values are layered: built-in defaults for the detected environment, then an
//! optional `config/<environment>.toml` file, then `SS__SECTION__KEY` environment
//! variables. `DATABASE_URL` is honoured as a shortcut for `database.url`.

pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use email::{EmailConfig, NotifierProvider, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use verification::{RegistrationConfig, SupersessionScope, VerificationConfig};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SS";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Registration configuration
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            registration: RegistrationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        };

        if environment.is_production() {
            config.server = ServerConfig::new("0.0.0.0", 8080);
            config.database = DatabaseConfig::new("mysql://prod-db:3306/studysphere")
                .with_max_connections(50);
            config.email.provider = NotifierProvider::Smtp;
        }

        config
    }

    /// Load configuration for the environment named by `ENVIRONMENT`/`ENV`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for a specific environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(environment);

        let settings = Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("email.allowed_domains")
                    .with_list_parse_key("email.blocked_domains")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }
}
