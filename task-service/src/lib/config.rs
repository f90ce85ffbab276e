use std::env;
use std::time::Duration as StdDuration;

use auth::AuthSettings;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured. Refused in production.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Longest accepted token lifetime: ten years.
pub const MAX_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

const PRODUCTION: &str = "production";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub run_mode: String,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub hash_cost: u32,
}

impl Config {
    /// Load configuration from defaults, files and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// # Errors
    /// Returns error if values are malformed, or if `RUN_MODE=production`
    /// is combined with the default signing secret.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_with(&run_mode, Environment::default().separator("__"))
    }

    /// Load configuration for `run_mode` with an explicit environment source.
    pub fn load_with(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080_i64)?
            .set_default("server.request_timeout_secs", 15_i64)?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.ttl_seconds", 24 * 60 * 60_i64)?
            .set_default("jwt.issuer", "todo-api")?
            .set_default("password.hash_cost", 3_i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment)
            .set_override("run_mode", run_mode)?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.run_mode == PRODUCTION
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.is_production() && self.jwt.secret == DEFAULT_JWT_SECRET {
            return Err(ConfigError::Message(
                "JWT secret must be set in production environment".to_string(),
            ));
        }
        if !(0..=MAX_TTL_SECONDS).contains(&self.jwt.ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be between 0 and {}, got {}",
                MAX_TTL_SECONDS, self.jwt.ttl_seconds
            )));
        }
        if self.password.hash_cost == 0 {
            return Err(ConfigError::Message(
                "password.hash_cost must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the authentication core.
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            secret: self.jwt.secret.clone(),
            token_ttl: Duration::seconds(self.jwt.ttl_seconds),
            hash_cost: self.password.hash_cost,
            issuer: self.jwt.issuer.clone(),
        }
    }

    pub fn request_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.server.request_timeout_secs)
    }
}
