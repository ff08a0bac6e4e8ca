use serde::Deserialize;
use service_core::config::{self as core_config, get_env, Environment};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub mongodb: MongoConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub query_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Trust-domain string stamped into the `iss` claim.
    pub issuer: String,
    pub private_key_path: String,
    pub public_key_path: String,
    pub expiry_seconds: i64,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let env_str = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let config = AuthConfig {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", Some("auth-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            store_backend: get_env("STORE_BACKEND", Some("mongo"), is_prod)?
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("vale_food_auth"), is_prod)?,
                query_timeout_secs: get_env("MONGODB_QUERY_TIMEOUT_SECS", Some("5"), is_prod)?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                    })?,
            },
            token: TokenConfig {
                issuer: get_env("TOKEN_ISSUER", Some("vale-food"), is_prod)?,
                private_key_path: get_env(
                    "JWT_PRIVATE_KEY_PATH",
                    Some("dev/keys/jwt_private.pem"),
                    is_prod,
                )?,
                public_key_path: get_env(
                    "JWT_PUBLIC_KEY_PATH",
                    Some("dev/keys/jwt_public.pem"),
                    is_prod,
                )?,
                expiry_seconds: get_env("TOKEN_EXPIRY_SECONDS", Some("3600"), is_prod)?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                    })?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if self.token.issuer.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TOKEN_ISSUER must not be empty"
            )));
        }

        if self.token.expiry_seconds <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TOKEN_EXPIRY_SECONDS must be positive"
            )));
        }

        Ok(())
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}
