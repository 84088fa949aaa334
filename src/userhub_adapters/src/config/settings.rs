use secrecy::Secret;
use serde::Deserialize;

use crate::token::JwtConfig;

/// Runtime configuration, deserialized once at startup and injected into
/// whatever needs it. Nothing reads the environment after load time.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub postgres: PostgresSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub bus: BusSettings,
}

#[derive(Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_token_ttl_in_seconds")]
    pub token_ttl_in_seconds: i64,
}

#[derive(Clone, Deserialize)]
pub struct BusSettings {
    #[serde(default = "default_request_timeout_in_millis")]
    pub request_timeout_in_millis: u64,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            request_timeout_in_millis: default_request_timeout_in_millis(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

// Tokens are long-lived: clients hold them for up to a year.
fn default_token_ttl_in_seconds() -> i64 {
    365 * 24 * 60 * 60
}

fn default_request_timeout_in_millis() -> u64 {
    5_000
}

impl Settings {
    /// Load from the environment, `.env` included. Variables are prefixed
    /// and nested with double underscores, e.g. `USERHUB__JWT__SECRET`.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("USERHUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            jwt_secret: self.jwt.secret.clone(),
            token_ttl_in_seconds: self.jwt.token_ttl_in_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_the_optional_fields() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "postgres": { "url": "postgres://localhost/userhub" },
            "jwt": { "secret": "test-secret" },
        }))
        .unwrap();

        assert_eq!(settings.postgres.max_connections, 5);
        assert_eq!(settings.jwt.token_ttl_in_seconds, 365 * 24 * 60 * 60);
        assert_eq!(settings.bus.request_timeout_in_millis, 5_000);
    }
}
