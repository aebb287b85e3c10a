//! Process configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "CLAIMTRACK_BIND_ADDR";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a socket address like 0.0.0.0:8080 (got '{value}')")]
    InvalidBindAddr { key: &'static str, value: String },

    #[error("{0} is set but empty")]
    Empty(&'static str),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                key: BIND_ADDR_ENV,
                value: raw_addr.clone(),
            })?;

        let jwt_secret = match lookup(JWT_SECRET_ENV) {
            Some(secret) if secret.trim().is_empty() => return Err(ConfigError::Empty(JWT_SECRET_ENV)),
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self { bind_addr, jwt_secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = ApiConfig::from_lookup(|key| match key {
            BIND_ADDR_ENV => Some("127.0.0.1:9000".to_string()),
            JWT_SECRET_ENV => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = ApiConfig::from_lookup(|key| (key == BIND_ADDR_ENV).then(|| "localhost".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = ApiConfig::from_lookup(|key| (key == JWT_SECRET_ENV).then(String::new)).unwrap_err();
        assert_eq!(err, ConfigError::Empty(JWT_SECRET_ENV));
    }
}
