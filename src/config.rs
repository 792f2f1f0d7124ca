// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SECRET_KEY` | HS256 signing key for access tokens | dev-only fallback |
//! | `TOKEN_EXPIRE_MINUTES` | Access token lifetime | `60` |
//! | `DATA_DIR` | Directory holding the redb database | `data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

/// Fallback signing key for local development only.
const DEV_SECRET_KEY: &str = "dev-secret-change-me";

/// Default access token lifetime in minutes.
pub const DEFAULT_TOKEN_EXPIRE_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing key for access tokens.
    pub secret_key: String,
    /// Access token lifetime in minutes.
    pub token_expire_minutes: i64,
    /// Directory holding the redb database file.
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using development default");
            DEV_SECRET_KEY.to_string()
        });

        let token_expire_minutes = env::var("TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_MINUTES);

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        Self {
            secret_key,
            token_expire_minutes,
            data_dir,
            host,
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_defaults() {
        // Environment is shared between tests, so only check fields no other
        // test mutates.
        let config = AppConfig::from_env();
        assert!(config.token_expire_minutes > 0);
        assert!(!config.secret_key.is_empty());
        assert!(config.port > 0);
    }
}
