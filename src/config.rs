//! Configuration Module
//!
//! Cache options plus the settings of the admin server binary.

use std::env;

use serde::{Deserialize, Serialize};

// == Cache Config ==
/// Options recognized by the cache.
///
/// Keys may be written in snake_case or camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether a request pipeline should route its traffic through the cache
    #[serde(alias = "enableInterceptor")]
    pub enable_interceptor: bool,
    /// Advisory flag for the request pipeline; the store never reads it
    #[serde(alias = "shouldCacheAuthorization")]
    pub should_cache_authorization: bool,
    /// Log every lookup, insert and bust together with its key
    pub verbose: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_interceptor: true,
            should_cache_authorization: false,
            verbose: false,
        }
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options handed to the cache store
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// JSON file of entries to preload at startup
    pub preload_path: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLE_INTERCEPTOR` - (default: true)
    /// - `CACHE_SHOULD_CACHE_AUTHORIZATION` - (default: false)
    /// - `CACHE_VERBOSE` - (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_PRELOAD_PATH` - preload file (default: none)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: CacheConfig {
                enable_interceptor: env_flag("CACHE_ENABLE_INTERCEPTOR")
                    .unwrap_or(defaults.enable_interceptor),
                should_cache_authorization: env_flag("CACHE_SHOULD_CACHE_AUTHORIZATION")
                    .unwrap_or(defaults.should_cache_authorization),
                verbose: env_flag("CACHE_VERBOSE").unwrap_or(defaults.verbose),
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            preload_path: env::var("CACHE_PRELOAD_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            preload_path: None,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_flag(&v))
}

/// Parses `true/false/1/0/yes/no` (case-insensitive).
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
