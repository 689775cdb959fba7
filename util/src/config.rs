//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton holding the runtime
//! settings of the query client: where the GraphQL endpoint lives, how to authenticate
//! against it, and where logs go. Values come from environment variables, with a `.env`
//! file loaded first when present.
//!
//! Tests override individual fields through the `set_*` functions and restore the
//! environment-derived values with [`AppConfig::reset`].

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub graphql_url: String,
    pub api_token: String,
    pub request_timeout_secs: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default, so this never fails. Unparseable numbers fall back to
    /// their defaults as well.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            project_name: env_or("PROJECT_NAME", "speedgrader-query"),
            log_level: env_or("LOG_LEVEL", "speed_grader=info"),
            log_file: env_or("LOG_FILE", "speed_grader.log"),
            log_to_stdout: env_or("LOG_TO_STDOUT", "false") == "true",
            graphql_url: env_or("GRAPHQL_URL", "http://127.0.0.1:3000/api/graphql"),
            api_token: env::var("API_TOKEN").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_graphql_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.graphql_url = value.into());
    }

    pub fn set_api_token(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.api_token = value.into());
    }

    pub fn set_request_timeout_secs(value: u64) {
        AppConfig::set_field(|cfg| cfg.request_timeout_secs = value);
    }
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn graphql_url() -> String {
    AppConfig::global().graphql_url.clone()
}

/// Bearer token for the GraphQL endpoint, `None` when unset or blank.
pub fn api_token() -> Option<String> {
    let token = AppConfig::global().api_token.clone();
    if token.trim().is_empty() { None } else { Some(token) }
}

pub fn request_timeout_secs() -> u64 {
    AppConfig::global().request_timeout_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            env::remove_var("GRAPHQL_URL");
            env::remove_var("REQUEST_TIMEOUT_SECS");
            env::remove_var("API_TOKEN");
        }

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.graphql_url, "http://127.0.0.1:3000/api/graphql");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(cfg.api_token.is_empty());
    }

    #[test]
    #[serial]
    fn test_bad_timeout_falls_back_to_default() {
        unsafe {
            env::set_var("REQUEST_TIMEOUT_SECS", "soon");
        }
        assert_eq!(AppConfig::from_env().request_timeout_secs, 30);

        unsafe {
            env::set_var("REQUEST_TIMEOUT_SECS", "5");
        }
        assert_eq!(AppConfig::from_env().request_timeout_secs, 5);

        unsafe {
            env::remove_var("REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_setters_override_and_reset_restores() {
        unsafe {
            env::remove_var("API_TOKEN");
        }
        AppConfig::reset();

        AppConfig::set_graphql_url("http://grader.test/api/graphql");
        AppConfig::set_api_token("secret");
        assert_eq!(graphql_url(), "http://grader.test/api/graphql");
        assert_eq!(api_token().as_deref(), Some("secret"));

        AppConfig::set_api_token("   ");
        assert_eq!(api_token(), None);

        AppConfig::reset();
        assert_eq!(api_token(), None);
    }

    #[test]
    #[serial]
    fn test_logging_overrides() {
        unsafe {
            env::remove_var("LOG_LEVEL");
            env::remove_var("LOG_TO_STDOUT");
        }
        AppConfig::reset();
        assert_eq!(log_level(), "speed_grader=info");
        assert!(!log_to_stdout());

        AppConfig::set_log_level("speed_grader=debug");
        AppConfig::set_log_to_stdout(true);
        assert_eq!(log_level(), "speed_grader=debug");
        assert!(log_to_stdout());

        AppConfig::reset();
        assert_eq!(log_level(), "speed_grader=info");
    }
}
