//! Configuration management for kanbanlogiq.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locale::Language;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "kanbanlogiq";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "kanbanlogiq.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "KANBANLOGIQ_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `KANBANLOGIQ_`, nested keys
///    separated by `__`, e.g. `KANBANLOGIQ_ROUTES__ADMIN_HOME`)
/// 2. TOML config file at `~/.config/kanbanlogiq/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Route paths.
    pub routes: RoutesConfig,
    /// Language and translations.
    pub locale: LocaleConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/kanbanlogiq/kanbanlogiq.db`
    pub database_path: Option<PathBuf>,
}

/// Authentication-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 32-byte credential key, hex encoded (64 characters).
    /// Emails and password digests are keyed with it, so changing it
    /// invalidates every stored user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_key: Option<String>,
}

/// URL paths for the application's landing routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Administrator dashboard.
    pub admin_home: String,
    /// Customer dashboard.
    pub customer_home: String,
    /// Role-neutral landing page.
    pub home: String,
    /// Login form.
    pub login: String,
}

/// Locale-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// UI language for built-in messages.
    pub language: Language,
    /// Extra translations, keyed by namespace then key. Merged over the
    /// built-in catalog.
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin_home: "/admin/home".to_string(),
            customer_home: "/customer/home".to_string(),
            home: "/home".to_string(),
            login: "/login".to_string(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: Language::Italian,
            translations: BTreeMap::new(),
        }
    }
}

fn credential_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{64}$").expect("static pattern is valid"))
}

fn route_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/[A-Za-z0-9._~/-]*$").expect("static pattern is valid")
    })
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = &self.auth.credential_key {
            if !credential_key_pattern().is_match(key) {
                return Err(Error::config_validation(
                    "auth.credential_key must be 64 hexadecimal characters",
                ));
            }
        }

        for (name, path) in [
            ("admin_home", &self.routes.admin_home),
            ("customer_home", &self.routes.customer_home),
            ("home", &self.routes.home),
            ("login", &self.routes.login),
        ] {
            if !route_path_pattern().is_match(path) {
                return Err(Error::config_validation(format!(
                    "routes.{name} must be an absolute path, got {path:?}"
                )));
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Decode the credential key.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured or it is malformed.
    pub fn credential_key(&self) -> Result<[u8; 32]> {
        let hex = self.auth.credential_key.as_deref().ok_or_else(|| {
            Error::credential_key(format!(
                "no credential key configured; set auth.credential_key or {ENV_PREFIX}AUTH__CREDENTIAL_KEY"
            ))
        })?;
        let hash = blake3::Hash::from_hex(hex)
            .map_err(|e| Error::credential_key(format!("malformed credential key: {e}")))?;
        Ok(*hash.as_bytes())
    }
}
