//! User settings for BuzzPay
//!
//! Persisted as `config.json`. Every field has a serde default so older or
//! hand-written files keep loading. A few environment variables override the
//! file so the hosted backend can be configured without touching disk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::BuzzPayPaths;
use crate::error::BuzzPayError;

/// Environment variable holding the hosted data API base URL
pub const STORE_URL_ENV: &str = "BUZZPAY_STORE_URL";
/// Environment variable holding the hosted data API anonymous key
pub const ANON_KEY_ENV: &str = "BUZZPAY_ANON_KEY";
/// Environment variable overriding the host used in share links
pub const SHARE_HOST_ENV: &str = "BUZZPAY_SHARE_HOST";

/// Which record store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON file under the data directory
    #[default]
    Local,
    /// Hosted relational data API over HTTPS
    Remote,
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Selected backend
    #[serde(default)]
    pub backend: StoreBackend,

    /// Base URL of the hosted data API (e.g. `https://xyz.supabase.co`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Anonymous (public) API key for the hosted data API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,

    /// Connect + read timeout for HTTP calls
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            anon_key: None,
            http_timeout_ms: default_http_timeout_ms(),
        }
    }
}

impl StoreSettings {
    /// HTTP timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

/// Timing and policy of the guided request form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSettings {
    /// Debounce before advancing to the next creation step
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Debounce of the recipient phone verification step
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,

    /// How long the last step may sit empty before it is hidden
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Whether an empty description becomes optional after the idle timeout
    #[serde(default = "default_true")]
    pub hide_idle_description: bool,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            hide_idle_description: true,
        }
    }
}

impl WizardSettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

/// User settings for BuzzPay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Record store configuration
    #[serde(default)]
    pub store: StoreSettings,

    /// Host used in share links (`https://<host>/request/<id>`)
    #[serde(default = "default_share_host")]
    pub share_host: String,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Guided form timings
    #[serde(default)]
    pub wizard: WizardSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_http_timeout_ms() -> u64 {
    15_000
}

fn default_step_delay_ms() -> u64 {
    500
}

fn default_verify_delay_ms() -> u64 {
    2_000
}

fn default_idle_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_share_host() -> String {
    "buzzpay.co".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store: StoreSettings::default(),
            share_host: default_share_host(),
            currency_symbol: default_currency(),
            wizard: WizardSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BuzzPayPaths) -> Result<Self, BuzzPayError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BuzzPayError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BuzzPayError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BuzzPayPaths) -> Result<(), BuzzPayError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BuzzPayError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BuzzPayError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (environment in production)
    ///
    /// Setting both the store URL and the key switches the backend to remote.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(STORE_URL_ENV) {
            self.store.url = Some(url.trim().trim_end_matches('/').to_string());
        }
        if let Some(key) = non_empty(ANON_KEY_ENV) {
            self.store.anon_key = Some(key.trim().to_string());
        }
        if non_empty(STORE_URL_ENV).is_some() && non_empty(ANON_KEY_ENV).is_some() {
            self.store.backend = StoreBackend::Remote;
        }
        if let Some(host) = non_empty(SHARE_HOST_ENV) {
            self.share_host = host.trim().to_string();
        }
    }

    /// Check that the selected backend is usable
    pub fn validate(&self) -> Result<(), BuzzPayError> {
        if self.store.backend == StoreBackend::Remote {
            if self.store.url.as_deref().map_or(true, |u| u.trim().is_empty()) {
                return Err(BuzzPayError::Config(format!(
                    "Remote store selected but no URL configured (set {} or store.url)",
                    STORE_URL_ENV
                )));
            }
            if self.store.anon_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                return Err(BuzzPayError::Config(format!(
                    "Remote store selected but no API key configured (set {} or store.anon_key)",
                    ANON_KEY_ENV
                )));
            }
        }
        if self.share_host.trim().is_empty() || self.share_host.contains('/') {
            return Err(BuzzPayError::Config(format!(
                "Invalid share host '{}'",
                self.share_host
            )));
        }
        Ok(())
    }
}
