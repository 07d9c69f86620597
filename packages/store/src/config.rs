//! # Client configuration: `ajali.toml`
//!
//! Defines the TOML configuration the Ajali! client is built with. The web
//! binary embeds its `ajali.toml` and resolves it through
//! [`ClientConfig::resolve`] at start-up. Every field has a production
//! default, so a missing or empty file is equivalent to
//! [`ClientConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"   # backend root, no trailing slash
//!
//! [notifications]
//! poll_interval_secs = 30   # fixed polling interval
//! backoff = false           # double the delay after each consecutive failure
//! max_backoff_secs = 300    # upper bound when backoff is enabled
//!
//! [incidents]
//! refresh_interval_secs = 15   # incident list reload; 0 disables it
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with builder helpers and TOML (de)serialisation. |
//! | [`ApiConfig`] | Backend location. |
//! | [`NotificationsConfig`] | Poll interval and the optional backoff hardening. |
//! | [`IncidentsConfig`] | Periodic reload of the incident lists. |

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration stored in `ajali.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub incidents: IncidentsConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the backend, e.g. `http://localhost:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Notification polling configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NotificationsConfig {
    /// Poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Exponential backoff on consecutive fetch failures. Off by default.
    #[serde(default)]
    pub backoff: bool,
    /// Cap for the backed-off delay.
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

fn default_max_backoff() -> u64 {
    300
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            backoff: false,
            max_backoff_secs: default_max_backoff(),
        }
    }
}

/// Incident list refresh configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IncidentsConfig {
    /// Seconds between reloads of the dashboard and admin lists. `0` disables.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval() -> u64 {
    15
}

impl Default for IncidentsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl IncidentsConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl NotificationsConfig {
    /// Delay before the next poll, given the number of consecutive failures so far.
    pub fn delay_after(&self, consecutive_failures: u32) -> Duration {
        let base = self.poll_interval_secs.max(1);
        if !self.backoff || consecutive_failures == 0 {
            return Duration::from_secs(base);
        }
        let factor = 1u64 << consecutive_failures.min(16);
        let capped = base
            .saturating_mul(factor)
            .min(self.max_backoff_secs.max(base));
        Duration::from_secs(capped)
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the notification poll interval.
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.notifications.poll_interval_secs = secs;
        self
    }

    /// Builder method to enable exponential backoff, capped at `max_secs`.
    pub fn with_backoff(mut self, max_secs: u64) -> Self {
        self.notifications.backoff = true;
        self.notifications.max_backoff_secs = max_secs;
        self
    }

    /// Builder method to set the incident list refresh interval (`0` disables).
    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        self.incidents.refresh_interval_secs = secs;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Start-up configuration: the embedded TOML document, then an optional
    /// backend URL override. A malformed document falls back to the defaults.
    pub fn resolve(document: Option<&str>, base_url: Option<&str>) -> Self {
        let config = match document.map(Self::from_toml) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                tracing::warn!("ignoring malformed client config: {e}");
                Self::default()
            }
            None => Self::default(),
        };
        match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        }
    }
}
