//! Configuration types for tf-viewer

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Desktop browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/69.0.3497.100 Safari/537.36";

/// Short-link redirector settings
///
/// The redirector hides its delivery endpoint inside page scripts. When the
/// endpoint cannot be discovered the last known one is used, so it has to stay
/// updatable without a code change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RedirectorConfig {
    /// Endpoint used when no script on the short-link page names one
    #[serde(default = "default_fallback_endpoint")]
    pub fallback_endpoint: String,

    /// Only inline scripts containing this text are scanned (empty = all scripts)
    #[serde(default = "default_script_marker")]
    pub script_marker: String,
}

impl Default for RedirectorConfig {
    fn default() -> Self {
        Self {
            fallback_endpoint: default_fallback_endpoint(),
            script_marker: default_script_marker(),
        }
    }
}

/// Main configuration for [`TfViewer`](crate::TfViewer)
///
/// Supplied once at startup by the settings store and read-only afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the board site (e.g. "http://www.tfreeca22.com")
    pub site_url: String,

    /// Optional HTTP proxy applied to both http and https traffic
    #[serde(default)]
    pub http_proxy: Option<String>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total time allowed for a single request, body included (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Time allowed to establish a connection (default: 10 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Redirector endpoint discovery settings
    #[serde(default)]
    pub redirector: RedirectorConfig,

    /// Path segment identifying direct file-server links (default: "download.php")
    #[serde(default = "default_direct_download_marker")]
    pub direct_download_marker: String,

    /// Share of leading characters compared by the torrent name check (default: 0.4)
    #[serde(default = "default_torrent_check_ratio")]
    pub torrent_check_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            http_proxy: None,
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            redirector: RedirectorConfig::default(),
            direct_download_marker: default_direct_download_marker(),
            torrent_check_ratio: default_torrent_check_ratio(),
        }
    }
}

impl Config {
    /// Configuration pointing at `site_url` with every other setting defaulted
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            ..Default::default()
        }
    }

    /// Site URL without trailing slashes, ready for path concatenation
    pub fn site_base(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Check the configuration for values the client cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.site_base().is_empty() {
            return Err(config_error("site_url must not be empty", "site_url"));
        }
        if let Err(e) = url::Url::parse(self.site_base()) {
            return Err(config_error(
                format!("site_url {:?} is not a valid URL: {}", self.site_url, e),
                "site_url",
            ));
        }
        if let Some(proxy) = self.http_proxy.as_deref()
            && !proxy.is_empty()
            && let Err(e) = url::Url::parse(proxy)
        {
            return Err(config_error(
                format!("http_proxy {:?} is not a valid URL: {}", proxy, e),
                "http_proxy",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(config_error(
                "request_timeout must be at least one second",
                "request_timeout",
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(config_error(
                "connect_timeout must be at least one second",
                "connect_timeout",
            ));
        }
        if !(self.torrent_check_ratio > 0.0 && self.torrent_check_ratio <= 1.0) {
            return Err(config_error(
                format!(
                    "torrent_check_ratio must be in (0, 1], got {}",
                    self.torrent_check_ratio
                ),
                "torrent_check_ratio",
            ));
        }
        if self.direct_download_marker.is_empty() {
            return Err(config_error(
                "direct_download_marker must not be empty",
                "direct_download_marker",
            ));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>, key: &str) -> Error {
    Error::Config {
        message: message.into(),
        key: Some(key.to_string()),
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_fallback_endpoint() -> String {
    "https://file.filetender.net/file7.php".to_string()
}

fn default_script_marker() -> String {
    "filetender".to_string()
}

fn default_direct_download_marker() -> String {
    "download.php".to_string()
}

fn default_torrent_check_ratio() -> f64 {
    0.4
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
