//! Delivery endpoint discovery
//!
//! The redirector's client-side code names the real delivery endpoint inside an
//! inline script. How that name is found changes whenever the redirector changes,
//! so it lives behind [`EndpointDiscovery`] and can be swapped without touching
//! the rest of the pipeline.

use crate::config::RedirectorConfig;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Scheme-optional `host/path` with at least one dot, as written in page scripts
#[allow(clippy::expect_used)]
static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?[\w/\-?=%.]+\.[\w/\-?=%.]+").expect("URL pattern must compile")
});

/// Locates the delivery endpoint on a short-link page
pub trait EndpointDiscovery: Send + Sync {
    /// Pick the endpoint from the text of the page's inline scripts
    ///
    /// Never fails: when nothing matches, the implementation's default endpoint
    /// is returned.
    fn discover_endpoint(&self, scripts: &[String]) -> String;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Regex scan over inline scripts with a configured fallback
#[derive(Clone, Debug)]
pub struct ScriptEndpointDiscovery {
    pattern: Regex,
    marker: String,
    fallback: String,
}

impl ScriptEndpointDiscovery {
    /// Discovery using the built-in URL pattern
    ///
    /// Only scripts containing `marker` are scanned; an empty marker scans all.
    pub fn new(marker: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            pattern: URL_LIKE.clone(),
            marker: marker.into(),
            fallback: fallback.into(),
        }
    }

    /// Discovery configured from [`RedirectorConfig`]
    pub fn from_config(config: &RedirectorConfig) -> Self {
        Self::new(
            config.script_marker.clone(),
            config.fallback_endpoint.clone(),
        )
    }

    /// Replace the URL pattern (the whole match is taken as the endpoint)
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }
}

impl EndpointDiscovery for ScriptEndpointDiscovery {
    fn discover_endpoint(&self, scripts: &[String]) -> String {
        let found = scripts
            .iter()
            .filter(|text| self.marker.is_empty() || text.contains(&self.marker))
            .find_map(|text| self.pattern.find(text))
            .map(|m| m.as_str().to_string());

        match found {
            Some(endpoint) => {
                debug!(endpoint = %endpoint, "delivery endpoint found in page script");
                endpoint
            }
            None => {
                debug!(endpoint = %self.fallback, "no endpoint in page scripts, using fallback");
                self.fallback.clone()
            }
        }
    }

    fn name(&self) -> &'static str {
        "script-regex"
    }
}
