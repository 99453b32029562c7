//! Board client split into focused submodules.
//!
//! The `TfViewer` struct and its methods are organized by stage:
//! - [`listing`] - Board listing pages
//! - [`post`] - Post pages and their attachments
//! - [`download`] - Attachment selection, fetch and verification

mod download;
mod listing;
mod post;

pub use listing::{board_of, listing_url, parse_listing};
pub use post::{parse_post, proper_title};

use crate::config::Config;
use crate::error::{Error, NetworkError, ParseError, Result};
use crate::redirector::{EndpointDiscovery, ScriptEndpointDiscovery};
use crate::session::Session;
use crate::torrent::TorrentInspector;
use std::sync::Arc;

/// Client for one board site (cloneable - all fields are Arc-wrapped)
///
/// Holds no per-request state: every call is a fresh round trip and concurrent
/// calls are independent.
#[derive(Clone)]
pub struct TfViewer {
    /// Configuration (read-only after construction)
    pub(crate) config: Arc<Config>,
    /// Shared HTTP client state
    pub(crate) session: Session,
    /// Delivery endpoint discovery for short-links
    pub(crate) discovery: Arc<dyn EndpointDiscovery>,
    /// Optional torrent name check; `None` skips it
    pub(crate) torrent_inspector: Option<Arc<dyn TorrentInspector>>,
}

impl TfViewer {
    /// Create a client from configuration
    ///
    /// Endpoint discovery is configured from `config.redirector`; no torrent
    /// inspector is installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let session = Session::new(&config)?;
        let discovery = Arc::new(ScriptEndpointDiscovery::from_config(&config.redirector));
        Ok(Self {
            config: Arc::new(config),
            session,
            discovery,
            torrent_inspector: None,
        })
    }

    /// Replace the delivery endpoint discovery
    pub fn with_endpoint_discovery(mut self, discovery: Arc<dyn EndpointDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// Enable the torrent name check with `inspector`
    pub fn with_torrent_inspector(mut self, inspector: Arc<dyn TorrentInspector>) -> Self {
        self.torrent_inspector = Some(inspector);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute post URL for a post query string (e.g. "mode=view&b_id=tmovie&id=1")
    pub fn post_url(&self, query: &str) -> String {
        format!(
            "{}/board.php?{}",
            self.config.site_base(),
            query.trim_start_matches('?')
        )
    }

    /// Absolute post URL for a listing href (anything before `?` is replaced)
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHref`] if `href` has no query string.
    pub fn post_url_from_href(&self, href: &str) -> Result<String> {
        match href.split_once('?') {
            Some((_, query)) if !query.is_empty() => Ok(self.post_url(query)),
            _ => Err(Error::Parse(ParseError::InvalidHref {
                href: href.to_string(),
            })),
        }
    }
}

/// Resolve `link` (absolute or relative) against the page it was found on
pub(crate) fn resolve_link(page_url: &str, link: &str) -> Result<url::Url> {
    let invalid = |source| {
        Error::Network(NetworkError::InvalidUrl {
            url: link.to_string(),
            source,
        })
    };
    let base = url::Url::parse(page_url).map_err(invalid)?;
    base.join(link.trim()).map_err(invalid)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> TfViewer {
        TfViewer::new(Config::new("http://www.tfreeca22.com/")).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = TfViewer::new(Config::default()).err().unwrap();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn post_url_joins_site_and_query() {
        assert_eq!(
            viewer().post_url("mode=view&b_id=tmovie&id=359715&page=1"),
            "http://www.tfreeca22.com/board.php?mode=view&b_id=tmovie&id=359715&page=1"
        );
    }

    #[test]
    fn post_url_from_href_keeps_only_query() {
        assert_eq!(
            viewer()
                .post_url_from_href("/tf_viewer/board.php?mode=view&b_id=tv&id=7")
                .unwrap(),
            "http://www.tfreeca22.com/board.php?mode=view&b_id=tv&id=7"
        );
    }

    #[test]
    fn post_url_from_href_requires_query() {
        let err = viewer().post_url_from_href("board.php").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidHref { .. })));
    }

    #[test]
    fn resolve_link_handles_relative_and_absolute() {
        let page = "http://www.tfreeca22.com/board.php?mode=view&b_id=tv&id=7";
        assert_eq!(
            resolve_link(page, "download.php?f=1").unwrap().as_str(),
            "http://www.tfreeca22.com/download.php?f=1"
        );
        assert_eq!(
            resolve_link(page, "http://www.filetender.com/UIj7z")
                .unwrap()
                .as_str(),
            "http://www.filetender.com/UIj7z"
        );
    }
}
