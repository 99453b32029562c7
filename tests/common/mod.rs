//! Common test utilities for tf-viewer integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use regex::Regex;
use std::sync::Arc;
use tf_viewer::{Config, ScriptEndpointDiscovery, TfViewer};
use wiremock::MockServer;

/// Query string of the fixture post
#[allow(dead_code)]
pub const POST_QUERY: &str = "mode=view&b_id=tmovie&id=359715&page=1";

/// Viewer pointed at `server`
///
/// The default endpoint pattern stops at a `:port`, so mock endpoints are
/// discovered with a pattern that keeps it.
#[allow(dead_code)]
pub fn viewer_for(server: &MockServer) -> TfViewer {
    let config = Config::new(server.uri());
    let discovery = ScriptEndpointDiscovery::new("filetender", format!("{}/fallback.php", server.uri()))
        .with_pattern(Regex::new(r"https?://[\w.:/\-]+\.php").unwrap());
    TfViewer::new(config)
        .unwrap()
        .with_endpoint_discovery(Arc::new(discovery))
}

/// Absolute URL of the fixture post on `server`
#[allow(dead_code)]
pub fn post_url(server: &MockServer) -> String {
    format!("{}/board.php?{}", server.uri(), POST_QUERY)
}
