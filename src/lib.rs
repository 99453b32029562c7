//! # tf-viewer
//!
//! Scraping client for a torrent-sharing bulletin board.
//!
//! Walks the site the way a browser would: board listings, post pages, then the
//! attachments. Attachments hosted on the site's own file server are fetched
//! directly; short-link attachments go through the external redirector, whose
//! download form is replayed against the endpoint its page script names. The
//! delivered file is checked against the filename the post advertised.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tf_viewer::{BencodeInspector, Config, TfViewer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let viewer = TfViewer::new(Config::new("http://www.tfreeca22.com"))?
//!         .with_torrent_inspector(Arc::new(BencodeInspector));
//!
//!     let posts = viewer.list("tmovie", "1", None).await?;
//!     if let Some(post) = posts.first() {
//!         let payload = viewer.download(&post.link, 0).await?;
//!         println!("{} ({} bytes)", payload.filename, payload.bytes.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTML document helpers and selectors
pub mod parser;
/// Short-link redirector resolution
pub mod redirector;
/// HTTP session and per-request context
pub mod session;
/// Optional torrent metafile verification
pub mod torrent;
/// Core data types
pub mod types;
/// Utility functions
pub mod utils;
/// Board client (decomposed into focused submodules)
pub mod viewer;

// Re-export commonly used types
pub use config::{Config, RedirectorConfig};
pub use error::{Error, NetworkError, ParseError, Result, ToHttpStatus};
pub use redirector::{EndpointDiscovery, ScriptEndpointDiscovery};
pub use session::{FormMethod, RequestContext, Session};
pub use torrent::{BencodeInspector, TorrentInspector};
pub use types::{
    Attachment, AttachmentKind, KNOWN_BOARDS, PostDetail, PostSummary, ResolvedPayload,
    board_label,
};
pub use viewer::TfViewer;
