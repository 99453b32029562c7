//! Board listing pages.

use crate::config::Config;
use crate::error::{Error, NetworkError, Result};
use crate::parser::{
    Document, ancestor, attribute, child_with_class, children, selectors, text_content,
};
use crate::session::RequestContext;
use crate::types::{PostSummary, board_label};
use tracing::{debug, warn};

use super::TfViewer;

/// Text of the listing badge marking posts with Korean subtitles
const SUBTITLE_BADGE: &str = "한글";

/// Build the listing URL for `board_id`, `page` and an optional search term
///
/// # Errors
///
/// Returns [`NetworkError::InvalidUrl`] if the configured site URL is unusable.
pub fn listing_url(
    config: &Config,
    board_id: &str,
    page: &str,
    search: Option<&str>,
) -> Result<String> {
    let base = format!("{}/board.php", config.site_base());
    let mut url = url::Url::parse(&base).map_err(|source| {
        Error::Network(NetworkError::InvalidUrl {
            url: base.clone(),
            source,
        })
    })?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("mode", "list")
            .append_pair("b_id", board_id)
            .append_pair("page", page);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query
                .append_pair("sc", term)
                .append_pair("x", "0")
                .append_pair("y", "0");
        }
    }

    Ok(url.to_string())
}

/// Board id (`b_id`) referenced by a post link query string
pub fn board_of(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "b_id")
        .map(|(_, value)| value.into_owned())
}

/// Extract the post summaries of `board_id` from a listing page
///
/// Promoted posts from other boards appear in the same markup and are dropped,
/// so every returned link references `board_id`.
pub fn parse_listing(html: &[u8], board_id: &str) -> Vec<PostSummary> {
    let doc = Document::parse(html);
    let mut items = Vec::new();

    for subject in doc.query(&selectors::LIST_SUBJECT) {
        let Some(link) = child_with_class(subject, "a", "stitle") else {
            continue;
        };
        let Some((_, query)) = attribute(link, "href").and_then(|href| href.split_once('?'))
        else {
            debug!("listing entry without a query string, skipping");
            continue;
        };
        if board_of(query).as_deref() != Some(board_id) {
            debug!(link = %query, board = %board_id, "skipping entry from another board");
            continue;
        }

        let subtitle =
            children(subject, "span").any(|span| text_content(span).contains(SUBTITLE_BADGE));
        let date = ancestor(subject, "tr")
            .and_then(|row| row.select(&selectors::LIST_DATE).next())
            .map(text_content)
            .filter(|d| !d.is_empty());

        items.push(PostSummary {
            title: text_content(link),
            link: query.to_string(),
            subtitle,
            date,
        });
    }

    items
}

impl TfViewer {
    /// List the posts on page `page` of board `board_id`, optionally filtered by `search`
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the listing page cannot be fetched.
    pub async fn list(
        &self,
        board_id: &str,
        page: &str,
        search: Option<&str>,
    ) -> Result<Vec<PostSummary>> {
        if board_label(board_id).is_none() {
            warn!(board = %board_id, "listing an unknown board");
        }
        let url = listing_url(&self.config, board_id, page, search)?;
        debug!(url = %url, board = %board_id, page = %page, "fetching listing");

        let fetched = self.session.get(&RequestContext::default(), &url).await?;
        let items = parse_listing(&fetched.bytes, board_id);

        debug!(board = %board_id, count = items.len(), "listing parsed");
        Ok(items)
    }
}
