//! Post pages and their attachments.

use crate::error::{Error, ParseError, Result};
use crate::parser::{Document, attribute, children, selectors, text_content};
use crate::session::RequestContext;
use crate::types::{Attachment, PostDetail};
use chrono::NaiveDateTime;
use tracing::debug;

use super::TfViewer;

const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Title without its leading bracketed category tag
///
/// Everything up to and including the first `]` is dropped. A title without a
/// tag is returned whole.
pub fn proper_title(raw: &str) -> String {
    match raw.split_once(']') {
        Some((_, rest)) => rest.trim().to_string(),
        None => raw.trim().to_string(),
    }
}

fn published_at(url: &str, raw: &str) -> Result<NaiveDateTime> {
    // "등록일 : 2021-05-03 10:15:00" - label before the first ':'
    let value = raw
        .split_once(':')
        .map(|(_, value)| value.trim())
        .ok_or_else(|| ParseError::MissingElement {
            url: url.to_string(),
            element: "published-at value",
        })?;

    NaiveDateTime::parse_from_str(value, PUBLISHED_AT_FORMAT).map_err(|source| {
        Error::Parse(ParseError::InvalidTimestamp {
            url: url.to_string(),
            value: value.to_string(),
            source,
        })
    })
}

/// Parse a post page fetched from `url`
///
/// # Errors
///
/// Returns [`ParseError`] if the title or published-at cell is missing or the
/// timestamp does not parse.
pub fn parse_post(url: &str, html: &[u8]) -> Result<PostDetail> {
    let doc = Document::parse(html);

    let title = doc
        .first(&selectors::VIEW_TITLE)
        .map(text_content)
        .ok_or_else(|| ParseError::MissingElement {
            url: url.to_string(),
            element: "title",
        })?;

    let published = doc
        .first(&selectors::VIEW_PUBLISHED)
        .map(text_content)
        .ok_or_else(|| ParseError::MissingElement {
            url: url.to_string(),
            element: "published-at cell",
        })?;

    // Cells without a link are decoration
    let attachments: Vec<Attachment> = doc
        .query(&selectors::VIEW_FILE_CELL)
        .filter_map(|cell| children(cell, "a").next())
        .filter_map(|link| {
            let href = attribute(link, "href")?;
            Some(Attachment::new(text_content(link), href))
        })
        .collect();

    debug!(url = %url, attachments = attachments.len(), "post parsed");

    Ok(PostDetail {
        page_url: url.to_string(),
        title: proper_title(&title),
        published_at: published_at(url, &published)?,
        attachments,
    })
}

impl TfViewer {
    /// Fetch and parse the post at `url`
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`](crate::error::NetworkError) if the page cannot be
    /// fetched and [`ParseError`] if it lacks the expected structure.
    pub async fn view(&self, url: &str) -> Result<PostDetail> {
        let fetched = self.session.get(&RequestContext::default(), url).await?;
        parse_post(url, &fetched.bytes)
    }

    /// Attachments of the post behind a listing href
    ///
    /// # Errors
    ///
    /// Same as [`view`](Self::view), plus [`ParseError::InvalidHref`] if `href`
    /// has no query string.
    pub async fn attachments_for_href(&self, href: &str) -> Result<Vec<Attachment>> {
        let url = self.post_url_from_href(href)?;
        Ok(self.view(&url).await?.attachments)
    }
}
