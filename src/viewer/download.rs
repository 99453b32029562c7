//! Attachment download: selection, direct or short-link fetch, verification.

use crate::error::{Error, Result};
use crate::redirector;
use crate::session::RequestContext;
use crate::torrent::verify_torrent_name;
use crate::types::{Attachment, AttachmentKind, ResolvedPayload};
use tracing::{debug, info};

use super::{TfViewer, resolve_link};

impl TfViewer {
    /// Download attachment `item_index` of the post identified by `post_query`
    ///
    /// `post_query` is the post's query string as found in listing links
    /// (e.g. "mode=view&b_id=tmovie&id=359715&page=1").
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`] if the post has no attachment at `item_index`
    ///   (no request is made beyond the post fetch)
    /// - [`Error::FilenameMismatch`] / [`Error::TorrentNameMismatch`] if the
    ///   delivered file is not the advertised one
    /// - [`NetworkError`](crate::error::NetworkError) /
    ///   [`ParseError`](crate::error::ParseError) from any stage
    pub async fn download(&self, post_query: &str, item_index: usize) -> Result<ResolvedPayload> {
        let post_url = self.post_url(post_query);
        let post = self.view(&post_url).await?;

        // The site rejects attachment fetches without the post as referer
        let ctx = RequestContext::with_referer(post_url.as_str());

        let attachment = post
            .attachments
            .get(item_index)
            .ok_or(Error::IndexOutOfRange {
                index: item_index,
                len: post.attachments.len(),
            })?;
        debug!(
            post = %post_url,
            index = item_index,
            filename = %attachment.filename,
            kind = ?attachment.kind,
            "attachment selected"
        );

        let payload = self.fetch_attachment(&ctx, &post_url, attachment).await?;

        if attachment.kind == AttachmentKind::Torrent
            && let Some(inspector) = self.torrent_inspector.as_deref()
        {
            verify_torrent_name(
                inspector,
                &payload.bytes,
                &attachment.filename,
                self.config.torrent_check_ratio,
            )?;
        }

        info!(
            post = %post_url,
            filename = %payload.filename,
            bytes = payload.bytes.len(),
            "attachment downloaded"
        );
        Ok(payload)
    }

    /// Resolve a short-link attachment into its verified payload
    ///
    /// # Errors
    ///
    /// See [`redirector::resolve_indirect`].
    pub async fn resolve_indirect(
        &self,
        ctx: &RequestContext,
        short_link_url: &str,
        expected_filename: &str,
    ) -> Result<ResolvedPayload> {
        redirector::resolve_indirect(
            &self.session,
            self.discovery.as_ref(),
            ctx,
            short_link_url,
            expected_filename,
        )
        .await
    }

    /// Whether `url` points straight at the site's file server
    pub fn is_direct_link(&self, url: &url::Url) -> bool {
        let marker = self.config.direct_download_marker.as_str();
        url.path_segments()
            .is_some_and(|mut segments| segments.any(|segment| segment == marker))
    }

    async fn fetch_attachment(
        &self,
        ctx: &RequestContext,
        post_url: &str,
        attachment: &Attachment,
    ) -> Result<ResolvedPayload> {
        let url = resolve_link(post_url, &attachment.url)?;

        if self.is_direct_link(&url) {
            debug!(url = %url, "direct file-server link");
            let fetched = self.session.get(ctx, url.as_str()).await?;
            return Ok(ResolvedPayload {
                bytes: fetched.bytes,
                filename: attachment.filename.clone(),
            });
        }

        debug!(url = %url, "short-link, delegating to redirector");
        self.resolve_indirect(ctx, url.as_str(), &attachment.filename)
            .await
    }
}
