//! Core types produced by the listing, post and download stages

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Boards known on the site, as `(board id, display label)`
pub const KNOWN_BOARDS: &[(&str, &str)] = &[
    ("tmovie", "영화"),
    ("tdrama", "드라마"),
    ("tent", "예능"),
    ("tv", "TV"),
    ("tani", "애니"),
    ("tmusic", "음악"),
];

/// Display label of a known board
pub fn board_label(board_id: &str) -> Option<&'static str> {
    KNOWN_BOARDS
        .iter()
        .find(|(id, _)| *id == board_id)
        .map(|(_, label)| *label)
}

/// One entry of a board listing page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Post subject as shown in the listing
    pub title: String,

    /// Query string of the post link (e.g. "mode=view&b_id=tmovie&id=1")
    pub link: String,

    /// Whether the listing flags the post as carrying Korean subtitles
    pub subtitle: bool,

    /// Date column text, when the row has one
    pub date: Option<String>,
}

/// Attachment classification, decided by filename suffix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// `.torrent` metafile
    Torrent,
    /// `.smi`, `.srt` or `.ass` subtitle
    Subtitle,
    /// Anything else
    Other,
}

impl AttachmentKind {
    /// Classify a filename by its suffix (case-insensitive)
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".torrent") {
            AttachmentKind::Torrent
        } else if [".smi", ".srt", ".ass"].iter().any(|ext| lower.ends_with(ext)) {
            AttachmentKind::Subtitle
        } else {
            AttachmentKind::Other
        }
    }
}

/// A file reference on a post page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Classification by filename suffix
    pub kind: AttachmentKind,

    /// Filename as displayed on the page (not URL-decoded); the expected filename
    pub filename: String,

    /// Link as found on the page: a direct file-server link or a redirector short-link
    pub url: String,
}

impl Attachment {
    /// Build a descriptor, classifying it by `filename`
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            kind: AttachmentKind::from_filename(&filename),
            filename,
            url: url.into(),
        }
    }
}

/// A parsed post page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    /// URL the post was fetched from
    pub page_url: String,

    /// Title with the leading bracketed category tag removed
    pub title: String,

    /// Publication time as printed on the page (site local time, no zone)
    pub published_at: NaiveDateTime,

    /// Attachments in page order; the index is the caller's selection key
    pub attachments: Vec<Attachment>,
}

/// Bytes delivered for an attachment, plus the filename to deliver them under
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPayload {
    /// Raw response body
    pub bytes: Vec<u8>,

    /// Expected filename taken from the post page
    pub filename: String,
}

impl ResolvedPayload {
    /// `Content-Type` to serve the payload with
    pub fn content_type(&self) -> &'static str {
        if self.filename.to_lowercase().ends_with(".torrent") {
            "application/x-bittorrent"
        } else {
            "application/octet-stream"
        }
    }

    /// `Content-Disposition` value with an RFC 5987 encoded filename
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(&self.filename)
        )
    }
}
