//! Optional torrent metafile verification
//!
//! When a torrent-decoding capability is wired in, a delivered `.torrent` is
//! decoded and its declared name is compared with the filename the post page
//! listed. The capability is the [`TorrentInspector`] trait; leaving it out
//! disables the check entirely.
//!
//! - [`BencodeInspector`]: built-in decoder reading `info.name`

pub mod bencode;

use crate::error::{Error, Result};
use crate::utils::normalize_ampersands;
use tracing::{debug, warn};

/// Capability that reads the declared name of a torrent metafile
pub trait TorrentInspector: Send + Sync {
    /// Decode `bytes` as a metafile and return its internal name
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTorrent`] if `bytes` is not a usable metafile.
    fn torrent_name(&self, bytes: &[u8]) -> Result<String>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Built-in inspector backed by the crate's bencode decoder
///
/// Prefers `info.name.utf-8` over `info.name` when both are present.
#[derive(Clone, Copy, Debug, Default)]
pub struct BencodeInspector;

impl TorrentInspector for BencodeInspector {
    fn torrent_name(&self, bytes: &[u8]) -> Result<String> {
        let root = bencode::decode(bytes).map_err(Error::InvalidTorrent)?;
        let info = root
            .get("info")
            .ok_or_else(|| Error::InvalidTorrent("metafile has no info dictionary".into()))?;
        let name = info
            .get("name.utf-8")
            .or_else(|| info.get("name"))
            .and_then(|v| v.as_bytes())
            .ok_or_else(|| Error::InvalidTorrent("info dictionary has no name".into()))?;
        Ok(String::from_utf8_lossy(name).into_owned())
    }

    fn name(&self) -> &'static str {
        "bencode"
    }
}

/// Compare a metafile's declared name with the expected `.torrent` filename
///
/// Both names are ampersand-normalized and the `.torrent` suffix is dropped from
/// the expected one. Only the leading `ratio` share of the shorter name's
/// characters has to agree, since release names and filenames often diverge
/// toward the end.
///
/// # Errors
///
/// Returns [`Error::InvalidTorrent`] if decoding fails and
/// [`Error::TorrentNameMismatch`] if the prefixes differ.
pub fn verify_torrent_name(
    inspector: &dyn TorrentInspector,
    bytes: &[u8],
    expected_filename: &str,
    ratio: f64,
) -> Result<()> {
    let declared = inspector.torrent_name(bytes)?;

    let actual = normalize_ampersands(&declared);
    let expected = normalize_ampersands(strip_torrent_suffix(expected_filename));

    let shorter = actual.chars().count().min(expected.chars().count());
    let check_len = (shorter as f64 * ratio).floor() as usize;
    let same_prefix = actual
        .chars()
        .take(check_len)
        .eq(expected.chars().take(check_len));

    debug!(
        inspector = inspector.name(),
        declared = %declared,
        check_len,
        "checking torrent name"
    );

    if same_prefix {
        Ok(())
    } else {
        warn!(expected = %expected, actual = %actual, "torrent name does not match filename");
        Err(Error::TorrentNameMismatch { expected, actual })
    }
}

fn strip_torrent_suffix(filename: &str) -> &str {
    let cut = filename.len().saturating_sub(".torrent".len());
    match filename.get(cut..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(".torrent") => &filename[..cut],
        _ => filename,
    }
}
