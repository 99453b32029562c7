//! Short-link redirector resolution
//!
//! A short-link page does not serve the file itself. It carries a single form
//! with hidden inputs and an inline script naming the real delivery endpoint.
//! Resolution replays that form against the discovered endpoint and checks the
//! filename the endpoint announces against the one the post page promised.
//!
//! ## Steps
//!
//! 1. Fetch and parse the short-link page
//! 2. Read the form method and collect every hidden input
//! 3. Discover the endpoint through an [`EndpointDiscovery`]
//! 4. Replay the form (GET or POST, as the page declares)
//! 5. Compare the disposition filename with the expected one (normalized)

mod endpoint;

pub use endpoint::{EndpointDiscovery, ScriptEndpointDiscovery};

use crate::error::{Error, NetworkError, ParseError, Result};
use crate::parser::{Document, attribute, selectors};
use crate::session::{FormMethod, RequestContext, Session};
use crate::types::ResolvedPayload;
use crate::utils::{filename_from_headers, filenames_match, normalize_ampersands};
use reqwest::header::HeaderMap;
use tracing::{debug, info, warn};

/// Everything needed from a short-link page to replay its form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectorForm {
    /// Method declared by the page's form
    pub method: FormMethod,
    /// Hidden inputs as `(name, value)`, in document order
    pub params: Vec<(String, String)>,
    /// Text of every inline script, in document order
    pub scripts: Vec<String>,
}

/// Read the form, hidden inputs and inline scripts of a short-link page
///
/// # Errors
///
/// Returns [`ParseError::MissingElement`] if the page has no form.
pub fn parse_redirector_page(url: &str, html: &[u8]) -> Result<RedirectorForm> {
    let doc = Document::parse(html);

    let form = doc
        .first(&selectors::FORM)
        .ok_or_else(|| ParseError::MissingElement {
            url: url.to_string(),
            element: "redirector form",
        })?;
    let method = FormMethod::from_attr(attribute(form, "method"));

    let params = doc
        .query(&selectors::HIDDEN_INPUT)
        .filter_map(|input| {
            let name = attribute(input, "name")?;
            let value = attribute(input, "value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    let scripts = doc
        .query(&selectors::INLINE_SCRIPT)
        .map(|script| script.text().collect::<String>())
        .collect();

    Ok(RedirectorForm {
        method,
        params,
        scripts,
    })
}

/// Turn a discovered endpoint into an absolute URL
///
/// Scripts may omit the scheme (`host/path.php` or `//host/path.php`); the
/// short-link page's scheme is used then.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidUrl`] if the result is not a valid URL.
pub fn absolute_endpoint(page_url: &str, endpoint: &str) -> Result<String> {
    let lower = endpoint.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        endpoint.to_string()
    } else {
        let scheme = url::Url::parse(page_url)
            .map(|u| u.scheme().to_string())
            .unwrap_or_else(|_| "https".to_string());
        match endpoint.strip_prefix("//") {
            Some(rest) => format!("{}://{}", scheme, rest),
            None => format!("{}://{}", scheme, endpoint),
        }
    };

    url::Url::parse(&candidate)
        .map(|u| u.to_string())
        .map_err(|source| {
            Error::Network(NetworkError::InvalidUrl {
                url: endpoint.to_string(),
                source,
            })
        })
}

/// Check the disposition filename, if any, against the expected filename
///
/// Both sides are ampersand-normalized and compared with all whitespace removed.
/// A response without a filename-bearing disposition header passes.
///
/// # Errors
///
/// Returns [`Error::FilenameMismatch`] carrying both normalized names.
pub fn verify_disposition_filename(expected: &str, headers: &HeaderMap) -> Result<()> {
    let Some(announced) = filename_from_headers(headers) else {
        debug!(expected = %expected, "no disposition filename, skipping filename check");
        return Ok(());
    };

    if filenames_match(expected, &announced) {
        return Ok(());
    }

    let expected = normalize_ampersands(expected);
    let actual = normalize_ampersands(&announced);
    warn!(expected = %expected, actual = %actual, "redirector delivered a different file");
    Err(Error::FilenameMismatch { expected, actual })
}

/// Resolve a short-link into the delivered bytes
///
/// Returns the *expected* filename with the payload; the announced one is only
/// used for verification.
///
/// # Errors
///
/// Fails with [`NetworkError`] on any failed request, [`ParseError`] if the
/// short-link page has no form, and [`Error::FilenameMismatch`] if the endpoint
/// announces another file.
pub async fn resolve_indirect(
    session: &Session,
    discovery: &dyn EndpointDiscovery,
    ctx: &RequestContext,
    short_link_url: &str,
    expected_filename: &str,
) -> Result<ResolvedPayload> {
    debug!(url = %short_link_url, expected = %expected_filename, "resolving short-link");

    let page = session.get(ctx, short_link_url).await?;
    let form = parse_redirector_page(short_link_url, &page.bytes)?;

    let endpoint = discovery.discover_endpoint(&form.scripts);
    let endpoint = absolute_endpoint(&page.url, &endpoint)?;
    debug!(
        endpoint = %endpoint,
        discovery = discovery.name(),
        method = ?form.method,
        params = form.params.len(),
        "replaying redirector form"
    );

    let delivered = session
        .fetch(ctx, form.method, &endpoint, &form.params)
        .await?;
    verify_disposition_filename(expected_filename, &delivered.headers)?;

    info!(
        filename = %expected_filename,
        bytes = delivered.bytes.len(),
        "short-link resolved"
    );
    Ok(ResolvedPayload {
        bytes: delivered.bytes,
        filename: expected_filename.to_string(),
    })
}
