//! Filename helpers shared by the redirector and torrent checks

use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};

/// Scrub ampersands the way the site's page renderer mangles them
///
/// `"& "` and `" &"` are deleted, any remaining `&` becomes a space. Applied to
/// both sides of every filename comparison.
pub fn normalize_ampersands(name: &str) -> String {
    name.replace("& ", "").replace(" &", "").replace('&', " ")
}

/// Normalized comparison key: ampersands scrubbed, all whitespace removed
pub fn comparison_key(name: &str) -> String {
    normalize_ampersands(name)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Whether two filenames are equal once normalized and whitespace is ignored
pub fn filenames_match(expected: &str, actual: &str) -> bool {
    comparison_key(expected) == comparison_key(actual)
}

/// Extract the URL-decoded filename from a `Content-Disposition` header
///
/// Handles `filename="..."`, bare `filename=...` and RFC 5987 `filename*=UTF-8''...`;
/// the extended form wins when both are present. Returns `None` if the header is
/// absent or names no file.
///
/// # Examples
///
/// ```
/// use reqwest::header::{CONTENT_DISPOSITION, HeaderMap, HeaderValue};
/// use tf_viewer::utils::filename_from_headers;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     CONTENT_DISPOSITION,
///     HeaderValue::from_static("attachment; filename=\"Movie%20A.torrent\""),
/// );
/// assert_eq!(filename_from_headers(&headers).as_deref(), Some("Movie A.torrent"));
/// ```
pub fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?;
    let value = String::from_utf8_lossy(value.as_bytes());
    filename_from_disposition(&value)
}

/// Extract the URL-decoded filename from a `Content-Disposition` value
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for (name, raw) in disposition_params(value) {
        if name.eq_ignore_ascii_case("filename*") {
            // Format is: charset'lang'encoded-filename
            let encoded = raw.rfind('\'').map_or(raw.as_str(), |idx| &raw[idx + 1..]);
            extended = Some(decode(encoded));
        } else if name.eq_ignore_ascii_case("filename") {
            plain = Some(decode(&raw));
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// `name=value` parameters of a header value, after its leading token
///
/// Quoted values run to the closing quote, so `;` inside them does not split
/// the parameter; `\"` and `\\` escapes are unwrapped.
fn disposition_params(value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = value.chars().skip_while(|c| *c != ';').peekable();

    while chars.peek().is_some() {
        while chars.next_if(|c| *c == ';' || c.is_whitespace()).is_some() {}

        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && *c != ';') {
            name.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }
        let name = name.trim();

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut param = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '"' => break,
                    '\\' => param.extend(chars.next()),
                    _ => param.push(c),
                }
            }
            // Anything between the closing quote and the next ';' is dropped
            while chars.next_if(|c| *c != ';').is_some() {}
        } else {
            while let Some(c) = chars.next_if(|c| *c != ';') {
                param.push(c);
            }
        }

        if !name.is_empty() {
            params.push((name.to_string(), param.trim().to_string()));
        }
    }

    params
}

fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}
