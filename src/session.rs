//! Shared HTTP session and the per-chain request context
//!
//! The [`Session`] owns the process-wide client state that never changes after
//! startup: identity header, proxy, timeouts and the cookie jar. Everything that
//! varies along a request chain (currently the referer) travels in a
//! [`RequestContext`] passed to each call, so concurrent chains never race on
//! shared headers.

use crate::config::Config;
use crate::error::{Error, NetworkError, Result};
use reqwest::header::{HeaderMap, REFERER};
use tracing::debug;

/// HTTP method used to replay a form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMethod {
    /// Parameters go into the query string
    #[default]
    Get,
    /// Parameters go into an urlencoded body
    Post,
}

impl FormMethod {
    /// Parse a `<form method>` attribute; anything but `post` is a GET, as in HTML
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(m) if m.trim().eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        }
    }
}

/// Per-call-chain request state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Referer to send; the site refuses attachment fetches without the post URL here
    pub referer: Option<String>,
}

impl RequestContext {
    /// Context for a chain that follows links found on `page_url`
    pub fn with_referer(page_url: impl Into<String>) -> Self {
        Self {
            referer: Some(page_url.into()),
        }
    }
}

/// A fully read response
#[derive(Debug)]
pub struct Fetched {
    /// Final URL after redirects
    pub url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub bytes: Vec<u8>,
}

/// Shared HTTP client state
#[derive(Clone, Debug)]
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    /// Build the session from configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the proxy is invalid or the client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true);

        if let Some(proxy_url) = config.http_proxy.as_deref()
            && !proxy_url.is_empty()
        {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| Error::Config {
                message: format!("invalid http_proxy {:?}: {}", proxy_url, e),
                key: Some("http_proxy".to_string()),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| Error::Config {
            message: format!("failed to create HTTP client: {}", e),
            key: None,
        })?;

        Ok(Self { client })
    }

    /// GET `url` and read the whole body
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on transport failure or any non-2xx status.
    pub async fn get(&self, ctx: &RequestContext, url: &str) -> Result<Fetched> {
        self.fetch(ctx, FormMethod::Get, url, &[]).await
    }

    /// Issue a request with form parameters and read the whole body
    ///
    /// GET sends `params` as the query string, POST as an urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on transport failure or any non-2xx status.
    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        method: FormMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Fetched> {
        debug!(url = %url, ?method, params = params.len(), "fetching");

        let mut request = match method {
            FormMethod::Get if params.is_empty() => self.client.get(url),
            FormMethod::Get => self.client.get(url).query(params),
            FormMethod::Post => self.client.post(url).form(params),
        };
        if let Some(referer) = ctx.referer.as_deref() {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(|e| {
            Error::Network(NetworkError::Transport {
                url: url.to_string(),
                source: e,
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|e| {
            Error::Network(NetworkError::Body {
                url: url.to_string(),
                source: e,
            })
        })?;

        debug!(url = %final_url, status = status.as_u16(), bytes = bytes.len(), "fetched");

        Ok(Fetched {
            url: final_url,
            headers,
            bytes: bytes.to_vec(),
        })
    }
}
