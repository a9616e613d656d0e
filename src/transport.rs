//! Request dispatch: transport selection, header policy, cancellation and
//! response classification shared by upload, get and the languages catalog.
//!
//! Success is a single exact status per operation (201 for uploads, 200
//! otherwise). Any other status reads the full body and surfaces its trimmed
//! text as [`PasteError::Server`].

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::cancel::CancelHandle;
use crate::config::RequestConfig;
use crate::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::error::PasteError;
use crate::user_agent;

static DEFAULT_TRANSPORT: OnceLock<Client> = OnceLock::new();

/// Builds a transport with the crate's default timeouts and User-Agent.
///
/// # Errors
///
/// Returns the reqwest builder error if the TLS backend cannot be initialized.
pub fn build_transport() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .read_timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
}

/// Returns the config's transport, or the process-wide default one.
fn transport_for(config: &RequestConfig, url: &str) -> Result<Client, PasteError> {
    if let Some(client) = config.transport() {
        return Ok(client.clone());
    }
    if let Some(client) = DEFAULT_TRANSPORT.get() {
        return Ok(client.clone());
    }
    let client = build_transport().map_err(|e| PasteError::network(url, e))?;
    Ok(DEFAULT_TRANSPORT.get_or_init(|| client).clone())
}

/// A validated request target plus the header policy for one call.
pub(crate) struct Dispatch<'a> {
    config: &'a RequestConfig,
    url: String,
}

impl<'a> Dispatch<'a> {
    /// Validates `url` before anything touches the network.
    pub(crate) fn new(config: &'a RequestConfig, url: String) -> Result<Self, PasteError> {
        Url::parse(&url).map_err(|_| PasteError::invalid_url(url.clone()))?;
        Ok(Self { config, url })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Builds the outgoing request.
    ///
    /// Header precedence, lowest first: `defaults`, the caller's extra
    /// headers, `forced`, then `Authorization` when a token is configured.
    pub(crate) fn request(
        &self,
        method: Method,
        defaults: HeaderMap,
        forced: HeaderMap,
    ) -> Result<RequestBuilder, PasteError> {
        let headers = build_headers(self.config, defaults, forced)?;
        let client = transport_for(self.config, &self.url)?;
        debug!(%method, url = %self.url, header_count = headers.len(), "building request");
        Ok(client.request(method, self.url.as_str()).headers(headers))
    }

    /// Runs `fut` unless the configured cancellation handle fires first.
    pub(crate) async fn cancellable<F, T>(&self, fut: F) -> Result<T, PasteError>
    where
        F: Future<Output = Result<T, PasteError>>,
    {
        race_cancel(self.config.cancel_handle(), &self.url, fut).await
    }

    /// Sends the request, honoring cancellation.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, PasteError> {
        let url = self.url.as_str();
        self.cancellable(async move {
            request
                .send()
                .await
                .map_err(|e| PasteError::network(url, e))
        })
        .await
    }

    /// Passes `response` through if it has the `expected` status; otherwise
    /// reads its body and returns it as the error message.
    pub(crate) async fn expect_status(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, PasteError> {
        if response.status() == expected {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = self.read_text(response).await?;
        debug!(status, url = %self.url, "server returned error status");
        Err(PasteError::server(status, &body))
    }

    /// Reads the full response body as text, honoring cancellation.
    pub(crate) async fn read_text(&self, response: Response) -> Result<String, PasteError> {
        let bytes = self.read_bytes(response).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads the full response body, honoring cancellation.
    pub(crate) async fn read_bytes(
        &self,
        response: Response,
    ) -> Result<bytes::Bytes, PasteError> {
        let url = self.url.as_str();
        self.cancellable(async move {
            response
                .bytes()
                .await
                .map_err(|e| PasteError::network(url, e))
        })
        .await
    }
}

pub(crate) async fn race_cancel<F, T>(
    cancel: Option<&CancelHandle>,
    url: &str,
    fut: F,
) -> Result<T, PasteError>
where
    F: Future<Output = Result<T, PasteError>>,
{
    match cancel {
        Some(handle) => {
            tokio::select! {
                biased;
                () = handle.cancelled() => {
                    debug!(%url, "request cancelled");
                    Err(PasteError::cancelled(url))
                }
                result = fut => result,
            }
        }
        None => fut.await,
    }
}

fn build_headers(
    config: &RequestConfig,
    defaults: HeaderMap,
    forced: HeaderMap,
) -> Result<HeaderMap, PasteError> {
    let mut headers = defaults;
    for (name, value) in config.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| PasteError::invalid_header(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| PasteError::invalid_header(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    for (name, value) in &forced {
        headers.insert(name.clone(), value.clone());
    }
    if let Some(token) = config.token() {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| PasteError::invalid_header(AUTHORIZATION.as_str()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
