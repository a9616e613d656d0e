//! Paste retrieval: reference validation, the raw-content request and
//! [`PasteInfo`] reconstruction from response headers.

use std::pin::Pin;
use std::time::SystemTime;

use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, Response, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

use crate::config::RequestConfig;
use crate::constants::PUBLIC_PASTE_PREFIX;
use crate::error::PasteError;
use crate::transport::{Dispatch, race_cancel};

/// Characters that may not appear in a paste ID.
const FORBIDDEN_ID_CHARS: &[char] = &['.', '/', '#', '?'];

const HEADER_CREATED_AT: &str = "created-at";
const HEADER_EXPIRES: &str = "expires";
const HEADER_LANGUAGE: &str = "paste-language";
const HEADER_CLASS: &str = "paste-class";
const HEADER_AUTHOR: &str = "created-by";
const HEADER_TITLE: &str = "paste-title";

/// A fetched paste: live content plus metadata from the response headers.
#[derive(Debug)]
pub struct PasteInfo {
    /// Paste content, not yet read. Dropping it releases the connection.
    pub content: PasteContent,
    /// Declared size in bytes, when the server sent one. Advisory only.
    pub size: Option<u64>,
    /// MIME type of the content.
    pub content_type: String,
    /// Detected language.
    pub language: String,
    /// Classifier: file name, `.ext`, MIME type, etc.
    pub class: String,
    /// Paste author.
    pub author: String,
    /// Paste title.
    pub title: String,
    /// Creation time, `None` when missing or unparsable.
    pub created: Option<SystemTime>,
    /// Expiration time, `None` when the paste never expires.
    pub expires: Option<SystemTime>,
}

impl PasteInfo {
    /// Returns `true` when the paste has no expiration time.
    #[must_use]
    pub fn never_expires(&self) -> bool {
        self.expires.is_none()
    }

    fn from_response(response: Response, config: &RequestConfig, url: &str) -> Self {
        let headers = response.headers();
        let info_headers = MetadataHeaders::new(headers);
        let size = response.content_length();
        Self {
            size,
            content_type: info_headers.text(CONTENT_TYPE.as_str()),
            language: info_headers.text(HEADER_LANGUAGE),
            class: info_headers.text(HEADER_CLASS),
            author: info_headers.text(HEADER_AUTHOR),
            title: info_headers.text(HEADER_TITLE),
            created: info_headers.http_date(HEADER_CREATED_AT),
            expires: info_headers.http_date(HEADER_EXPIRES),
            content: PasteContent {
                response,
                config: config.clone(),
                url: url.to_string(),
            },
        }
    }
}

struct MetadataHeaders<'a>(&'a HeaderMap);

impl<'a> MetadataHeaders<'a> {
    fn new(headers: &'a HeaderMap) -> Self {
        Self(headers)
    }

    fn text(&self, name: &str) -> String {
        self.0
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn http_date(&self, name: &str) -> Option<SystemTime> {
        let value = self.0.get(name)?.to_str().ok()?;
        match httpdate::parse_http_date(value) {
            Ok(time) => Some(time),
            Err(_) => {
                debug!(header = name, value, "unparsable HTTP-date header");
                None
            }
        }
    }
}

/// Live body of a fetched paste.
///
/// Reads honor the cancellation handle of the request that fetched it.
#[derive(Debug)]
pub struct PasteContent {
    response: Response,
    config: RequestConfig,
    url: String,
}

impl PasteContent {
    /// Reads the next chunk, or `None` at the end of the content.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::Network`] if the connection fails mid-body, or
    /// [`PasteError::Cancelled`] if the request was cancelled.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, PasteError> {
        let url = self.url.as_str();
        let response = &mut self.response;
        race_cancel(self.config.cancel_handle(), url, async move {
            response
                .chunk()
                .await
                .map_err(|e| PasteError::network(url, e))
        })
        .await
    }

    /// Reads the whole content into memory.
    ///
    /// # Errors
    ///
    /// Same as [`chunk`](Self::chunk).
    pub async fn bytes(self) -> Result<Bytes, PasteError> {
        let Self {
            response,
            config,
            url,
        } = self;
        let dispatch = Dispatch::new(&config, url)?;
        dispatch.read_bytes(response).await
    }

    /// Reads the whole content as (lossy) UTF-8 text.
    ///
    /// # Errors
    ///
    /// Same as [`chunk`](Self::chunk).
    pub async fn text(self) -> Result<String, PasteError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Converts the content into a stream of chunks.
    ///
    /// Each item is read with [`chunk`](Self::chunk), so the stream ends with
    /// [`PasteError::Cancelled`] once the request is cancelled.
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = Result<Bytes, PasteError>> + Send>> {
        Box::pin(futures_util::stream::unfold(Some(self), |state| async move {
            let mut content = state?;
            match content.chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), Some(content))),
                Ok(None) => None,
                Err(error) => Some((Err(error), None)),
            }
        }))
    }

    /// Streams the content into `writer`, returning the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::Write`] if writing to `writer` fails, plus
    /// the errors of [`chunk`](Self::chunk).
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64, PasteError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut copied: u64 = 0;
        while let Some(chunk) = self.chunk().await? {
            writer
                .write_all(&chunk)
                .await
                .map_err(PasteError::write)?;
            copied += chunk.len() as u64;
        }
        writer.flush().await.map_err(PasteError::write)?;
        Ok(copied)
    }
}

/// Extracts the paste ID from a bare ID or a public paste URL.
///
/// # Errors
///
/// Returns [`PasteError::InvalidReference`] for URLs outside the public paste
/// prefix and for IDs containing `.`, `/`, `#` or `?`.
pub fn paste_id(reference: &str) -> Result<&str, PasteError> {
    let id = if reference.contains("://") {
        reference
            .strip_prefix(PUBLIC_PASTE_PREFIX)
            .ok_or_else(|| PasteError::invalid_reference(reference))?
    } else {
        reference
    };
    if id.contains(FORBIDDEN_ID_CHARS) {
        return Err(PasteError::invalid_reference(reference));
    }
    Ok(id)
}

/// Builds the raw-content URL for `reference` under the config's base URL.
///
/// # Errors
///
/// Same as [`paste_id`].
pub fn raw_url(config: &RequestConfig, reference: &str) -> Result<String, PasteError> {
    let id = paste_id(reference)?;
    Ok(format!("{}/{id}?raw", config.base_url_trimmed()))
}

/// Fetches a paste. The returned content has not been read yet.
#[instrument(skip(config))]
pub(crate) async fn get(config: &RequestConfig, reference: &str) -> Result<PasteInfo, PasteError> {
    let url = raw_url(config, reference)?;
    let dispatch = Dispatch::new(config, url)?;

    let request = dispatch.request(Method::GET, HeaderMap::new(), HeaderMap::new())?;
    let response = dispatch.send(request).await?;
    let response = dispatch.expect_status(response, StatusCode::OK).await?;

    let info = PasteInfo::from_response(response, config, dispatch.url());
    debug!(
        size = ?info.size,
        language = %info.language,
        never_expires = info.never_expires(),
        "paste fetched"
    );
    Ok(info)
}
