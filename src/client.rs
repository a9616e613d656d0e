//! Client facade over the upload, get and languages operations.
//!
//! A [`PasteClient`] carries a base [`RequestConfig`] (token, base URL,
//! transport, ...) that every call starts from; per-call options are applied
//! on top of it.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncRead;
use tracing::{debug, instrument};

use crate::config::{RequestConfig, RequestOption};
use crate::error::PasteError;
use crate::languages::{self, LanguageInfo};
use crate::paste::{self, PasteInfo};
use crate::upload as pipeline;

/// Paste service client.
///
/// Cheap to clone; clones share the same transport.
///
/// # Example
///
/// ```no_run
/// use pasterun::{PasteClient, RequestOption};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PasteClient::with_options([RequestOption::token("secret")])?;
/// let url = client
///     .upload(std::io::Cursor::new(b"hello".to_vec()), [RequestOption::title("greeting")])
///     .await?;
/// println!("Uploaded: {url}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PasteClient {
    base: RequestConfig,
}

impl PasteClient {
    /// Creates a client with an empty base config and the shared transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose calls all start from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::InvalidHeaders`] for an odd header list.
    pub fn with_options<I>(options: I) -> Result<Self, PasteError>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        Ok(Self {
            base: RequestConfig::resolve(&RequestConfig::default(), options)?,
        })
    }

    /// The base config every call starts from.
    #[must_use]
    pub fn base_config(&self) -> &RequestConfig {
        &self.base
    }

    /// Uploads `payload` as a new paste and returns the paste URL.
    ///
    /// The payload is streamed; it is never read fully into memory.
    ///
    /// # Errors
    ///
    /// - [`PasteError::InvalidHeaders`] / [`PasteError::InvalidHeader`] /
    ///   [`PasteError::InvalidUrl`] before any network activity
    /// - [`PasteError::Payload`] if reading `payload` fails
    /// - [`PasteError::Server`] for any status other than 201
    /// - [`PasteError::Network`], [`PasteError::Timeout`],
    ///   [`PasteError::Cancelled`] for transport failures
    pub async fn upload<R, I>(&self, payload: R, options: I) -> Result<String, PasteError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        I: IntoIterator<Item = RequestOption>,
    {
        let config = RequestConfig::resolve(&self.base, options)?;
        pipeline::upload(&config, payload).await
    }

    /// Uploads the file at `path`, titled with its file name unless `options`
    /// set a title.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::Io`] if the file cannot be opened, plus the
    /// errors of [`upload`](Self::upload).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn upload_file<P, I>(&self, path: P, options: I) -> Result<String, PasteError>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = RequestOption>,
    {
        let path = path.as_ref();
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = RequestConfig::resolve(&self.base, [RequestOption::title(title)])?;
        let config = RequestConfig::resolve(&base, options)?;

        let file = File::open(path)
            .await
            .map_err(|e| PasteError::io(path, e))?;
        debug!(title = %config.title(), "uploading file");
        pipeline::upload(&config, file).await
    }

    /// Fetches a paste by ID or public paste URL.
    ///
    /// # Errors
    ///
    /// - [`PasteError::InvalidReference`] before any network activity
    /// - [`PasteError::Server`] for any status other than 200
    /// - transport errors as for [`upload`](Self::upload)
    pub async fn get<I>(&self, reference: &str, options: I) -> Result<PasteInfo, PasteError>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        let config = RequestConfig::resolve(&self.base, options)?;
        paste::get(&config, reference).await
    }

    /// Lists supported languages, filtered by [`RequestOption::query`] if set.
    ///
    /// # Errors
    ///
    /// - [`PasteError::Server`] for any status other than 200
    /// - [`PasteError::Decode`] if the response is not the expected JSON
    /// - transport errors as for [`upload`](Self::upload)
    pub async fn get_languages<I>(&self, options: I) -> Result<Vec<LanguageInfo>, PasteError>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        let config = RequestConfig::resolve(&self.base, options)?;
        languages::get_languages(&config).await
    }
}

/// Uploads `payload` with a default client. See [`PasteClient::upload`].
///
/// # Errors
///
/// Same as [`PasteClient::upload`].
pub async fn upload<R, I>(payload: R, options: I) -> Result<String, PasteError>
where
    R: AsyncRead + Send + Unpin + 'static,
    I: IntoIterator<Item = RequestOption>,
{
    PasteClient::new().upload(payload, options).await
}

/// Uploads a file with a default client. See [`PasteClient::upload_file`].
///
/// # Errors
///
/// Same as [`PasteClient::upload_file`].
pub async fn upload_file<P, I>(path: P, options: I) -> Result<String, PasteError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = RequestOption>,
{
    PasteClient::new().upload_file(path, options).await
}

/// Fetches a paste with a default client. See [`PasteClient::get`].
///
/// # Errors
///
/// Same as [`PasteClient::get`].
pub async fn get<I>(reference: &str, options: I) -> Result<PasteInfo, PasteError>
where
    I: IntoIterator<Item = RequestOption>,
{
    PasteClient::new().get(reference, options).await
}

/// Lists languages with a default client. See [`PasteClient::get_languages`].
///
/// # Errors
///
/// Same as [`PasteClient::get_languages`].
pub async fn get_languages<I>(options: I) -> Result<Vec<LanguageInfo>, PasteError>
where
    I: IntoIterator<Item = RequestOption>,
{
    PasteClient::new().get_languages(options).await
}
