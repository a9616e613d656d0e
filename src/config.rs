//! Per-call request configuration.
//!
//! A [`RequestConfig`] is resolved once per call from a base config and an
//! ordered list of [`RequestOption`] updates. Later options win for scalar
//! fields; a later [`RequestOption::headers`] replaces the earlier list.
//!
//! ```
//! use pasterun::{RequestConfig, RequestOption};
//!
//! let config = RequestConfig::resolve(
//!     &RequestConfig::default(),
//!     [
//!         RequestOption::title("first"),
//!         RequestOption::author("me"),
//!         RequestOption::title("second"),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(config.title(), "second");
//! assert_eq!(config.author(), "me");
//! ```

use std::fmt;

use crate::cancel::CancelHandle;
use crate::constants::DEFAULT_BASE_URL;
use crate::error::PasteError;

/// One partial update applied to a [`RequestConfig`].
#[derive(Clone)]
pub enum RequestOption {
    /// Author of the paste (upload only).
    Author(String),
    /// Title of the paste (upload only).
    Title(String),
    /// Description of the paste (upload only).
    Description(String),
    /// Paste type (upload only).
    Type(String),
    /// Bearer token sent as `Authorization`.
    Token(String),
    /// Cancellation handle for the in-flight request.
    Cancel(CancelHandle),
    /// Transport used instead of the shared default client.
    Transport(reqwest::Client),
    /// Service base URL override.
    BaseUrl(String),
    /// Extra headers as a flat name/value list.
    Headers(Vec<String>),
    /// Search query for the languages catalog.
    Query(String),
}

impl RequestOption {
    /// Sets the paste author.
    pub fn author(value: impl Into<String>) -> Self {
        Self::Author(value.into())
    }

    /// Sets the paste title.
    pub fn title(value: impl Into<String>) -> Self {
        Self::Title(value.into())
    }

    /// Sets the paste description.
    pub fn description(value: impl Into<String>) -> Self {
        Self::Description(value.into())
    }

    /// Sets the paste type.
    pub fn paste_type(value: impl Into<String>) -> Self {
        Self::Type(value.into())
    }

    /// Sets the bearer token.
    pub fn token(value: impl Into<String>) -> Self {
        Self::Token(value.into())
    }

    /// Attaches a cancellation handle.
    pub fn cancel(handle: CancelHandle) -> Self {
        Self::Cancel(handle)
    }

    /// Uses `client` as the transport for the request.
    pub fn transport(client: reqwest::Client) -> Self {
        Self::Transport(client)
    }

    /// Overrides the service base URL.
    pub fn base_url(value: impl Into<String>) -> Self {
        Self::BaseUrl(value.into())
    }

    /// Sets extra headers from a flat `name, value, name, value, ...` list.
    ///
    /// The list must have an even length; an odd list is rejected when the
    /// config is resolved, before any request is made.
    pub fn headers<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Headers(pairs.into_iter().map(Into::into).collect())
    }

    /// Sets the languages search query.
    pub fn query(value: impl Into<String>) -> Self {
        Self::Query(value.into())
    }
}

// Custom Debug impl that redacts the token.
impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author(v) => f.debug_tuple("Author").field(v).finish(),
            Self::Title(v) => f.debug_tuple("Title").field(v).finish(),
            Self::Description(v) => f.debug_tuple("Description").field(v).finish(),
            Self::Type(v) => f.debug_tuple("Type").field(v).finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
            Self::Cancel(v) => f.debug_tuple("Cancel").field(v).finish(),
            Self::Transport(v) => f.debug_tuple("Transport").field(v).finish(),
            Self::BaseUrl(v) => f.debug_tuple("BaseUrl").field(v).finish(),
            Self::Headers(v) => f.debug_tuple("Headers").field(v).finish(),
            Self::Query(v) => f.debug_tuple("Query").field(v).finish(),
        }
    }
}

/// Immutable configuration for a single request.
///
/// The token is redacted in Debug output.
#[derive(Clone, Default)]
pub struct RequestConfig {
    author: String,
    title: String,
    description: String,
    paste_type: String,
    token: Option<String>,
    cancel: Option<CancelHandle>,
    transport: Option<reqwest::Client>,
    base_url: Option<String>,
    headers: Vec<(String, String)>,
    query: String,
}

impl RequestConfig {
    /// Applies `options` in order on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`PasteError::InvalidHeaders`] if a headers option carries an
    /// odd number of values.
    pub fn resolve<I>(base: &Self, options: I) -> Result<Self, PasteError>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        let mut config = base.clone();
        for option in options {
            config.apply(option)?;
        }
        Ok(config)
    }

    fn apply(&mut self, option: RequestOption) -> Result<(), PasteError> {
        match option {
            RequestOption::Author(value) => self.author = value,
            RequestOption::Title(value) => self.title = value,
            RequestOption::Description(value) => self.description = value,
            RequestOption::Type(value) => self.paste_type = value,
            RequestOption::Token(value) => self.token = Some(value).filter(|t| !t.is_empty()),
            RequestOption::Cancel(handle) => self.cancel = Some(handle),
            RequestOption::Transport(client) => self.transport = Some(client),
            RequestOption::BaseUrl(value) => {
                self.base_url = Some(value).filter(|u| !u.is_empty());
            }
            RequestOption::Headers(values) => self.headers = pair_headers(values)?,
            RequestOption::Query(value) => self.query = value,
        }
        Ok(())
    }

    /// Paste author, empty when unset.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Paste title, empty when unset.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Paste description, empty when unset.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Paste type, empty when unset.
    #[must_use]
    pub fn paste_type(&self) -> &str {
        &self.paste_type
    }

    /// Bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Cancellation handle, if any.
    #[must_use]
    pub fn cancel_handle(&self) -> Option<&CancelHandle> {
        self.cancel.as_ref()
    }

    /// Transport override, if any.
    #[must_use]
    pub fn transport(&self) -> Option<&reqwest::Client> {
        self.transport.as_ref()
    }

    /// Base URL override or the default service endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Extra headers in the order they were supplied.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Languages search query, empty when unset.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Multipart text fields in wire order, skipping empty values.
    pub(crate) fn form_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("author", self.author.as_str()),
            ("title", self.title.as_str()),
            ("desc", self.description.as_str()),
            ("type", self.paste_type.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
    }

    /// Base URL without a trailing slash, for joining paths.
    pub(crate) fn base_url_trimmed(&self) -> &str {
        self.base_url().trim_end_matches('/')
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("author", &self.author)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("paste_type", &self.paste_type)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("cancel", &self.cancel)
            .field("transport", &self.transport.is_some())
            .field("base_url", &self.base_url())
            .field("headers", &self.headers)
            .field("query", &self.query)
            .finish()
    }
}

fn pair_headers(values: Vec<String>) -> Result<Vec<(String, String)>, PasteError> {
    if values.len() % 2 != 0 {
        return Err(PasteError::invalid_headers(values.len()));
    }
    let mut pairs = Vec::with_capacity(values.len() / 2);
    let mut values = values.into_iter();
    while let (Some(name), Some(value)) = (values.next(), values.next()) {
        pairs.push((name, value));
    }
    Ok(pairs)
}
