//! Language catalog lookup.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::RequestConfig;
use crate::error::PasteError;
use crate::transport::Dispatch;

/// A language supported by the paste service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Display name.
    pub name: String,
    /// Classifier used to select the language.
    pub class: String,
    /// Editor mode identifier, if the service has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguageResults {
    #[serde(default, rename = "q")]
    _query: Option<String>,
    results: Vec<LanguageInfo>,
}

/// Builds the catalog URL, escaping `query` when one is set.
pub(crate) fn languages_url(config: &RequestConfig) -> String {
    let mut url = format!("{}/languages", config.base_url_trimmed());
    if !config.query().is_empty() {
        url.push_str("?q=");
        url.push_str(&query_escape(config.query()));
    }
    url
}

/// Form-style escaping: spaces become `+`, other reserved bytes `%XX`.
fn query_escape(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

#[instrument(skip(config), fields(query = %config.query()))]
pub(crate) async fn get_languages(config: &RequestConfig) -> Result<Vec<LanguageInfo>, PasteError> {
    let dispatch = Dispatch::new(config, languages_url(config))?;

    let mut defaults = HeaderMap::new();
    defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let request = dispatch.request(Method::GET, defaults, HeaderMap::new())?;
    let response = dispatch.send(request).await?;
    let response = dispatch.expect_status(response, StatusCode::OK).await?;

    let body = dispatch.read_bytes(response).await?;
    let decoded: LanguageResults =
        serde_json::from_slice(&body).map_err(|e| PasteError::decode(dispatch.url(), e))?;
    debug!(count = decoded.results.len(), "languages fetched");
    Ok(decoded.results)
}
