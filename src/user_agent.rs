//! User-Agent string sent by the default transport.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/paste-run/pasterun";

/// Default User-Agent for paste requests (identifies the client and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pasterun/{version} (+{PROJECT_UA_URL})")
}
