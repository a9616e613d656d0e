//! Constants for the paste client (endpoints, timeouts, upload buffering).

/// Default service endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.paste.run/";

/// Public prefix of paste URLs accepted by [`get`](crate::get).
pub const PUBLIC_PASTE_PREFIX: &str = "https://www.paste.run/";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes, idle time between reads).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Number of encoded chunks the upload conduit holds before the producer waits.
pub const CONDUIT_CAPACITY: usize = 4;

/// Size of each payload read during upload encoding (8 KiB).
pub const UPLOAD_CHUNK_SIZE: usize = 8 * 1024;
