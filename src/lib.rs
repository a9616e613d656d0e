//! Client library for the paste.run paste service.
//!
//! Upload byte streams as pastes, fetch pastes with their metadata, and query
//! the catalog of supported languages.
//!
//! # Architecture
//!
//! - [`config`] - Per-call request options and their resolution
//! - [`cancel`] - Cancellation handle for in-flight requests
//! - `upload` - Streaming multipart body, conduit and producer task
//! - [`paste`] - Paste reference validation and metadata-bearing download
//! - [`languages`] - Language catalog lookup
//! - [`transport`] - Shared transport, header policy, status classification
//!
//! # Example
//!
//! ```no_run
//! use pasterun::RequestOption;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = tokio::fs::File::open("notes.txt").await?;
//! let url = pasterun::upload(file, [RequestOption::title("notes")]).await?;
//!
//! let paste = pasterun::get(&url, []).await?;
//! println!("{} ({})", paste.title, paste.language);
//! let text = paste.content.text().await?;
//! # let _ = text;
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
mod client;
pub mod config;
pub mod constants;
mod error;
pub mod languages;
pub mod paste;
pub mod transport;
mod upload;
mod user_agent;

// Re-export commonly used types
pub use cancel::CancelHandle;
pub use client::{PasteClient, get, get_languages, upload, upload_file};
pub use config::{RequestConfig, RequestOption};
pub use constants::{DEFAULT_BASE_URL, PUBLIC_PASTE_PREFIX};
pub use error::PasteError;
pub use languages::LanguageInfo;
pub use paste::{PasteContent, PasteInfo};
