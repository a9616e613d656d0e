//! Streaming multipart upload.
//!
//! The request body is produced by a spawned task and handed to the transport
//! through a bounded conduit, so memory use stays at a few chunks no matter how
//! large the payload is.
//!
//! # Features
//!
//! - Fixed field order: `author`, `title`, `desc`, `type`, then the file part
//! - Backpressure: the producer waits whenever the transport falls behind
//! - Payload read errors fail the upload with the reader's own error
//! - The producer task is aborted whenever the upload call returns

mod conduit;
mod multipart;
mod pipeline;

pub(crate) use pipeline::upload;
