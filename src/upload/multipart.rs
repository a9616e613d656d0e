//! `multipart/form-data` body assembly.
//!
//! Framing is done by [`MultipartRequest`]; the file part reads from a byte
//! stream supplied by the caller, so a payload never has to be held in memory.

use std::fmt::Write as _;

use mpart_async::client::MultipartRequest;
use rand::RngCore;

/// Random bytes in a generated boundary (hex encoded, 60 characters).
const BOUNDARY_BYTES: usize = 30;

/// Form field name of the payload part.
const FILE_FIELD: &str = "file";

/// Placeholder filename of the payload part.
const FILE_NAME: &str = "-";

const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// Generates a random hex boundary.
pub(crate) fn random_boundary() -> String {
    let mut raw = [0u8; BOUNDARY_BYTES];
    rand::thread_rng().fill_bytes(&mut raw);
    raw.iter()
        .fold(String::with_capacity(BOUNDARY_BYTES * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}

/// Value for the request `Content-Type` header.
pub(crate) fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Builds the form: `fields` in the given order, then `file` as the payload
/// part.
pub(crate) fn form<'a, S, E>(
    boundary: &str,
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
    file: S,
) -> MultipartRequest<S>
where
    S: futures_util::Stream<Item = Result<bytes::Bytes, E>> + Unpin,
{
    let mut request = MultipartRequest::new(boundary);
    for (name, value) in fields {
        request.add_field(name, value);
    }
    request.add_stream(FILE_FIELD, FILE_NAME, FILE_CONTENT_TYPE, file);
    request
}
