//! Streaming upload: a producer task copies the payload into the conduit,
//! which feeds the file part of the multipart body the request is sending.

use bytes::BytesMut;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Body, Method, StatusCode};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, instrument, warn};

use super::conduit::{ConduitWriter, conduit};
use super::multipart;
use crate::config::RequestConfig;
use crate::constants::{CONDUIT_CAPACITY, UPLOAD_CHUNK_SIZE};
use crate::error::PasteError;
use crate::transport::Dispatch;

/// Aborts the producer task when the upload call ends, by whatever route.
struct ProducerGuard {
    handle: JoinHandle<()>,
}

impl Drop for ProducerGuard {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("aborting unfinished upload producer");
        }
        self.handle.abort();
    }
}

/// Uploads `payload` as a new paste and returns its URL.
#[instrument(skip_all, fields(url = %config.base_url()))]
pub(crate) async fn upload<R>(config: &RequestConfig, payload: R) -> Result<String, PasteError>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let dispatch = Dispatch::new(config, config.base_url().to_string())?;

    let boundary = multipart::random_boundary();
    let mut forced = HeaderMap::new();
    forced.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&multipart::content_type(&boundary))
            .map_err(|_| PasteError::invalid_header(CONTENT_TYPE.as_str()))?,
    );
    let request = dispatch.request(Method::POST, HeaderMap::new(), forced)?;

    let (writer, reader) = conduit(CONDUIT_CAPACITY);
    let status = reader.status();
    let _producer = ProducerGuard {
        handle: tokio::spawn(produce(payload, writer).in_current_span()),
    };
    let form = multipart::form(
        &boundary,
        config.form_fields(),
        Box::pin(reader.into_stream()),
    );
    let request = request.body(Body::wrap_stream(form));

    let outcome = async {
        let response = dispatch.send(request).await?;
        let response = dispatch.expect_status(response, StatusCode::CREATED).await?;
        dispatch.read_text(response).await
    }
    .await;

    if let Some(error) = status.take_failure() {
        return Err(PasteError::payload(error));
    }

    let paste_url = outcome?.trim().to_string();
    info!(paste_url = %paste_url, "upload complete");
    Ok(paste_url)
}

/// Copies the payload into the conduit in fixed-size chunks.
///
/// Returns quietly if the body is abandoned; a payload read failure is
/// recorded in the conduit for the caller.
async fn produce<R>(mut payload: R, writer: ConduitWriter)
where
    R: AsyncRead + Unpin,
{
    let mut payload_bytes: u64 = 0;
    loop {
        let mut chunk = BytesMut::with_capacity(UPLOAD_CHUNK_SIZE);
        match payload.read_buf(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                payload_bytes += n as u64;
                if writer.write(chunk.freeze()).await.is_err() {
                    debug!(payload_bytes, "upload body abandoned mid-payload");
                    return;
                }
            }
            Err(error) => {
                warn!(error = %error, payload_bytes, "reading upload payload failed");
                writer.fail(error).await;
                return;
            }
        }
    }

    writer.finish();
    debug!(payload_bytes, "upload payload complete");
}
