//! Bounded, backpressured byte conduit between the upload producer task and
//! the request body.
//!
//! At most `capacity` chunks are buffered; [`ConduitWriter::write`] waits for
//! the body to drain before accepting more. The reader ends cleanly only after
//! [`ConduitWriter::finish`]. A writer that fails or disappears without
//! finishing turns the next read into an error, so a truncated body is never
//! sent as complete.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use futures_util::Stream;
use tokio::sync::mpsc;

type Chunk = io::Result<Bytes>;

#[derive(Debug, Default)]
struct Shared {
    finished: AtomicBool,
    failure: Mutex<Option<io::Error>>,
}

/// The reader side has been dropped; nothing will consume further writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConduitClosed;

/// Producer half of the conduit.
#[derive(Debug)]
pub(crate) struct ConduitWriter {
    tx: mpsc::Sender<Chunk>,
    shared: Arc<Shared>,
}

/// Consumer half of the conduit.
#[derive(Debug)]
pub(crate) struct ConduitReader {
    rx: mpsc::Receiver<Chunk>,
    shared: Arc<Shared>,
}

/// Caller-side view of the producer's failure, readable after the reader has
/// been handed to the transport.
#[derive(Debug, Clone)]
pub(crate) struct ConduitStatus {
    shared: Arc<Shared>,
}

/// Creates a conduit buffering at most `capacity` chunks.
pub(crate) fn conduit(capacity: usize) -> (ConduitWriter, ConduitReader) {
    let (tx, rx) = mpsc::channel(capacity);
    let shared = Arc::new(Shared::default());
    (
        ConduitWriter {
            tx,
            shared: Arc::clone(&shared),
        },
        ConduitReader { rx, shared },
    )
}

impl ConduitWriter {
    /// Queues `chunk`, waiting while the conduit is full.
    pub(crate) async fn write(&self, chunk: Bytes) -> Result<(), ConduitClosed> {
        self.tx.send(Ok(chunk)).await.map_err(|_| ConduitClosed)
    }

    /// Marks the body complete; the reader ends after the queued chunks.
    pub(crate) fn finish(self) {
        self.shared.finished.store(true, Ordering::Release);
    }

    /// Terminates the conduit with `error`.
    ///
    /// The original error is kept for the caller; the reader sees an error of
    /// the same kind and message on its next read after the queued chunks.
    pub(crate) async fn fail(self, error: io::Error) {
        let relay = io::Error::new(error.kind(), error.to_string());
        *self
            .shared
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        let _ = self.tx.send(Err(relay)).await;
    }
}

impl ConduitReader {
    /// Returns a handle for inspecting producer failures later.
    pub(crate) fn status(&self) -> ConduitStatus {
        ConduitStatus {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Turns the reader into a body stream.
    pub(crate) fn into_stream(self) -> impl Stream<Item = Chunk> + Send + 'static {
        futures_util::stream::unfold(Some(self), |state| async move {
            let mut reader = state?;
            match reader.rx.recv().await {
                Some(Ok(chunk)) => Some((Ok(chunk), Some(reader))),
                Some(Err(error)) => Some((Err(error), None)),
                None if reader.shared.finished.load(Ordering::Acquire) => None,
                None => Some((
                    Err(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "upload body producer stopped before finishing",
                    )),
                    None,
                )),
            }
        })
    }
}

impl ConduitStatus {
    /// Takes the producer's failure, if it failed.
    pub(crate) fn take_failure(&self) -> Option<io::Error> {
        self.shared
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
