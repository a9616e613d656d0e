//! Payload readers with scripted behavior for upload tests.

#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// Yields `prefix`, then fails with `message`.
pub struct FailingReader {
    prefix: Option<&'static [u8]>,
    message: &'static str,
}

impl FailingReader {
    pub fn new(prefix: &'static [u8], message: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            message,
        }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.prefix.take() {
            Some(prefix) => {
                buf.put_slice(prefix);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, self.message))),
        }
    }
}

/// Never produces data; records when it is dropped.
pub struct PendingReader {
    dropped: Arc<AtomicBool>,
}

impl PendingReader {
    pub fn new() -> (Self, Arc<AtomicBool>) {
        let dropped = Arc::new(AtomicBool::new(false));
        (
            Self {
                dropped: Arc::clone(&dropped),
            },
            dropped,
        )
    }
}

impl AsyncRead for PendingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Pending
    }
}

impl Drop for PendingReader {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// Generates `len` bytes of a repeating pattern without holding them.
pub struct PatternReader {
    remaining: usize,
    offset: usize,
}

impl PatternReader {
    pub fn new(len: usize) -> Self {
        Self {
            remaining: len,
            offset: 0,
        }
    }

    pub fn byte_at(index: usize) -> u8 {
        (index % 251) as u8
    }

    pub fn expected(len: usize) -> Vec<u8> {
        (0..len).map(Self::byte_at).collect()
    }
}

impl AsyncRead for PatternReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let n = self.remaining.min(buf.remaining()).min(3000);
        let start = self.offset;
        let chunk: Vec<u8> = (start..start + n).map(Self::byte_at).collect();
        buf.put_slice(&chunk);
        self.offset += n;
        self.remaining -= n;
        Poll::Ready(Ok(()))
    }
}

/// Waits until `flag` is set, up to one second.
pub async fn wait_for_flag(flag: &AtomicBool) -> bool {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(1);
    while tokio::time::Instant::now() < deadline {
        if flag.load(Ordering::SeqCst) {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    flag.load(Ordering::SeqCst)
}
