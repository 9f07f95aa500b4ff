//! Pull-based artifact body delivered in bounded chunks

use apkget_errors::{Error, NetworkError, TransferError};
use apkget_types::CHUNK_SIZE;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Artifact body that yields chunks of at most [`CHUNK_SIZE`] bytes
///
/// Only the current upstream frame is held in memory. Frame size is chosen
/// by reqwest/hyper and can be far larger than [`CHUNK_SIZE`] (hundreds of
/// KiB on a fast local link), so the cap applies to yielded chunks, not to
/// resident memory. Empty frames are skipped, so every yielded chunk is
/// non-empty. Each upstream read is bounded by the chunk timeout.
pub struct ByteStream {
    url: String,
    inner: BoxStream<'static, Result<Bytes, String>>,
    pending: Bytes,
    chunk_timeout: Duration,
    bytes_read: u64,
    finished: bool,
}

impl ByteStream {
    pub(crate) fn from_response(response: reqwest::Response, chunk_timeout: Duration) -> Self {
        let url = response.url().to_string();
        let frames = response
            .bytes_stream()
            .map(|frame| frame.map_err(|e| e.to_string()));
        Self::new(url, frames, chunk_timeout)
    }

    /// Wrap any fallible byte stream
    pub fn new<S>(url: impl Into<String>, frames: S, chunk_timeout: Duration) -> Self
    where
        S: Stream<Item = Result<Bytes, String>> + Send + 'static,
    {
        Self {
            url: url.into(),
            inner: frames.boxed(),
            pending: Bytes::new(),
            chunk_timeout,
            bytes_read: 0,
            finished: false,
        }
    }

    /// Bytes yielded so far
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Pull the next chunk, or `None` once the body is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream connection fails or stalls for
    /// longer than the chunk timeout. No further chunks are produced after
    /// an error.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, Error> {
        loop {
            if !self.pending.is_empty() {
                let take = self.pending.len().min(CHUNK_SIZE);
                let chunk = self.pending.split_to(take);
                self.bytes_read += chunk.len() as u64;
                return Ok(Some(chunk));
            }

            if self.finished {
                return Ok(None);
            }

            match tokio::time::timeout(self.chunk_timeout, self.inner.next()).await {
                Ok(Some(Ok(frame))) => self.pending = frame,
                Ok(Some(Err(message))) => {
                    self.finished = true;
                    return Err(TransferError::StreamInterrupted {
                        bytes: self.bytes_read,
                        message,
                    }
                    .into());
                }
                Ok(None) => {
                    self.finished = true;
                    return Ok(None);
                }
                Err(_) => {
                    self.finished = true;
                    return Err(NetworkError::Timeout {
                        url: self.url.clone(),
                    }
                    .into());
                }
            }
        }
    }

    /// Copy every chunk into `sink`, returning the number of bytes written
    ///
    /// Stops at the first failed write without reading further upstream.
    /// After an upstream failure [`bytes_read`](Self::bytes_read) is the
    /// count that reached the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream fails or the sink rejects a write.
    pub async fn write_to<W>(&mut self, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(chunk) = self.next_chunk().await? {
            if let Err(e) = sink.write_all(&chunk).await {
                return Err(TransferError::SinkClosed {
                    bytes: self.bytes_read - chunk.len() as u64,
                    message: e.to_string(),
                }
                .into());
            }
        }

        sink.flush()
            .await
            .map_err(|e| TransferError::SinkClosed {
                bytes: self.bytes_read,
                message: e.to_string(),
            })?;

        Ok(self.bytes_read)
    }

    /// Read the whole body into one contiguous buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream fails before the body is complete.
    pub async fn collect(mut self) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.freeze())
    }

    /// Adapt into a `futures::Stream` that ends after the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Error>> + Send + 'static {
        stream::unfold(Some(self), |state| async move {
            let mut body = state?;
            match body.next_chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), Some(body))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("url", &self.url)
            .field("bytes_read", &self.bytes_read)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
