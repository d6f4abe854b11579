//! Framed segment I/O over an established TCP stream.
//!
//! [`SegmentStream`] is a thin wrapper around `tokio::net::TcpStream` that
//! speaks [`crate::segment::SegmentHeader`] instead of raw bytes.  All
//! protocol logic lives elsewhere; this module owns only byte I/O.
//!
//! Both [`SegmentStream::send`] and [`SegmentStream::recv`] hand the raw
//! 20-byte wire image back to the caller so the transcript can show exactly
//! what crossed the wire.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::segment::{SegmentError, SegmentHeader, HEADER_LEN};

/// Errors that can arise from stream operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Underlying I/O error from the OS.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The received bytes could not be decoded as a valid segment header.
    #[error("segment decode error: {0}")]
    Segment(#[from] SegmentError),
}

/// An async, segment-oriented view of a connected TCP stream.
#[derive(Debug)]
pub struct SegmentStream {
    /// Address of the local endpoint (OS-assigned ephemeral port on the
    /// client side).
    pub local_addr: SocketAddr,
    /// Address of the remote endpoint.
    pub peer_addr: SocketAddr,
    inner: TcpStream,
}

impl SegmentStream {
    /// Wrap an already-connected stream.
    pub fn new(inner: TcpStream) -> Result<Self, StreamError> {
        let local_addr = inner.local_addr()?;
        let peer_addr = inner.peer_addr()?;
        Ok(Self {
            local_addr,
            peer_addr,
            inner,
        })
    }

    /// Encode `header` and write it to the stream in full.
    ///
    /// Returns the raw bytes that were sent.
    pub async fn send(&mut self, header: &SegmentHeader) -> Result<[u8; HEADER_LEN], StreamError> {
        let bytes = header.encode();
        self.inner.write_all(&bytes).await?;
        Ok(bytes)
    }

    /// Read exactly one header's worth of bytes and decode it.
    ///
    /// Returns `(header, raw_bytes)`.  The transport guarantees delivery and
    /// ordering, so a short read here means the peer closed mid-handshake and
    /// surfaces as an I/O error.
    pub async fn recv(&mut self) -> Result<(SegmentHeader, [u8; HEADER_LEN]), StreamError> {
        let mut buf = [0u8; HEADER_LEN];
        self.inner.read_exact(&mut buf).await?;
        let header = SegmentHeader::decode(&buf)?;
        Ok((header, buf))
    }
}
