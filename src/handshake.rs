//! Handshake outcome and error types shared by the client and server drivers.

use thiserror::Error;

use crate::state::HandshakeState;
use crate::stream::StreamError;

/// Errors that can end a handshake early.
///
/// There is no retry or timeout handling — the first failure is final and
/// propagates out of the driver.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Segment transport failed (send, receive, or decode).
    #[error("transport error: {0}")]
    Stream(#[from] StreamError),
    /// Socket setup or transcript I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What one side knows once its script has run to completion.
///
/// The SYN consumes one sequence number on each side, so after the exchange
/// both peers' sequence spaces sit at `ISN + 1`; the two summaries must agree
/// cross-wise (`local_next` here equals `peer_next` there).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeSummary {
    /// Final state; [`HandshakeState::Established`] on success.
    pub state: HandshakeState,
    /// Port this side sent segments from.
    pub local_port: u16,
    /// Port the peer sent segments from, as carried in its header.
    pub peer_port: u16,
    /// This side's next sequence number (own ISN + 1).
    pub local_next: u32,
    /// The peer's next sequence number (peer ISN + 1), as acknowledged.
    pub peer_next: u32,
}
