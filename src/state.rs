//! Handshake progress types.
//!
//! The exchange is strictly linear — there is no branching, retry, or
//! timeout — so each side walks a fixed path through these states.
//! Keeping the state types in their own module keeps the driver scripts
//! free of anything but sequencing.

/// Position of one side within the scripted handshake.
///
/// ```text
/// client:  CLOSED ─SYN sent─▶ SYN_SENT ─SYN-ACK rcvd, ACK sent─▶ ESTABLISHED
/// server:  CLOSED ─SYN rcvd─▶ SYN_RECEIVED ─final ACK rcvd─▶ ESTABLISHED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// No handshake traffic yet; initial state.
    Closed,
    /// Client side: SYN sent, SYN-ACK not yet received.
    SynSent,
    /// Server side: SYN received, SYN-ACK sent, final ACK pending.
    SynReceived,
    /// Three-way handshake complete.
    Established,
}

impl Default for HandshakeState {
    fn default() -> Self {
        Self::Closed
    }
}

impl std::fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
