//! Passive-open driver: the server side of the scripted handshake.
//!
//! The server accepts exactly one connection and runs the mirror of the
//! client script:
//! 1. bind, listen, accept one peer;
//! 2. receive the SYN and note the client's ISN and source port;
//! 3. send SYN-ACK carrying its own random ISN and `client_isn + 1`;
//! 4. receive the final ACK, then close both sockets and return.
//!
//! The SYN-ACK is addressed using the source port carried in the received
//! header, not the TCP-level peer address — the pseudo-headers are the
//! protocol; the real socket is just the carrier.

use std::net::SocketAddr;
use std::path::Path;

use rand::Rng;
use tokio::net::TcpListener;

use crate::handshake::{HandshakeError, HandshakeSummary};
use crate::segment::{flags, SegmentHeader};
use crate::state::HandshakeState;
use crate::stream::SegmentStream;
use crate::trace::Transcript;

/// Fixed name of the server-side transcript file.
pub const TRANSCRIPT_FILE: &str = "handshake_server.txt";

/// Bind `addr` and serve one handshake.
pub async fn run(addr: SocketAddr, transcript: &Path) -> Result<HandshakeSummary, HandshakeError> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, transcript).await
}

/// Serve one handshake on an already-bound listener.
///
/// Split out from [`run`] so callers (and tests) can bind an ephemeral port
/// first and learn the address before the client connects.
pub async fn serve(
    listener: TcpListener,
    transcript: &Path,
) -> Result<HandshakeSummary, HandshakeError> {
    let mut transcript = Transcript::create(transcript)?;
    let local_port = listener.local_addr()?.port();
    let mut state = HandshakeState::Closed;

    transcript.line(&format!("Server listening on port {local_port}"))?;

    let (tcp, peer) = listener.accept().await?;
    transcript.line(&format!("Client connected from {peer}"))?;

    let mut stream = SegmentStream::new(tcp)?;

    let isn: u32 = rand::rng().random();
    log::debug!("server ISN = {isn}, starting in state {state}");

    // Step 1: receive SYN.
    transcript.step(1, "Server receives SYN")?;
    let (syn, raw) = stream.recv().await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&syn)?;
    let client_isn = syn.seq;
    let client_port = syn.source_port;
    state = HandshakeState::SynReceived;
    log::debug!("state -> {state}");

    // Step 2: send SYN-ACK, acknowledging the client's ISN + 1.
    transcript.step(2, "Server sends SYN-ACK")?;
    let syn_ack = SegmentHeader::new(
        local_port,
        client_port,
        isn,
        client_isn.wrapping_add(1),
        flags::SYN_ACK,
    );
    let raw = stream.send(&syn_ack).await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&syn_ack)?;

    // Step 3: receive the final ACK.
    transcript.step(3, "Server receives ACK")?;
    let (ack, raw) = stream.recv().await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&ack)?;
    state = HandshakeState::Established;
    log::debug!("state -> {state}");

    transcript.line("")?;
    transcript.line("3-way handshake completed successfully!")?;

    // Exactly one connection is served; dropping the listener and stream
    // closes both sockets.
    Ok(HandshakeSummary {
        state,
        local_port,
        peer_port: client_port,
        local_next: isn.wrapping_add(1),
        peer_next: client_isn.wrapping_add(1),
    })
}
