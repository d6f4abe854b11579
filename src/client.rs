//! Active-open driver: the client side of the scripted handshake.
//!
//! The script is fixed and unconditional:
//! 1. connect, learn the OS-assigned source port;
//! 2. send SYN carrying a random ISN;
//! 3. receive the SYN-ACK and note the server's sequence number;
//! 4. send ACK with both sequence spaces advanced by one, then close.
//!
//! Received flags are not validated before proceeding — the transport
//! already guarantees delivery and ordering, and the peer runs the mirror
//! script.

use std::net::SocketAddr;
use std::path::Path;

use rand::Rng;
use tokio::net::TcpStream;

use crate::handshake::{HandshakeError, HandshakeSummary};
use crate::segment::{flags, SegmentHeader};
use crate::state::HandshakeState;
use crate::stream::SegmentStream;
use crate::trace::Transcript;

/// Fixed name of the client-side transcript file.
pub const TRANSCRIPT_FILE: &str = "handshake_client.txt";

/// Connect to `server`, run the three-step script, and return the summary.
///
/// `transcript` is the path of the transcript file; the binary passes
/// [`TRANSCRIPT_FILE`].
pub async fn run(
    server: SocketAddr,
    transcript: &Path,
) -> Result<HandshakeSummary, HandshakeError> {
    let mut transcript = Transcript::create(transcript)?;

    let tcp = TcpStream::connect(server).await?;
    let mut stream = SegmentStream::new(tcp)?;
    let source_port = stream.local_addr.port();
    let mut state = HandshakeState::Closed;

    transcript.line(&format!("Connected to server on port {}", server.port()))?;
    transcript.line(&format!("Client using source port: {source_port}"))?;

    let isn: u32 = rand::rng().random();
    log::debug!("client ISN = {isn}, starting in state {state}");

    // Step 1: send SYN.
    transcript.step(1, "Client sends SYN")?;
    let syn = SegmentHeader::new(source_port, server.port(), isn, 0, flags::SYN);
    let raw = stream.send(&syn).await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&syn)?;
    state = HandshakeState::SynSent;
    log::debug!("state -> {state}");

    // Step 2: receive SYN-ACK.
    transcript.step(2, "Client receives SYN-ACK")?;
    let (syn_ack, raw) = stream.recv().await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&syn_ack)?;
    let server_seq = syn_ack.seq;

    // Step 3: send ACK.  The SYN consumed one sequence number on each side.
    transcript.step(3, "Client sends ACK")?;
    let ack = SegmentHeader::new(
        source_port,
        server.port(),
        isn.wrapping_add(1),
        server_seq.wrapping_add(1),
        flags::ACK,
    );
    let raw = stream.send(&ack).await?;
    transcript.raw_header(&raw)?;
    transcript.header_fields(&ack)?;
    state = HandshakeState::Established;
    log::debug!("state -> {state}");

    transcript.line("")?;
    transcript.line("3-way handshake completed successfully!")?;

    Ok(HandshakeSummary {
        state,
        local_port: source_port,
        peer_port: server.port(),
        local_next: isn.wrapping_add(1),
        peer_next: server_seq.wrapping_add(1),
    })
}
