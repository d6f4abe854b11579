//! Integration tests for the scripted 3-way handshake.
//!
//! Each test binds a real `tokio::net::TcpListener` on loopback, runs the
//! server half in a background task, and verifies that both sides reach
//! `HandshakeState::Established` with agreeing sequence spaces.
//!
//! Transcript files land in the temp directory under per-test names so
//! parallel tests never write the same path.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tokio::net::TcpListener;

use tcp_handshake::{
    client,
    handshake::{HandshakeError, HandshakeSummary},
    server,
    state::HandshakeState,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Per-test transcript path in the temp directory.
fn transcript_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tcp-handshake-{}-{name}", std::process::id()))
}

/// Bind a listener on an OS-chosen loopback port and return
/// `(listener, resolved_addr)` so the client knows where to connect.
async fn bind_listener() -> (TcpListener, SocketAddr) {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let listener = TcpListener::bind(addr).await.expect("bind listener");
    let local = listener.local_addr().expect("listener local addr");
    (listener, local)
}

/// Run one complete handshake, returning `(client_summary, server_summary)`.
async fn run_handshake(test_name: &str) -> (HandshakeSummary, HandshakeSummary) {
    let (listener, server_addr) = bind_listener().await;

    let server_transcript = transcript_path(&format!("{test_name}-server.txt"));
    let server_task = {
        let path = server_transcript.clone();
        tokio::spawn(async move { server::serve(listener, &path).await })
    };

    let client_transcript = transcript_path(&format!("{test_name}-client.txt"));
    let client_summary = tokio::time::timeout(
        Duration::from_secs(5),
        client::run(server_addr, &client_transcript),
    )
    .await
    .expect("client timed out")
    .expect("client handshake failed");

    let server_summary = tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server timed out")
        .expect("server task panicked")
        .expect("server handshake failed");

    (client_summary, server_summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Both sides should reach `Established` after a clean handshake on loopback.
#[tokio::test]
async fn handshake_both_sides_reach_established() {
    let (client, server) = run_handshake("established").await;

    assert_eq!(client.state, HandshakeState::Established);
    assert_eq!(server.state, HandshakeState::Established);
}

/// After the handshake, each side's `local_next` must equal the other's
/// `peer_next`: the SYN consumed one sequence number on each side.
#[tokio::test]
async fn handshake_sequence_numbers_agree() {
    let (client, server) = run_handshake("seq-agree").await;

    assert_eq!(
        server.peer_next, client.local_next,
        "server's view of the client's next seq should equal client ISN + 1"
    );
    assert_eq!(
        client.peer_next, server.local_next,
        "client's view of the server's next seq should equal server ISN + 1"
    );
}

/// The server learns the client's port from the SYN header, not from the
/// TCP-level peer address; both must name the same ephemeral port.
#[tokio::test]
async fn server_sees_client_source_port_from_header() {
    let (client, server) = run_handshake("ports").await;

    assert_eq!(server.peer_port, client.local_port);
    assert_eq!(client.peer_port, server.local_port);
}

/// Both transcripts must record the three step banners, the raw hex of each
/// header, and the completion line.
#[tokio::test]
async fn transcripts_record_each_step() {
    let (_, _) = run_handshake("transcripts").await;

    let client_log =
        std::fs::read_to_string(transcript_path("transcripts-client.txt")).expect("client log");
    let server_log =
        std::fs::read_to_string(transcript_path("transcripts-server.txt")).expect("server log");

    for step in [
        "--- Step 1: Client sends SYN ---",
        "--- Step 2: Client receives SYN-ACK ---",
        "--- Step 3: Client sends ACK ---",
    ] {
        assert!(client_log.contains(step), "client log missing {step:?}");
    }
    for step in [
        "--- Step 1: Server receives SYN ---",
        "--- Step 2: Server sends SYN-ACK ---",
        "--- Step 3: Server receives ACK ---",
    ] {
        assert!(server_log.contains(step), "server log missing {step:?}");
    }

    // Three headers crossed each wire; each was hex-dumped once per side.
    assert_eq!(client_log.matches("Raw TCP Header: ").count(), 3);
    assert_eq!(server_log.matches("Raw TCP Header: ").count(), 3);

    assert!(client_log.contains("3-way handshake completed successfully!"));
    assert!(server_log.contains("3-way handshake completed successfully!"));
}

/// Connecting to a port where nobody listens should surface the OS error
/// rather than hang.
#[tokio::test]
async fn connect_to_closed_port_fails() {
    // Bind then immediately drop so the ephemeral port is closed again.
    let silent_addr = {
        let (listener, addr) = bind_listener().await;
        drop(listener);
        addr
    };

    let transcript = transcript_path("refused-client.txt");
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client::run(silent_addr, &transcript),
    )
    .await
    .expect("connect attempt timed out");

    assert!(
        matches!(result, Err(HandshakeError::Io(_))),
        "expected an I/O error, got: {result:?}"
    );
}
