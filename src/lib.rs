//! `tcp-handshake` — a didactic TCP three-way handshake carried as an
//! application-layer protocol over an already-established TCP stream.
//!
//! # Architecture
//!
//! ```text
//!  ┌──────────┐    SYN     ┌──────────┐
//!  │  Client  │───────────▶│  Server  │
//!  │          │  SYN-ACK   │          │
//!  │          │◀───────────│          │
//!  │          │    ACK     │          │
//!  └────┬─────┘───────────▶└─────┬────┘
//!       │                        │
//!  ┌────▼────────────────────────▼────┐
//!  │          SegmentStream           │
//!  │  (speaks 20-byte pseudo-TCP      │
//!  │   headers over a TcpStream)      │
//!  └──────────────────────────────────┘
//! ```
//!
//! The underlying transport already guarantees delivery and ordering, so the
//! handshake is a scripted exchange of structured messages: no retransmission,
//! no timers, no flag validation between steps.  Each module has a single
//! responsibility:
//! - [`segment`]   — wire format (serialise / deserialise the 20-byte header)
//! - [`stream`]    — framed segment I/O over a connected TCP stream
//! - [`state`]     — linear handshake progress types
//! - [`handshake`] — outcome and error types shared by both drivers
//! - [`client`]    — active-open script (SYN → SYN-ACK → ACK)
//! - [`server`]    — passive-open script (one connection, then exit)
//! - [`trace`]     — step transcript tee'd to console and file

pub mod client;
pub mod handshake;
pub mod segment;
pub mod server;
pub mod state;
pub mod stream;
pub mod trace;
