//! Wire-format definitions for pseudo-TCP handshake segments.
//!
//! Every message exchanged between peers is a [`SegmentHeader`].  This module
//! is responsible for:
//! - Defining the on-wire binary layout of the fixed 20-byte header.
//! - Serialising a [`SegmentHeader`] into a byte buffer ready for transmission.
//! - Deserialising a raw byte slice back into a [`SegmentHeader`], returning
//!   an error for truncated input.
//!
//! No I/O happens here — this is pure data transformation.
//!
//! # Wire format
//!
//! All multi-byte integers are **big-endian**.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Source Port          |       Destination Port        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Sequence Number                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Acknowledgment Number                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | Offset/Rsrvd  |     Flags     |          Window Size          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           Checksum            |        Urgent Pointer         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Total header size: [`HEADER_LEN`] = 20 bytes.
//! src(2) + dst(2) + seq(4) + ack(4) + offset(1) + flags(1) + window(2) +
//! checksum(2) + urgent(2)
//!
//! The checksum field carries the dummy constant [`DUMMY_CHECKSUM`] — this is
//! a handshake simulation over a transport that already guarantees integrity,
//! so nothing is computed or verified.

use thiserror::Error;

/// Bit-flag constants for the `flags` header field (TCP byte-13 layout).
pub mod flags {
    /// Finish — sender has no more data to send.
    pub const FIN: u8 = 0x01;
    /// Synchronise sequence numbers (handshake initiation).
    pub const SYN: u8 = 0x02;
    /// Reset the connection.
    pub const RST: u8 = 0x04;
    /// Push buffered data to the receiving application.
    pub const PSH: u8 = 0x08;
    /// Acknowledgement field is valid.
    pub const ACK: u8 = 0x10;
    /// Urgent pointer field is valid.
    pub const URG: u8 = 0x20;
    /// Combined SYN+ACK as sent in the second handshake step.
    pub const SYN_ACK: u8 = SYN | ACK;
}

/// Byte length of the fixed-size header on the wire.
pub const HEADER_LEN: usize = 20;

/// Data-offset byte: high nibble = 5 × 32-bit words (20 bytes, no options),
/// low nibble reserved and zero.
pub const DATA_OFFSET_BYTE: u8 = 0x50;

/// Advertised receive window, fixed for every segment (12 × 1460-byte MSS).
pub const WINDOW_SIZE: u16 = 17520;

/// Dummy checksum constant carried in every segment.
pub const DUMMY_CHECKSUM: u16 = 0xFFFF;

// Byte offsets of each field within the serialised header.
const OFF_SOURCE_PORT: usize = 0;
const OFF_DEST_PORT: usize = 2;
const OFF_SEQ: usize = 4;
const OFF_ACK: usize = 8;
const OFF_DATA_OFFSET: usize = 12;
const OFF_FLAGS: usize = 13;
const OFF_WINDOW: usize = 14;
const OFF_CHECKSUM: usize = 16;
const OFF_URGENT: usize = 18;

/// Fixed-size pseudo-TCP header.
///
/// Fields are in host byte order; [`SegmentHeader::encode`] converts to
/// big-endian on the wire and [`SegmentHeader::decode`] converts back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    /// Sending side's port number.
    pub source_port: u16,
    /// Receiving side's port number.
    pub dest_port: u16,
    /// Sequence number (the ISN during the handshake).
    pub seq: u32,
    /// Acknowledgment number (peer's next expected sequence number).
    pub ack: u32,
    /// Data-offset nibble plus reserved bits; always [`DATA_OFFSET_BYTE`].
    pub data_offset: u8,
    /// Bitmask of [`flags`] constants.
    pub flags: u8,
    /// Advertised receive-window size in bytes.
    pub window: u16,
    /// Checksum field; carries [`DUMMY_CHECKSUM`], never verified.
    pub checksum: u16,
    /// Urgent pointer; always zero.
    pub urgent: u16,
}

impl SegmentHeader {
    /// Build a header for one handshake step.
    ///
    /// The caller supplies the fields that vary between steps; the fixed
    /// fields (data offset, window, checksum, urgent pointer) take their
    /// constant values.
    pub fn new(source_port: u16, dest_port: u16, seq: u32, ack: u32, flags: u8) -> Self {
        Self {
            source_port,
            dest_port,
            seq,
            ack,
            data_offset: DATA_OFFSET_BYTE,
            flags,
            window: WINDOW_SIZE,
            checksum: DUMMY_CHECKSUM,
            urgent: 0,
        }
    }

    /// `true` if the SYN bit is set.
    pub fn has_syn(&self) -> bool {
        self.flags & flags::SYN != 0
    }

    /// `true` if the ACK bit is set.
    pub fn has_ack(&self) -> bool {
        self.flags & flags::ACK != 0
    }

    /// Serialise this header into a 20-byte array in network byte order.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];

        buf[OFF_SOURCE_PORT..OFF_SOURCE_PORT + 2]
            .copy_from_slice(&self.source_port.to_be_bytes());
        buf[OFF_DEST_PORT..OFF_DEST_PORT + 2].copy_from_slice(&self.dest_port.to_be_bytes());
        buf[OFF_SEQ..OFF_SEQ + 4].copy_from_slice(&self.seq.to_be_bytes());
        buf[OFF_ACK..OFF_ACK + 4].copy_from_slice(&self.ack.to_be_bytes());
        buf[OFF_DATA_OFFSET] = self.data_offset;
        buf[OFF_FLAGS] = self.flags;
        buf[OFF_WINDOW..OFF_WINDOW + 2].copy_from_slice(&self.window.to_be_bytes());
        buf[OFF_CHECKSUM..OFF_CHECKSUM + 2].copy_from_slice(&self.checksum.to_be_bytes());
        buf[OFF_URGENT..OFF_URGENT + 2].copy_from_slice(&self.urgent.to_be_bytes());

        buf
    }

    /// Parse a [`SegmentHeader`] from a raw byte slice.
    ///
    /// Returns [`Err`] if `buf` is shorter than [`HEADER_LEN`].  Bytes past
    /// the header are ignored.  The flags byte is taken as-is — the handshake
    /// script is unconditional, so no flag validation happens here — and the
    /// checksum field is stored without verification.
    pub fn decode(buf: &[u8]) -> Result<Self, SegmentError> {
        if buf.len() < HEADER_LEN {
            return Err(SegmentError::BufferTooShort(buf.len()));
        }

        Ok(Self {
            source_port: u16::from_be_bytes(
                buf[OFF_SOURCE_PORT..OFF_SOURCE_PORT + 2].try_into().unwrap(),
            ),
            dest_port: u16::from_be_bytes(buf[OFF_DEST_PORT..OFF_DEST_PORT + 2].try_into().unwrap()),
            seq: u32::from_be_bytes(buf[OFF_SEQ..OFF_SEQ + 4].try_into().unwrap()),
            ack: u32::from_be_bytes(buf[OFF_ACK..OFF_ACK + 4].try_into().unwrap()),
            data_offset: buf[OFF_DATA_OFFSET],
            flags: buf[OFF_FLAGS],
            window: u16::from_be_bytes(buf[OFF_WINDOW..OFF_WINDOW + 2].try_into().unwrap()),
            checksum: u16::from_be_bytes(buf[OFF_CHECKSUM..OFF_CHECKSUM + 2].try_into().unwrap()),
            urgent: u16::from_be_bytes(buf[OFF_URGENT..OFF_URGENT + 2].try_into().unwrap()),
        })
    }
}

/// Errors that can arise when parsing a raw segment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    /// Buffer shorter than the fixed header size.
    #[error("buffer too short for a segment header: got {0} bytes, need {}", HEADER_LEN)]
    BufferTooShort(usize),
}
