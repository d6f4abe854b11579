//! Step-by-step handshake transcript.
//!
//! Both sides record every handshake step — a banner, the raw header bytes
//! in hex, and the decoded fields — to the console and to a fixed-name
//! transcript file, matching the lab-report output format.  Write failures
//! are propagated to the caller rather than ignored.
//!
//! Ambient diagnostics (state changes, byte counts) go through the `log`
//! macros instead; the transcript is program output, not logging.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::segment::SegmentHeader;

/// A transcript writer tee'd to stdout and one output file.
#[derive(Debug)]
pub struct Transcript {
    file: File,
}

impl Transcript {
    /// Create (or truncate) the transcript file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Write one line to both the console and the file.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        println!("{text}");
        writeln!(self.file, "{text}")
    }

    /// Write the banner announcing one handshake step.
    pub fn step(&mut self, number: u8, what: &str) -> io::Result<()> {
        self.line("")?;
        self.line(&format!("--- Step {number}: {what} ---"))
    }

    /// Dump the raw wire image of a header as space-separated uppercase hex.
    pub fn raw_header(&mut self, bytes: &[u8]) -> io::Result<()> {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        self.line(&format!("Raw TCP Header: {}", hex.join(" ")))
    }

    /// Dump the decoded fields of a header, one per line.
    pub fn header_fields(&mut self, header: &SegmentHeader) -> io::Result<()> {
        self.line(&format!("Source port: {}", header.source_port))?;
        self.line(&format!("Destination port: {}", header.dest_port))?;
        self.line(&format!("Sequence number: {}", header.seq))?;
        self.line(&format!("Acknowledgment number: {}", header.ack))?;

        let mut names = Vec::new();
        if header.has_syn() {
            names.push("SYN");
        }
        if header.has_ack() {
            names.push("ACK");
        }
        self.line(&format!("Flags: {}", names.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::flags;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tcp-handshake-trace-{}-{name}", std::process::id()))
    }

    #[test]
    fn transcript_records_step_and_hex() {
        let path = scratch_path("step-and-hex.txt");
        let mut t = Transcript::create(&path).unwrap();
        t.step(1, "Client sends SYN").unwrap();
        t.raw_header(&[0x00, 0x50, 0xFF]).unwrap();
        drop(t);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("--- Step 1: Client sends SYN ---"));
        assert!(content.contains("Raw TCP Header: 00 50 FF"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn transcript_records_decoded_fields() {
        let path = scratch_path("fields.txt");
        let mut t = Transcript::create(&path).unwrap();
        let hdr = SegmentHeader::new(45000, 9000, 1000, 2001, flags::SYN_ACK);
        t.header_fields(&hdr).unwrap();
        drop(t);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Source port: 45000"));
        assert!(content.contains("Destination port: 9000"));
        assert!(content.contains("Sequence number: 1000"));
        assert!(content.contains("Acknowledgment number: 2001"));
        assert!(content.contains("Flags: SYN ACK"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn flags_line_empty_when_no_bits_set() {
        let path = scratch_path("no-flags.txt");
        let mut t = Transcript::create(&path).unwrap();
        t.header_fields(&SegmentHeader::new(1, 2, 0, 0, 0)).unwrap();
        drop(t);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Flags:"));
        assert!(!content.contains("SYN"));
        assert!(!content.contains("ACK"));
        std::fs::remove_file(&path).unwrap();
    }
}
