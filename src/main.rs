//! Entry point for `tcp-handshake`.
//!
//! Parses CLI arguments and dispatches into either **server** or **client**
//! mode.  All actual protocol work is delegated to library modules; `main.rs`
//! owns only process setup (logging, argument parsing).

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tcp_handshake::{client, server};

/// Simulated TCP 3-way handshake over an established TCP stream.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Run as a server: accept one connection, answer its handshake, exit.
    Server {
        /// Local address to bind (e.g. 0.0.0.0:9000).
        #[arg(short, long, default_value = "0.0.0.0:9000")]
        bind: String,
    },
    /// Run as a client: connect and initiate the handshake.
    Client {
        /// Remote server address (e.g. 127.0.0.1:9000).
        #[arg(short, long)]
        server: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise env_logger; set RUST_LOG to control verbosity.
    env_logger::init();

    let cli = Cli::parse();

    match cli.mode {
        Mode::Server { bind } => {
            let addr: SocketAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: {bind}"))?;
            log::info!("Starting server on {addr}");
            let summary = server::run(addr, Path::new(server::TRANSCRIPT_FILE)).await?;
            log::info!("Server handshake finished in state {}", summary.state);
        }
        Mode::Client { server } => {
            let addr: SocketAddr = server
                .parse()
                .with_context(|| format!("invalid server address: {server}"))?;
            log::info!("Starting client, connecting to {addr}");
            let summary = client::run(addr, Path::new(client::TRANSCRIPT_FILE)).await?;
            log::info!("Client handshake finished in state {}", summary.state);
        }
    }

    Ok(())
}
