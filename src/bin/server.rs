//! Collaborative whiteboard session server.
//!
//! Hosts rooms over WebSocket and relays drawing, board and chat events
//! between the members of each room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server -- --host 127.0.0.1 --port 5050
//! ```

use clap::Parser;

use whiteboard_app_rs::logger::setup_logger;
use whiteboard_app_rs::{ServerConfig, run_server};

#[derive(Parser, Debug)]
#[command(version, about = "Collaborative whiteboard session server")]
struct Args {
    /// Address to bind
    #[arg(long, env = "WHITEBOARD_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "WHITEBOARD_PORT", default_value_t = 5050)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    // Run the server
    if let Err(e) = run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
