//! Chat relay server entry point.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server -- --port 3000
//! ```

use clap::Parser;

use roomcast_server::Config;
use roomcast_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = roomcast_server::run(config).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
