//! Runtime configuration.

use clap::Parser;

/// Command-line / environment configuration for the relay.
#[derive(Debug, Clone, Parser)]
#[command(name = "roomcast-server", about = "Room-based chat relay with push notifications")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "ROOMCAST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "ROOMCAST_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Restrict message deletion to the original author
    #[arg(long, env = "ROOMCAST_AUTHOR_ONLY_DELETES", default_value_t = false)]
    pub author_only_deletes: bool,

    /// VAPID public key served to subscribing clients
    #[arg(long, env = "ROOMCAST_VAPID_PUBLIC_KEY", default_value = "")]
    pub vapid_public_key: String,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "ROOMCAST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
