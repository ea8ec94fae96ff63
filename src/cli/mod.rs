use crate::session::consts::DEFAULT_POLL_INTERVAL_SECS;
use clap::Parser;
use std::net::SocketAddr;
use url::Url;

#[derive(Debug, Parser)]
pub struct Args {
    /// Base URL of the race backend.
    #[arg(long)]
    pub backend_url: Url,
    #[arg(long)]
    pub race_id: String,
    /// Identity of the racer running this tracker.
    #[arg(long)]
    pub racer_id: String,
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    /// Seconds between two polls of the racers feed. Must be positive.
    #[arg(long)]
    #[arg(default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,
    /// Origins allowed to read the race status and event stream.
    #[arg(long)]
    #[arg(default_value = "http://localhost:3000")]
    pub allowed_origins: Vec<String>,
    #[arg(long)]
    #[arg(default_value = "racer_tracker=info")]
    pub log_filter: String,
}
