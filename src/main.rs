//! pattern-mux server.
//!
//! Serves a TOML route table: every request is resolved against the
//! `[[routes]]` patterns in order and answered by the first match, a 301 to
//! the trailing-slash form, a 405 with `Allow`, or a 404.

use clap::Parser;

use pattern_mux::lifecycle::startup::{self, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args).await?;
    Ok(())
}
