//! Pistols duelist client binary.
//!
//! Configuration comes from the environment (and `.env`), with command line
//! flags taking precedence. See [`pistols_client::ClientConfig::from_env`].
//!
//! # Examples
//!
//! ```bash
//! pistols commit --duel 0x1 --round 1 5 7 2 1
//! pistols reveal --duel 0x1 --round 1
//! pistols --duelist 0xa11ce pact 0xb0b
//! pistols demo
//! ```

use anyhow::Result;
use clap::Parser;

use pistols_client::ClientConfig;
use pistols_client::cli::{self, Cli};
use pistols_client::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.merge_into(ClientConfig::from_env());

    let _guard = logging::setup_logging(&config)?;

    tracing::debug!("Configuration: {:?}", config);

    cli::run(cli.command, config).await
}
