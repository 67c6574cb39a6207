//! listkeep - persisted list manager
//!
//! Serves the item API (`/api/items`) and a health probe (`/health`) over
//! HTTP, backed by a single SQLite data file.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use listkeep_server::config::ENV_MODE;
use listkeep_server::{run_server, ServerConfig};
use tracing::info;

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "listkeep", version, about = "Persisted list manager HTTP server")]
struct Cli {
    /// Port to listen on [env: PORT] [default: 4000]
    #[arg(short, long)]
    port: Option<u16>,

    /// IP address to bind [env: BIND_ADDR] [default: 0.0.0.0]
    #[arg(short, long)]
    bind: Option<IpAddr>,

    /// SQLite data file [env: DATABASE_PATH]
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Use the packaged deployment layout [env: APP_ENV=production]
    #[arg(long)]
    production: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Flags override the environment, which overrides mode defaults.
    fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::from_lookup(|key| {
            if key == ENV_MODE && self.production {
                return Some("production".to_string());
            }
            std::env::var(key).ok()
        })?;

        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(ip) = self.bind {
            config.bind_addr.set_ip(ip);
        }
        if let Some(path) = &self.db_path {
            config.db_path = path.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(cli.debug).ok();

    let config = cli.resolve_config().context("invalid configuration")?;
    info!(
        mode = config.mode.as_str(),
        addr = %config.bind_addr,
        db_path = %config.db_path.display(),
        "Starting listkeep"
    );

    run_server(config).await.context("server error")?;
    Ok(())
}
