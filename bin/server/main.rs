//! Agent Lifecycle Server
//!
//! Runs the agent management API as a standalone HTTP server.

use agent_lifecycle::{AgentServer, AgentService, AgentStore, ServerConfig};
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agent-server")]
#[command(about = "HTTP server for owner-scoped AI agent lifecycle management")]
struct Args {
    /// TOML config file (flags and env vars override its values)
    #[arg(short, long, env = "AGENT_CONFIG")]
    config: Option<String>,

    /// Server port
    #[arg(short, long, env = "AGENT_PORT")]
    port: Option<u16>,

    /// Server host
    #[arg(long, env = "AGENT_HOST")]
    host: Option<String>,

    /// Header carrying the authenticated user id
    #[arg(long, env = "AGENT_IDENTITY_HEADER")]
    identity_header: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(header) = self.identity_header {
            config.identity_header = header;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agent_lifecycle=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let config = Args::parse().into_config()?;

    info!("Starting Agent Lifecycle Server");
    info!("  Listening on: {}", config.listen_addr());
    info!("  Identity header: {}", config.identity_header);

    let service = Arc::new(AgentService::new(Arc::new(AgentStore::new())));
    let server = AgentServer::new(config, service);

    // Blocks until shutdown
    server.start().await?;

    Ok(())
}
