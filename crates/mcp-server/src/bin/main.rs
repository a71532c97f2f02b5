//! openapi-surface MCP server CLI
//!
//! Loads one OpenAPI document and serves `detect_auth`, `list_endpoints` and
//! `get_endpoint` to MCP clients. Logs go to stderr so stdout stays a clean
//! protocol stream in stdio mode.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_server::{McpServer, Overrides, Settings, TransportKind};
use openapi_surface::DocumentLoader;

/// Expose an OpenAPI document to MCP clients
#[derive(Parser, Debug)]
#[command(name = "openapi-surface-mcp")]
#[command(version)]
#[command(about = "Explore an OpenAPI document's auth and endpoints over MCP")]
struct Args {
    /// OpenAPI document to serve (JSON or YAML)
    #[arg(long, env = "OPENAPI_SURFACE_SPEC")]
    spec: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, env = "OPENAPI_SURFACE_CONFIG")]
    config: Option<PathBuf>,

    /// Run in stdio mode (for MCP clients like Claude Desktop)
    #[arg(long, conflicts_with = "http")]
    stdio: bool,

    /// Run in HTTP mode
    #[arg(long)]
    http: bool,

    /// Port for the HTTP server
    #[arg(long)]
    port: Option<u16>,

    /// Server name reported to clients
    #[arg(long)]
    name: Option<String>,

    /// Skip output validation against the boundary schemas
    #[arg(long)]
    no_validate: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let transport = if self.stdio {
            Some(TransportKind::Stdio)
        } else if self.http {
            Some(TransportKind::Http)
        } else {
            None
        };

        Overrides {
            spec_path: self.spec.clone(),
            transport,
            port: self.port,
            server_name: self.name.clone(),
            skip_validation: self.no_validate,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = Settings::load_or_default(args.config.as_deref())?.with_overrides(args.overrides());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let spec_path = settings.require_spec_path()?;
    let document = DocumentLoader::load(spec_path)?;
    info!(
        "Loaded {} from {:?}",
        document.title().unwrap_or("OpenAPI document"),
        spec_path
    );

    let server = McpServer::new(document, &settings);
    server.run().await?;

    Ok(())
}
