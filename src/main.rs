//! MCP server for the Xano metadata API.
//!
//! Run with `xano-mcp --token <TOKEN>` or set `XANO_API_TOKEN` in the environment.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xano_mcp::{McpServer, XanoConfig, XanoSession};

/// MCP server for the Xano metadata API.
///
/// Exposes Xano instance, workspace, table, schema, index, record, file, and
/// API-group operations as MCP tools for AI agents.
/// Communicates via JSON-RPC 2.0 over stdin/stdout.
#[derive(Parser)]
#[command(name = "xano-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Xano Meta API access token.
    #[arg(long, env = "XANO_API_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Default instance name, used when a tool call omits instance_name.
    #[arg(long, env = "XANO_INSTANCE", value_name = "NAME")]
    instance: Option<String>,

    /// Enable debug logging to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("xano_mcp=debug".parse().unwrap()))
            .with_writer(std::io::stderr)
            .init();
    }

    // Validate arguments
    let token = match args.token {
        Some(t) if !t.is_empty() => t,
        _ => {
            eprintln!("Error: Xano API token not provided.");
            eprintln!("Please set XANO_API_TOKEN or use the --token argument");
            std::process::exit(1);
        }
    };

    let mut config = XanoConfig::new(token);
    if let Some(instance) = args.instance {
        config = config.with_default_instance(instance);
    }

    // Create session and server
    let session = match XanoSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: Failed to create session: {}", e);
            std::process::exit(1);
        }
    };
    let mut server = McpServer::new(session);

    // Run the server
    if let Err(e) = server.run().await {
        eprintln!("Error: Server error: {}", e);
        std::process::exit(1);
    }
}
