//! Toolhost MCP Server — entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use toolhost_mcp::config::ServerConfig;
use toolhost_mcp::protocol::Dispatcher;
use toolhost_mcp::tools::builtin_registry;
use toolhost_mcp::transport::StdioTransport;
use toolhost_mcp::types::{InitializeResult, JsonRpcRequest, ToolDefinition};

#[derive(Parser)]
#[command(
    name = "toolhost-mcp",
    about = "MCP server for toolhost — serves registered tools over JSON-RPC 2.0",
    version
)]
struct Cli {
    /// Server name reported to clients.
    /// Also reads from TOOLHOST_SERVER_NAME env var.
    #[arg(long)]
    name: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// Maximum number of requests handled concurrently.
        /// Also reads from TOOLHOST_MAX_IN_FLIGHT env var.
        #[arg(long)]
        max_in_flight: Option<usize>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Print the tool list with input schemas as JSON.
    Tools,

    /// Call one tool and print the JSON-RPC response.
    Call {
        /// Tool name.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(default_value = "{}")]
        arguments: String,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   toolhost-mcp completions bash > ~/.local/share/bash-completion/completions/toolhost-mcp
    ///   toolhost-mcp completions zsh > ~/.zfunc/_toolhost-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli
        .command
        .unwrap_or(Commands::Serve { max_in_flight: None })
    {
        Commands::Serve { max_in_flight } => {
            let config = ServerConfig::resolve(cli.name.as_deref(), max_in_flight);
            let registry = builtin_registry().context("failed to register built-in tools")?;
            tracing::info!("Toolhost MCP server");
            tracing::info!("Tools: {}", registry.names().join(", "));

            let dispatcher = Arc::new(Dispatcher::with_server_info(registry, config.server_info));
            let transport =
                StdioTransport::new(dispatcher).with_max_in_flight(config.max_in_flight);
            transport.run().await?;
        }

        Commands::Info => {
            let config = ServerConfig::resolve(cli.name.as_deref(), None);
            let capabilities = InitializeResult::for_server(config.server_info);
            let registry = builtin_registry()?;
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": registry.names(),
                "tool_count": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Tools => {
            let registry = builtin_registry()?;
            let tools: Vec<ToolDefinition> =
                registry.list().iter().map(ToolDefinition::from).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "tools": tools }))?
            );
        }

        Commands::Call { tool, arguments } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&arguments).context("arguments must be valid JSON")?;
            let config = ServerConfig::resolve(cli.name.as_deref(), None);
            let dispatcher = Dispatcher::with_server_info(builtin_registry()?, config.server_info);
            let request = JsonRpcRequest::new(
                1i64,
                "tools/call",
                Some(serde_json::json!({ "name": tool, "arguments": arguments })),
            );
            let response = dispatcher.dispatch(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.is_error() {
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "toolhost-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
