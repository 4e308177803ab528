//! waxrpc CLI: query a WAX / Antelope node from the terminal.
//!
//! Usage:
//! ```bash
//! # Chain status
//! waxrpc --url https://wax.greymass.com info
//!
//! # Contract table rows
//! waxrpc --url https://wax.greymass.com table --code eosio.token --scope alice --table accounts
//!
//! # Settings from a file, through a proxy pool
//! waxrpc --config waxrpc.toml --proxy 10.0.0.1:3128 --proxy 10.0.0.2:3128 info
//! ```

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use waxrpc::{CallContext, GetTableRowsPayload, Sdk, SdkConfig, SdkError};

#[derive(Parser)]
#[command(name = "waxrpc", about = "Query WAX / Antelope chain nodes", version)]
struct Cli {
    /// Node base URL
    #[arg(long, env = "WAX_NODE_URL", global = true)]
    url: Option<String>,

    /// TOML file with node_url / proxies / timeout_ms
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Proxy address; repeat to build a pool picked at random per request
    #[arg(long = "proxy", global = true)]
    proxies: Vec<String>,

    /// Client-wide timeout for every request
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Deadline for this single call
    #[arg(long, global = true)]
    deadline_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node's chain info
    Info,

    /// Print rows of a contract table
    Table {
        /// Contract account
        #[arg(long)]
        code: String,
        /// Table scope
        #[arg(long)]
        scope: String,
        /// Table name
        #[arg(long)]
        table: String,
        #[arg(long, default_value = "")]
        lower_bound: String,
        #[arg(long, default_value = "")]
        upper_bound: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        index_position: i64,
        /// e.g. name, i64, i128, sha256
        #[arg(long)]
        key_type: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,waxrpc=debug,waxrpc_core=debug,waxrpc_http=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(
        node_url = %config.node_url,
        proxies = config.proxies.len(),
        timeout_ms = ?config.timeout_ms,
        "resolved configuration"
    );
    let sdk = Sdk::from_config(&config).context("create sdk")?;

    let ctx = match cli.deadline_ms {
        Some(ms) => CallContext::with_timeout(Duration::from_millis(ms)),
        None => CallContext::background(),
    };

    // Ctrl-C cancels the in-flight call instead of killing the process mid-request.
    let token = ctx.token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    match cli.command {
        Commands::Info => {
            let info = sdk.get_info_with_context(&ctx).await.context("get chain info")?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Table {
            code,
            scope,
            table,
            lower_bound,
            upper_bound,
            limit,
            index_position,
            key_type,
        } => {
            let mut payload = GetTableRowsPayload::new(code, scope, table)
                .bounds(lower_bound, upper_bound)
                .limit(limit)
                .index_position(index_position);
            if let Some(key_type) = key_type {
                payload = payload.key_type(key_type);
            }

            match sdk
                .get_table_rows_page_with_context::<serde_json::Value>(&ctx, &payload)
                .await
            {
                Ok(page) => {
                    println!("{}", serde_json::to_string_pretty(&page.rows)?);
                    if page.more {
                        eprintln!("more rows available, next key: {}", page.next_key);
                    }
                }
                Err(SdkError::NoTableRows) => eprintln!("no rows found"),
                Err(e) => return Err(e).context("get table rows"),
            }
        }
    }

    Ok(())
}

/// File values first, then command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<SdkConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("read config file {}", path.display()))?;
            toml::from_str::<SdkConfig>(&raw).context("parse config")?
        }
        None => SdkConfig::default(),
    };

    if let Some(url) = &cli.url {
        config.node_url = url.clone();
    }
    if !cli.proxies.is_empty() {
        config.proxies = cli.proxies.clone();
    }
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }

    if config.node_url.is_empty() {
        bail!("node url is required: pass --url, set WAX_NODE_URL or use --config");
    }
    Ok(config)
}
