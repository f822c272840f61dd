//! netrm CLI
//!
//! Command-line interface for network resource management.
//!
//! # Usage
//!
//! ```bash
//! netrm firewall network-rule new --name dns --protocol UDP \
//!     --source-address 10.0.0.0/16 --destination-address 8.8.8.8 --destination-port 53
//! netrm load-balancer get --resource-group rg --name web-lb --format json
//! netrm load-balancer frontend-ip-config remove --file lb.json --name fe-old
//! netrm load-balancer frontend-ip-config remove --resource-group rg \
//!     --load-balancer-name web-lb --name fe-old --apply
//! netrm --debug load-balancer get --resource-group rg --name web-lb
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use crossbeam::queue::SegQueue;
use netrm_common::{DebugStreamTraceListener, TraceSource, TraceSourceLayer};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod config;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "netrm")]
#[command(version)]
#[command(about = "Network resource management command line interface", long_about = None)]
struct Cli {
    /// Management API endpoint URL
    #[arg(long, env = "NETRM_API_URL")]
    api_url: Option<String>,

    /// Subscription ID
    #[arg(long, env = "NETRM_SUBSCRIPTION_ID")]
    subscription_id: Option<String>,

    /// Bearer access token
    #[arg(long, env = "NETRM_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Management API version
    #[arg(long, env = "NETRM_API_VERSION")]
    api_version: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    /// Print authentication trace messages to stderr
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage firewall rules
    Firewall {
        #[command(subcommand)]
        action: FirewallCommands,
    },
    /// Manage load balancers
    LoadBalancer {
        #[command(subcommand)]
        action: LoadBalancerCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FirewallCommands {
    /// Network rules
    NetworkRule {
        #[command(subcommand)]
        action: NetworkRuleCommands,
    },
}

#[derive(Subcommand)]
enum NetworkRuleCommands {
    /// Build a network rule
    New(NewNetworkRuleArgs),
}

#[derive(Args)]
struct NewNetworkRuleArgs {
    /// Name of the rule
    #[arg(long)]
    name: String,
    /// Description of the rule
    #[arg(long)]
    description: Option<String>,
    /// Source addresses
    #[arg(long = "source-address", value_delimiter = ',', num_args = 1..)]
    source_addresses: Vec<String>,
    /// Destination addresses
    #[arg(long = "destination-address", value_delimiter = ',', num_args = 1..)]
    destination_addresses: Vec<String>,
    /// Destination ports
    #[arg(long = "destination-port", value_delimiter = ',', num_args = 1..)]
    destination_ports: Vec<String>,
    /// Protocols: Any, ICMP, TCP, UDP
    #[arg(long = "protocol", value_delimiter = ',', num_args = 1..)]
    protocols: Vec<String>,
}

#[derive(Subcommand)]
enum LoadBalancerCommands {
    /// Fetch a load balancer
    Get {
        #[arg(long)]
        resource_group: String,
        #[arg(long)]
        name: String,
    },
    /// Submit a load balancer from file
    Set {
        #[arg(short, long)]
        file: String,
        /// Needed when the file has no resource ID
        #[arg(long)]
        resource_group: Option<String>,
    },
    /// Frontend IP configurations
    FrontendIpConfig {
        #[command(subcommand)]
        action: FrontendIpConfigCommands,
    },
}

#[derive(Subcommand)]
enum FrontendIpConfigCommands {
    /// Remove a frontend IP configuration
    Remove(RemoveFrontendIpConfigArgs),
}

#[derive(Args)]
struct RemoveFrontendIpConfigArgs {
    /// Load balancer JSON or YAML file, `-` for stdin
    #[arg(short, long, conflicts_with_all = ["resource_group", "load_balancer_name"])]
    file: Option<String>,
    /// Resource group of the load balancer to fetch
    #[arg(long, requires = "load_balancer_name")]
    resource_group: Option<String>,
    /// Name of the load balancer to fetch
    #[arg(long, requires = "resource_group")]
    load_balancer_name: Option<String>,
    /// Name of the frontend IP configuration
    #[arg(long)]
    name: Option<String>,
    /// Submit the modified load balancer
    #[arg(long)]
    apply: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn init_tracing(auth_trace: Arc<TraceSource>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .with(TraceSourceLayer::new(auth_trace))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Config not readable, using defaults");
        config::Config::default()
    });

    let format = match cli.format {
        Some(format) => format,
        None => config
            .default_format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()?
            .unwrap_or(OutputFormat::Table),
    };
    let api_url = cli
        .api_url
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| config::DEFAULT_API_URL.to_string());
    let api_version = cli
        .api_version
        .or_else(|| config.api_version.clone())
        .unwrap_or_else(|| config::DEFAULT_API_VERSION.to_string());
    let subscription_id = cli.subscription_id.or_else(|| config.subscription_id.clone());

    let client = commands::ApiClient::new(
        &api_url,
        subscription_id.as_deref(),
        &api_version,
        cli.access_token.as_deref(),
        config.access_token.as_deref(),
    );

    match cli.command {
        Commands::Firewall { action } => commands::firewall::handle(action, format),
        Commands::LoadBalancer { action } => commands::load_balancer::handle(action, &client, format).await,
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let auth_trace = Arc::new(TraceSource::new("netrm.auth"));
    init_tracing(auth_trace.clone());
    let debug_listener = cli
        .debug
        .then(|| DebugStreamTraceListener::register(&auth_trace, Arc::new(SegQueue::new())));

    let result = run(cli).await;

    if let Some(listener) = debug_listener {
        for message in listener.drain() {
            eprint!("{}", format!("DEBUG: {}", message).dimmed());
        }
        DebugStreamTraceListener::unregister(&auth_trace, &listener);
    }

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
