//! lifecycle-policy-lookup - read one OpenSearch Serverless lifecycle policy.
//!
//! Reads config from env vars (a `.env` file is honoured):
//!   OSS_ENDPOINT      management API endpoint (default: regional endpoint)
//!   OSS_REGION        region for the default endpoint (default: us-east-1)
//!   OSS_TIMEOUT_SECS  HTTP timeout (default: 30)
//!   OSS_BEARER_TOKEN  optional bearer token for authenticating gateways

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use url::Url;

use oss_lifecycle_policy::config::{ClientConfig, ResolverConfig};
use oss_lifecycle_policy::lifecycle_policy::{
    read_lifecycle_policy, HttpLifecyclePolicyClient, PolicyResolver,
};

#[derive(Parser)]
#[command(name = "lifecycle-policy-lookup")]
#[command(version = "0.1.0")]
#[command(about = "Look up an OpenSearch Serverless lifecycle policy by name and type")]
#[command(long_about = None)]
struct Cli {
    /// Policy name (3-32 characters)
    #[arg(long)]
    name: String,

    /// Policy type
    #[arg(long = "type", default_value = "retention")]
    policy_type: String,

    /// Override the management API endpoint
    #[arg(long, env = "OSS_ENDPOINT")]
    endpoint: Option<Url>,

    /// Give up on the remote call after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Failed to read client config")?;
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }

    let client = HttpLifecyclePolicyClient::new(&config).context("Failed to create HTTP client")?;
    tracing::debug!(endpoint = %client.endpoint(), "client ready");

    let mut resolver_config = ResolverConfig::default();
    if let Some(secs) = cli.deadline_secs {
        resolver_config = resolver_config.with_timeout(Duration::from_secs(secs));
    }
    let resolver = PolicyResolver::with_config(Arc::new(client), resolver_config);

    let state = tokio::select! {
        result = read_lifecycle_policy(&resolver, &cli.name, &cli.policy_type) => result?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    };

    let output = match cli.format {
        OutputFormat::Json => serde_json::to_string(&state)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(&state)?,
    };
    println!("{}", output);

    Ok(())
}
