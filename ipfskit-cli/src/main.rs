//! IpfsKit CLI
//!
//! Command-line access to an IPFS node through the IpfsKit client.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ipfskit_client::{IpfsClient, IpfsConfig};

/// IpfsKit - store and fetch content on an IPFS node
#[derive(Parser)]
#[command(name = "ipfskit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Node host
    #[arg(long, global = true, env = "IPFS_HOST")]
    host: Option<String>,

    /// Node API port
    #[arg(long, global = true, env = "IPFS_PORT")]
    port: Option<u16>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store raw bytes as a block
    PutBytes {
        /// Text to store (UTF-8)
        #[arg(required_unless_present = "hex")]
        text: Option<String>,
        /// Hex-encoded bytes to store instead of text
        #[arg(long, conflicts_with = "text")]
        hex: Option<String>,
    },

    /// Fetch a JSON file by its CID
    Get {
        /// CID (Qm... or bafy...)
        hash: String,
    },

    /// Add a local file
    PutFile {
        /// File to add
        path: PathBuf,
    },

    /// Store a file's contents as an opaque block
    PutObject {
        /// File holding the object
        path: PathBuf,
    },

    /// Show the node's version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "ipfskit=debug,info"
    } else {
        "ipfskit=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = build_config(&cli);
    debug!(host = %config.host, port = config.port, "Using IPFS node");

    let client = IpfsClient::with_config(config).context("Failed to create IPFS client")?;

    match cli.command {
        Commands::PutBytes { text, hex } => cmd_put_bytes(&client, text, hex).await,
        Commands::Get { hash } => cmd_get(&client, &hash).await,
        Commands::PutFile { path } => cmd_put_file(&client, &path).await,
        Commands::PutObject { path } => cmd_put_object(&client, &path).await,
        Commands::Version => cmd_version(&client).await,
    }
}

fn build_config(cli: &Cli) -> IpfsConfig {
    let mut config = IpfsConfig::from_env();
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }
    config
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn payload(text: Option<String>, hex_input: Option<String>) -> Result<Vec<u8>> {
    match (text, hex_input) {
        (_, Some(h)) => hex::decode(h.trim().trim_start_matches("0x")).context("Invalid hex input"),
        (Some(t), None) => Ok(t.into_bytes()),
        (None, None) => anyhow::bail!("Nothing to store: pass TEXT or --hex"),
    }
}

/// Store raw bytes
async fn cmd_put_bytes(client: &IpfsClient, text: Option<String>, hex_input: Option<String>) -> Result<()> {
    let bytes = payload(text, hex_input)?;

    let pb = spinner(&format!("Storing {} bytes...", bytes.len()))?;
    let result = client.put_bytes(&bytes).await;
    pb.finish_and_clear();

    let hash = result.context("Failed to store bytes")?;
    println!("{} {}", "✅ Stored block:".green().bold(), hash);
    Ok(())
}

/// Fetch a JSON file
async fn cmd_get(client: &IpfsClient, hash: &str) -> Result<()> {
    let pb = spinner(&format!("Fetching {}...", hash))?;
    let result = client.get_file(hash).await;
    pb.finish_and_clear();

    let doc = result.with_context(|| format!("Failed to fetch {}", hash))?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Add a local file
async fn cmd_put_file(client: &IpfsClient, path: &Path) -> Result<()> {
    let pb = spinner(&format!("Adding {}...", path.display()))?;
    let result = client.put_file(path).await;
    pb.finish_and_clear();

    let hash = result.with_context(|| format!("Failed to add {}", path.display()))?;
    println!("{} {}", "✅ Added file:".green().bold(), hash);
    println!("   {} {}", "Path:".dimmed(), path.display());
    Ok(())
}

/// Store a file's contents as an opaque object
async fn cmd_put_object(client: &IpfsClient, path: &Path) -> Result<()> {
    let object = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let pb = spinner(&format!("Storing object ({} bytes)...", object.len()))?;
    let result = client.put_object(object).await;
    pb.finish_and_clear();

    let hash = result.context("Failed to store object")?;
    println!("{} {}", "✅ Stored object:".green().bold(), hash);
    Ok(())
}

/// Show node version
async fn cmd_version(client: &IpfsClient) -> Result<()> {
    let version = client.node_version().await.context("Failed to reach IPFS node")?;
    println!("{} {}", "IPFS node version:".cyan().bold(), version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_prefers_hex() {
        assert_eq!(payload(None, Some("0x00ff".into())).unwrap(), vec![0x00, 0xff]);
        assert_eq!(payload(Some("hi".into()), None).unwrap(), b"hi");
        assert!(payload(None, Some("zz".into())).is_err());
        assert!(payload(None, None).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["ipfskit", "--host", "node", "--port", "5002", "get", "QmHash"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Get { ref hash } if hash == "QmHash"));

        let config = build_config(&cli);
        assert_eq!(config.host, "node");
        assert_eq!(config.port, 5002);
    }

    #[test]
    fn test_put_bytes_needs_input() {
        assert!(Cli::try_parse_from(["ipfskit", "put-bytes"]).is_err());
        assert!(Cli::try_parse_from(["ipfskit", "put-bytes", "--hex", "abcd"]).is_ok());
        assert!(Cli::try_parse_from(["ipfskit", "put-bytes", "text", "--hex", "ab"]).is_err());
    }
}
