use clap::Parser;
use libprobe_storm::{Endpoint, Watcher};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "up")]
#[command(about = "Watch HTTP endpoints and report per-domain availability", long_about = None)]
struct Args {
    /// Path to the YAML endpoint file
    config: PathBuf,
}

/// Load the endpoint records. The file is a YAML sequence of
/// name/url/method/headers/body entries; `method` defaults to GET.
fn load_endpoints(path: &Path) -> Result<Vec<Endpoint>, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    let endpoints: Vec<Endpoint> = serde_yaml::from_str(&data)
        .map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
    Ok(endpoints)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Diagnostics go to stderr via tracing; the availability report owns
    // stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".parse().expect("valid filter")),
        )
        .with_writer(std::io::stderr)
        .init();

    let endpoints = load_endpoints(&args.config)?;
    let mut watcher = Watcher::new(endpoints)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        watcher
            .run(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("interrupt signal received");
            })
            .await;
    });

    Ok(())
}
