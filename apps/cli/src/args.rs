use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(name = "telemetry-server")]
#[command(about = "Collects device usage statistics and serves the dashboard")]
pub struct CliArgs {
    /// Config file; defaults to `telemetry.toml` when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind; overrides `PORT`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding `statistics.sqlite`
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory served at `/`
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}
