use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Blog insights and speech backend
#[derive(Debug, Parser)]
#[command(name = "blogitup", about = "Extract blog articles and turn them into Gemini insights and speech")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "BLOGITUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "BLOGITUP_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Log filter directive, e.g. `info` or `blogitup_server=debug`
    #[arg(long, default_value = "info", env = "BLOGITUP_LOG")]
    pub log: String,
}
