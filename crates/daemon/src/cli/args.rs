pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "fileshare")]
#[command(about = "Share files with role-based access")]
pub struct Args {
    /// Daemon API URL (defaults to localhost on the configured api_port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the fileshare config directory (defaults to ~/.fileshare)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// User ID to act as, sent as the user-id header
    #[arg(long, global = true, env = "FILESHARE_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
