use clap::Args;

use fileshare_daemon::state::AppState;
use fileshare_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Override log level (default from config)
    #[arg(long)]
    pub log_level: Option<tracing::Level>,

    /// Directory for log files (logs to stdout only if neither this nor the config sets one)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] fileshare_daemon::state::StateError),

    #[error("daemon failed: {0}")]
    Failed(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.fileshare)
        let state = AppState::load(ctx.config_path.clone())?;

        // Flags win over config
        let config = ServiceConfig {
            api_port: self.api_port.unwrap_or(state.config.api_port),
            log_level: self.log_level.unwrap_or_else(|| state.config.tracing_level()),
            log_dir: self.log_dir.clone().or(state.config.log_dir),
        };

        spawn_service(&config).await?;
        Ok("daemon ended".to_string())
    }
}
