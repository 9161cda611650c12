use clap::Args;

use fileshare_daemon::state::{AppConfig, AppState, StateError, LOGS_DIR_NAME};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Port for the API server
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Daemon log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write daemon logs under the config directory in addition to stdout
    #[arg(long)]
    pub log_to_file: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = AppConfig::default();
        if let Some(port) = self.api_port {
            config.api_port = port;
        }
        if let Some(level) = &self.log_level {
            level
                .parse::<tracing::Level>()
                .map_err(|_| InitError::InvalidLogLevel(level.clone()))?;
            config.log_level = level.to_lowercase();
        }
        if self.log_to_file {
            let dir = AppState::fileshare_dir(ctx.config_path.clone())?;
            config.log_dir = Some(dir.join(LOGS_DIR_NAME));
        }

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let mut lines = vec![
            format!("Initialized fileshare directory at {}", state.fileshare_dir.display()),
            format!("  config:    {}", state.config_path.display()),
            format!("  api_port:  {}", state.config.api_port),
            format!("  log_level: {}", state.config.log_level),
        ];
        if let Some(dir) = &state.config.log_dir {
            lines.push(format!("  log_dir:   {}", dir.display()));
        }
        Ok(lines.join("\n"))
    }
}
