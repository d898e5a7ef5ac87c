use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use feedback_llm::{AnthropicProvider, FeedbackAnalyzer};
use feedback_server::{ServerConfig, Settings};
use feedback_telemetry::{LogFormat, TelemetryConfig};

/// HTTP backend that analyzes customer feedback with Claude.
#[derive(Debug, Parser)]
#[command(name = "feedback-analyzer", version)]
struct Cli {
    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,
    /// Interface to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,
    /// Directory with the web UI (overrides STATIC_DIR).
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(dir) = self.static_dir {
            settings.static_dir = dir;
        }
        if self.json_logs {
            settings.log_format = LogFormat::Json;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env().context("failed to load settings")?;
    cli.apply(&mut settings);

    feedback_telemetry::init_telemetry(&TelemetryConfig {
        format: settings.log_format,
        ..TelemetryConfig::default()
    });

    tracing::info!("Starting feedback analyzer");

    if settings.claude_api_key.is_none() {
        tracing::warn!("CLAUDE_API_KEY is not set; analysis requests will be rejected upstream");
    }

    let provider = AnthropicProvider::new(
        settings.claude_api_key.clone(),
        Some(settings.claude_model.as_str()),
    )
    .context("failed to build Anthropic client")?
    .with_base_url(settings.anthropic_base_url.clone());
    let analyzer = Arc::new(FeedbackAnalyzer::new(Arc::new(provider)));

    let config = ServerConfig::try_from(&settings)?;
    let _handle = feedback_server::start(config, analyzer)
        .await
        .context("failed to start server")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    tracing::info!("Shutting down");
    Ok(())
}
