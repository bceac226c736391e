//! pos-admin - POS administrative console

mod cli;

use clap::Parser;
use pos_admin::AdminConfig;
use pos_admin::logger::init_logger_with_file;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let config = AdminConfig::from_env();

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_logger_with_file(&level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(api_url = %config.api_url, "Starting pos-admin");

    cli::run(cli, config).await
}
