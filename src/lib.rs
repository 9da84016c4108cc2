pub mod cli;
pub mod core;
pub mod providers;

use crate::core::RateConverter;
use crate::core::config::AppConfig;
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert { amount: f64, from: String, to: String },
    Currencies,
    Demo,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = ExchangeRateApiProvider::new(&config.provider.base_url, config.api_key.clone());
    let converter = RateConverter::new(provider, &config.currency);

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&converter, amount, &from, &to).await
        }
        AppCommand::Currencies => cli::currencies::run(&converter).await,
        AppCommand::Demo => cli::demo::run(&converter).await,
    }
}
