use anyhow::Result;
use clap::{Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => fxconv::AppCommand::Convert {
                amount,
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            },
            Commands::Currencies => fxconv::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: f64,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. EUR
        to: String,
    },
    /// List currencies supported by the rate provider
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        // No subcommand runs the sample conversions
        None => fxconv::run_command(fxconv::AppCommand::Demo, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxconv::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
provider:
  base_url: "https://api.exchangerate-api.com/v4/latest"

# api_key: "..."   # or set EXCHANGE_API_KEY in the environment

currency: "USD"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
