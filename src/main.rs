use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::cli::ui;
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

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Check => fxconv::AppCommand::Check,
            Commands::Rate { from, to } => fxconv::AppCommand::Rate { from, to },
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Parse { message } => fxconv::AppCommand::Parse {
                message: message.join(" "),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Validate configuration and probe the provider
    Check,
    /// Show the latest exchange rate between two currencies
    Rate {
        /// Base currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. EUR
        to: String,
    },
    /// Convert an amount into another currency
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Target currency code
        to: String,
        /// Base currency code; defaults to `default_base` from the configuration
        #[arg(short, long)]
        from: Option<String>,
    },
    /// Parse a phrase like "120 USD to EUR" and convert it
    Parse {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref(), cli.json).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", ui::style_text(&format!("Error: {e:#}"), ui::StyleType::Error));
        std::process::exit(1);
    }
    Ok(())
}
