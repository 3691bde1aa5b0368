pub mod cli;
pub mod core;
pub mod providers;
pub mod service;

pub use crate::core::{AppConfig, CurrencyCode, FxError, ParsedMessage, RateQuote, parse_message};
pub use crate::providers::{HttpRateProvider, RequestDescriptor, build_request};
pub use crate::service::{Conversion, MessageConversion, RateService, register, unregister};

use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Check,
    Rate {
        from: String,
        to: String,
    },
    Convert {
        amount: f64,
        from: Option<String>,
        to: String,
    },
    Parse {
        message: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>, json: bool) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.api_base_url,
        has_key = config.api_key().is_some(),
        default_base = ?config.default_base,
        "Loaded config"
    );

    match command {
        AppCommand::Check => {
            register(&config).await?;
            println!(
                "Configuration OK, using {}",
                cli::ui::style_text(config.api_base_url.trim(), cli::ui::StyleType::Value)
            );
            unregister().await?;
            Ok(())
        }
        AppCommand::Rate { from, to } => {
            let service = RateService::from_config(&config)?;
            cli::convert::run_rate(&service, &from, &to, json).await
        }
        AppCommand::Convert { amount, from, to } => {
            let service = RateService::from_config(&config)?;
            cli::convert::run_convert(&service, amount, from.as_deref(), &to, json).await
        }
        AppCommand::Parse { message } => {
            let service = RateService::from_config(&config)?;
            cli::convert::run_parse(&service, &message, json).await
        }
    }
}
