//! The three host-facing operations and the integration lifecycle.

use crate::core::{
    AppConfig, CurrencyCode, CurrencyRateProvider, FxError, RateQuote, Result, parse_message,
};
use crate::providers::HttpRateProvider;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageConversion {
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
    pub provider: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

pub struct RateService<P = HttpRateProvider> {
    provider: P,
    default_base: Option<CurrencyCode>,
}

impl RateService<HttpRateProvider> {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(RateService::new(
            HttpRateProvider::from_config(config),
            config.default_base_code()?,
        ))
    }
}

impl<P: CurrencyRateProvider> RateService<P> {
    pub fn new(provider: P, default_base: Option<CurrencyCode>) -> Self {
        RateService {
            provider,
            default_base,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Latest rate for converting `from` into `to`.
    pub async fn get_rate(&self, from: &str, to: &str) -> Result<RateQuote> {
        let from = CurrencyCode::normalize(from)?;
        let to = CurrencyCode::normalize(to)?;
        self.fetch_rate(&from, &to).await
    }

    /// Converts `amount` into `to`. Without `from`, the configured default
    /// base currency is used.
    pub async fn convert_amount(
        &self,
        amount: f64,
        from: Option<&str>,
        to: &str,
    ) -> Result<Conversion> {
        validate_amount(amount)?;
        let from = CurrencyCode::resolve(from, self.default_base.as_ref())?;
        let to = CurrencyCode::normalize(to)?;

        let quote = self.fetch_rate(&from, &to).await?;
        Ok(Conversion {
            amount,
            rate: quote.rate,
            converted: amount * quote.rate,
            provider: quote.provider,
        })
    }

    /// Parses phrases like "120 USD to EUR" or "50 in JPY" and converts them.
    pub async fn parse_and_convert(&self, message: &str) -> Result<MessageConversion> {
        let parsed = parse_message(message)
            .ok_or_else(|| FxError::parse("Could not parse message. Try e.g., \"120 USD to EUR\""))?;
        debug!(?parsed, "Parsed message");

        let amount = parsed.amount;
        validate_amount(amount)?;
        let from_raw = Some(parsed.from.as_str()).filter(|code| !code.is_empty());
        let from = CurrencyCode::resolve(from_raw, self.default_base.as_ref())?;
        let to = CurrencyCode::normalize(&parsed.to)?;

        let quote = self.fetch_rate(&from, &to).await?;
        Ok(MessageConversion {
            amount,
            rate: quote.rate,
            converted: amount * quote.rate,
            provider: quote.provider,
            from,
            to,
        })
    }

    async fn fetch_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<RateQuote> {
        let quote = self.provider.get_rate(from, to).await?;
        if !quote.rate.is_finite() {
            return Err(FxError::provider(format!(
                "Provider returned a non-finite rate for {from}/{to}"
            )));
        }
        Ok(quote)
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FxError::validation("Amount must be a non-negative number"));
    }
    Ok(())
}

/// Validates the configuration and probes the provider once.
///
/// The probe outcome is discarded on purpose: only configuration problems can
/// make registration fail.
pub async fn register(config: &AppConfig) -> Result<RateService> {
    let service = RateService::from_config(config)?;
    service.provider().probe().await;
    info!(base_url = %config.api_base_url.trim(), "Integration registered");
    Ok(service)
}

/// Nothing is held between calls, so there is nothing to release.
pub async fn unregister() -> Result<()> {
    info!("Integration unregistered");
    Ok(())
}
