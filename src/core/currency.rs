//! Currency codes and the rate provider abstraction

use super::error::{FxError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// A currency code normalized to three uppercase ASCII letters.
///
/// There is no check against an ISO list; any three letters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Trims and uppercases `raw`, rejecting anything that is not exactly
    /// three alphabetic characters.
    pub fn normalize(raw: &str) -> Result<Self> {
        let value = raw.trim().to_uppercase();
        if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FxError::validation(format!(
                "Invalid currency code: '{raw}'"
            )));
        }
        Ok(CurrencyCode(value))
    }

    /// Normalizes `code`, or `fallback` when no code was supplied.
    pub fn resolve(code: Option<&str>, fallback: Option<&CurrencyCode>) -> Result<Self> {
        match (code, fallback) {
            (Some(raw), _) => Self::normalize(raw),
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(FxError::validation(
                "No source currency given and no default base currency configured",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A rate together with the host that supplied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    pub rate: f64,
    pub provider: String,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<RateQuote>;
}
