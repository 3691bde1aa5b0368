//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod message;

// Re-export main types for cleaner imports
pub use config::{AppConfig, ProviderKind};
pub use currency::{CurrencyCode, CurrencyRateProvider, RateQuote};
pub use error::{FxError, Result};
pub use message::{ParsedMessage, parse_message};
