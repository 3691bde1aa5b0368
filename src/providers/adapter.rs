//! Request construction and response decoding for the supported rate APIs.
//!
//! The shape is picked from the base URL's host: exchangerate-api.com embeds
//! the key in the path and answers with `conversion_rates`, every other host
//! is treated as an exchangerate.host style API taking query parameters and
//! answering with `rates` (or the older `data`).

use crate::core::{CurrencyCode, FxError, ProviderKind, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

pub const EXCHANGERATE_API_MARKER: &str = "exchangerate-api.com";

/// Everything needed to issue one rate request and read its answer.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    /// Host name of the provider, reported back to callers.
    pub provider: String,
    pub kind: ProviderKind,
    pub target: CurrencyCode,
}

impl RequestDescriptor {
    /// Reads the target rate out of a decoded response body. `None` means the
    /// body did not have the expected shape.
    pub fn extract_rate(&self, body: Value) -> Option<f64> {
        RateResponse::decode(self.kind, body).rate_for(&self.target)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorBody {
    conversion_rates: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenericBody {
    rates: Option<Value>,
    data: Option<Value>,
}

/// Known response bodies, keyed by the provider shape that produced them.
#[derive(Debug)]
pub enum RateResponse {
    Vendor(VendorBody),
    Generic(GenericBody),
}

impl RateResponse {
    /// Only JSON objects are read; anything else decodes to an empty
    /// response, so a shape mismatch always ends up as a missing rate.
    pub fn decode(kind: ProviderKind, body: Value) -> Self {
        match kind {
            ProviderKind::ExchangeRateApi => RateResponse::Vendor(decode_object(body)),
            ProviderKind::Generic => RateResponse::Generic(decode_object(body)),
        }
    }

    pub fn rate_for(&self, target: &CurrencyCode) -> Option<f64> {
        let lookup = |table: &Option<Value>| -> Option<f64> {
            table.as_ref()?.get(target.as_str())?.as_f64()
        };
        match self {
            RateResponse::Vendor(body) => lookup(&body.conversion_rates),
            RateResponse::Generic(body) => lookup(&body.rates).or_else(|| lookup(&body.data)),
        }
    }
}

// Derived structs also accept arrays by position, which no provider sends.
fn decode_object<T: DeserializeOwned + Default>(body: Value) -> T {
    match body {
        Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
        _ => T::default(),
    }
}

pub fn detect_kind(host: &str) -> ProviderKind {
    if host.contains(EXCHANGERATE_API_MARKER) {
        ProviderKind::ExchangeRateApi
    } else {
        ProviderKind::Generic
    }
}

/// Parses the configured base URL after stripping one trailing slash.
/// Only http(s) URLs with a host are accepted.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let url = Url::parse(trimmed)
        .map_err(|e| FxError::configuration(format!("Invalid apiBaseUrl '{base_url}': {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FxError::configuration(format!(
                "Unsupported apiBaseUrl scheme '{scheme}' in '{base_url}'"
            )));
        }
    }
    if url.host_str().is_none() {
        return Err(FxError::configuration(format!(
            "apiBaseUrl '{base_url}' has no host"
        )));
    }
    Ok(url)
}

// A bare host parses with path "/"; that lone empty segment is replaced,
// any other path is extended as written.
fn append_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    let at_root = url.path() == "/";
    let display = url.to_string();
    let mut path = url
        .path_segments_mut()
        .map_err(|_| FxError::configuration(format!("apiBaseUrl '{display}' cannot take a path")))?;
    if at_root {
        path.pop_if_empty();
    }
    path.extend(segments);
    Ok(())
}

/// Builds the request for `base` → `target`, detecting the provider shape
/// from the host of `base_url`.
pub fn build_request(
    base_url: &str,
    api_key: Option<&str>,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Result<RequestDescriptor> {
    build_request_with(None, base_url, api_key, base, target)
}

/// Like [`build_request`], with an optional shape that overrides detection.
pub fn build_request_with(
    kind: Option<ProviderKind>,
    base_url: &str,
    api_key: Option<&str>,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Result<RequestDescriptor> {
    let mut url = parse_base_url(base_url)?;
    let provider = url.host_str().unwrap_or_default().to_string();
    let kind = kind.unwrap_or_else(|| detect_kind(&provider));

    let mut headers = BTreeMap::new();
    match kind {
        ProviderKind::ExchangeRateApi => {
            let key = api_key.ok_or_else(|| {
                FxError::configuration(format!("Missing apiKey for {EXCHANGERATE_API_MARKER}"))
            })?;
            append_segments(&mut url, &[key, "latest", base.as_str()])?;
        }
        ProviderKind::Generic => {
            append_segments(&mut url, &["latest"])?;
            url.query_pairs_mut()
                .append_pair("base", base.as_str())
                .append_pair("symbols", target.as_str());
            if let Some(key) = api_key {
                headers.insert("Authorization".to_string(), format!("Bearer {key}"));
            }
        }
    }

    Ok(RequestDescriptor {
        url,
        headers,
        provider,
        kind,
        target: target.clone(),
    })
}
