use super::adapter::{RequestDescriptor, build_request_with};
use crate::core::{
    AppConfig, CurrencyCode, CurrencyRateProvider, FxError, ProviderKind, RateQuote, Result,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const USER_AGENT: &str = "fxconv/0.1";

/// Rate provider talking to the configured HTTP API. Each call issues exactly
/// one request; there is no retry and no caching.
pub struct HttpRateProvider {
    base_url: String,
    api_key: Option<String>,
    kind: Option<ProviderKind>,
}

impl HttpRateProvider {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        HttpRateProvider {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            kind: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url, config.api_key()).with_kind(config.provider)
    }

    /// Forces the response shape instead of detecting it from the host.
    pub fn with_kind(mut self, kind: Option<ProviderKind>) -> Self {
        self.kind = kind;
        self
    }

    fn client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FxError::request("Failed to build HTTP client", e))
    }

    async fn fetch_json(request: &RequestDescriptor) -> Result<Value> {
        let client = Self::client()?;
        let mut builder = client.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| {
            FxError::request(format!("Request error for {}", request.provider), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FxError::provider(format!(
                "API request failed with status {}",
                status.as_u16()
            )));
        }

        let text = response.text().await.map_err(|e| {
            FxError::request(format!("Failed to read response from {}", request.provider), e)
        })?;

        serde_json::from_str(&text).map_err(|e| {
            FxError::provider(format!(
                "Failed to parse JSON response from {}: {e}",
                request.provider
            ))
        })
    }

    /// Best-effort connectivity check against the base URL.
    ///
    /// Whatever happens is only logged: a provider that rejects `HEAD`, or is
    /// briefly unreachable, must not stop the integration from being set up.
    pub async fn probe(&self) {
        let client = match Self::client() {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "Skipping provider probe");
                return;
            }
        };

        let mut request = client.head(self.base_url.trim());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) => debug!(status = %response.status(), "Provider probe completed"),
            Err(e) => debug!(error = %e, "Provider probe failed, ignoring"),
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for HttpRateProvider {
    #[instrument(
        name = "RateFetch",
        skip(self, from, to),
        fields(from = %from, to = %to)
    )]
    async fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<RateQuote> {
        let request = build_request_with(
            self.kind,
            &self.base_url,
            self.api_key.as_deref(),
            from,
            to,
        )?;
        debug!("Requesting rate from {}", request.url);

        let body = Self::fetch_json(&request).await?;
        let rate = request
            .extract_rate(body)
            .ok_or_else(|| FxError::provider("Could not parse rate from provider response"))?;

        debug!(rate, provider = %request.provider, "Received rate");
        Ok(RateQuote {
            rate,
            provider: request.provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::normalize(raw).unwrap()
    }

    pub async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "USD"))
            .and(query_param("symbols", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = create_mock_server(r#"{"base": "USD", "rates": {"EUR": 0.9}}"#).await;
        let provider = HttpRateProvider::new(&mock_server.uri(), None);

        let quote = provider
            .get_rate(&code("USD"), &code("EUR"))
            .await
            .expect("Failed to get rate");
        assert_eq!(quote.rate, 0.9);
        assert_eq!(quote.provider, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_legacy_data_field() {
        let mock_server = create_mock_server(r#"{"data": {"EUR": 0.85}}"#).await;
        let provider = HttpRateProvider::new(&mock_server.uri(), None);

        let quote = provider.get_rate(&code("USD"), &code("EUR")).await.unwrap();
        assert_eq!(quote.rate, 0.85);
    }

    #[tokio::test]
    async fn test_bearer_token_sent_with_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rates": {"EUR": 0.9}}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = HttpRateProvider::new(&mock_server.uri(), Some("secret"));
        let quote = provider.get_rate(&code("USD"), &code("EUR")).await.unwrap();
        assert_eq!(quote.rate, 0.9);
    }

    #[tokio::test]
    async fn test_vendor_shape_with_override() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/k3y/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result": "success", "base_code": "USD", "conversion_rates": {"EUR": 0.91}}"#,
            ))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/v6", mock_server.uri());
        let provider = HttpRateProvider::new(&base_url, Some("k3y"))
            .with_kind(Some(ProviderKind::ExchangeRateApi));
        let quote = provider.get_rate(&code("USD"), &code("EUR")).await.unwrap();
        assert_eq!(quote.rate, 0.91);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = HttpRateProvider::new(&mock_server.uri(), None);
        let err = provider
            .get_rate(&code("USD"), &code("EUR"))
            .await
            .unwrap_err();
        assert!(matches!(err, FxError::Provider { .. }));
        assert_eq!(
            err.to_string(),
            "Provider error: API request failed with status 500"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_response() {
        let mock_server = create_mock_server("<html>oops</html>").await;
        let provider = HttpRateProvider::new(&mock_server.uri(), None);

        let err = provider
            .get_rate(&code("USD"), &code("EUR"))
            .await
            .unwrap_err();
        assert!(matches!(err, FxError::Provider { .. }));
        assert!(err.to_string().contains("Failed to parse JSON response"));
    }

    #[tokio::test]
    async fn test_unrecognized_shape() {
        let mock_server = create_mock_server(r#"{"quotes": {"USDEUR": 0.9}}"#).await;
        let provider = HttpRateProvider::new(&mock_server.uri(), None);

        let err = provider
            .get_rate(&code("USD"), &code("EUR"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider error: Could not parse rate from provider response"
        );
    }

    #[tokio::test]
    async fn test_probe_swallows_failures() {
        // Connection refused
        let provider = HttpRateProvider::new("http://127.0.0.1:9", Some("secret"));
        provider.probe().await;

        let mock_server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(405))
            .expect(1)
            .mount(&mock_server)
            .await;
        let provider = HttpRateProvider::new(&mock_server.uri(), Some("secret"));
        provider.probe().await;
    }
}
