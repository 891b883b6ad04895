//! HTTP transport to the tax service.

use super::{Operation, ServiceError, TaxService};
use crate::config::Config;
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const CLIENT_PROFILE_HEADER: &str = "X-Client-Profile";

/// Tax service reached by POSTing wire JSON to `{base_url}/{Operation}`.
#[derive(Debug, Clone)]
pub struct HttpTaxService {
    client: Client,
    base_url: String,
    client_profile: String,
    retry_max_elapsed: Duration,
}

impl HttpTaxService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_profile: "taxbridge".to_string(),
            retry_max_elapsed: Duration::from_secs(30),
        }
    }

    /// Build from configuration: request timeout, retry budget and client
    /// profile all come from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ServiceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.tax_service_url.trim_end_matches('/').to_string(),
            client_profile: config.client_profile.clone(),
            retry_max_elapsed: Duration::from_millis(config.retry_max_elapsed_ms),
        })
    }

    fn endpoint(&self, operation: Operation) -> String {
        format!("{}/{}", self.base_url, operation.as_str())
    }
}

#[async_trait]
impl TaxService for HttpTaxService {
    async fn invoke(
        &self,
        operation: Operation,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, ServiceError> {
        let url = self.endpoint(operation);
        debug!("Invoking {} at {}", operation, url);

        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.retry_max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .post(&url)
                .header(CLIENT_PROFILE_HEADER, &self.client_profile)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    warn!("{} request failed, retrying: {}", operation, e);
                    backoff::Error::transient(ServiceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                warn!("{} rate limited, retrying", operation);
                return Err(backoff::Error::transient(ServiceError::RateLimited));
            }
            if status.is_server_error() {
                warn!("{} returned {}, retrying", operation, status);
                return Err(backoff::Error::transient(ServiceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(ServiceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(ServiceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_endpoint_joins_operation() {
        let service = HttpTaxService::new("https://tax.example.com/api/".to_string());
        assert_eq!(
            service.endpoint(Operation::GetTax),
            "https://tax.example.com/api/GetTax"
        );
    }

    #[test]
    fn test_from_config_uses_profile_and_budget() {
        let mut env = HashMap::new();
        env.insert("TAX_SERVICE_URL".to_string(), "http://localhost:9000".to_string());
        env.insert("CLIENT_PROFILE".to_string(), "erp-connector".to_string());
        env.insert("RETRY_MAX_ELAPSED_MS".to_string(), "500".to_string());
        let config = Config::from_env_map(env).unwrap();

        let service = HttpTaxService::from_config(&config).unwrap();
        assert_eq!(service.client_profile, "erp-connector");
        assert_eq!(service.retry_max_elapsed, Duration::from_millis(500));
        assert_eq!(service.endpoint(Operation::Ping), "http://localhost:9000/Ping");
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_after_budget() {
        let mut service = HttpTaxService::new("http://127.0.0.1:9".to_string());
        service.retry_max_elapsed = Duration::from_millis(50);

        let err = service
            .invoke(Operation::Ping, serde_json::json!({ "Message": "hi" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NetworkError(_)));
    }
}
