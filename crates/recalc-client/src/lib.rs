//! HTTP client for the authoritative recalculation service.
//!
//! Implements [`RecalculationClientTrait`] over the service's REST interface.
//!
//! # API Endpoints
//!
//! - Recalculate: `POST {base_url}/recalculate/{ticker}/{variant}` with the
//!   full assumption grid and fixed inputs as the JSON body
//!
//! # Response Format
//!
//! Success returns the valuation-output object. Errors return a JSON body
//! with a `detail` or `message` field carrying a human-readable explanation.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use intrinsica_core::{RecalcError, RecalcRequest, RecalculationClientTrait, ValuationOutputs};

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape used by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self, status: u16) -> String {
        self.detail
            .or(self.message)
            .unwrap_or_else(|| format!("HTTP error: {}", status))
    }
}

/// HTTP implementation of the recalculation client.
///
/// # Example
///
/// ```ignore
/// let client = HttpRecalculationClient::new("https://valuation.internal/api".to_string());
/// let outputs = client.recalculate(&request).await?;
/// ```
pub struct HttpRecalculationClient {
    client: Client,
    base_url: String,
}

impl HttpRecalculationClient {
    /// Create a client against the given service root. A trailing slash on
    /// the base URL is tolerated.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        HttpRecalculationClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, request: &RecalcRequest) -> String {
        format!(
            "{}/recalculate/{}/{}",
            self.base_url,
            request.ticker,
            request.variant.as_str()
        )
    }
}

#[async_trait]
impl RecalculationClientTrait for HttpRecalculationClient {
    async fn recalculate(&self, request: &RecalcRequest) -> Result<ValuationOutputs, RecalcError> {
        let url = self.endpoint(request);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RecalcError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.into_message(status.as_u16()))
                .unwrap_or_else(|_| {
                    if text.is_empty() {
                        format!("HTTP error: {}", status)
                    } else {
                        text
                    }
                });
            return Err(RecalcError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| RecalcError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| {
            RecalcError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}
