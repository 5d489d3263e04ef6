//! Client for the traffic analytics vendor.

use reqwest::{Client, Url};

use crate::error::VendorError;
use crate::http::{build_client, check_api_error, parse_base_url, request_json};
use crate::types::{TrafficBody, TrafficEstimate, VendorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.trafficpulse.example/";

/// Client for the traffic analytics REST API.
///
/// Use [`TrafficClient::new`] for production or
/// [`TrafficClient::with_base_url`] to point at a mock server in tests.
pub struct TrafficClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl TrafficClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, VendorError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Http`] if the client cannot be constructed, or
    /// [`VendorError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, VendorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches the monthly traffic estimate for a domain.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Api`] if the vendor reports an error status.
    /// - [`VendorError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VendorError::Deserialize`] on an unexpected response shape.
    pub async fn fetch_traffic(&self, domain: &str) -> Result<TrafficEstimate, VendorError> {
        let url = self.build_url(&format!("v1/traffic/{domain}"))?;
        let body = request_json(&self.client, &url).await?;
        check_api_error(&body)?;

        let envelope: VendorEnvelope<TrafficBody> =
            serde_json::from_value(body).map_err(|e| VendorError::Deserialize {
                context: format!("fetch_traffic(domain={domain})"),
                source: e,
            })?;

        Ok(envelope.data.traffic)
    }

    fn build_url(&self, path: &str) -> Result<Url, VendorError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| VendorError::Api(format!("invalid request path '{path}': {e}")))?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }
}
