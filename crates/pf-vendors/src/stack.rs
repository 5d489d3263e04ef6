//! Client for the technology-detection vendor.

use reqwest::{Client, Url};

use crate::error::VendorError;
use crate::http::{build_client, check_api_error, parse_base_url, request_json};
use crate::types::{RawTechnology, StackBody, VendorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.stackscan.example/";

/// Client for the technology-detection REST API.
pub struct StackClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl StackClient {
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

    /// Fetches every technology detection the vendor has for a domain.
    ///
    /// The returned list is raw vendor shape; run it through
    /// [`crate::normalize_technologies`] before handing it to scoring.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Api`] if the vendor reports an error status.
    /// - [`VendorError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VendorError::Deserialize`] on an unexpected response shape.
    pub async fn fetch_stack(&self, domain: &str) -> Result<Vec<RawTechnology>, VendorError> {
        let url = self.build_url(&format!("v1/domains/{domain}/technologies"))?;
        let body = request_json(&self.client, &url).await?;
        check_api_error(&body)?;

        let envelope: VendorEnvelope<StackBody> =
            serde_json::from_value(body).map_err(|e| VendorError::Deserialize {
                context: format!("fetch_stack(domain={domain})"),
                source: e,
            })?;

        Ok(envelope.data.technologies)
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
