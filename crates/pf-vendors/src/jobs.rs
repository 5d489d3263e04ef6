//! Client for the job listings vendor.

use reqwest::{Client, Url};

use crate::error::VendorError;
use crate::http::{build_client, check_api_error, parse_base_url, request_json};
use crate::types::{JobsBody, RawJobPosting, VendorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.hiringwire.example/";

/// Client for the job listings REST API. Lookup is by company name rather
/// than domain; that is the only identifier this vendor accepts.
pub struct JobsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl JobsClient {
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

    /// Fetches current job postings for a company name.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Api`] if the vendor reports an error status.
    /// - [`VendorError::Http`] on network failure or non-2xx HTTP status.
    /// - [`VendorError::Deserialize`] on an unexpected response shape.
    pub async fn fetch_jobs(&self, company: &str) -> Result<Vec<RawJobPosting>, VendorError> {
        let url = self.build_url("v1/jobs", &[("company", company)])?;
        let body = request_json(&self.client, &url).await?;
        check_api_error(&body)?;

        let envelope: VendorEnvelope<JobsBody> =
            serde_json::from_value(body).map_err(|e| VendorError::Deserialize {
                context: format!("fetch_jobs(company={company})"),
                source: e,
            })?;

        Ok(envelope.data.jobs)
    }

    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, VendorError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| VendorError::Api(format!("invalid request path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_encodes_company_name() {
        let client =
            JobsClient::with_base_url("test-key", 30, "pf-test", "https://api.vendor.example")
                .expect("client construction should not fail");
        let url = client
            .build_url("v1/jobs", &[("company", "Shops & Stores")])
            .expect("url");
        assert!(
            url.as_str().contains("Shops+%26+Stores") || url.as_str().contains("Shops%20%26%20Stores"),
            "query param should be percent-encoded: {url}"
        );
    }
}
