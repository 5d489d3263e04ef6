//! Shared HTTP plumbing for the vendor clients.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::VendorError;

/// Builds a `reqwest::Client` with the standard timeouts and user agent.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, VendorError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parses and normalizes a vendor base URL so path joins behave.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, VendorError> {
    // Ensure exactly one trailing slash so Url::join appends rather than
    // replacing the last path segment.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| VendorError::Api(format!("invalid base URL '{base_url}': {e}")))
}

/// Sends a GET request, asserts a 2xx HTTP status, and parses the response
/// body as JSON.
pub(crate) async fn request_json(
    client: &Client,
    url: &Url,
) -> Result<serde_json::Value, VendorError> {
    let response = client.get(url.clone()).send().await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| VendorError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

/// Checks the top-level `"status"` field and surfaces vendor-side errors.
pub(crate) fn check_api_error(body: &serde_json::Value) -> Result<(), VendorError> {
    if body.get("status").and_then(serde_json::Value::as_str) == Some("error") {
        let msg = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(VendorError::Api(msg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_adds_single_trailing_slash() {
        let url = parse_base_url("https://api.vendor.example").expect("valid url");
        assert_eq!(url.as_str(), "https://api.vendor.example/");
        let url = parse_base_url("https://api.vendor.example///").expect("valid url");
        assert_eq!(url.as_str(), "https://api.vendor.example/");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn check_api_error_passes_ok_envelope() {
        let body = serde_json::json!({"status": "ok"});
        assert!(check_api_error(&body).is_ok());
    }

    #[test]
    fn check_api_error_surfaces_message() {
        let body = serde_json::json!({"status": "error", "message": "quota exhausted"});
        let err = check_api_error(&body).unwrap_err();
        assert!(err.to_string().contains("quota exhausted"));
    }
}
