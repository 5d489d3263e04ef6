use thiserror::Error;

/// Errors returned by the vendor API clients.
#[derive(Debug, Error)]
pub enum VendorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor returned an application-level error in the JSON envelope.
    #[error("vendor API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
