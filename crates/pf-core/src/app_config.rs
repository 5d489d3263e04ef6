use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub targets_path: PathBuf,
    pub traffic_api_key: Option<String>,
    pub stack_api_key: Option<String>,
    pub jobs_api_key: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub vendor_request_timeout_secs: u64,
    pub vendor_user_agent: String,
    pub vendor_max_retries: u32,
    pub vendor_retry_backoff_base_ms: u64,
    pub enrich_inter_request_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("targets_path", &self.targets_path)
            .field("database_url", &"[redacted]")
            .field(
                "traffic_api_key",
                &self.traffic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "stack_api_key",
                &self.stack_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "jobs_api_key",
                &self.jobs_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "vendor_request_timeout_secs",
                &self.vendor_request_timeout_secs,
            )
            .field("vendor_user_agent", &self.vendor_user_agent)
            .field("vendor_max_retries", &self.vendor_max_retries)
            .field(
                "vendor_retry_backoff_base_ms",
                &self.vendor_retry_backoff_base_ms,
            )
            .field(
                "enrich_inter_request_delay_ms",
                &self.enrich_inter_request_delay_ms,
            )
            .finish()
    }
}
