//! API client for the remote auth service
//!
//! This module provides the HTTP client used for login, signup, and the
//! email OTP exchange. All requests and responses are JSON.

use serde::Deserialize;
use talktemplate_core::{ClientConfig, ErrorContext, TalkError, TalkResult, DEFAULT_API_BASE_URL};

pub mod auth;


pub use auth::AuthApiClient;

/// Auth service endpoints
pub mod endpoints {
    pub const LOGIN: &str = "/api/auth/login";
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const EMAIL_OTP_REQUEST: &str = "/api/auth/email/otp/request";
    pub const EMAIL_OTP_VERIFY: &str = "/api/auth/email/otp/verify";
}

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: 30,
            user_agent: "talktemplate/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration for a given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Derive the API configuration from the loaded client configuration,
    /// applying the environment override for the base URL
    pub fn from_client_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.resolved_base_url(),
            timeout_seconds: config.api.timeout_seconds,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> TalkResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            TalkError::Network {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| TalkError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Error payload the auth service attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: Option<String>,
}

/// Helper function to turn a non-2xx response into a service error,
/// extracting the `{message}` payload when one is present
pub(crate) async fn handle_response_error(response: reqwest::Response, operation: &str) -> TalkError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ServiceErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    TalkError::Service {
        status,
        message,
        context: ErrorContext::new("auth_api_client")
            .with_operation(operation)
            .with_suggestion(match status {
                401 => "Check the submitted credentials",
                404 => "Check the API base URL",
                _ => "Check network connectivity and service status",
            }),
    }
}
