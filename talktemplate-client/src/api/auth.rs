//! Auth service client implementation

use log::{debug, info};
use serde::{Deserialize, Serialize};
use talktemplate_core::{ErrorContext, TalkError, TalkResult, UserProfile};

use super::{create_http_client, endpoints, handle_response_error, ApiClientConfig};

/// HTTP client for the remote auth service
pub struct AuthApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct OtpRequestBody<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct OtpVerifyBody<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    email_verification_token: &'a str,
}

/// User identity object as the service ships it
#[derive(Debug, Deserialize)]
struct WireUser {
    id: i64,
    email: String,
    name: String,
}

/// Login response body; the service has shipped the identity both nested
/// under `user` and flat, and the credential under `token` or `accessToken`
#[derive(Debug, Deserialize)]
struct LoginResponseBody {
    user: Option<WireUser>,
    id: Option<i64>,
    email: Option<String>,
    name: Option<String>,
    token: Option<String>,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OtpVerifyResponseBody {
    data: OtpVerifyData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerifyData {
    verification_token: String,
}

#[derive(Debug, Deserialize)]
struct SignupResponseBody {
    id: i64,
    token: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

/// Successful login: the user identity plus the issued bearer token
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub user: UserProfile,
    pub token: String,
}

/// Successful signup; the service may omit the token and the echoed
/// identity fields
#[derive(Debug, Clone)]
pub struct SignupSuccess {
    pub id: i64,
    pub token: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl AuthApiClient {
    /// Create a new auth API client
    pub fn new(config: ApiClientConfig) -> TalkResult<Self> {
        let client = create_http_client(&config)?;

        debug!("Created auth API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    /// The base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// POST a JSON body and fail on transport errors or non-2xx statuses
    async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        operation: &str,
    ) -> TalkResult<reqwest::Response> {
        let url = self.endpoint_url(endpoint);

        debug!("Making auth API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TalkError::Network {
                message: format!("Failed to reach auth service: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("auth_api_client").with_operation(operation),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, operation).await);
        }

        Ok(response)
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> TalkResult<LoginSuccess> {
        let response = self
            .post_json(endpoints::LOGIN, &LoginRequest { email, password }, "login")
            .await?;

        let body: LoginResponseBody =
            response.json().await.map_err(|e| TalkError::Internal {
                message: format!("Failed to parse login response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("auth_api_client").with_operation("login"),
            })?;

        let token = body
            .token
            .or(body.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TalkError::Internal {
                message: "Login response carried no bearer token".to_string(),
                source: None,
                context: ErrorContext::new("auth_api_client").with_operation("login"),
            })?;

        let user = match body.user {
            Some(wire) => UserProfile {
                id: wire.id,
                email: wire.email,
                name: wire.name,
            },
            None => {
                let id = body.id.ok_or_else(|| TalkError::Internal {
                    message: "Login response carried no user identity".to_string(),
                    source: None,
                    context: ErrorContext::new("auth_api_client").with_operation("login"),
                })?;
                let email = body.email.unwrap_or_else(|| email.to_string());
                let name = body.name.unwrap_or_else(|| email.clone());
                UserProfile { id, email, name }
            }
        };

        info!("Authenticated {} against {}", user.email, self.config.base_url);

        Ok(LoginSuccess { user, token })
    }

    /// Ask the service to mail a one-time passcode to the address
    pub async fn request_otp(&self, email: &str) -> TalkResult<()> {
        self.post_json(
            endpoints::EMAIL_OTP_REQUEST,
            &OtpRequestBody { email },
            "request_otp",
        )
        .await?;

        info!("Requested OTP for {}", email);

        Ok(())
    }

    /// Exchange a received passcode for a verification token
    pub async fn verify_otp(&self, email: &str, code: &str) -> TalkResult<String> {
        let response = self
            .post_json(
                endpoints::EMAIL_OTP_VERIFY,
                &OtpVerifyBody { email, code },
                "verify_otp",
            )
            .await?;

        let body: OtpVerifyResponseBody =
            response.json().await.map_err(|e| TalkError::Internal {
                message: format!("Failed to parse OTP verify response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("auth_api_client").with_operation("verify_otp"),
            })?;

        debug!("OTP verified for {}", email);

        Ok(body.data.verification_token)
    }

    /// Create an account; requires the verification token from a completed
    /// OTP exchange for the same address
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
        verification_token: &str,
    ) -> TalkResult<SignupSuccess> {
        let response = self
            .post_json(
                endpoints::SIGNUP,
                &SignupRequest {
                    email,
                    password,
                    name,
                    email_verification_token: verification_token,
                },
                "signup",
            )
            .await?;

        let body: SignupResponseBody =
            response.json().await.map_err(|e| TalkError::Internal {
                message: format!("Failed to parse signup response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("auth_api_client").with_operation("signup"),
            })?;

        info!("Signed up {} (id {})", email, body.id);

        Ok(SignupSuccess {
            id: body.id,
            token: body.token.filter(|t| !t.is_empty()),
            email: body.email,
            name: body.name,
        })
    }
}
