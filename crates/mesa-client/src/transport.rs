//! Transport seam over the business API's refresh endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use mesa_auth::TokenPair;
use mesa_core::config::ClientConfig;
use mesa_core::error::AppError;
use mesa_core::result::AppResult;

/// Performs the network half of a rotation.
///
/// Implementations must keep server rejection (`TokenExpired` /
/// `TokenInvalid`) distinguishable from transport failure
/// (`ExternalService`): the scheduler ends the session on the former and
/// simply waits for the next trigger on the latter.
#[async_trait]
pub trait RefreshTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Exchanges a refresh token for a freshly rotated pair.
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair>;
}

/// Success body of `POST /api/auth/refresh`.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    data: TokenPair,
}

/// Error body returned by the business API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    message: String,
}

/// HTTP implementation over reqwest.
#[derive(Debug, Clone)]
pub struct HttpRefreshTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRefreshTransport {
    /// Creates a transport for the configured backend.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RefreshTransport for HttpRefreshTransport {
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Refresh request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            let body: RefreshResponse = response
                .json()
                .await
                .map_err(|e| AppError::external_service(format!("Malformed refresh body: {e}")))?;
            return Ok(body.data);
        }

        // 401 carries the token-rejection taxonomy in the error body.
        if status == reqwest::StatusCode::UNAUTHORIZED {
            let rejection = response.json::<ApiErrorBody>().await.ok();
            return Err(match rejection {
                Some(body) if body.error == "TOKEN_EXPIRED" => {
                    AppError::token_expired(body.message)
                }
                Some(body) => AppError::token_invalid(body.message),
                None => AppError::token_invalid("Refresh token rejected"),
            });
        }

        Err(AppError::external_service(format!(
            "Refresh endpoint returned {status}"
        )))
    }
}
