//! Auth endpoints: login, guest login, refresh, logout.
//!
//! These are the only places token cookies are written. Both cookies are
//! HTTP-only, SameSite=Lax, and carry `expires` matching the token's own
//! `exp` claim, so the access cookie vanishes exactly when the token does.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::info;

use mesa_auth::TokenPair;
use mesa_core::error::AppError;
use mesa_core::traits::{GuestLogin, LoginCredentials};
use mesa_core::types::Identity;

use crate::dto::request::{GuestLoginRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use crate::middleware::gate::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::state::AppState;

fn token_cookie(name: &'static str, value: String, exp_unix: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    if let Ok(expires) = time::OffsetDateTime::from_unix_timestamp(exp_unix) {
        cookie.set_expires(expires);
    }
    cookie
}

/// Sets both token cookies from a freshly minted pair.
fn with_token_cookies(jar: CookieJar, pair: &TokenPair, secure: bool) -> CookieJar {
    jar.add(token_cookie(
        ACCESS_COOKIE,
        pair.access_token.clone(),
        pair.access_expires_at.timestamp(),
        secure,
    ))
    .add(token_cookie(
        REFRESH_COOKIE,
        pair.refresh_token.clone(),
        pair.refresh_expires_at.timestamp(),
        secure,
    ))
}

/// Removes both token cookies.
fn without_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"))
}

fn session_body(
    state: &AppState,
    message: &str,
    pair: TokenPair,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let claims = state.verifier.decode(&pair.access_token)?;
    Ok(Json(ApiResponse::new(
        message,
        SessionResponse {
            tokens: pair,
            identity_id: claims.sub,
            role: claims.role,
        },
    )))
}

fn establish_session(
    state: &AppState,
    jar: CookieJar,
    identity: &Identity,
    message: &str,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let pair = state.issuer.issue(identity)?;
    let jar = with_token_cookies(jar, &pair, state.config.auth.secure_cookies);
    let body = session_body(state, message, pair)?;
    Ok((jar, body))
}

/// POST /api/auth/login — staff account login.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = LoginCredentials {
        email: body.email,
        password: body.password,
    };
    let identity = state.identity_provider.login(&credentials).await?;

    info!(identity_id = %identity.id, role = %identity.role, "Account login");
    establish_session(&state, jar, &identity, "Login successful")
}

/// POST /api/auth/guest/login — open a guest session for a table.
pub async fn guest_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<GuestLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let login = GuestLogin {
        name: body.name,
        table_number: body.table_number,
    };
    let identity = state.identity_provider.guest_login(&login).await?;

    info!(identity_id = %identity.id, table = body.table_number, "Guest login");
    establish_session(&state, jar, &identity, "Guest login successful")
}

/// POST /api/auth/refresh — rotate the token pair.
///
/// The refresh token comes from the request body or, failing that, the
/// cookie. Rejection clears both cookies: an expired or tampered refresh
/// token is a terminal session end.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Response {
    let token = body
        .ok()
        .and_then(|b| b.0.refresh_token)
        .or_else(|| jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()));

    let Some(token) = token else {
        return ApiError::from(AppError::authentication("Missing refresh token")).into_response();
    };

    match state.rotation.rotate(&token) {
        Ok(pair) => {
            let jar = with_token_cookies(jar, &pair, state.config.auth.secure_cookies);
            match session_body(&state, "Token pair rotated", pair) {
                Ok(body) => (jar, body).into_response(),
                Err(e) => ApiError::from(e).into_response(),
            }
        }
        Err(e) => {
            info!(error = %e, "Refresh rejected, clearing session cookies");
            let jar = without_token_cookies(jar);
            (jar, ApiError::from(e)).into_response()
        }
    }
}

/// POST /api/auth/logout — end the session and clear cookies.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    state.identity_provider.logout(auth.identity_id).await?;

    info!(identity_id = %auth.identity_id, "Logout");
    let jar = without_token_cookies(jar);
    Ok((jar, Json(ApiResponse::new("Logout successful", ()))))
}
