//! The edge gate: per-request allow/deny/redirect from cookies alone.
//!
//! Runs before any page handler. It only ever *decodes* the refresh
//! cookie (no signature check, no network): the cookie's authenticity was
//! established when the login/refresh flow set it. The gate is fast,
//! infallible, and side-effect free.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use mesa_auth::TokenVerifier;
use mesa_core::types::Role;

use crate::state::AppState;

/// Name of the access token cookie.
pub const ACCESS_COOKIE: &str = "accessToken";
/// Name of the refresh token cookie.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Path prefixes reserved for staff.
const MANAGE_PATHS: &[&str] = &["/manage"];
/// Path prefixes reserved for guest table sessions.
const GUEST_PATHS: &[&str] = &["/guest"];
/// Path prefixes reserved for the owner.
const OWNER_ONLY_PATHS: &[&str] = &["/manage/accounts"];
/// Paths only reachable while logged out.
const UNAUTH_PATHS: &[&str] = &["/login"];

fn matches_any(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| path.starts_with(p))
}

/// Everything the gate looks at for one request.
#[derive(Debug, Clone)]
pub struct GateRequest<'a> {
    /// Request path.
    pub path: &'a str,
    /// Whether the query string carries a fresh `accessToken` parameter
    /// (an OAuth callback in flight).
    pub access_token_in_query: bool,
    /// Value of the access token cookie, if present.
    pub access_cookie: Option<&'a str>,
    /// Value of the refresh token cookie, if present.
    pub refresh_cookie: Option<&'a str>,
}

/// The gate's verdict for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Pass the request through unchanged.
    Allow,
    /// Redirect to the login page.
    ToLogin {
        /// Tell the client to clear any stale token cache.
        clear_tokens: bool,
    },
    /// Redirect to the refresh page so the client can mint a new access
    /// token and come back.
    ToRefresh {
        /// The refresh token, forwarded as a query parameter.
        refresh_token: String,
        /// The originally requested path.
        redirect: String,
    },
    /// Redirect to the home page.
    ToHome,
}

/// Stateless request gate over the token verifier's unsigned decode.
#[derive(Clone)]
pub struct Gatekeeper {
    verifier: Arc<TokenVerifier>,
}

impl std::fmt::Debug for Gatekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper").finish()
    }
}

impl Gatekeeper {
    /// Creates a gatekeeper over the verifier.
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Evaluates the decision table, rows in order.
    pub fn evaluate(&self, request: &GateRequest<'_>) -> GateDecision {
        let path = request.path;
        let is_private = matches_any(path, MANAGE_PATHS) || matches_any(path, GUEST_PATHS);

        // 1. Authenticated area without a session: back to login, and
        //    have the client drop whatever stale tokens it still holds.
        let Some(refresh_token) = request.refresh_cookie else {
            if is_private {
                return GateDecision::ToLogin { clear_tokens: true };
            }
            return GateDecision::Allow;
        };

        // 2. Logged-in principals don't see the login page — unless an
        //    OAuth callback is mid-flight with a fresh token in the query.
        if matches_any(path, UNAUTH_PATHS) {
            if request.access_token_in_query {
                return GateDecision::Allow;
            }
            return GateDecision::ToHome;
        }

        // 3. Session alive but access token gone (cookie expired with the
        //    token): detour through the refresh page and come back.
        if is_private && request.access_cookie.is_none() {
            return GateDecision::ToRefresh {
                refresh_token: refresh_token.to_string(),
                redirect: path.to_string(),
            };
        }

        // 4. Role fences, from the decoded refresh cookie.
        match self.verifier.decode(refresh_token) {
            Ok(claims) => {
                let role = claims.role;
                let guest_in_manage = role == Role::Guest && matches_any(path, MANAGE_PATHS);
                let staff_in_guest = role != Role::Guest && matches_any(path, GUEST_PATHS);
                let non_owner_in_owner_only =
                    !role.is_owner() && matches_any(path, OWNER_ONLY_PATHS);
                if guest_in_manage || staff_in_guest || non_owner_in_owner_only {
                    return GateDecision::ToHome;
                }
            }
            Err(_) => {
                // An undecodable refresh cookie is a dead session.
                if is_private {
                    return GateDecision::ToLogin { clear_tokens: true };
                }
            }
        }

        // 5. Nothing to object to.
        GateDecision::Allow
    }
}

/// Axum wrapper: evaluates the gate and turns verdicts into redirects.
pub async fn edge_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let access_token_in_query = request
        .uri()
        .query()
        .is_some_and(|q| q.split('&').any(|pair| pair.starts_with("accessToken=")));

    let gate_request = GateRequest {
        path: &path,
        access_token_in_query,
        access_cookie: jar.get(ACCESS_COOKIE).map(|c| c.value()),
        refresh_cookie: jar.get(REFRESH_COOKIE).map(|c| c.value()),
    };

    match state.gatekeeper.evaluate(&gate_request) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::ToLogin { clear_tokens } => {
            let target = if clear_tokens {
                "/login?clearTokens=true"
            } else {
                "/login"
            };
            Redirect::temporary(target).into_response()
        }
        GateDecision::ToRefresh {
            refresh_token,
            redirect,
        } => {
            // JWTs are base64url and paths are already URL shaped, so the
            // query needs no further encoding.
            let target = format!("/refresh-token?refreshToken={refresh_token}&redirect={redirect}");
            Redirect::temporary(&target).into_response()
        }
        GateDecision::ToHome => Redirect::temporary("/").into_response(),
    }
}
