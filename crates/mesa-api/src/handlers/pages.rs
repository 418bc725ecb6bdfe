//! Page route anchors.
//!
//! Rendering is owned by the frontend collaborator; these handlers exist
//! so the edge gate has real routes to guard. Each returns a minimal
//! placeholder body.

use axum::response::Html;

/// GET / — public landing page.
pub async fn home() -> Html<&'static str> {
    Html("<h1>Mesa</h1>")
}

/// GET /login — login page, unauthenticated-only.
pub async fn login() -> Html<&'static str> {
    Html("<h1>Login</h1>")
}

/// GET /refresh-token — rotates the pair client-side, then redirects back.
pub async fn refresh_token() -> Html<&'static str> {
    Html("<h1>Refreshing session…</h1>")
}

/// GET /manage/dashboard — staff area.
pub async fn manage_dashboard() -> Html<&'static str> {
    Html("<h1>Dashboard</h1>")
}

/// GET /manage/orders — staff area.
pub async fn manage_orders() -> Html<&'static str> {
    Html("<h1>Orders</h1>")
}

/// GET /manage/accounts — owner-only area.
pub async fn manage_accounts() -> Html<&'static str> {
    Html("<h1>Accounts</h1>")
}

/// GET /guest/menu — guest table session area.
pub async fn guest_menu() -> Html<&'static str> {
    Html("<h1>Menu</h1>")
}

/// GET /guest/orders — guest table session area.
pub async fn guest_orders() -> Html<&'static str> {
    Html("<h1>Your orders</h1>")
}
