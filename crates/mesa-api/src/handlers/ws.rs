//! WebSocket upgrade and connection loop.
//!
//! The first text frame after upgrade must be the handshake auth block
//! `{"Authorization": "Bearer <accessToken>"}`. The connection is
//! registered only after that credential passes full verification.

use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Drives one connection: handshake, register, pump, disconnect.
async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let handshake_timeout = Duration::from_secs(state.config.realtime.handshake_timeout_seconds);
    let first_frame = match tokio::time::timeout(handshake_timeout, ws_rx.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text,
        Ok(_) => {
            warn!("Connection attempt without handshake frame");
            return;
        }
        Err(_) => {
            warn!("Handshake timed out");
            return;
        }
    };

    let auth = match state.authenticator.authenticate(&first_frame) {
        Ok(auth) => auth,
        Err(e) => {
            // Reject with the underlying error; the client must rotate
            // before retrying with a fresh credential.
            warn!(error = %e, "Handshake rejected");
            let _ = ws_tx
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::POLICY,
                    reason: e.message.into(),
                })))
                .await;
            return;
        }
    };

    let (handle, mut outbound_rx) = state
        .registry
        .register(auth.identity_id, auth.role, auth.name);

    info!(
        conn_id = %handle.id,
        identity_id = %auth.identity_id,
        "WebSocket connection established"
    );

    loop {
        tokio::select! {
            frame = outbound_rx.recv() => {
                match frame {
                    Some(frame) => {
                        if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    // Sender dropped: this handle was superseded and its
                    // registry record forgotten.
                    None => break,
                }
            }
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        // The channel is push-only; client frames after the
                        // handshake are ignored.
                    }
                    Some(Err(e)) => {
                        warn!(conn_id = %handle.id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }
        }
    }

    state.registry.disconnected(&handle);
}
