//! Frames exchanged over the realtime channel.
//!
//! The client's first frame is the handshake auth block; everything the
//! server sends afterwards is a serialized [`RealtimeEvent`].

use serde::{Deserialize, Serialize};

use mesa_core::error::AppError;
use mesa_core::events::RealtimeEvent;

/// The handshake auth block sent as the first client frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeFrame {
    /// Bearer credential, `"Bearer <accessToken>"`.
    #[serde(rename = "Authorization")]
    pub authorization: Option<String>,
}

impl HandshakeFrame {
    /// Parses a raw handshake frame.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::authentication(format!("Malformed handshake frame: {e}")))
    }
}

/// Serializes an outbound event frame.
pub fn encode_event(event: &RealtimeEvent) -> Result<String, AppError> {
    serde_json::to_string(event).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_block() {
        let frame = HandshakeFrame::parse(r#"{"Authorization":"Bearer abc"}"#).unwrap();
        assert_eq!(frame.authorization.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_parse_missing_auth() {
        let frame = HandshakeFrame::parse("{}").unwrap();
        assert!(frame.authorization.is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(HandshakeFrame::parse("not json").is_err());
    }

    #[test]
    fn test_encode_event_name() {
        let frame = encode_event(&RealtimeEvent::RefreshToken).unwrap();
        assert!(frame.contains("refresh-token"));
    }
}
