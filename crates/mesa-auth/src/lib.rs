//! # mesa-auth
//!
//! The token service: stateless access/refresh pairs signed with
//! HMAC-SHA256, a verifier that separates signature validity from expiry,
//! an unsigned structural decode for cookie-authenticated contexts, and
//! the one-third-lifetime rotation policy.

pub mod jwt;

pub use jwt::claims::{Claims, TokenKind};
pub use jwt::issuer::{TokenIssuer, TokenPair};
pub use jwt::rotation::{RotationService, needs_rotation};
pub use jwt::verifier::{TokenVerifier, decode_unverified};
