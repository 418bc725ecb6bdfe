//! JWT token issuance, verification, and rotation.

pub mod claims;
pub mod issuer;
pub mod rotation;
pub mod verifier;

pub use claims::{Claims, TokenKind};
pub use issuer::{TokenIssuer, TokenPair};
pub use rotation::RotationService;
pub use verifier::TokenVerifier;
