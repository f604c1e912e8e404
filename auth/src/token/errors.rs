use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Validly signed, but past its expiry.
    #[error("Token is expired")]
    Expired,

    /// Malformed structure, bad signature, or missing claims.
    #[error("Token is invalid")]
    Invalid,

    /// Token could not be signed during issuance.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}
