use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error variant: a record that cannot be parsed is a
/// failed match, not a fault the caller can distinguish.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
