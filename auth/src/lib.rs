//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the feed backend:
//! - Password hashing (Argon2id)
//! - Signed access/refresh token pairs with typed claims
//!
//! The crate performs no I/O: hashing is bounded CPU work, token issuance
//! and verification are pure functions of the configured secret and clock.
//! Services own the persistence and transport around these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use chrono::Duration;
//! use auth::{Identity, TokenCodec, TokenType};
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//!
//! let identity = Identity {
//!     user_id: "user123".to_string(),
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//! };
//!
//! let pair = codec.issue(&identity).unwrap();
//! let claims = codec.verify(&pair.access_token).unwrap();
//! assert_eq!(claims.token_type, TokenType::Access);
//! assert_eq!(claims.identity(), identity);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Identity;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenPair;
pub use token::TokenType;
