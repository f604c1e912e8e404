use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::claims::TokenType;
use super::errors::TokenError;

/// Access + refresh token pair minted for one identity.
///
/// The two tokens carry independent claim sets; neither references the
/// other and each is valid purely on its own signature and expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies signed bearer tokens.
///
/// Holds the symmetric signing secret, injected at construction and never
/// mutated, so one codec can be shared read-only across request tasks.
/// Uses HS256 (HMAC with SHA-256).
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a new token codec.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens, at least 32 bytes for HS256
    /// * `access_ttl` - Lifetime of access tokens (minutes to hours)
    /// * `refresh_ttl` - Lifetime of refresh tokens (days), must not be
    ///   shorter than `access_ttl`
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        debug_assert!(refresh_ttl >= access_ttl);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access + refresh token pair for an identity.
    ///
    /// Builds two independent claim sets from the same identity, differing
    /// in token type and expiry, and signs each. Nothing is persisted;
    /// issuance cannot fail due to external state.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        let access = Claims::new(identity, TokenType::Access, self.access_ttl);
        let refresh = Claims::new(identity, TokenType::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access_token: self.encode(&access)?,
            refresh_token: self.encode(&refresh)?,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked against the configured secret before any
    /// embedded claim is trusted; a tampered token is rejected without its
    /// expiry or identity ever being read. Expiry is then checked with zero
    /// leeway, and finally the claim shape.
    ///
    /// # Errors
    /// * `Expired` - Validly signed token past its expiry
    /// * `Invalid` - Malformed token, bad signature, or missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}
