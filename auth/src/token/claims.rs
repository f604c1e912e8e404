use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Minimal identity embedded in every token.
///
/// Carries enough to resolve the caller on a protected route without a
/// store round-trip. Callers needing a fresh profile re-fetch explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Discriminates the two halves of an issued token pair.
///
/// A refresh token presented where an access token is expected (or the
/// reverse) must be rejected by the caller via this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claim set carried by a signed token.
///
/// Every field is required; a payload missing any of them does not
/// deserialize and the token fails verification as invalid. Claims are
/// immutable once issued - refreshing mints a new set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username of the subject
    pub username: String,

    /// Email of the subject
    pub email: String,

    /// Access or refresh
    pub token_type: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always after `iat`
    pub exp: i64,
}

impl Claims {
    /// Build a claim set for an identity, expiring `ttl` from now.
    pub fn new(identity: &Identity, token_type: TokenType, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: identity.user_id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Identity embedded in this claim set.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            user_id: "user123".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_expiry_follows_issuance() {
        let claims = Claims::new(&identity(), TokenType::Access, Duration::minutes(15));

        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_identity_round_trip() {
        let claims = Claims::new(&identity(), TokenType::Refresh, Duration::days(7));

        assert_eq!(claims.identity(), identity());
        assert_eq!(claims.token_type, TokenType::Refresh);
    }
}
