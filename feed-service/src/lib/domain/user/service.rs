use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenPair;
use auth::TokenType;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Coordinates the user store, password hashing, and token issuance.
/// Hashing and verification run on the blocking pool so their cost never
/// stalls the cooperative scheduler; every store lookup is bounded by a
/// request-scoped timeout.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_codec: Arc<TokenCodec>,
    password_hasher: PasswordHasher,
    store_timeout: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_codec` - Token issuer/verifier sharing the process secret
    /// * `store_timeout` - Upper bound on any single store lookup
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<UR>, token_codec: Arc<TokenCodec>, store_timeout: Duration) -> Self {
        Self {
            repository,
            token_codec,
            password_hasher: PasswordHasher::new(),
            store_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, UserError>> + Send,
    ) -> Result<T, UserError> {
        match tokio::time::timeout(self.store_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(UserError::StoreTimeout),
        }
    }

    async fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.as_str().to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))
    }

    fn issue_tokens(&self, user: &User) -> Result<TokenPair, UserError> {
        self.token_codec
            .issue(&user.identity())
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthenticatedSession, UserError> {
        if self
            .bounded(self.repository.find_by_email(command.email.as_str()))
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        if self
            .bounded(self.repository.find_by_username(&command.username))
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // The store's unique constraints back the pre-checks up under
        // concurrent registration of the same username or email.
        let user = self.bounded(self.repository.create(user)).await?;

        let tokens = self.issue_tokens(&user)?;

        Ok(AuthenticatedSession { user, tokens })
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, UserError> {
        let user = self
            .bounded(self.repository.find_by_email(email))
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash).await? {
            return Err(UserError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(&user)?;

        Ok(AuthenticatedSession { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError> {
        let claims = self.token_codec.verify(refresh_token).map_err(|e| {
            tracing::debug!(reason = %e, "Refresh token rejected");
            UserError::InvalidToken
        })?;

        if claims.token_type != TokenType::Refresh {
            tracing::debug!("Non-refresh token presented for refresh");
            return Err(UserError::InvalidToken);
        }

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::debug!(reason = %e, "Refresh token subject is not a user id");
            UserError::InvalidToken
        })?;

        let user = self
            .bounded(self.repository.find_by_id(&user_id))
            .await?
            .ok_or(UserError::NotFound(claims.sub))?;

        // The presented refresh token is not invalidated; it stays usable
        // until its own expiry (stateless tokens, no revocation store).
        self.issue_tokens(&user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.bounded(self.repository.find_by_id(id))
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::Claims;
    use chrono::Duration as ChronoDuration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(
            SECRET,
            ChronoDuration::minutes(15),
            ChronoDuration::days(7),
        ))
    }

    fn service(repository: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(repository), codec(), Duration::from_secs(5))
    }

    fn existing_user(password: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand {
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: Password::new("password123".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.email.as_str() == "alice@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);
        let session = service
            .register(register_command())
            .await
            .expect("registration failed");

        assert_eq!(session.user.username.as_str(), "alice");

        // Both issued tokens resolve back to the registered identity.
        let codec = codec();
        let access = codec.verify(&session.tokens.access_token).unwrap();
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(access.username, "alice");
        assert_eq!(access.email, "alice@example.com");

        let refresh = codec.verify(&session.tokens.refresh_token).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert_eq!(refresh.sub, session.user.id.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(existing_user("password123"))));
        repository.expect_find_by_username().times(0);
        repository.expect_create().times(0);

        let result = service(repository).register(register_command()).await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(existing_user("password123"))));
        repository.expect_create().times(0);

        let result = service(repository).register(register_command()).await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("password123");
        let returned_user = user.clone();

        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let session = service(repository)
            .login("alice@example.com", "password123")
            .await
            .expect("login failed");

        assert_eq!(session.user.id, user.id);
        assert!(codec().verify(&session.tokens.access_token).is_ok());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(existing_user("Correct_Password!"))));

        let result = service(repository)
            .login("alice@example.com", "Wrong_Password!")
            .await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(repository)
            .login("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let mut repository = MockTestUserRepository::new();
        let user = existing_user("password123");
        let pair = codec().issue(&user.identity()).unwrap();

        let user_id = user.id;
        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let new_pair = service(repository)
            .refresh(&pair.refresh_token)
            .await
            .expect("refresh failed");

        let claims = codec().verify(&new_pair.access_token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());

        // The old refresh token was not rotated out.
        assert!(codec().verify(&pair.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestUserRepository::new();
        let pair = codec()
            .issue(&existing_user("password123").identity())
            .unwrap();

        let result = service(repository).refresh(&pair.access_token).await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let repository = MockTestUserRepository::new();

        let result = service(repository).refresh("not.a.token").await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_expired_token() {
        let repository = MockTestUserRepository::new();

        // Validly signed refresh claims whose expiry already passed.
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: UserId::new().to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            token_type: TokenType::Refresh,
            iat: now - 1200,
            exp: now - 600,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &stale,
            &jsonwebtoken::EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = service(repository).refresh(&token).await;

        assert!(matches!(result.unwrap_err(), UserError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_vanished_subject() {
        let mut repository = MockTestUserRepository::new();
        let pair = codec()
            .issue(&existing_user("password123").identity())
            .unwrap();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).refresh(&pair.refresh_token).await;

        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_user(&UserId::new()).await;

        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    struct SlowRepository;

    async fn hang<T>() -> T {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        unreachable!("lookup should have been cut off by the store timeout")
    }

    #[async_trait]
    impl UserRepository for SlowRepository {
        async fn create(&self, user: User) -> Result<User, UserError> {
            Ok(user)
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserError> {
            hang().await
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserError> {
            hang().await
        }

        async fn find_by_username(&self, _username: &Username) -> Result<Option<User>, UserError> {
            hang().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_lookup_is_bounded() {
        let service = AuthService::new(Arc::new(SlowRepository), codec(), Duration::from_secs(5));

        let result = service.login("alice@example.com", "password123").await;

        assert!(matches!(result.unwrap_err(), UserError::StoreTimeout));
    }
}
