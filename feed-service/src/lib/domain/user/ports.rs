use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// The created user together with an access/refresh token pair
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthenticatedSession, UserError>;

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email or password did not match
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticatedSession, UserError>;

    /// Exchange a valid refresh token for a new token pair.
    ///
    /// The presented token is verified, its subject is confirmed to still
    /// exist, and a fresh pair is issued. The old refresh token is not
    /// invalidated and stays valid until its own expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - Token expired, tampered, malformed, or not a refresh token
    /// * `NotFound` - Subject no longer exists
    /// * `DatabaseError` - Store operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError>;

    /// Retrieve a user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user store collaborator.
///
/// The service never issues raw queries; these four operations are its
/// entire view of the store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username unique constraint violated
    /// * `EmailAlreadyExists` - Email unique constraint violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
