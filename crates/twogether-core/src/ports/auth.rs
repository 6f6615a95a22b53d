//! Credentials and session tokens.

use uuid::Uuid;

/// What a valid bearer token says about its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Issues and checks the bearer tokens handed out at register and login.
pub trait TokenService: Send + Sync {
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    fn expiration_seconds(&self) -> i64;
}

/// One-way password hashing.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` on a mismatch; errors only for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session expired, please log in again")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing bearer token")]
    MissingAuth,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
