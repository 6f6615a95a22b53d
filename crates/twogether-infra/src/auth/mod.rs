//! Token and password services.

mod jwt;
mod password;

pub use jwt::{DEFAULT_EXPIRATION_HOURS, JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
