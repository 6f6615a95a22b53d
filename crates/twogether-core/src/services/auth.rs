use std::sync::Arc;

use uuid::Uuid;

use super::couple::{CoupleView, couple_view, unique_invite_code};
use crate::domain::{Couple, User};
use crate::error::DomainError;
use crate::ports::{CoupleRepository, PasswordService, TokenService, UserRepository};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub invite_code: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub couple: Option<CoupleView>,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub couple: Option<CoupleView>,
}

/// Registration, login and profile lookups.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    couples: Arc<dyn CoupleRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        couples: Arc<dyn CoupleRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            couples,
            passwords,
            tokens,
        }
    }

    /// Create an account together with its (still incomplete) couple record.
    pub async fn register(&self, account: NewAccount) -> Result<Registration, DomainError> {
        let name = account.name.trim().to_string();
        let email = normalize_email(&account.email);

        if name.chars().count() < 2 || email.is_empty() {
            return Err(DomainError::Validation(
                "name, email and password are required".to_string(),
            ));
        }
        if account.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Duplicate(
                "This email is already registered".to_string(),
            ));
        }

        let hash = self.passwords.hash(&account.password)?;
        let user = self
            .users
            .insert(User::new(name, email, hash, account.profile_photo))
            .await?;

        let code = unique_invite_code(self.couples.as_ref()).await?;
        let couple = self.couples.insert(Couple::new(user.id, code)).await?;
        let token = self.tokens.generate_token(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, couple_id = %couple.id, "User registered");
        Ok(Registration {
            user,
            invite_code: couple.invite_code,
            token,
        })
    }

    /// Unknown e-mail and wrong password fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login rejected");
            return Err(DomainError::Unauthorized);
        }

        let couple = self.couple_of(user.id).await?;
        let token = self.tokens.generate_token(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session {
            user,
            couple,
            token,
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<Profile, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        let couple = self.couple_of(user_id).await?;
        Ok(Profile { user, couple })
    }

    async fn couple_of(&self, user_id: Uuid) -> Result<Option<CoupleView>, DomainError> {
        match self.couples.find_by_member(user_id).await? {
            Some(couple) => Ok(Some(
                couple_view(self.users.as_ref(), couple, user_id).await?,
            )),
            None => Ok(None),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
