use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Couple, User, generate_invite_code};
use crate::error::DomainError;
use crate::ports::{CoupleRepository, UserRepository};

const MAX_CODE_ATTEMPTS: usize = 5;

/// A couple record as seen by one of its members.
#[derive(Debug, Clone)]
pub struct CoupleView {
    pub couple: Couple,
    pub partner: Option<User>,
}

impl CoupleView {
    pub fn has_partner(&self) -> bool {
        self.couple.is_complete()
    }
}

/// Draw invitation codes until one is not taken yet.
pub(crate) async fn unique_invite_code(
    couples: &dyn CoupleRepository,
) -> Result<String, DomainError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_invite_code();
        if couples.find_by_invite_code(&code).await?.is_none() {
            return Ok(code);
        }
        tracing::debug!("Invite code collision, retrying");
    }
    Err(DomainError::Internal(
        "could not generate a unique invite code".to_string(),
    ))
}

pub(crate) async fn couple_view(
    users: &dyn UserRepository,
    couple: Couple,
    viewer: Uuid,
) -> Result<CoupleView, DomainError> {
    let partner = match couple.partner_of(viewer) {
        Some(partner_id) => users.find_by_id(partner_id).await?,
        None => None,
    };
    Ok(CoupleView { couple, partner })
}

/// Pairing, unpairing and invitation code management.
#[derive(Clone)]
pub struct CoupleService {
    couples: Arc<dyn CoupleRepository>,
    users: Arc<dyn UserRepository>,
}

impl CoupleService {
    pub fn new(couples: Arc<dyn CoupleRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { couples, users }
    }

    /// Redeem `code` and become the second member of its couple.
    ///
    /// The caller's own incomplete record is dropped in the same transaction.
    pub async fn link(&self, user_id: Uuid, code: &str) -> Result<CoupleView, DomainError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::Validation(
                "invite code is required".to_string(),
            ));
        }

        let mut target = self
            .couples
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| DomainError::Missing("Invalid invite code".to_string()))?;

        if target.is_complete() {
            return Err(DomainError::InvalidOperation(
                "This couple is already complete".to_string(),
            ));
        }
        if target.is_owner(user_id) {
            return Err(DomainError::InvalidOperation(
                "You cannot link with your own code".to_string(),
            ));
        }

        let own = self.couples.find_by_member(user_id).await?;
        if own.as_ref().is_some_and(Couple::is_complete) {
            return Err(DomainError::InvalidOperation(
                "You are already linked with a partner".to_string(),
            ));
        }

        target.link(user_id);
        let couple = self
            .couples
            .link(target, own.map(|couple| couple.id))
            .await?;

        tracing::info!(couple_id = %couple.id, user_id = %user_id, "Couple linked");
        couple_view(self.users.as_ref(), couple, user_id).await
    }

    /// Dissolve the caller's couple.
    ///
    /// The record stays with its owner and receives a fresh code. The second
    /// member, whoever initiated the split, gets a new incomplete record.
    /// Returns the caller's couple after the split.
    pub async fn unlink(&self, user_id: Uuid) -> Result<CoupleView, DomainError> {
        let mut couple = self
            .couples
            .find_by_member(user_id)
            .await?
            .ok_or_else(|| DomainError::Missing("You do not have a couple".to_string()))?;

        let Some(departing) = couple.user2_id else {
            return Err(DomainError::InvalidOperation(
                "There is no partner to unlink".to_string(),
            ));
        };

        let kept_code = unique_invite_code(self.couples.as_ref()).await?;
        let mut created_code = unique_invite_code(self.couples.as_ref()).await?;
        while created_code == kept_code {
            created_code = unique_invite_code(self.couples.as_ref()).await?;
        }

        couple.detach_partner(kept_code);
        let created = Couple::new(departing, created_code);
        self.couples.split(couple.clone(), created.clone()).await?;

        tracing::info!(couple_id = %couple.id, user_id = %user_id, "Couple unlinked");

        let own = if couple.is_owner(user_id) {
            couple
        } else {
            created
        };
        Ok(CoupleView {
            couple: own,
            partner: None,
        })
    }

    /// The invitation code of the couple the caller owns.
    pub async fn code(&self, user_id: Uuid) -> Result<String, DomainError> {
        Ok(self.shareable(user_id).await?.invite_code)
    }

    /// Replace the caller's invitation code with a fresh one.
    pub async fn regenerate_code(&self, user_id: Uuid) -> Result<String, DomainError> {
        let mut couple = self.shareable(user_id).await?;
        couple.set_invite_code(unique_invite_code(self.couples.as_ref()).await?);
        let couple = self.couples.update(couple).await?;

        tracing::info!(couple_id = %couple.id, "Invite code regenerated");
        Ok(couple.invite_code)
    }

    pub async fn info(&self, user_id: Uuid) -> Result<CoupleView, DomainError> {
        let couple = self
            .couples
            .find_by_member(user_id)
            .await?
            .ok_or_else(|| DomainError::Missing("You do not have a couple".to_string()))?;
        couple_view(self.users.as_ref(), couple, user_id).await
    }

    /// The caller's own record, as long as it still waits for a partner.
    async fn shareable(&self, user_id: Uuid) -> Result<Couple, DomainError> {
        let couple = self
            .couples
            .find_by_owner(user_id)
            .await?
            .ok_or_else(|| DomainError::Missing("No invite code found".to_string()))?;
        if couple.is_complete() {
            return Err(DomainError::InvalidOperation(
                "You already have a linked partner".to_string(),
            ));
        }
        Ok(couple)
    }
}
