use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an invitation code.
pub const INVITE_CODE_LEN: usize = 8;

const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random invitation code (`A-Z0-9`, [`INVITE_CODE_LEN`] chars).
///
/// Uniqueness is checked by the caller against stored couples.
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..INVITE_CODE_CHARSET.len());
            INVITE_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Couple entity.
///
/// Every registered user owns exactly one couple record as `user1`. The record
/// is *incomplete* until a second user redeems its invitation code and becomes
/// `user2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Couple {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Option<Uuid>,
    pub invite_code: String,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Couple {
    /// Create an incomplete couple owned by `owner_id`.
    pub fn new(owner_id: Uuid, invite_code: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user1_id: owner_id,
            user2_id: None,
            invite_code,
            joined_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.user2_id.is_some()
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id || self.user2_id == Some(user_id)
    }

    /// The other member of the couple, if `user_id` is a member and the
    /// couple is complete.
    pub fn partner_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user1_id == user_id {
            self.user2_id
        } else if self.user2_id == Some(user_id) {
            Some(self.user1_id)
        } else {
            None
        }
    }

    /// Attach `user_id` as the second member.
    pub fn link(&mut self, user_id: Uuid) {
        let now = Utc::now();
        self.user2_id = Some(user_id);
        self.joined_at = now;
        self.updated_at = now;
    }

    /// Drop the second member and replace the (consumed) invitation code.
    pub fn detach_partner(&mut self, invite_code: String) {
        self.user2_id = None;
        self.invite_code = invite_code;
        self.updated_at = Utc::now();
    }

    pub fn set_invite_code(&mut self, invite_code: String) {
        self.invite_code = invite_code;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_code_shape() {
        for _ in 0..50 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_LEN);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn new_couple_is_incomplete() {
        let owner = Uuid::new_v4();
        let couple = Couple::new(owner, "ABCD1234".to_string());

        assert!(!couple.is_complete());
        assert!(couple.is_owner(owner));
        assert!(couple.has_member(owner));
        assert_eq!(couple.partner_of(owner), None);
    }

    #[test]
    fn link_and_detach() {
        let owner = Uuid::new_v4();
        let partner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let mut couple = Couple::new(owner, "ABCD1234".to_string());

        couple.link(partner);
        assert!(couple.is_complete());
        assert_eq!(couple.partner_of(owner), Some(partner));
        assert_eq!(couple.partner_of(partner), Some(owner));
        assert_eq!(couple.partner_of(stranger), None);
        assert!(!couple.has_member(stranger));

        couple.detach_partner("ZZZZ9999".to_string());
        assert!(!couple.is_complete());
        assert!(!couple.has_member(partner));
        assert_eq!(couple.invite_code, "ZZZZ9999");
    }
}
