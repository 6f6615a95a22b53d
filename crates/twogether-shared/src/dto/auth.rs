use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use twogether_core::domain::User;
use twogether_core::services::{CoupleView, NewAccount, Profile, Registration, Session};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(url(message = "Invalid profile photo URL"))]
    pub profile_photo: Option<String>,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            profile_photo: req.profile_photo,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LinkCoupleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Invite code is required"))]
    pub invite_code: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_photo: user.profile_photo.clone(),
            created_at: user.created_at,
        }
    }
}

/// Couple info as seen by one of its members.
///
/// The invite code is only shown while nobody has redeemed it; the partner
/// only once someone has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoupleResponse {
    pub id: Uuid,
    pub joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub partner: Option<UserResponse>,
    pub has_partner: bool,
}

impl From<&CoupleView> for CoupleResponse {
    fn from(view: &CoupleView) -> Self {
        let complete = view.couple.is_complete();
        Self {
            id: view.couple.id,
            joined_at: view.couple.joined_at,
            invite_code: (!complete).then(|| view.couple.invite_code.clone()),
            partner: view.partner.as_ref().map(UserResponse::from),
            has_partner: view.has_partner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub invite_code: String,
    pub token: String,
}

impl From<Registration> for RegisterResponse {
    fn from(reg: Registration) -> Self {
        Self {
            user: UserResponse::from(&reg.user),
            invite_code: reg.invite_code,
            token: reg.token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub couple: Option<CoupleResponse>,
    pub has_partner: bool,
    pub token: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            has_partner: session.couple.as_ref().is_some_and(CoupleView::has_partner),
            couple: session.couple.as_ref().map(CoupleResponse::from),
            token: session.token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub has_partner: bool,
    pub couple: Option<CoupleResponse>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user: UserResponse::from(&profile.user),
            has_partner: profile.couple.as_ref().is_some_and(CoupleView::has_partner),
            couple: profile.couple.as_ref().map(CoupleResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteCodeResponse {
    pub invite_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use twogether_core::domain::Couple;

    fn user(name: &str) -> User {
        User::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".to_string(),
            None,
        )
    }

    #[test]
    fn register_rules() {
        let req = RegisterRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            profile_photo: Some("nope".to_string()),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("profile_photo"));

        let ok = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            profile_photo: None,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn missing_login_fields_fail_validation() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn password_hash_never_leaves() {
        let body = serde_json::to_value(UserResponse::from(&user("Ana"))).unwrap();
        assert!(body.get("password_hash").is_none());
        assert_eq!(body["name"], "Ana");
    }

    #[test]
    fn couple_shows_code_until_complete() {
        let owner = user("Ana");
        let partner = user("Luis");
        let mut couple = Couple::new(owner.id, "ABCD1234".to_string());

        let pending = CoupleResponse::from(&CoupleView {
            couple: couple.clone(),
            partner: None,
        });
        assert_eq!(pending.invite_code.as_deref(), Some("ABCD1234"));
        assert!(!pending.has_partner);

        couple.link(partner.id);
        let linked = CoupleResponse::from(&CoupleView {
            couple,
            partner: Some(partner.clone()),
        });
        assert_eq!(linked.invite_code, None);
        assert!(linked.has_partner);
        assert_eq!(linked.partner.map(|p| p.id), Some(partner.id));
    }
}
