//! Application services. Each one orchestrates ports to carry out a single
//! use case family; handlers stay thin wrappers around these calls.

mod auth;
mod couple;
mod dates;
mod media;

pub use auth::{AuthService, NewAccount, Profile, Registration, Session};
pub use couple::{CoupleService, CoupleView};
pub use dates::{Author, DateChanges, DateService, DateWithNotes, NewDate, NoteWithAuthor};
pub use media::MediaService;

use uuid::Uuid;

use crate::domain::Couple;
use crate::error::DomainError;
use crate::ports::CoupleRepository;

/// The complete couple `user_id` belongs to, or [`DomainError::NoCouple`].
async fn resolve_couple(
    couples: &dyn CoupleRepository,
    user_id: Uuid,
) -> Result<Couple, DomainError> {
    couples
        .find_complete_by_member(user_id)
        .await?
        .ok_or(DomainError::NoCouple)
}
