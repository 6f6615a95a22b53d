//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use twogether_core::domain::{Couple, DateFilter, DatePlan, Note, Page, PageRequest, User};
use twogether_core::error::RepoError;
use twogether_core::ports::{CoupleRepository, DateRepository, NoteRepository, UserRepository};

use super::entity::couple::{self, Entity as CoupleEntity};
use super::entity::date_plan::{self, Entity as DateEntity};
use super::entity::note::{self, Entity as NoteEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, db_error};

pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;
pub type PostgresCoupleRepository = PostgresBaseRepository<CoupleEntity>;
pub type PostgresDateRepository = PostgresBaseRepository<DateEntity>;
pub type PostgresNoteRepository = PostgresBaseRepository<NoteEntity>;

/// Keep the first character of the local part so logs stay useful without
/// carrying full addresses.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

fn member_of(user_id: Uuid) -> Condition {
    Condition::any()
        .add(couple::Column::User1Id.eq(user_id))
        .add(couple::Column::User2Id.eq(user_id))
}

#[async_trait]
impl CoupleRepository for PostgresCoupleRepository {
    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let model = CoupleEntity::find()
            .filter(member_of(user_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn find_complete_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let model = CoupleEntity::find()
            .filter(member_of(user_id))
            .filter(couple::Column::User2Id.is_not_null())
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let model = CoupleEntity::find()
            .filter(couple::Column::User1Id.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Couple>, RepoError> {
        let model = CoupleEntity::find()
            .filter(couple::Column::InviteCode.eq(code))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn link(&self, couple: Couple, discarded: Option<Uuid>) -> Result<Couple, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        if let Some(id) = discarded {
            CoupleEntity::delete_by_id(id)
                .exec(&txn)
                .await
                .map_err(db_error)?;
        }
        let model = couple::ActiveModel::from(couple)
            .update(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn split(&self, kept: Couple, created: Couple) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        couple::ActiveModel::from(kept)
            .update(&txn)
            .await
            .map_err(db_error)?;
        couple::ActiveModel::from(created)
            .insert(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)
    }
}

#[async_trait]
impl DateRepository for PostgresDateRepository {
    async fn find_for_couple(
        &self,
        couple_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DatePlan>, RepoError> {
        let model = DateEntity::find_by_id(id)
            .filter(date_plan::Column::CoupleId.eq(couple_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        couple_id: Uuid,
        filter: &DateFilter,
        page: PageRequest,
    ) -> Result<Page<DatePlan>, RepoError> {
        let mut select = DateEntity::find().filter(date_plan::Column::CoupleId.eq(couple_id));
        if let Some(kind) = filter.kind {
            select = select.filter(date_plan::Column::Kind.eq(date_plan::Kind::from(kind)));
        }
        if let Some(from) = filter.from {
            select = select.filter(date_plan::Column::ScheduledAt.gte(from));
        }
        if let Some(to) = filter.to {
            select = select.filter(date_plan::Column::ScheduledAt.lte(to));
        }

        let total = select.clone().count(&self.db).await.map_err(db_error)?;
        let models = select
            .order_by_desc(date_plan::Column::ScheduledAt)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn list_for_date(&self, date_id: Uuid) -> Result<Vec<Note>, RepoError> {
        self.list_for_dates(&[date_id]).await
    }

    async fn list_for_dates(&self, date_ids: &[Uuid]) -> Result<Vec<Note>, RepoError> {
        if date_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = NoteEntity::find()
            .filter(note::Column::DateId.is_in(date_ids.iter().copied()))
            .order_by_desc(note::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("ana@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("nonsense"), "***");
    }
}
