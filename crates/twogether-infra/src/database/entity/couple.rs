use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::Couple;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "couples")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user1_id: Uuid,
    #[sea_orm(unique)]
    pub user2_id: Option<Uuid>,
    #[sea_orm(unique, column_type = "String(StringLen::N(8))")]
    pub invite_code: String,
    pub joined_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User1Id",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User2Id",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Partner,
    #[sea_orm(has_many = "super::date_plan::Entity")]
    DatePlan,
}

impl Related<super::date_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DatePlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Couple {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user1_id: model.user1_id,
            user2_id: model.user2_id,
            invite_code: model.invite_code,
            joined_at: model.joined_at.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Couple> for ActiveModel {
    fn from(couple: Couple) -> Self {
        Self {
            id: Set(couple.id),
            user1_id: Set(couple.user1_id),
            user2_id: Set(couple.user2_id),
            invite_code: Set(couple.invite_code),
            joined_at: Set(couple.joined_at.into()),
            created_at: Set(couple.created_at.into()),
            updated_at: Set(couple.updated_at.into()),
        }
    }
}
