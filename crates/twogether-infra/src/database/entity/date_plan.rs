use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::{DateKind, DatePlan};

/// Stored form of [`DateKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Kind {
    #[sea_orm(string_value = "walk")]
    Walk,
    #[sea_orm(string_value = "dinner")]
    Dinner,
    #[sea_orm(string_value = "movie")]
    Movie,
    #[sea_orm(string_value = "trip")]
    Trip,
    #[sea_orm(string_value = "anniversary")]
    Anniversary,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<DateKind> for Kind {
    fn from(kind: DateKind) -> Self {
        match kind {
            DateKind::Walk => Kind::Walk,
            DateKind::Dinner => Kind::Dinner,
            DateKind::Movie => Kind::Movie,
            DateKind::Trip => Kind::Trip,
            DateKind::Anniversary => Kind::Anniversary,
            DateKind::Other => Kind::Other,
        }
    }
}

impl From<Kind> for DateKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Walk => DateKind::Walk,
            Kind::Dinner => DateKind::Dinner,
            Kind::Movie => DateKind::Movie,
            Kind::Trip => DateKind::Trip,
            Kind::Anniversary => DateKind::Anniversary,
            Kind::Other => DateKind::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "date_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub couple_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub scheduled_at: DateTimeWithTimeZone,
    pub kind: Kind,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::couple::Entity",
        from = "Column::CoupleId",
        to = "super::couple::Column::Id",
        on_delete = "Cascade"
    )]
    Couple,
    #[sea_orm(has_many = "super::note::Entity")]
    Note,
}

impl Related<super::couple::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Couple.def()
    }
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Note.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DatePlan {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            couple_id: model.couple_id,
            title: model.title,
            description: model.description,
            scheduled_at: model.scheduled_at.into(),
            kind: model.kind.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<DatePlan> for ActiveModel {
    fn from(date: DatePlan) -> Self {
        Self {
            id: Set(date.id),
            couple_id: Set(date.couple_id),
            title: Set(date.title),
            description: Set(date.description),
            scheduled_at: Set(date.scheduled_at.into()),
            kind: Set(date.kind.into()),
            created_at: Set(date.created_at.into()),
            updated_at: Set(date.updated_at.into()),
        }
    }
}
