use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::Note;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub date_id: Uuid,
    pub author_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::date_plan::Entity",
        from = "Column::DateId",
        to = "super::date_plan::Column::Id",
        on_delete = "Cascade"
    )]
    DatePlan,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::date_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DatePlan.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Note {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date_id: model.date_id,
            author_id: model.author_id,
            text: model.text,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Note> for ActiveModel {
    fn from(note: Note) -> Self {
        Self {
            id: Set(note.id),
            date_id: Set(note.date_id),
            author_id: Set(note.author_id),
            text: Set(note.text),
            created_at: Set(note.created_at.into()),
            updated_at: Set(note.updated_at.into()),
        }
    }
}
