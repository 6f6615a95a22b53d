//! Tables generated from the SeaORM entities, plus the one-entry-per-couple
//! indexes on the wish-lists.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

use twogether_infra::database::entity::{
    album, album_list, couple, date_plan, movie, movie_list, note, song, song_list, user,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_table<E: EntityTrait>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr> {
    let schema = Schema::new(manager.get_database_backend());
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

async fn drop_table<E: EntityTrait>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr> {
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_table(manager, user::Entity).await?;
        create_table(manager, couple::Entity).await?;
        create_table(manager, date_plan::Entity).await?;
        create_table(manager, note::Entity).await?;
        create_table(manager, movie::Entity).await?;
        create_table(manager, album::Entity).await?;
        create_table(manager, song::Entity).await?;
        create_table(manager, movie_list::Entity).await?;
        create_table(manager, song_list::Entity).await?;
        create_table(manager, album_list::Entity).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_lists_couple_movie")
                    .table(movie_list::Entity)
                    .col(movie_list::Column::CoupleId)
                    .col(movie_list::Column::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_song_lists_couple_song")
                    .table(song_list::Entity)
                    .col(song_list::Column::CoupleId)
                    .col(song_list::Column::SongId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_album_lists_couple_album")
                    .table(album_list::Entity)
                    .col(album_list::Column::CoupleId)
                    .col(album_list::Column::AlbumId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_date_plans_couple_scheduled")
                    .table(date_plan::Entity)
                    .col(date_plan::Column::CoupleId)
                    .col(date_plan::Column::ScheduledAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table(manager, album_list::Entity).await?;
        drop_table(manager, song_list::Entity).await?;
        drop_table(manager, movie_list::Entity).await?;
        drop_table(manager, song::Entity).await?;
        drop_table(manager, album::Entity).await?;
        drop_table(manager, movie::Entity).await?;
        drop_table(manager, note::Entity).await?;
        drop_table(manager, date_plan::Entity).await?;
        drop_table(manager, couple::Entity).await?;
        drop_table(manager, user::Entity).await
    }
}
