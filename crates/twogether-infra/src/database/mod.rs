//! PostgreSQL persistence through SeaORM.

mod connections;
mod postgres_base;
mod postgres_media;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::DbConn;
pub use postgres_base::PostgresBaseRepository;
pub use postgres_media::{MediaTables, PostgresMediaRepository};
pub use postgres_repo::{
    PostgresCoupleRepository, PostgresDateRepository, PostgresNoteRepository,
    PostgresUserRepository,
};
