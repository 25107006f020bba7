//! Database layer for Schedulify
//!
//! Provides a [`DbClient`] over an `sqlx::Any` pool, the table definitions in
//! [`schema`], and one repository per table. Multi-table writes go through
//! [`repositories::ScheduleAggregateRepository`].
//!
//! # Example
//!
//! ```rust,no_run
//! use schedulify_db::{init_schema, DbClient, Repositories, UserRepository, User};
//!
//! async fn example() -> Result<(), schedulify_db::DbError> {
//!     let db_client = DbClient::from_url("sqlite::memory:").await?;
//!     init_schema(&db_client).await?;
//!
//!     let repos = Repositories::new(db_client);
//!     repos.users.upsert(User::new(1, "alice")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod schema;

pub use client::{DbClient, DbTransaction};
pub use error::DbError;
pub use repositories::*;
pub use schema::init_schema;
