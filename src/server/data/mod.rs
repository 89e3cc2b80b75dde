//! Data access layer repositories.
//!
//! One repository per entity. Repositories are generic over [`ConnectionTrait`] so that the
//! same queries run against the pooled connection or inside a transaction.

pub mod assignment;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod material;
pub mod notification;
pub mod student;
pub mod submission;
pub mod system_config;
pub mod teacher;
pub mod user;

use sea_orm::{DbErr, SqlErr};

/// Whether a database error was raised by a unique index or constraint
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
