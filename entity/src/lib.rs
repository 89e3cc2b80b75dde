//! SeaORM entities for the registrar schema.

pub mod prelude;

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
