pub use sea_orm_migration::prelude::*;

mod m20251101_000001_users;
mod m20251101_000002_students;
mod m20251101_000003_teachers;
mod m20251101_000004_courses;
mod m20251101_000005_enrollments;
mod m20251101_000006_grades;
mod m20251101_000007_assignments;
mod m20251101_000008_submissions;
mod m20251101_000009_notifications;
mod m20251101_000010_system_config;
mod m20251101_000011_materials;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_users::Migration),
            Box::new(m20251101_000002_students::Migration),
            Box::new(m20251101_000003_teachers::Migration),
            Box::new(m20251101_000004_courses::Migration),
            Box::new(m20251101_000005_enrollments::Migration),
            Box::new(m20251101_000006_grades::Migration),
            Box::new(m20251101_000007_assignments::Migration),
            Box::new(m20251101_000008_submissions::Migration),
            Box::new(m20251101_000009_notifications::Migration),
            Box::new(m20251101_000010_system_config::Migration),
            Box::new(m20251101_000011_materials::Migration),
        ]
    }
}
