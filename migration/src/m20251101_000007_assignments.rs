use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_courses::Courses;

static FK_ASSIGNMENTS_COURSE_ID: &str = "fk-assignments-course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(pk_auto(Assignments::Id))
                    .col(integer(Assignments::CourseId))
                    .col(string_len(Assignments::Title, 200))
                    .col(text_null(Assignments::Description))
                    .col(timestamp(Assignments::DueDate))
                    .col(double(Assignments::TotalPoints).default(100.0))
                    .col(timestamp(Assignments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ASSIGNMENTS_COURSE_ID)
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Assignments {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    DueDate,
    TotalPoints,
    CreatedAt,
}
