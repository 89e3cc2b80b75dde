use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000003_teachers::Teachers;

static IDX_COURSES_TEACHER_ID: &str = "idx-courses-teacher_id";
static FK_COURSES_TEACHER_ID: &str = "fk-courses-teacher_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk_auto(Courses::Id))
                    .col(string_len_uniq(Courses::CourseCode, 20))
                    .col(string_len(Courses::Name, 200))
                    .col(text_null(Courses::Description))
                    .col(integer(Courses::TeacherId))
                    .col(double(Courses::Credits))
                    .col(integer(Courses::Capacity))
                    .col(string_len_null(Courses::Schedule, 200))
                    .col(string_len_null(Courses::Location, 100))
                    .col(string_len(Courses::Semester, 20))
                    .col(boolean(Courses::IsActive).default(true))
                    .col(timestamp(Courses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COURSES_TEACHER_ID)
                            .from(Courses::Table, Courses::TeacherId)
                            .to(Teachers::Table, Teachers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COURSES_TEACHER_ID)
                    .table(Courses::Table)
                    .col(Courses::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COURSES_TEACHER_ID)
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Id,
    CourseCode,
    Name,
    Description,
    TeacherId,
    Credits,
    Capacity,
    Schedule,
    Location,
    Semester,
    IsActive,
    CreatedAt,
}
