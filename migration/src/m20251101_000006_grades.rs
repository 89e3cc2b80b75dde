use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_students::Students, m20251101_000004_courses::Courses};

static IDX_GRADES_STUDENT_COURSE: &str = "idx-grades-student_id-course_id";
static IDX_GRADES_COURSE_ID: &str = "idx-grades-course_id";
static FK_GRADES_STUDENT_ID: &str = "fk-grades-student_id";
static FK_GRADES_COURSE_ID: &str = "fk-grades-course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(pk_auto(Grades::Id))
                    .col(integer(Grades::StudentId))
                    .col(integer(Grades::CourseId))
                    .col(double(Grades::Score))
                    .col(string_len_null(Grades::LetterGrade, 5))
                    .col(text_null(Grades::Comments))
                    .col(timestamp(Grades::RecordedAt))
                    .col(timestamp(Grades::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GRADES_STUDENT_ID)
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GRADES_COURSE_ID)
                            .from(Grades::Table, Grades::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Grades are updated in place, never duplicated per course
        manager
            .create_index(
                Index::create()
                    .name(IDX_GRADES_STUDENT_COURSE)
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GRADES_COURSE_ID)
                    .table(Grades::Table)
                    .col(Grades::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GRADES_COURSE_ID)
                    .table(Grades::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GRADES_STUDENT_COURSE)
                    .table(Grades::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    StudentId,
    CourseId,
    Score,
    LetterGrade,
    Comments,
    RecordedAt,
    UpdatedAt,
}
