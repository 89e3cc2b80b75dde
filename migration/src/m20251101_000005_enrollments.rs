use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_students::Students, m20251101_000004_courses::Courses};

static IDX_ENROLLMENTS_STUDENT_COURSE: &str = "idx-enrollments-student_id-course_id";
static IDX_ENROLLMENTS_COURSE_ID: &str = "idx-enrollments-course_id";
static FK_ENROLLMENTS_STUDENT_ID: &str = "fk-enrollments-student_id";
static FK_ENROLLMENTS_COURSE_ID: &str = "fk-enrollments-course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollments::Id))
                    .col(integer(Enrollments::StudentId))
                    .col(integer(Enrollments::CourseId))
                    .col(timestamp(Enrollments::EnrolledAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ENROLLMENTS_STUDENT_ID)
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ENROLLMENTS_COURSE_ID)
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // A student holds at most one enrollment per course
        manager
            .create_index(
                Index::create()
                    .name(IDX_ENROLLMENTS_STUDENT_COURSE)
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ENROLLMENTS_COURSE_ID)
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ENROLLMENTS_COURSE_ID)
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ENROLLMENTS_STUDENT_COURSE)
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    CourseId,
    EnrolledAt,
}
