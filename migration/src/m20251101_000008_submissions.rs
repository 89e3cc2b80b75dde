use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_students::Students, m20251101_000007_assignments::Assignments};

static IDX_SUBMISSIONS_ASSIGNMENT_STUDENT: &str = "idx-submissions-assignment_id-student_id";
static FK_SUBMISSIONS_ASSIGNMENT_ID: &str = "fk-submissions-assignment_id";
static FK_SUBMISSIONS_STUDENT_ID: &str = "fk-submissions-student_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(pk_auto(Submissions::Id))
                    .col(integer(Submissions::AssignmentId))
                    .col(integer(Submissions::StudentId))
                    .col(text_null(Submissions::Content))
                    .col(string_len_null(Submissions::FilePath, 500))
                    .col(timestamp(Submissions::SubmittedAt))
                    .col(double_null(Submissions::Score))
                    .col(text_null(Submissions::Feedback))
                    .col(timestamp_null(Submissions::GradedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBMISSIONS_ASSIGNMENT_ID)
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBMISSIONS_STUDENT_ID)
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBMISSIONS_ASSIGNMENT_STUDENT)
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBMISSIONS_ASSIGNMENT_STUDENT)
                    .table(Submissions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    FilePath,
    SubmittedAt,
    Score,
    Feedback,
    GradedAt,
}
