use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static FK_STUDENTS_USER_ID: &str = "fk-students-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(integer_uniq(Students::UserId))
                    .col(string_len_uniq(Students::StudentNumber, 20))
                    .col(string_len_null(Students::GradeLevel, 20))
                    .col(string_len_null(Students::Major, 100))
                    .col(string_len_null(Students::Phone, 20))
                    .col(string_len(Students::Status, 16).default("active"))
                    .col(timestamp(Students::EnrollmentDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_STUDENTS_USER_ID)
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    Id,
    UserId,
    StudentNumber,
    GradeLevel,
    Major,
    Phone,
    Status,
    EnrollmentDate,
}
