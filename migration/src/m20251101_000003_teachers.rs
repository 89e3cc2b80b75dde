use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static FK_TEACHERS_USER_ID: &str = "fk-teachers-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(pk_auto(Teachers::Id))
                    .col(integer_uniq(Teachers::UserId))
                    .col(string_len_uniq(Teachers::EmployeeNumber, 20))
                    .col(string_len_null(Teachers::Department, 100))
                    .col(string_len_null(Teachers::Title, 50))
                    .col(string_len_null(Teachers::Phone, 20))
                    .col(string_len_null(Teachers::Office, 50))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TEACHERS_USER_ID)
                            .from(Teachers::Table, Teachers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Teachers {
    Table,
    Id,
    UserId,
    EmployeeNumber,
    Department,
    Title,
    Phone,
    Office,
}
