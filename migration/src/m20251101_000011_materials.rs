use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_courses::Courses;

static IDX_MATERIALS_COURSE_ID: &str = "idx-materials-course_id";
static FK_MATERIALS_COURSE_ID: &str = "fk-materials-course_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(pk_auto(Materials::Id))
                    .col(integer(Materials::CourseId))
                    .col(string_len(Materials::Title, 200))
                    .col(text_null(Materials::Description))
                    .col(string_len(Materials::FilePath, 500))
                    .col(string_len(Materials::FileType, 50))
                    .col(big_integer(Materials::FileSize))
                    .col(timestamp(Materials::UploadedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MATERIALS_COURSE_ID)
                            .from(Materials::Table, Materials::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MATERIALS_COURSE_ID)
                    .table(Materials::Table)
                    .col(Materials::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MATERIALS_COURSE_ID)
                    .table(Materials::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Materials {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    FilePath,
    FileType,
    FileSize,
    UploadedAt,
}
