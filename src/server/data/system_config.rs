use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};
use serde_json::Value as JsonValue;

/// Primary key of the singleton settings row
pub const SYSTEM_CONFIG_ID: i32 = 1;

pub struct SystemConfigRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SystemConfigRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self) -> Result<Option<entity::system_config::Model>, DbErr> {
        entity::prelude::SystemConfig::find_by_id(SYSTEM_CONFIG_ID)
            .one(self.db)
            .await
    }

    /// Writes the first version of the document
    ///
    /// Fails with a unique violation if another writer inserted the row first.
    pub async fn insert(
        &self,
        settings: JsonValue,
    ) -> Result<entity::system_config::Model, DbErr> {
        let config = entity::system_config::ActiveModel {
            id: ActiveValue::Set(SYSTEM_CONFIG_ID),
            settings: ActiveValue::Set(settings),
            version: ActiveValue::Set(1),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        config.insert(self.db).await
    }

    /// Replaces the document if the stored version still equals `current_version`
    ///
    /// Returns `false` when the row was changed (or removed) by another writer.
    pub async fn update_if_version(
        &self,
        settings: JsonValue,
        current_version: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::SystemConfig::update_many()
            .col_expr(entity::system_config::Column::Settings, Expr::value(settings))
            .col_expr(
                entity::system_config::Column::Version,
                Expr::value(current_version + 1),
            )
            .col_expr(
                entity::system_config::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::system_config::Column::Id.eq(SYSTEM_CONFIG_ID))
            .filter(entity::system_config::Column::Version.eq(current_version))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
