use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores an unread notification for a user
    pub async fn create(
        &self,
        user_id: i32,
        title: String,
        message: String,
        category: Option<String>,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title),
            message: ActiveValue::Set(message),
            category: ActiveValue::Set(category),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Newest first
    pub async fn list_for_user(
        &self,
        user_id: i32,
        unread_only: bool,
        limit: u64,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        let condition = Condition::all()
            .add(entity::notification::Column::UserId.eq(user_id))
            .add_option(unread_only.then(|| entity::notification::Column::IsRead.eq(false)));

        entity::prelude::Notification::find()
            .filter(condition)
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Finds a notification only if it belongs to `user_id`
    pub async fn find_for_user(
        &self,
        notification_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find_by_id(notification_id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn mark_read(
        &self,
        notification: entity::notification::Model,
    ) -> Result<entity::notification::Model, DbErr> {
        let mut notification_am = notification.into_active_model();
        notification_am.is_read = ActiveValue::Set(true);

        notification_am.update(self.db).await
    }

    /// Returns the number of notifications flipped to read
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::IsRead, Expr::value(true))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, notification_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Notification::delete_by_id(notification_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
