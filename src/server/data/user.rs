use chrono::Utc;
use entity::user::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Fields of a new user account; the password must already be hashed
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Field-level changes to a user, `None` leaves the column untouched
#[derive(Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active user
    pub async fn create(&self, user: NewUser) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::user::ActiveModel {
            username: ActiveValue::Set(user.username),
            email: ActiveValue::Set(user.email),
            password_hash: ActiveValue::Set(user.password_hash),
            full_name: ActiveValue::Set(user.full_name),
            role: ActiveValue::Set(user.role),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Lists users ordered by ID with optional role and active filters
    pub async fn list(
        &self,
        role: Option<UserRole>,
        active_only: bool,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<entity::user::Model>, DbErr> {
        let condition = Condition::all()
            .add_option(role.map(|role| entity::user::Column::Role.eq(role)))
            .add_option(active_only.then(|| entity::user::Column::IsActive.eq(true)));

        entity::prelude::User::find()
            .filter(condition)
            .order_by_asc(entity::user::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Applies `changes` and bumps `updated_at`
    ///
    /// Returns `Ok(None)` when the user does not exist.
    pub async fn update(
        &self,
        user_id: i32,
        changes: UserChanges,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        if let Some(username) = changes.username {
            user_am.username = ActiveValue::Set(username);
        }
        if let Some(email) = changes.email {
            user_am.email = ActiveValue::Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            user_am.password_hash = ActiveValue::Set(password_hash);
        }
        if let Some(full_name) = changes.full_name {
            user_am.full_name = ActiveValue::Set(full_name);
        }
        if let Some(role) = changes.role {
            user_am.role = ActiveValue::Set(role);
        }
        if let Some(is_active) = changes.is_active {
            user_am.is_active = ActiveValue::Set(is_active);
        }
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    pub async fn count(&self, role: Option<UserRole>) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(Condition::all().add_option(role.map(|role| entity::user::Column::Role.eq(role))))
            .count(self.db)
            .await
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}
