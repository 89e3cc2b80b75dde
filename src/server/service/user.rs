//! User accounts: creation, authentication and administration.

use entity::user::UserRole;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::{
        api::DEFAULT_PAGE_LIMIT,
        auth::{LoginDto, LoginResponseDto},
        user::{CreateUserDto, UpdateUserDto, UserDto, UserListParams},
    },
    server::{
        data::{
            is_unique_violation,
            user::{NewUser, UserChanges, UserRepository},
        },
        error::{auth::AuthError, domain::DomainError, Error},
        model::principal::Principal,
        util::password::{hash_password, verify_password},
    },
};

/// Inserts a user after checking username and email are free.
///
/// Generic over the connection so student and teacher creation can run it inside their own
/// transaction.
pub(crate) async fn insert_user<C: ConnectionTrait>(
    db: &C,
    username: String,
    email: String,
    password: &str,
    full_name: String,
    role: UserRole,
) -> Result<entity::user::Model, Error> {
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    if username.is_empty() {
        return Err(DomainError::invalid_argument("username must not be empty").into());
    }
    if email.is_empty() {
        return Err(DomainError::invalid_argument("email must not be empty").into());
    }
    if password.is_empty() {
        return Err(DomainError::invalid_argument("password must not be empty").into());
    }

    let user_repo = UserRepository::new(db);

    if user_repo.find_by_username(&username).await?.is_some() {
        return Err(DomainError::already_exists("username").into());
    }
    if user_repo.find_by_email(&email).await?.is_some() {
        return Err(DomainError::already_exists("email").into());
    }

    let full_name = if full_name.trim().is_empty() {
        username.clone()
    } else {
        full_name
    };

    let new_user = NewUser {
        username,
        email,
        password_hash: hash_password(password)?,
        full_name,
        role,
    };

    match user_repo.create(new_user).await {
        Ok(user) => Ok(user),
        Err(e) if is_unique_violation(&e) => {
            Err(DomainError::already_exists("username or email").into())
        }
        Err(e) => Err(e.into()),
    }
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active user with an argon2 hashed password
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created user
    /// - `Err(DomainError::AlreadyExists)` - Username or email is taken
    /// - `Err(DomainError::InvalidArgument)` - Username, email or password is empty
    pub async fn create(&self, user: CreateUserDto) -> Result<UserDto, Error> {
        let user = insert_user(
            self.db,
            user.username,
            user.email,
            &user.password,
            user.full_name,
            user.role,
        )
        .await?;

        tracing::info!("Created {:?} user ID {}", user.role, user.id);

        Ok(user.into())
    }

    /// Returns the user when the credentials match an active account
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<entity::user::Model>, Error> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Ok(None);
        };

        if !user.is_active || !verify_password(password, &user.password_hash) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Issues the `<username>:<id>` bearer token for valid credentials
    pub async fn login(&self, credentials: LoginDto) -> Result<LoginResponseDto, Error> {
        let user = self
            .authenticate(&credentials.username, &credentials.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!("User ID {} logged in", user.id);

        Ok(LoginResponseDto {
            access_token: Principal::new(&user).token(),
            token_type: "bearer".to_string(),
            user: user.into(),
        })
    }

    pub async fn get(&self, user_id: i32) -> Result<UserDto, Error> {
        let user = UserRepository::new(self.db)
            .get(user_id)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        Ok(user.into())
    }

    pub async fn list(&self, params: UserListParams) -> Result<Vec<UserDto>, Error> {
        let users = UserRepository::new(self.db)
            .list(
                params.role,
                params.active_only.unwrap_or(false),
                params.skip.unwrap_or(0),
                params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            )
            .await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Applies field-level changes; a changed username or email must still be unique
    pub async fn update(&self, user_id: i32, changes: UpdateUserDto) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .get(user_id)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        if let Some(username) = changes.username.as_deref() {
            if username != user.username && user_repo.find_by_username(username).await?.is_some()
            {
                return Err(DomainError::already_exists("username").into());
            }
        }
        if let Some(email) = changes.email.as_deref() {
            if email != user.email && user_repo.find_by_email(email).await?.is_some() {
                return Err(DomainError::already_exists("email").into());
            }
        }

        let password_hash = match changes.password.as_deref() {
            Some("") => {
                return Err(DomainError::invalid_argument("password must not be empty").into())
            }
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user_changes = UserChanges {
            username: changes.username,
            email: changes.email,
            password_hash,
            full_name: changes.full_name,
            role: changes.role,
            is_active: changes.is_active,
        };

        let user = match user_repo.update(user_id, user_changes).await {
            Ok(user) => user.ok_or(DomainError::NotFound("user"))?,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::already_exists("username or email").into())
            }
            Err(e) => return Err(e.into()),
        };

        Ok(user.into())
    }

    /// Freezes (`false`) or unfreezes (`true`) an account
    pub async fn set_active(&self, user_id: i32, is_active: bool) -> Result<UserDto, Error> {
        let changes = UserChanges {
            is_active: Some(is_active),
            ..Default::default()
        };

        let user = UserRepository::new(self.db)
            .update(user_id, changes)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        tracing::info!(
            "{} user ID {}",
            if is_active { "Unfroze" } else { "Froze" },
            user_id
        );

        Ok(user.into())
    }

    /// Replaces a user's own password after verifying the old one
    pub async fn change_password(
        &self,
        user_id: i32,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .get(user_id)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(DomainError::invalid_argument("incorrect password").into());
        }
        if new_password.is_empty() {
            return Err(DomainError::invalid_argument("password must not be empty").into());
        }

        let changes = UserChanges {
            password_hash: Some(hash_password(new_password)?),
            ..Default::default()
        };
        user_repo.update(user_id, changes).await?;

        Ok(())
    }
}
