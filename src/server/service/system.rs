//! Runtime settings document and system-wide statistics.
//!
//! The settings live in a single `system_config` row as a JSON object plus a version counter.
//! Until the first write, readers see [`SystemSettings::default`] at version 0.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::{json, Map, Value};

use crate::{
    model::system::{SystemConfigDto, SystemSettings, SystemStatsDto},
    server::{
        data::{
            course::CourseRepository, enrollment::EnrollmentRepository, is_unique_violation,
            student::StudentRepository, system_config::SystemConfigRepository,
            teacher::TeacherRepository, user::UserRepository,
        },
        error::{domain::DomainError, Error},
    },
};

/// Stored document with defaults filled in for missing keys, and its version
async fn load_document<C: ConnectionTrait>(db: &C) -> Result<(Map<String, Value>, i32), Error> {
    let mut document = match serde_json::to_value(SystemSettings::default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let Some(stored) = SystemConfigRepository::new(db).get().await? else {
        return Ok((document, 0));
    };

    if let Value::Object(map) = stored.settings {
        document.extend(map);
    } else {
        tracing::warn!("Stored system settings are not a JSON object, using defaults");
    }

    Ok((document, stored.version))
}

/// Typed settings currently in effect
pub async fn load_settings<C: ConnectionTrait>(db: &C) -> Result<SystemSettings, Error> {
    let (document, _) = load_document(db).await?;

    Ok(serde_json::from_value(Value::Object(document))?)
}

pub struct SystemService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SystemService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_config(&self) -> Result<SystemConfigDto, Error> {
        let (document, version) = load_document(self.db).await?;

        Ok(SystemConfigDto {
            version,
            settings: Value::Object(document),
        })
    }

    /// Merges `patch` into the settings document and bumps its version.
    ///
    /// # Arguments
    /// - `patch` - JSON object whose keys replace those of the stored document
    /// - `expected_version` - When given, the write only happens if the stored version matches
    ///
    /// # Returns
    /// - `Ok(SystemConfigDto)` - The merged document at its new version
    /// - `Err(DomainError::InvalidArgument)` - Patch is not an object or the merged document has
    ///   a wrongly typed setting
    /// - `Err(DomainError::Conflict)` - Stored version differs from `expected_version`, or another
    ///   writer got in first
    pub async fn update_config(
        &self,
        patch: Value,
        expected_version: Option<i32>,
    ) -> Result<SystemConfigDto, Error> {
        let Value::Object(patch) = patch else {
            return Err(DomainError::invalid_argument("settings must be a JSON object").into());
        };

        let txn = self.db.begin().await?;

        let (mut document, version) = load_document(&txn).await?;

        if let Some(expected) = expected_version {
            if expected != version {
                return Err(DomainError::conflict(format!(
                    "config version mismatch: expected {}, found {}",
                    expected, version
                ))
                .into());
            }
        }

        document.extend(patch);
        let document = Value::Object(document);

        if let Err(e) = serde_json::from_value::<SystemSettings>(document.clone()) {
            return Err(DomainError::invalid_argument(format!("invalid settings: {}", e)).into());
        }

        let config_repo = SystemConfigRepository::new(&txn);
        if version == 0 {
            match config_repo.insert(document.clone()).await {
                Ok(_) => (),
                Err(e) if is_unique_violation(&e) => {
                    return Err(DomainError::conflict("config was modified concurrently").into())
                }
                Err(e) => return Err(e.into()),
            }
        } else if !config_repo
            .update_if_version(document.clone(), version)
            .await?
        {
            return Err(DomainError::conflict("config was modified concurrently").into());
        }

        txn.commit().await?;

        tracing::info!("Updated system settings to version {}", version + 1);

        Ok(SystemConfigDto {
            version: version + 1,
            settings: document,
        })
    }

    pub async fn set_semester(&self, semester: &str) -> Result<SystemConfigDto, Error> {
        let semester = semester.trim();
        if semester.is_empty() {
            return Err(DomainError::invalid_argument("semester must not be empty").into());
        }

        self.update_config(json!({ "current_semester": semester }), None)
            .await
    }

    pub async fn toggle_enrollment(&self, open: bool) -> Result<SystemConfigDto, Error> {
        self.update_config(json!({ "enrollment_open": open }), None)
            .await
    }

    pub async fn stats(&self) -> Result<SystemStatsDto, Error> {
        let user_repo = UserRepository::new(self.db);
        let settings = load_settings(self.db).await?;

        Ok(SystemStatsDto {
            total_users: user_repo.count(None).await?,
            total_students: StudentRepository::new(self.db).count().await?,
            total_teachers: TeacherRepository::new(self.db).count().await?,
            total_courses: CourseRepository::new(self.db).count().await?,
            total_enrollments: EnrollmentRepository::new(self.db).count().await?,
            active_users: user_repo.count_active().await?,
            current_semester: settings.current_semester,
        })
    }
}
