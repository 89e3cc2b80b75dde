//! Course materials: uploaded files attached to a course.
//!
//! Content goes to the [`FileStore`] before the row is written. When the row cannot be
//! written the file is removed again. Deleting a material removes the row first and the file
//! on a best-effort basis, so a file that cannot be removed never blocks the delete.

use std::io::ErrorKind;

use sea_orm::DatabaseConnection;
use tokio::io::AsyncRead;

use crate::{
    model::{
        api::DEFAULT_PAGE_LIMIT,
        material::{MaterialDto, MaterialListParams, NewUpload},
    },
    server::{
        data::{
            course::CourseRepository,
            enrollment::EnrollmentRepository,
            material::{MaterialRepository, NewMaterial},
        },
        error::{auth::AuthError, domain::DomainError, Error},
        util::storage::{self, FileStore},
    },
};

/// Content of a material ready to be sent to the client
pub struct MaterialFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

pub struct MaterialService<'a> {
    db: &'a DatabaseConnection,
    files: &'a FileStore,
}

impl<'a> MaterialService<'a> {
    /// Creates a new instance of [`MaterialService`]
    pub fn new(db: &'a DatabaseConnection, files: &'a FileStore) -> Self {
        Self { db, files }
    }

    /// Stores an uploaded file and records it as a material of the course.
    ///
    /// # Returns
    /// - `Ok(MaterialDto)` - The recorded material
    /// - `Err(DomainError::NotFound)` - Course does not exist
    /// - `Err(DomainError::InvalidArgument)` - Empty title or file larger than the upload limit
    /// - `Err(Error)` - Writing the file or the row failed; no file is left behind
    pub async fn upload<R>(&self, upload: NewUpload, reader: R) -> Result<MaterialDto, Error>
    where
        R: AsyncRead + Unpin,
    {
        let course = CourseRepository::new(self.db)
            .get(upload.course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let title = upload.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::invalid_argument("title must not be empty").into());
        }

        let stored = self
            .files
            .save(&format!("course_{}", course.id), &upload.file_name, reader)
            .await?;

        let new_material = NewMaterial {
            course_id: course.id,
            title,
            description: upload.description,
            file_path: stored.path.clone(),
            file_type: storage::file_type(&upload.file_name).to_string(),
            file_size: i64::try_from(stored.size).unwrap_or(i64::MAX),
        };

        let material = match MaterialRepository::new(self.db).create(new_material).await {
            Ok(material) => material,
            Err(e) => {
                storage::discard(&stored.path).await;

                return Err(e.into());
            }
        };

        tracing::info!(
            "Uploaded material ID {} ({} bytes) to course ID {}",
            material.id,
            stored.size,
            course.id
        );

        Ok(material.into())
    }

    pub async fn get(&self, material_id: i32) -> Result<MaterialDto, Error> {
        let material = MaterialRepository::new(self.db)
            .get(material_id)
            .await?
            .ok_or(DomainError::NotFound("material"))?;

        Ok(material.into())
    }

    /// Materials of a course, newest first
    pub async fn list_for_course(
        &self,
        course_id: i32,
        params: MaterialListParams,
    ) -> Result<Vec<MaterialDto>, Error> {
        CourseRepository::new(self.db)
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let materials = MaterialRepository::new(self.db)
            .list_for_course(
                course_id,
                params.file_type,
                params.skip.unwrap_or(0),
                params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            )
            .await?;

        Ok(materials.into_iter().map(MaterialDto::from).collect())
    }

    /// Reads a material's file.
    ///
    /// When `student_id` is given the student must be enrolled in the material's course.
    ///
    /// # Returns
    /// - `Ok(MaterialFile)` - Original file name and content
    /// - `Err(DomainError::NotFound)` - Material or its file does not exist
    /// - `Err(AuthError::NotEnrolled)` - The student is not enrolled in the course
    pub async fn download(
        &self,
        material_id: i32,
        student_id: Option<i32>,
    ) -> Result<MaterialFile, Error> {
        let material = MaterialRepository::new(self.db)
            .get(material_id)
            .await?
            .ok_or(DomainError::NotFound("material"))?;

        if let Some(student_id) = student_id {
            let enrolled = EnrollmentRepository::new(self.db)
                .find(student_id, material.course_id)
                .await?
                .is_some();

            if !enrolled {
                return Err(AuthError::NotEnrolled {
                    student_id,
                    course_id: material.course_id,
                }
                .into());
            }
        }

        let content = match tokio::fs::read(&material.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "File {} of material ID {} is missing",
                    material.file_path,
                    material.id
                );

                return Err(DomainError::NotFound("material file").into());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(MaterialFile {
            file_name: storage::original_file_name(&material.file_path),
            content,
        })
    }

    /// Deletes a material and then its file.
    ///
    /// Failing to remove the file is logged and does not fail the delete.
    pub async fn delete(&self, material_id: i32) -> Result<(), Error> {
        let material_repo = MaterialRepository::new(self.db);

        let material = material_repo
            .get(material_id)
            .await?
            .ok_or(DomainError::NotFound("material"))?;

        let result = material_repo.delete(material_id).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("material").into());
        }

        storage::discard(&material.file_path).await;

        tracing::info!("Deleted material ID {}", material_id);

        Ok(())
    }
}
