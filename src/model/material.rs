use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MaterialDto {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Derived from the file extension: pdf, document, presentation, spreadsheet, video,
    /// audio, image, archive or other
    pub file_type: String,
    /// Size in bytes
    pub file_size: i64,
    pub uploaded_at: NaiveDateTime,
}

impl From<entity::material::Model> for MaterialDto {
    fn from(material: entity::material::Model) -> Self {
        Self {
            id: material.id,
            course_id: material.course_id,
            title: material.title,
            description: material.description,
            file_type: material.file_type,
            file_size: material.file_size,
            uploaded_at: material.uploaded_at,
        }
    }
}

/// Multipart form of a material upload
#[derive(ToSchema)]
pub struct UploadMaterialForm {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Fields of an upload besides the file content
#[derive(Clone, Debug)]
pub struct NewUpload {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialListParams {
    pub file_type: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}
