use axum::{
    extract::{Multipart, Path, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::IntoResponse,
    Json,
};
use entity::user::UserRole;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        material::{MaterialDto, MaterialListParams, NewUpload, UploadMaterialForm},
    },
    server::{
        controller::util::form::UploadForm,
        error::{domain::DomainError, Error},
        model::{app::AppState, principal::Principal},
        service::{material::MaterialService, student::StudentService},
    },
};

pub static MATERIAL_TAG: &str = "material";

/// Upload a course material
///
/// The file type is derived from the file name's extension.
#[utoipa::path(
    post,
    path = "/api/materials",
    tag = MATERIAL_TAG,
    request_body(content = UploadMaterialForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Material uploaded", body = MaterialDto),
        (status = 400, description = "Missing field or file over the upload limit", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn upload_material(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let mut form = UploadForm::read(multipart).await?;
    let course_id = form
        .integer("course_id")?
        .ok_or_else(|| DomainError::invalid_argument("course_id is required"))?;
    let (file_name, content) = form.take_file()?;

    let upload = NewUpload {
        course_id,
        title: form.required_text("title")?,
        description: form.text("description"),
        file_name,
    };

    let material = MaterialService::new(&state.db, &state.files)
        .upload(upload, &content[..])
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

/// Materials of a course
#[utoipa::path(
    get,
    path = "/api/materials/course/{course_id}",
    tag = MATERIAL_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        MaterialListParams
    ),
    responses(
        (status = 200, description = "Materials, newest first", body = Vec<MaterialDto>),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course_materials(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
    Query(params): Query<MaterialListParams>,
) -> Result<impl IntoResponse, Error> {
    let materials = MaterialService::new(&state.db, &state.files)
        .list_for_course(course_id, params)
        .await?;

    Ok((StatusCode::OK, Json(materials)))
}

/// Get a material
#[utoipa::path(
    get,
    path = "/api/materials/{material_id}",
    tag = MATERIAL_TAG,
    params(("material_id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material found", body = MaterialDto),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
)]
pub async fn get_material(
    State(state): State<AppState>,
    _principal: Principal,
    Path(material_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let material = MaterialService::new(&state.db, &state.files)
        .get(material_id)
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

/// Download a material's file
///
/// Students must be enrolled in the material's course.
#[utoipa::path(
    get,
    path = "/api/materials/{material_id}/download",
    tag = MATERIAL_TAG,
    params(("material_id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 403, description = "Student not enrolled in the course", body = ErrorDto),
        (status = 404, description = "Material or its file not found", body = ErrorDto)
    ),
)]
pub async fn download_material(
    State(state): State<AppState>,
    principal: Principal,
    Path(material_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let student_id = match principal.role {
        UserRole::Student => Some(
            StudentService::new(&state.db)
                .get_by_user(principal.user_id)
                .await?
                .id,
        ),
        UserRole::Teacher | UserRole::Admin => None,
    };

    let file = MaterialService::new(&state.db, &state.files)
        .download(material_id, student_id)
        .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace('"', "")
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    ))
}

/// Delete a material and its file
#[utoipa::path(
    delete,
    path = "/api/materials/{material_id}",
    tag = MATERIAL_TAG,
    params(("material_id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material deleted", body = MessageDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Material not found", body = ErrorDto)
    ),
)]
pub async fn delete_material(
    State(state): State<AppState>,
    principal: Principal,
    Path(material_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    MaterialService::new(&state.db, &state.files)
        .delete(material_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Material deleted"))))
}
