use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewMaterial {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

pub struct MaterialRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MaterialRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records an uploaded file as uploaded now
    pub async fn create(&self, material: NewMaterial) -> Result<entity::material::Model, DbErr> {
        let material = entity::material::ActiveModel {
            course_id: ActiveValue::Set(material.course_id),
            title: ActiveValue::Set(material.title),
            description: ActiveValue::Set(material.description),
            file_path: ActiveValue::Set(material.file_path),
            file_type: ActiveValue::Set(material.file_type),
            file_size: ActiveValue::Set(material.file_size),
            uploaded_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        material.insert(self.db).await
    }

    pub async fn get(&self, material_id: i32) -> Result<Option<entity::material::Model>, DbErr> {
        entity::prelude::Material::find_by_id(material_id)
            .one(self.db)
            .await
    }

    /// Materials of a course, newest first, optionally of one file type
    pub async fn list_for_course(
        &self,
        course_id: i32,
        file_type: Option<String>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<entity::material::Model>, DbErr> {
        let condition = Condition::all()
            .add(entity::material::Column::CourseId.eq(course_id))
            .add_option(file_type.map(|file_type| entity::material::Column::FileType.eq(file_type)));

        entity::prelude::Material::find()
            .filter(condition)
            .order_by_desc(entity::material::Column::UploadedAt)
            .order_by_desc(entity::material::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn file_paths_for_course(&self, course_id: i32) -> Result<Vec<String>, DbErr> {
        entity::prelude::Material::find()
            .select_only()
            .column(entity::material::Column::FilePath)
            .filter(entity::material::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Deletes a material row
    ///
    /// Returns OK regardless of the row existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, material_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Material::delete_by_id(material_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_course(&self, course_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Material::delete_many()
            .filter(entity::material::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await
    }
}
