use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewAssignment {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub total_points: f64,
}

#[derive(Default)]
pub struct AssignmentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub total_points: Option<f64>,
}

pub struct AssignmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AssignmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        assignment: NewAssignment,
    ) -> Result<entity::assignment::Model, DbErr> {
        let assignment = entity::assignment::ActiveModel {
            course_id: ActiveValue::Set(assignment.course_id),
            title: ActiveValue::Set(assignment.title),
            description: ActiveValue::Set(assignment.description),
            due_date: ActiveValue::Set(assignment.due_date),
            total_points: ActiveValue::Set(assignment.total_points),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        assignment.insert(self.db).await
    }

    pub async fn get(
        &self,
        assignment_id: i32,
    ) -> Result<Option<entity::assignment::Model>, DbErr> {
        entity::prelude::Assignment::find_by_id(assignment_id)
            .one(self.db)
            .await
    }

    /// Assignments of a course, earliest due first
    pub async fn list_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<entity::assignment::Model>, DbErr> {
        entity::prelude::Assignment::find()
            .filter(entity::assignment::Column::CourseId.eq(course_id))
            .order_by_asc(entity::assignment::Column::DueDate)
            .order_by_asc(entity::assignment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn ids_for_course(&self, course_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Assignment::find()
            .select_only()
            .column(entity::assignment::Column::Id)
            .filter(entity::assignment::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        assignment_id: i32,
        changes: AssignmentChanges,
    ) -> Result<Option<entity::assignment::Model>, DbErr> {
        let Some(assignment) = self.get(assignment_id).await? else {
            return Ok(None);
        };

        let mut assignment_am = assignment.into_active_model();
        if let Some(title) = changes.title {
            assignment_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            assignment_am.description = ActiveValue::Set(Some(description));
        }
        if let Some(due_date) = changes.due_date {
            assignment_am.due_date = ActiveValue::Set(due_date);
        }
        if let Some(total_points) = changes.total_points {
            assignment_am.total_points = ActiveValue::Set(total_points);
        }

        let assignment = assignment_am.update(self.db).await?;

        Ok(Some(assignment))
    }

    pub async fn delete(&self, assignment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Assignment::delete_by_id(assignment_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_course(&self, course_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Assignment::delete_many()
            .filter(entity::assignment::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await
    }
}
