use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct GradeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GradeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a grade with `recorded_at` and `updated_at` set to now
    pub async fn create(
        &self,
        student_id: i32,
        course_id: i32,
        score: f64,
        letter_grade: Option<String>,
        comments: Option<String>,
    ) -> Result<entity::grade::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let grade = entity::grade::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            course_id: ActiveValue::Set(course_id),
            score: ActiveValue::Set(score),
            letter_grade: ActiveValue::Set(letter_grade),
            comments: ActiveValue::Set(comments),
            recorded_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        grade.insert(self.db).await
    }

    pub async fn get(&self, grade_id: i32) -> Result<Option<entity::grade::Model>, DbErr> {
        entity::prelude::Grade::find_by_id(grade_id).one(self.db).await
    }

    pub async fn find(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Option<entity::grade::Model>, DbErr> {
        entity::prelude::Grade::find()
            .filter(entity::grade::Column::StudentId.eq(student_id))
            .filter(entity::grade::Column::CourseId.eq(course_id))
            .one(self.db)
            .await
    }

    /// Overwrites score, letter and comments of an existing grade and bumps `updated_at`
    pub async fn update(
        &self,
        grade: entity::grade::Model,
        score: f64,
        letter_grade: Option<String>,
        comments: Option<String>,
    ) -> Result<entity::grade::Model, DbErr> {
        let mut grade_am = grade.into_active_model();
        grade_am.score = ActiveValue::Set(score);
        grade_am.letter_grade = ActiveValue::Set(letter_grade);
        grade_am.comments = ActiveValue::Set(comments);
        grade_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        grade_am.update(self.db).await
    }

    pub async fn list_for_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<entity::grade::Model>, DbErr> {
        entity::prelude::Grade::find()
            .filter(entity::grade::Column::StudentId.eq(student_id))
            .order_by_asc(entity::grade::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<entity::grade::Model>, DbErr> {
        entity::prelude::Grade::find()
            .filter(entity::grade::Column::CourseId.eq(course_id))
            .order_by_asc(entity::grade::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete(&self, grade_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Grade::delete_by_id(grade_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_student(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Grade::delete_many()
            .filter(entity::grade::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_for_course(&self, course_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Grade::delete_many()
            .filter(entity::grade::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await
    }
}
