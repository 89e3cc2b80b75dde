use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct EnrollmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Enrolls a student as of now
    ///
    /// Fails with a unique violation if the (student, course) pair already exists.
    pub async fn create(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<entity::enrollment::Model, DbErr> {
        let enrollment = entity::enrollment::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            course_id: ActiveValue::Set(course_id),
            enrolled_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        enrollment.insert(self.db).await
    }

    pub async fn get(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<entity::enrollment::Model>, DbErr> {
        entity::prelude::Enrollment::find_by_id(enrollment_id)
            .one(self.db)
            .await
    }

    pub async fn find(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Option<entity::enrollment::Model>, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::StudentId.eq(student_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .one(self.db)
            .await
    }

    pub async fn list_for_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<entity::enrollment::Model>, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::StudentId.eq(student_id))
            .order_by_asc(entity::enrollment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<entity::enrollment::Model>, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(entity::enrollment::Column::Id)
            .all(self.db)
            .await
    }

    /// Courses of a student's enrollments, in enrollment order
    pub async fn courses_for_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<entity::course::Model>, DbErr> {
        let rows = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::StudentId.eq(student_id))
            .order_by_asc(entity::enrollment::Column::Id)
            .find_also_related(entity::prelude::Course)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, course)| course).collect())
    }

    /// Students of a course's enrollments, in enrollment order
    pub async fn students_for_course(
        &self,
        course_id: i32,
    ) -> Result<Vec<entity::student::Model>, DbErr> {
        let rows = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(entity::enrollment::Column::Id)
            .find_also_related(entity::prelude::Student)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, student)| student).collect())
    }

    pub async fn count_for_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find().count(self.db).await
    }

    pub async fn delete(&self, enrollment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Enrollment::delete_by_id(enrollment_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_student(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Enrollment::delete_many()
            .filter(entity::enrollment::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_for_course(&self, course_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Enrollment::delete_many()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await
    }
}
