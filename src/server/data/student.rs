use chrono::Utc;
use entity::student::StudentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewStudent {
    pub user_id: i32,
    pub student_number: String,
    pub grade_level: Option<String>,
    pub major: Option<String>,
    pub phone: Option<String>,
}

#[derive(Default)]
pub struct StudentChanges {
    pub grade_level: Option<String>,
    pub major: Option<String>,
    pub phone: Option<String>,
}

pub struct StudentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active student profile enrolled as of now
    pub async fn create(&self, student: NewStudent) -> Result<entity::student::Model, DbErr> {
        let student = entity::student::ActiveModel {
            user_id: ActiveValue::Set(student.user_id),
            student_number: ActiveValue::Set(student.student_number),
            grade_level: ActiveValue::Set(student.grade_level),
            major: ActiveValue::Set(student.major),
            phone: ActiveValue::Set(student.phone),
            status: ActiveValue::Set(StudentStatus::Active),
            enrollment_date: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        student.insert(self.db).await
    }

    pub async fn get(&self, student_id: i32) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find_by_id(student_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_user(
        &self,
        student_id: i32,
    ) -> Result<Option<(entity::student::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Student::find_by_id(student_id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await
    }

    pub async fn find_by_number(
        &self,
        student_number: &str,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::StudentNumber.eq(student_number))
            .one(self.db)
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Lists students with their users ordered by ID, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<StudentStatus>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(entity::student::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Student::find()
            .filter(
                Condition::all()
                    .add_option(status.map(|status| entity::student::Column::Status.eq(status))),
            )
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::student::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        student_id: i32,
        changes: StudentChanges,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let Some(student) = self.get(student_id).await? else {
            return Ok(None);
        };

        let mut student_am = student.into_active_model();
        if let Some(grade_level) = changes.grade_level {
            student_am.grade_level = ActiveValue::Set(Some(grade_level));
        }
        if let Some(major) = changes.major {
            student_am.major = ActiveValue::Set(Some(major));
        }
        if let Some(phone) = changes.phone {
            student_am.phone = ActiveValue::Set(Some(phone));
        }

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }

    pub async fn set_status(
        &self,
        student_id: i32,
        status: StudentStatus,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        let Some(student) = self.get(student_id).await? else {
            return Ok(None);
        };

        let mut student_am = student.into_active_model();
        student_am.status = ActiveValue::Set(status);

        let student = student_am.update(self.db).await?;

        Ok(Some(student))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Student::find().count(self.db).await
    }

    pub async fn delete(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Student::delete_by_id(student_id)
            .exec(self.db)
            .await
    }
}
