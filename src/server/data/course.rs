use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

fn select_for_update(course_id: i32) -> Select<entity::prelude::Course> {
    entity::prelude::Course::find_by_id(course_id).lock_exclusive()
}

pub struct NewCourse {
    pub course_code: String,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i32,
    pub credits: f64,
    pub capacity: i32,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub semester: String,
}

#[derive(Default)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i32>,
    pub credits: Option<f64>,
    pub capacity: Option<i32>,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
}

/// Filters for [`CourseRepository::list`]; unset fields do not constrain the result
#[derive(Default)]
pub struct CourseFilter {
    pub teacher_id: Option<i32>,
    pub semester: Option<String>,
    pub active_only: bool,
    pub name_contains: Option<String>,
}

pub struct CourseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active course
    pub async fn create(&self, course: NewCourse) -> Result<entity::course::Model, DbErr> {
        let course = entity::course::ActiveModel {
            course_code: ActiveValue::Set(course.course_code),
            name: ActiveValue::Set(course.name),
            description: ActiveValue::Set(course.description),
            teacher_id: ActiveValue::Set(course.teacher_id),
            credits: ActiveValue::Set(course.credits),
            capacity: ActiveValue::Set(course.capacity),
            schedule: ActiveValue::Set(course.schedule),
            location: ActiveValue::Set(course.location),
            semester: ActiveValue::Set(course.semester),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        course.insert(self.db).await
    }

    pub async fn get(&self, course_id: i32) -> Result<Option<entity::course::Model>, DbErr> {
        entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await
    }

    /// Gets a course and holds a row lock on it until the surrounding transaction ends.
    ///
    /// Concurrent callers on the same course queue behind each other, so seat counts taken
    /// after this call stay valid until commit. SQLite has no row locks and serializes
    /// writers on its own.
    pub async fn get_for_update(
        &self,
        course_id: i32,
    ) -> Result<Option<entity::course::Model>, DbErr> {
        select_for_update(course_id).one(self.db).await
    }

    pub async fn find_by_code(
        &self,
        course_code: &str,
    ) -> Result<Option<entity::course::Model>, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::CourseCode.eq(course_code))
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        filter: CourseFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<entity::course::Model>, DbErr> {
        let condition = Condition::all()
            .add_option(
                filter
                    .teacher_id
                    .map(|teacher_id| entity::course::Column::TeacherId.eq(teacher_id)),
            )
            .add_option(
                filter
                    .semester
                    .map(|semester| entity::course::Column::Semester.eq(semester)),
            )
            .add_option(
                filter
                    .active_only
                    .then(|| entity::course::Column::IsActive.eq(true)),
            )
            .add_option(
                filter
                    .name_contains
                    .map(|search| entity::course::Column::Name.contains(search)),
            );

        entity::prelude::Course::find()
            .filter(condition)
            .order_by_asc(entity::course::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn list_by_teacher(
        &self,
        teacher_id: i32,
    ) -> Result<Vec<entity::course::Model>, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::TeacherId.eq(teacher_id))
            .order_by_asc(entity::course::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        course_id: i32,
        changes: CourseChanges,
    ) -> Result<Option<entity::course::Model>, DbErr> {
        let Some(course) = self.get(course_id).await? else {
            return Ok(None);
        };

        let mut course_am = course.into_active_model();
        if let Some(name) = changes.name {
            course_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            course_am.description = ActiveValue::Set(Some(description));
        }
        if let Some(teacher_id) = changes.teacher_id {
            course_am.teacher_id = ActiveValue::Set(teacher_id);
        }
        if let Some(credits) = changes.credits {
            course_am.credits = ActiveValue::Set(credits);
        }
        if let Some(capacity) = changes.capacity {
            course_am.capacity = ActiveValue::Set(capacity);
        }
        if let Some(schedule) = changes.schedule {
            course_am.schedule = ActiveValue::Set(Some(schedule));
        }
        if let Some(location) = changes.location {
            course_am.location = ActiveValue::Set(Some(location));
        }
        if let Some(semester) = changes.semester {
            course_am.semester = ActiveValue::Set(semester);
        }

        let course = course_am.update(self.db).await?;

        Ok(Some(course))
    }

    pub async fn set_active(
        &self,
        course_id: i32,
        is_active: bool,
    ) -> Result<Option<entity::course::Model>, DbErr> {
        let Some(course) = self.get(course_id).await? else {
            return Ok(None);
        };

        let mut course_am = course.into_active_model();
        course_am.is_active = ActiveValue::Set(is_active);

        let course = course_am.update(self.db).await?;

        Ok(Some(course))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Course::find().count(self.db).await
    }

    pub async fn delete(&self, course_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Course::delete_by_id(course_id)
            .exec(self.db)
            .await
    }
}
