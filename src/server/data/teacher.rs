use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct NewTeacher {
    pub user_id: i32,
    pub employee_number: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
}

#[derive(Default)]
pub struct TeacherChanges {
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
}

pub struct TeacherRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeacherRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, teacher: NewTeacher) -> Result<entity::teacher::Model, DbErr> {
        let teacher = entity::teacher::ActiveModel {
            user_id: ActiveValue::Set(teacher.user_id),
            employee_number: ActiveValue::Set(teacher.employee_number),
            department: ActiveValue::Set(teacher.department),
            title: ActiveValue::Set(teacher.title),
            phone: ActiveValue::Set(teacher.phone),
            office: ActiveValue::Set(teacher.office),
            ..Default::default()
        };

        teacher.insert(self.db).await
    }

    pub async fn get(&self, teacher_id: i32) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find_by_id(teacher_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_user(
        &self,
        teacher_id: i32,
    ) -> Result<Option<(entity::teacher::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Teacher::find_by_id(teacher_id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await
    }

    pub async fn find_by_employee_number(
        &self,
        employee_number: &str,
    ) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find()
            .filter(entity::teacher::Column::EmployeeNumber.eq(employee_number))
            .one(self.db)
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find()
            .filter(entity::teacher::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Earliest created teacher, used as the fallback owner of imported courses
    pub async fn first(&self) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find()
            .order_by_asc(entity::teacher::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        department: Option<&str>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(entity::teacher::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Teacher::find()
            .filter(Condition::all().add_option(
                department.map(|department| entity::teacher::Column::Department.eq(department)),
            ))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::teacher::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        teacher_id: i32,
        changes: TeacherChanges,
    ) -> Result<Option<entity::teacher::Model>, DbErr> {
        let Some(teacher) = self.get(teacher_id).await? else {
            return Ok(None);
        };

        let mut teacher_am = teacher.into_active_model();
        if let Some(department) = changes.department {
            teacher_am.department = ActiveValue::Set(Some(department));
        }
        if let Some(title) = changes.title {
            teacher_am.title = ActiveValue::Set(Some(title));
        }
        if let Some(phone) = changes.phone {
            teacher_am.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(office) = changes.office {
            teacher_am.office = ActiveValue::Set(Some(office));
        }

        let teacher = teacher_am.update(self.db).await?;

        Ok(Some(teacher))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Teacher::find().count(self.db).await
    }

    pub async fn delete(&self, teacher_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Teacher::delete_by_id(teacher_id)
            .exec(self.db)
            .await
    }
}
