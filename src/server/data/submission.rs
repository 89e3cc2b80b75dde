use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

pub struct SubmissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubmissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an ungraded submission stamped now
    pub async fn create(
        &self,
        assignment_id: i32,
        student_id: i32,
        content: Option<String>,
        file_path: Option<String>,
    ) -> Result<entity::submission::Model, DbErr> {
        let submission = entity::submission::ActiveModel {
            assignment_id: ActiveValue::Set(assignment_id),
            student_id: ActiveValue::Set(student_id),
            content: ActiveValue::Set(content),
            file_path: ActiveValue::Set(file_path),
            submitted_at: ActiveValue::Set(Utc::now().naive_utc()),
            score: ActiveValue::Set(None),
            feedback: ActiveValue::Set(None),
            graded_at: ActiveValue::Set(None),
            ..Default::default()
        };

        submission.insert(self.db).await
    }

    pub async fn get(
        &self,
        submission_id: i32,
    ) -> Result<Option<entity::submission::Model>, DbErr> {
        entity::prelude::Submission::find_by_id(submission_id)
            .one(self.db)
            .await
    }

    pub async fn find(
        &self,
        assignment_id: i32,
        student_id: i32,
    ) -> Result<Option<entity::submission::Model>, DbErr> {
        entity::prelude::Submission::find()
            .filter(entity::submission::Column::AssignmentId.eq(assignment_id))
            .filter(entity::submission::Column::StudentId.eq(student_id))
            .one(self.db)
            .await
    }

    /// Replaces the content of an existing submission and re-stamps `submitted_at`
    ///
    /// The attachment is only replaced when a new one is given. Any previous score and
    /// feedback are kept.
    pub async fn resubmit(
        &self,
        submission: entity::submission::Model,
        content: Option<String>,
        file_path: Option<String>,
    ) -> Result<entity::submission::Model, DbErr> {
        let mut submission_am = submission.into_active_model();
        submission_am.content = ActiveValue::Set(content);
        if let Some(file_path) = file_path {
            submission_am.file_path = ActiveValue::Set(Some(file_path));
        }
        submission_am.submitted_at = ActiveValue::Set(Utc::now().naive_utc());

        submission_am.update(self.db).await
    }

    pub async fn grade(
        &self,
        submission: entity::submission::Model,
        score: f64,
        feedback: Option<String>,
    ) -> Result<entity::submission::Model, DbErr> {
        let mut submission_am = submission.into_active_model();
        submission_am.score = ActiveValue::Set(Some(score));
        submission_am.feedback = ActiveValue::Set(feedback);
        submission_am.graded_at = ActiveValue::Set(Some(Utc::now().naive_utc()));

        submission_am.update(self.db).await
    }

    pub async fn list_for_assignment(
        &self,
        assignment_id: i32,
        ungraded_only: bool,
    ) -> Result<Vec<entity::submission::Model>, DbErr> {
        let condition = Condition::all()
            .add(entity::submission::Column::AssignmentId.eq(assignment_id))
            .add_option(ungraded_only.then(|| entity::submission::Column::Score.is_null()));

        entity::prelude::Submission::find()
            .filter(condition)
            .order_by_asc(entity::submission::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<entity::submission::Model>, DbErr> {
        entity::prelude::Submission::find()
            .filter(entity::submission::Column::StudentId.eq(student_id))
            .order_by_asc(entity::submission::Column::Id)
            .all(self.db)
            .await
    }

    /// Attachment paths of the submissions matching `condition`
    async fn file_paths(&self, condition: Condition) -> Result<Vec<String>, DbErr> {
        entity::prelude::Submission::find()
            .select_only()
            .column(entity::submission::Column::FilePath)
            .filter(condition.add(entity::submission::Column::FilePath.is_not_null()))
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    pub async fn file_paths_for_assignments(
        &self,
        assignment_ids: Vec<i32>,
    ) -> Result<Vec<String>, DbErr> {
        self.file_paths(
            Condition::all().add(entity::submission::Column::AssignmentId.is_in(assignment_ids)),
        )
        .await
    }

    pub async fn file_paths_for_student(&self, student_id: i32) -> Result<Vec<String>, DbErr> {
        self.file_paths(Condition::all().add(entity::submission::Column::StudentId.eq(student_id)))
            .await
    }

    pub async fn delete_for_assignments(
        &self,
        assignment_ids: Vec<i32>,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Submission::delete_many()
            .filter(entity::submission::Column::AssignmentId.is_in(assignment_ids))
            .exec(self.db)
            .await
    }

    pub async fn delete_for_student(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Submission::delete_many()
            .filter(entity::submission::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await
    }
}
