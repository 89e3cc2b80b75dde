//! Bulk CSV imports of users and courses.
//!
//! Every import reads a header row followed by data rows. Rows are numbered as a spreadsheet
//! would show them, so the first data row is row 2. A failing row is tallied as
//! `Row N: <reason>` and never aborts the batch.

use csv::{ReaderBuilder, StringRecord, Trim};
use entity::user::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::{api::ImportResultDto, course::CreateCourseDto, user::CreateUserDto},
    server::{
        data::{teacher::TeacherRepository, user::UserRepository},
        error::Error,
        service::{course::CourseService, system::load_settings, user::UserService},
    },
};

pub const DEFAULT_CREDITS: f64 = 3.0;
pub const DEFAULT_CAPACITY: i32 = 100;

/// Reader over a CSV body with a header row; short rows are allowed
pub(crate) fn csv_reader(body: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes())
}

/// Non-empty field at `index`
pub(crate) fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|value| !value.is_empty())
}

/// Running success and failure counts of an import
#[derive(Default)]
pub(crate) struct ImportTally {
    pub success: u32,
    pub failed: u32,
    errors: Vec<String>,
}

impl ImportTally {
    pub fn succeed(&mut self) {
        self.success += 1;
    }

    pub fn fail(&mut self, row: usize, reason: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("Row {}: {}", row, reason));
    }
}

impl From<ImportTally> for ImportResultDto {
    fn from(tally: ImportTally) -> Self {
        Self {
            success: tally.success,
            failed: tally.failed,
            errors: tally.errors,
        }
    }
}

fn parse_role(raw: Option<&str>) -> Option<UserRole> {
    match raw.map(str::to_lowercase).as_deref() {
        None => Some(UserRole::Student),
        Some("student") => Some(UserRole::Student),
        Some("teacher") => Some(UserRole::Teacher),
        Some("admin") => Some(UserRole::Admin),
        Some(_) => None,
    }
}

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates users from rows of `username, email, password, full_name, role`.
    ///
    /// Rows without a username or email are skipped. The role defaults to student when the
    /// column is empty; an unrecognised role or a missing password fails the row.
    pub async fn import_users(&self, body: &str) -> Result<ImportResultDto, Error> {
        let user_service = UserService::new(self.db);
        let mut tally = ImportTally::default();

        for (row, record) in csv_reader(body).records().enumerate() {
            let row = row + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tally.fail(row, format!("malformed row: {}", e));
                    continue;
                }
            };

            let (Some(username), Some(email)) = (field(&record, 0), field(&record, 1)) else {
                continue;
            };

            let Some(password) = field(&record, 2) else {
                tally.fail(row, "password is missing");
                continue;
            };

            let Some(role) = parse_role(field(&record, 4)) else {
                tally.fail(
                    row,
                    format!("unknown role: {}", field(&record, 4).unwrap_or_default()),
                );
                continue;
            };

            let user = CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                full_name: field(&record, 3).unwrap_or(username).to_string(),
                role,
            };

            match user_service.create(user).await {
                Ok(_) => tally.succeed(),
                Err(Error::DomainError(e)) => tally.fail(row, e),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Imported users: {} succeeded, {} failed",
            tally.success,
            tally.failed
        );

        Ok(tally.into())
    }

    /// Creates courses from rows of `code, name, credits, description, semester, teacher_username`.
    ///
    /// Rows without a code or name are skipped. Credits default to 3.0, the semester to the
    /// configured current semester and capacity to 100. The course goes to the named teacher,
    /// or to the first teacher on record when the name does not resolve.
    pub async fn import_courses(&self, body: &str) -> Result<ImportResultDto, Error> {
        let course_service = CourseService::new(self.db);
        let user_repo = UserRepository::new(self.db);
        let teacher_repo = TeacherRepository::new(self.db);

        let current_semester = load_settings(self.db).await?.current_semester;
        let default_teacher = teacher_repo.first().await?;
        let mut tally = ImportTally::default();

        for (row, record) in csv_reader(body).records().enumerate() {
            let row = row + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tally.fail(row, format!("malformed row: {}", e));
                    continue;
                }
            };

            let (Some(code), Some(name)) = (field(&record, 0), field(&record, 1)) else {
                continue;
            };

            let credits = match field(&record, 2) {
                None => DEFAULT_CREDITS,
                Some(raw) => match raw.parse::<f64>() {
                    Ok(credits) => credits,
                    Err(_) => {
                        tally.fail(row, format!("Invalid credits: {}", raw));
                        continue;
                    }
                },
            };

            let mut teacher_id = None;
            if let Some(teacher_username) = field(&record, 5) {
                if let Some(user) = user_repo.find_by_username(teacher_username).await? {
                    if user.role == UserRole::Teacher {
                        teacher_id = teacher_repo.find_by_user_id(user.id).await?.map(|t| t.id);
                    }
                }
            }

            let Some(teacher_id) = teacher_id.or(default_teacher.as_ref().map(|t| t.id)) else {
                tally.fail(row, "No valid teacher found");
                continue;
            };

            let course = CreateCourseDto {
                course_code: code.to_string(),
                name: name.to_string(),
                description: field(&record, 3).map(str::to_string),
                teacher_id,
                credits,
                capacity: DEFAULT_CAPACITY,
                schedule: None,
                location: None,
                semester: field(&record, 4)
                    .map(str::to_string)
                    .unwrap_or_else(|| current_semester.clone()),
            };

            match course_service.create(course).await {
                Ok(_) => tally.succeed(),
                Err(Error::DomainError(e)) => tally.fail(row, e),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Imported courses: {} succeeded, {} failed",
            tally.success,
            tally.failed
        );

        Ok(tally.into())
    }
}
