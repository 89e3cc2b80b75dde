//! Tests for CSV imports of users and courses.

use entity::user::UserRole;
use registrar::{
    model::{course::CourseListParams, user::UserListParams},
    server::service::{
        course::CourseService, import::ImportService, system::SystemService, user::UserService,
    },
};

use super::*;

/// Expect valid rows to be created, bad rows reported by row number and blank rows skipped
#[tokio::test]
async fn imports_users() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let body = "username,email,password,full_name,role\n\
                carol,carol@example.edu,secret,Carol Lee,teacher\n\
                dave,dave@example.edu,,Dave,\n\
                erin,erin@example.edu,secret,,wizard\n\
                carol,other@example.edu,secret,,\n\
                ,,,,\n\
                frank,frank@example.edu,secret,,\n";

    let result = ImportService::new(&test.db)
        .import_users(body)
        .await
        .unwrap();

    assert_eq!(result.success, 2);
    assert_eq!(result.failed, 3);
    assert_eq!(
        result.errors,
        vec![
            "Row 3: password is missing",
            "Row 4: unknown role: wizard",
            "Row 5: username already exists",
        ]
    );

    let service = UserService::new(&test.db);
    let teachers = service
        .list(UserListParams {
            role: Some(UserRole::Teacher),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].full_name, "Carol Lee");

    let students = service
        .list(UserListParams {
            role: Some(UserRole::Student),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].username, "frank");
    assert_eq!(students[0].full_name, "frank");

    Ok(())
}

/// Expect courses to resolve their teacher by username and fill in defaults
#[tokio::test]
async fn imports_courses_with_defaults() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, first) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, named) = test.people().insert_teacher("jpink", "T002").await?;
    SystemService::new(&test.db)
        .set_semester("2025 Fall")
        .await
        .unwrap();

    let body = "code,name,credits,description,semester,teacher_username\n\
                CS101,Intro,4,Basics,2025 Spring,jpink\n\
                CS102,Data Structures,,,,nobody\n\
                CS103,Networks,many,,,\n\
                CS101,Duplicate,3,,,\n";

    let result = ImportService::new(&test.db)
        .import_courses(body)
        .await
        .unwrap();

    assert_eq!(result.success, 2);
    assert_eq!(
        result.errors,
        vec![
            "Row 4: Invalid credits: many",
            "Row 5: course code already exists"
        ]
    );

    let courses = CourseService::new(&test.db)
        .list(CourseListParams::default())
        .await
        .unwrap();
    assert_eq!(courses.len(), 2);

    let intro = &courses[0];
    assert_eq!(intro.course_code, "CS101");
    assert_eq!(intro.teacher_id, named.id);
    assert_eq!(intro.credits, 4.0);
    assert_eq!(intro.semester, "2025 Spring");
    assert_eq!(intro.capacity, 100);

    let fallback = &courses[1];
    assert_eq!(fallback.teacher_id, first.id);
    assert_eq!(fallback.credits, 3.0);
    assert_eq!(fallback.semester, "2025 Fall");

    Ok(())
}

/// Expect every course row to fail when no teacher exists at all
#[tokio::test]
async fn course_import_without_teachers_fails_rows() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let result = ImportService::new(&test.db)
        .import_courses("code,name\nCS101,Intro\nCS102,Algorithms\n")
        .await
        .unwrap();

    assert_eq!(result.success, 0);
    assert_eq!(result.failed, 2);
    assert_eq!(
        result.errors,
        vec!["Row 2: No valid teacher found", "Row 3: No valid teacher found"]
    );

    Ok(())
}
