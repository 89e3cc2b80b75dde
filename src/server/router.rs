//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered with its utoipa specification; the collected document is
//! served by Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Declares the `Authorization: Bearer <username>:<id>` scheme used by protected routes
struct BearerToken;

impl Modify for BearerToken {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState { db, files });
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Registrar", description = "Academic administration API"),
        modifiers(&BearerToken),
        security(("bearer" = [])),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Login and the authenticated user"),
            (name = controller::user::USER_TAG, description = "User administration"),
            (name = controller::student::STUDENT_TAG, description = "Student profiles"),
            (name = controller::teacher::TEACHER_TAG, description = "Teacher profiles"),
            (name = controller::course::COURSE_TAG, description = "Course catalogue"),
            (name = controller::enrollment::ENROLLMENT_TAG, description = "Enrollment engine"),
            (name = controller::grade::GRADE_TAG, description = "Grade engine"),
            (name = controller::assignment::ASSIGNMENT_TAG, description = "Assignments and submissions"),
            (name = controller::material::MATERIAL_TAG, description = "Course materials"),
            (name = controller::notification::NOTIFICATION_TAG, description = "In-app notifications"),
            (name = controller::admin::ADMIN_TAG, description = "System settings, statistics and imports"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::me))
        .routes(routes!(controller::auth::change_password))
        // users
        .routes(routes!(controller::user::list_users))
        .routes(routes!(controller::user::create_user))
        .routes(routes!(controller::user::update_user))
        .routes(routes!(controller::user::freeze_user))
        .routes(routes!(controller::user::unfreeze_user))
        .routes(routes!(controller::user::import_users))
        // students
        .routes(routes!(controller::student::create_student))
        .routes(routes!(controller::student::list_students))
        .routes(routes!(controller::student::get_own_student))
        .routes(routes!(controller::student::get_student))
        .routes(routes!(controller::student::get_student_by_number))
        .routes(routes!(controller::student::update_student))
        .routes(routes!(controller::student::change_student_status))
        .routes(routes!(controller::student::delete_student))
        .routes(routes!(controller::student::get_student_courses))
        .routes(routes!(controller::student::get_student_gpa))
        .routes(routes!(controller::student::get_student_submissions))
        // teachers
        .routes(routes!(controller::teacher::create_teacher))
        .routes(routes!(controller::teacher::list_teachers))
        .routes(routes!(controller::teacher::get_own_teacher))
        .routes(routes!(controller::teacher::get_teacher))
        .routes(routes!(controller::teacher::get_teacher_by_employee_number))
        .routes(routes!(controller::teacher::update_teacher))
        .routes(routes!(controller::teacher::delete_teacher))
        .routes(routes!(controller::teacher::get_teacher_courses))
        // courses
        .routes(routes!(controller::course::create_course))
        .routes(routes!(controller::course::list_courses))
        .routes(routes!(controller::course::get_course))
        .routes(routes!(controller::course::get_course_by_code))
        .routes(routes!(controller::course::update_course))
        .routes(routes!(controller::course::activate_course))
        .routes(routes!(controller::course::deactivate_course))
        .routes(routes!(controller::course::delete_course))
        .routes(routes!(controller::course::get_course_capacity))
        .routes(routes!(controller::course::get_course_students))
        // enrollments
        .routes(routes!(controller::enrollment::enroll))
        .routes(routes!(controller::enrollment::withdraw))
        .routes(routes!(controller::enrollment::get_student_enrollments))
        .routes(routes!(controller::enrollment::get_course_enrollments))
        // grades
        .routes(routes!(controller::grade::record_grade))
        .routes(routes!(controller::grade::update_grade))
        .routes(routes!(controller::grade::delete_grade))
        .routes(routes!(controller::grade::get_student_grades))
        .routes(routes!(controller::grade::get_course_grades))
        .routes(routes!(controller::grade::get_course_statistics))
        .routes(routes!(controller::grade::import_grades))
        // assignments
        .routes(routes!(controller::assignment::create_assignment))
        .routes(routes!(controller::assignment::get_course_assignments))
        .routes(routes!(controller::assignment::get_assignment))
        .routes(routes!(controller::assignment::update_assignment))
        .routes(routes!(controller::assignment::delete_assignment))
        .routes(routes!(controller::assignment::submit_assignment))
        .routes(routes!(controller::assignment::submit_assignment_file))
        .routes(routes!(controller::assignment::get_assignment_submissions))
        .routes(routes!(controller::assignment::grade_submission))
        // materials
        .routes(routes!(controller::material::upload_material))
        .routes(routes!(controller::material::get_course_materials))
        .routes(routes!(controller::material::get_material))
        .routes(routes!(controller::material::download_material))
        .routes(routes!(controller::material::delete_material))
        // notifications
        .routes(routes!(controller::notification::list_notifications))
        .routes(routes!(controller::notification::unread_count))
        .routes(routes!(controller::notification::mark_read))
        .routes(routes!(controller::notification::mark_all_read))
        .routes(routes!(controller::notification::delete_notification))
        // admin
        .routes(routes!(controller::admin::get_stats))
        .routes(routes!(controller::admin::get_config))
        .routes(routes!(controller::admin::update_config))
        .routes(routes!(controller::admin::set_semester))
        .routes(routes!(controller::admin::toggle_enrollment))
        .routes(routes!(controller::admin::list_all_courses))
        .routes(routes!(controller::admin::import_courses))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
